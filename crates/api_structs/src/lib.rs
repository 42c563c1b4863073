mod entry;
mod notification;
mod status;

pub mod dtos {
    pub use crate::entry::dtos::*;
}

pub use crate::entry::api::*;
pub use crate::notification::api::*;
pub use crate::status::api::*;
