use super::IEntryRepo;
use anyhow::anyhow;
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use std::collections::HashMap;
use todo_schedule_domain::{
    Entry, EntryQuery, EntryType, Priority, Reminder, ReminderKind, Status, ID,
};

pub struct PostgresEntryRepo {
    pool: PgPool,
}

impl PostgresEntryRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct EntryRaw {
    entry_uid: i64,
    entry_type: String,
    title: String,
    description: Option<String>,
    priority: String,
    status: String,
    start_at: Option<i64>,
    end_at: Option<i64>,
    due_at: Option<i64>,
    location_text: Option<String>,
    tags: Vec<String>,
    created: i64,
    updated: i64,
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_uid: i64,
    entry_uid: i64,
    remind_at: i64,
    offset_minutes: Option<i64>,
}

impl From<ReminderRaw> for Reminder {
    fn from(r: ReminderRaw) -> Self {
        Reminder {
            id: r.reminder_uid,
            entry_id: ID::new(r.entry_uid),
            remind_at: r.remind_at,
            kind: match r.offset_minutes {
                Some(offset_minutes) => ReminderKind::OffsetBased { offset_minutes },
                None => ReminderKind::AdHoc,
            },
        }
    }
}

impl EntryRaw {
    fn into_entry(self, reminders: Vec<Reminder>) -> anyhow::Result<Entry> {
        let entry_type = EntryType::parse(&self.entry_type)
            .ok_or_else(|| anyhow!("Unknown entry type: {}", self.entry_type))?;
        let priority = Priority::parse(&self.priority)
            .ok_or_else(|| anyhow!("Unknown priority: {}", self.priority))?;
        let status = Status::parse(&self.status)
            .ok_or_else(|| anyhow!("Unknown status: {}", self.status))?;
        Ok(Entry {
            id: ID::new(self.entry_uid),
            entry_type,
            title: self.title,
            description: self.description,
            priority,
            status,
            start_at: self.start_at,
            end_at: self.end_at,
            due_at: self.due_at,
            location_text: self.location_text,
            tags: self.tags,
            reminders,
            created: self.created,
            updated: self.updated,
        })
    }
}

const ORDER_FOR_LISTING: &str = r#"
    ORDER BY
        COALESCE(e.due_at, e.start_at, 9223372036854775807) ASC,
        CASE e.priority WHEN 'HIGH' THEN 1 WHEN 'MED' THEN 2 ELSE 3 END,
        e.created DESC
"#;

impl PostgresEntryRepo {
    /// Loads the reminders of the given entries, keeping the order of `entries`
    async fn with_reminders(&self, entries: Vec<EntryRaw>) -> anyhow::Result<Vec<Entry>> {
        let entry_ids = entries.iter().map(|e| e.entry_uid).collect::<Vec<_>>();
        let reminders: Vec<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.entry_uid = ANY($1)
            ORDER BY r.remind_at ASC
            "#,
        )
        .bind(&entry_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut reminders_by_entry: HashMap<i64, Vec<Reminder>> = HashMap::new();
        for reminder in reminders {
            reminders_by_entry
                .entry(reminder.entry_uid)
                .or_default()
                .push(reminder.into());
        }

        entries
            .into_iter()
            .map(|e| {
                let reminders = reminders_by_entry.remove(&e.entry_uid).unwrap_or_default();
                e.into_entry(reminders)
            })
            .collect()
    }

    async fn replace_reminders(
        tx: &mut Transaction<'_, Postgres>,
        e: &Entry,
    ) -> anyhow::Result<Vec<Reminder>> {
        sqlx::query("DELETE FROM reminders WHERE entry_uid = $1")
            .bind(e.id.inner())
            .execute(&mut **tx)
            .await?;

        let mut reminders = Vec::with_capacity(e.reminders.len());
        for reminder in &e.reminders {
            let raw: ReminderRaw = sqlx::query_as(
                r#"
                INSERT INTO reminders
                (entry_uid, remind_at, offset_minutes)
                VALUES($1, $2, $3)
                RETURNING *
                "#,
            )
            .bind(e.id.inner())
            .bind(reminder.remind_at)
            .bind(reminder.offset_minutes())
            .fetch_one(&mut **tx)
            .await?;
            reminders.push(raw.into());
        }
        Ok(reminders)
    }
}

#[async_trait::async_trait]
impl IEntryRepo for PostgresEntryRepo {
    async fn upsert(&self, e: &Entry) -> anyhow::Result<Entry> {
        let mut tx = self.pool.begin().await?;

        let query = if e.is_persisted() {
            sqlx::query_scalar(
                r#"
                INSERT INTO entries
                (entry_uid, entry_type, title, description, priority, status, start_at,
                 end_at, due_at, location_text, tags, created, updated)
                VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
                ON CONFLICT (entry_uid) DO UPDATE SET
                    entry_type = EXCLUDED.entry_type,
                    title = EXCLUDED.title,
                    description = EXCLUDED.description,
                    priority = EXCLUDED.priority,
                    status = EXCLUDED.status,
                    start_at = EXCLUDED.start_at,
                    end_at = EXCLUDED.end_at,
                    due_at = EXCLUDED.due_at,
                    location_text = EXCLUDED.location_text,
                    tags = EXCLUDED.tags,
                    updated = EXCLUDED.updated
                RETURNING entry_uid
                "#,
            )
            .bind(e.id.inner())
        } else {
            sqlx::query_scalar(
                r#"
                INSERT INTO entries
                (entry_type, title, description, priority, status, start_at,
                 end_at, due_at, location_text, tags, created, updated)
                VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
                RETURNING entry_uid
                "#,
            )
        };
        let entry_uid: i64 = query
            .bind(e.entry_type.as_str())
            .bind(&e.title)
            .bind(&e.description)
            .bind(e.priority.as_str())
            .bind(e.status.as_str())
            .bind(e.start_at)
            .bind(e.end_at)
            .bind(e.due_at)
            .bind(&e.location_text)
            .bind(&e.tags)
            .bind(e.created)
            .bind(e.updated)
            .fetch_one(&mut *tx)
            .await?;

        let mut saved = e.clone();
        saved.assign_id(ID::new(entry_uid));
        saved.reminders = Self::replace_reminders(&mut tx, &saved).await?;

        tx.commit().await?;
        Ok(saved)
    }

    async fn find(&self, entry_id: ID) -> anyhow::Result<Option<Entry>> {
        let raw: Option<EntryRaw> = sqlx::query_as(
            r#"
            SELECT * FROM entries AS e
            WHERE e.entry_uid = $1
            "#,
        )
        .bind(entry_id.inner())
        .fetch_optional(&self.pool)
        .await?;

        match raw {
            Some(raw) => Ok(self.with_reminders(vec![raw]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn update_status(
        &self,
        entry_id: ID,
        status: Status,
        updated: i64,
    ) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE entries
            SET status = $2, updated = $3
            WHERE entry_uid = $1
            "#,
        )
        .bind(entry_id.inner())
        .bind(status.as_str())
        .bind(updated)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete(&self, entry_id: ID) -> anyhow::Result<Option<Entry>> {
        let entry = match self.find(entry_id).await? {
            Some(e) => e,
            None => return Ok(None),
        };
        // Reminders are removed by the foreign key cascade
        let res = sqlx::query("DELETE FROM entries WHERE entry_uid = $1")
            .bind(entry_id.inner())
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(entry))
    }

    async fn delete_all(&self) -> anyhow::Result<u64> {
        let res = sqlx::query("DELETE FROM entries")
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }

    async fn find_by_query(&self, query: &EntryQuery) -> anyhow::Result<Vec<Entry>> {
        let sql = format!(
            r#"
            SELECT * FROM entries AS e
            WHERE ($1::text IS NULL OR e.entry_type = $1)
            AND ($2::text IS NULL OR e.status = $2)
            AND ($3::text IS NULL OR e.priority = $3)
            {}
            "#,
            ORDER_FOR_LISTING
        );
        let raws: Vec<EntryRaw> = sqlx::query_as(&sql)
            .bind(query.entry_type.map(|t| t.as_str()))
            .bind(query.status.map(|s| s.as_str()))
            .bind(query.priority.map(|p| p.as_str()))
            .fetch_all(&self.pool)
            .await?;
        self.with_reminders(raws).await
    }

    async fn find_upcoming(&self, limit: usize) -> anyhow::Result<Vec<Entry>> {
        let raws: Vec<EntryRaw> = sqlx::query_as(
            r#"
            SELECT * FROM entries AS e
            WHERE e.status = 'OPEN'
            AND (e.due_at IS NOT NULL OR e.start_at IS NOT NULL)
            ORDER BY
                CASE e.priority WHEN 'HIGH' THEN 1 WHEN 'MED' THEN 2 ELSE 3 END,
                COALESCE(e.due_at, e.start_at) ASC
            LIMIT $1
            "#,
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;
        self.with_reminders(raws).await
    }

    async fn search(&self, text: &str) -> anyhow::Result<Vec<Entry>> {
        let raws: Vec<EntryRaw> = sqlx::query_as(
            r#"
            SELECT * FROM entries AS e
            WHERE strpos(lower(e.title), lower($1)) > 0
            OR strpos(lower(COALESCE(e.description, '')), lower($1)) > 0
            ORDER BY e.created DESC
            "#,
        )
        .bind(text)
        .fetch_all(&self.pool)
        .await?;
        self.with_reminders(raws).await
    }
}
