use crate::error::Result;
use oko_core::domain::SearchKind;
use rusqlite::{params, Connection};

#[derive(Debug, Clone)]
pub struct SearchRecord {
    pub user_email: String,
    pub kind: SearchKind,
    pub query: String,
    pub created_at: i64,
}

pub struct SearchesRepo<'a> {
    conn: &'a Connection,
}

impl<'a> SearchesRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn record(&self, now_utc: i64, user_email: &str, kind: SearchKind, query: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO searches (user_email, kind, query, created_at)
             VALUES (?1, ?2, ?3, ?4);",
            params![user_email, kind.token(), query, now_utc],
        )?;
        Ok(())
    }

    /// Timestamps of one user's searches at or after `since`, newest last.
    /// Feeds the sliding-window limit calculator.
    pub fn timestamps_since(&self, user_email: &str, since: i64) -> Result<Vec<i64>> {
        let mut stmt = self.conn.prepare(
            "SELECT created_at FROM searches
             WHERE user_email = ?1 AND created_at >= ?2
             ORDER BY created_at ASC;",
        )?;
        let mut rows = stmt.query(params![user_email, since])?;
        let mut timestamps = Vec::new();
        while let Some(row) = rows.next()? {
            timestamps.push(row.get(0)?);
        }
        Ok(timestamps)
    }

    pub fn list_for_user(&self, user_email: &str, limit: i64) -> Result<Vec<SearchRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT user_email, kind, query, created_at FROM searches
             WHERE user_email = ?1
             ORDER BY created_at DESC
             LIMIT ?2;",
        )?;
        let mut rows = stmt.query(params![user_email, limit])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let kind: String = row.get(1)?;
            records.push(SearchRecord {
                user_email: row.get(0)?,
                kind: SearchKind::parse(&kind),
                query: row.get(2)?,
                created_at: row.get(3)?,
            });
        }
        Ok(records)
    }
}
