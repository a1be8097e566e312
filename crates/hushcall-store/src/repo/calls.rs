use crate::error::{Result, StoreError};
use hushcall_core::domain::CallKind;
use rusqlite::{params, Connection};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallNew {
    pub number: String,
    /// Canonical form of `number`; calls without one never match a lookup.
    pub e164: Option<String>,
    pub kind: CallKind,
    pub occurred_at_ms: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRecord {
    pub id: i64,
    pub number: String,
    pub e164: Option<String>,
    pub kind: CallKind,
    pub occurred_at_ms: i64,
}

pub struct CallLogRepo<'a> {
    conn: &'a Connection,
}

impl<'a> CallLogRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn record(&self, call: CallNew) -> Result<CallRecord> {
        self.conn.execute(
            "INSERT INTO calls (number, e164, kind, occurred_at_ms) VALUES (?1, ?2, ?3, ?4);",
            params![call.number, call.e164, call.kind.as_str(), call.occurred_at_ms],
        )?;
        Ok(CallRecord {
            id: self.conn.last_insert_rowid(),
            number: call.number,
            e164: call.e164,
            kind: call.kind,
            occurred_at_ms: call.occurred_at_ms,
        })
    }

    pub fn has_outgoing(&self, e164: &str) -> Result<bool> {
        let found: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM calls WHERE e164 = ?1 AND kind = ?2);",
            params![e164, CallKind::Outgoing.as_str()],
            |row| row.get(0),
        )?;
        Ok(found)
    }

    /// Blocked calls for `e164` with a timestamp strictly after `since_ms`.
    pub fn count_blocked_since(&self, e164: &str, since_ms: i64) -> Result<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM calls WHERE e164 = ?1 AND kind = ?2 AND occurred_at_ms > ?3;",
            params![e164, CallKind::Blocked.as_str(), since_ms],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    pub fn list_recent(&self, limit: i64) -> Result<Vec<CallRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, number, e164, kind, occurred_at_ms FROM calls
             ORDER BY occurred_at_ms DESC, id DESC LIMIT ?1;",
        )?;
        let mut rows = stmt.query([limit])?;
        let mut calls = Vec::new();
        while let Some(row) = rows.next()? {
            let kind_raw: String = row.get(3)?;
            let kind = kind_raw
                .parse::<CallKind>()
                .map_err(|_| StoreError::CorruptRow {
                    table: "calls",
                    value: kind_raw.clone(),
                })?;
            calls.push(CallRecord {
                id: row.get(0)?,
                number: row.get(1)?,
                e164: row.get(2)?,
                kind,
                occurred_at_ms: row.get(4)?,
            });
        }
        Ok(calls)
    }
}
