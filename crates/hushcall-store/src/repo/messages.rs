use crate::error::{Result, StoreError};
use hushcall_core::domain::MessageFolder;
use rusqlite::{params, Connection};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageNew {
    pub address: String,
    pub folder: MessageFolder,
    pub occurred_at_ms: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRecord {
    pub id: i64,
    pub address: String,
    pub folder: MessageFolder,
    pub occurred_at_ms: i64,
}

/// Message log. Addresses are stored and matched verbatim.
pub struct MessagesRepo<'a> {
    conn: &'a Connection,
}

impl<'a> MessagesRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn record(&self, message: MessageNew) -> Result<MessageRecord> {
        self.conn.execute(
            "INSERT INTO messages (address, folder, occurred_at_ms) VALUES (?1, ?2, ?3);",
            params![
                message.address,
                message.folder.as_str(),
                message.occurred_at_ms
            ],
        )?;
        Ok(MessageRecord {
            id: self.conn.last_insert_rowid(),
            address: message.address,
            folder: message.folder,
            occurred_at_ms: message.occurred_at_ms,
        })
    }

    pub fn exists(&self, folder: MessageFolder, address: &str) -> Result<bool> {
        let found: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM messages WHERE folder = ?1 AND address = ?2);",
            params![folder.as_str(), address],
            |row| row.get(0),
        )?;
        Ok(found)
    }

    pub fn list_recent(&self, limit: i64) -> Result<Vec<MessageRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, address, folder, occurred_at_ms FROM messages
             ORDER BY occurred_at_ms DESC, id DESC LIMIT ?1;",
        )?;
        let mut rows = stmt.query([limit])?;
        let mut messages = Vec::new();
        while let Some(row) = rows.next()? {
            let folder_raw: String = row.get(2)?;
            let folder = folder_raw
                .parse::<MessageFolder>()
                .map_err(|_| StoreError::CorruptRow {
                    table: "messages",
                    value: folder_raw.clone(),
                })?;
            messages.push(MessageRecord {
                id: row.get(0)?,
                address: row.get(1)?,
                folder,
                occurred_at_ms: row.get(3)?,
            });
        }
        Ok(messages)
    }
}
