use crate::error::{Result, StoreError};
use hushcall_core::domain::{AllowEntryId, AllowListEntry};
use hushcall_core::CoreError;
use rusqlite::{params, Connection};
use std::str::FromStr;

const SELECT_COLUMNS: &str = "SELECT id, phone_number, is_active, created_at FROM allow_numbers";

pub struct AllowListRepo<'a> {
    conn: &'a Connection,
}

impl<'a> AllowListRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Stores `phone_number` as entered (trimmed); it is parsed at screening
    /// time, not here.
    pub fn add(&self, now: i64, phone_number: &str) -> Result<AllowListEntry> {
        let trimmed = phone_number.trim();
        if trimmed.is_empty() {
            return Err(CoreError::EmptyPhoneNumber.into());
        }

        let entry = AllowListEntry {
            id: AllowEntryId::new(),
            phone_number: trimmed.to_string(),
            is_active: true,
            created_at: now,
        };
        self.conn.execute(
            "INSERT INTO allow_numbers (id, phone_number, is_active, created_at)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                entry.id.to_string(),
                entry.phone_number,
                entry.is_active,
                entry.created_at
            ],
        )?;
        Ok(entry)
    }

    pub fn get(&self, id: AllowEntryId) -> Result<Option<AllowListEntry>> {
        let sql = format!("{} WHERE id = ?1;", SELECT_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(entry_from_row(row)?)),
            None => Ok(None),
        }
    }

    pub fn list(&self, include_inactive: bool) -> Result<Vec<AllowListEntry>> {
        let sql = if include_inactive {
            format!("{} ORDER BY created_at ASC, id ASC;", SELECT_COLUMNS)
        } else {
            format!(
                "{} WHERE is_active = 1 ORDER BY created_at ASC, id ASC;",
                SELECT_COLUMNS
            )
        };
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(entry_from_row(row)?);
        }
        Ok(entries)
    }

    pub fn list_active(&self) -> Result<Vec<AllowListEntry>> {
        self.list(false)
    }

    pub fn set_active(&self, id: AllowEntryId, is_active: bool) -> Result<AllowListEntry> {
        let updated = self.conn.execute(
            "UPDATE allow_numbers SET is_active = ?1 WHERE id = ?2;",
            params![is_active, id.to_string()],
        )?;
        if updated == 0 {
            return Err(StoreError::not_found("allow-list entry", id));
        }
        self.get(id)?
            .ok_or_else(|| StoreError::not_found("allow-list entry", id))
    }

    pub fn delete(&self, id: AllowEntryId) -> Result<()> {
        let removed = self.conn.execute(
            "DELETE FROM allow_numbers WHERE id = ?1;",
            [id.to_string()],
        )?;
        if removed == 0 {
            return Err(StoreError::not_found("allow-list entry", id));
        }
        Ok(())
    }
}

fn entry_from_row(row: &rusqlite::Row<'_>) -> Result<AllowListEntry> {
    let id_str: String = row.get(0)?;
    let id = AllowEntryId::from_str(&id_str).map_err(|_| StoreError::CorruptRow {
        table: "allow_numbers",
        value: id_str.clone(),
    })?;
    Ok(AllowListEntry {
        id,
        phone_number: row.get(1)?,
        is_active: row.get(2)?,
        created_at: row.get(3)?,
    })
}
