use crate::error::{Result, StoreError};
use hushcall_core::domain::contact::normalize_display_name;
use hushcall_core::domain::{Contact, ContactId, ContactPhone};
use rusqlite::{params, Connection};
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct ContactNew {
    pub display_name: String,
    pub phones: Vec<ContactPhone>,
}

pub struct ContactsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> ContactsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn create(&self, now: i64, new: ContactNew) -> Result<Contact> {
        let display_name = normalize_display_name(&new.display_name)?;
        let contact = Contact {
            id: ContactId::new(),
            display_name,
            phones: new.phones,
            created_at: now,
        };

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO contacts (id, display_name, created_at) VALUES (?1, ?2, ?3);",
            params![contact.id.to_string(), contact.display_name, contact.created_at],
        )?;
        for phone in &contact.phones {
            tx.execute(
                "INSERT OR IGNORE INTO contact_phones (contact_id, raw, e164) VALUES (?1, ?2, ?3);",
                params![contact.id.to_string(), phone.raw, phone.e164],
            )?;
        }
        tx.commit()?;

        Ok(contact)
    }

    pub fn get(&self, id: ContactId) -> Result<Option<Contact>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, display_name, created_at FROM contacts WHERE id = ?1;")?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => {
                let mut contact = contact_from_row(row)?;
                contact.phones = self.phones_for(&contact.id)?;
                Ok(Some(contact))
            }
            None => Ok(None),
        }
    }

    pub fn list(&self) -> Result<Vec<Contact>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, display_name, created_at FROM contacts
             ORDER BY display_name COLLATE NOCASE ASC, id ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut contacts = Vec::new();
        while let Some(row) = rows.next()? {
            contacts.push(contact_from_row(row)?);
        }
        for contact in &mut contacts {
            contact.phones = self.phones_for(&contact.id)?;
        }
        Ok(contacts)
    }

    pub fn delete(&self, id: ContactId) -> Result<()> {
        let removed = self
            .conn
            .execute("DELETE FROM contacts WHERE id = ?1;", [id.to_string()])?;
        if removed == 0 {
            return Err(StoreError::not_found("contact", id));
        }
        Ok(())
    }

    /// Phone-lookup index: any contact phone whose canonical form is `e164`.
    pub fn exists_e164(&self, e164: &str) -> Result<bool> {
        let found: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM contact_phones WHERE e164 = ?1);",
            [e164],
            |row| row.get(0),
        )?;
        Ok(found)
    }

    fn phones_for(&self, id: &ContactId) -> Result<Vec<ContactPhone>> {
        let mut stmt = self.conn.prepare(
            "SELECT raw, e164 FROM contact_phones WHERE contact_id = ?1 ORDER BY raw ASC;",
        )?;
        let mut rows = stmt.query([id.to_string()])?;
        let mut phones = Vec::new();
        while let Some(row) = rows.next()? {
            phones.push(ContactPhone {
                raw: row.get(0)?,
                e164: row.get(1)?,
            });
        }
        Ok(phones)
    }
}

fn contact_from_row(row: &rusqlite::Row<'_>) -> Result<Contact> {
    let id_str: String = row.get(0)?;
    let id = ContactId::from_str(&id_str).map_err(|_| StoreError::CorruptRow {
        table: "contacts",
        value: id_str.clone(),
    })?;
    Ok(Contact {
        id,
        display_name: row.get(1)?,
        phones: Vec::new(),
        created_at: row.get(2)?,
    })
}
