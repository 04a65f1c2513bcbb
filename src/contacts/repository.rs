//! Contact Repository
//!
//! CRUD operations and query predicates over the `contacts` and `emails` tables.
//!
//! Every mutating call runs inside its own transaction: all of its writes
//! commit together, and any error rolls them back when the transaction drops.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};
use tracing::{debug, info};

use crate::contacts::model::{
    from_millis, to_millis, Contact, ContactId, ContactRef, ContactUpdate, Email, NewContact,
};
use crate::error::{ContactError, Result};

const CONTACT_SELECT_SQL: &str =
    "SELECT id, username, first_name, last_name, created_on, updated_on FROM contacts";

// == Contact Repository ==
/// Repository bound to one explicit connection for the duration of a call.
pub struct ContactRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> ContactRepository<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }

    /// Starts a write transaction that takes the database write lock up front.
    ///
    /// A deferred transaction that upgrades from read to write fails at once
    /// when another connection holds the lock; `IMMEDIATE` waits out the busy timeout.
    fn begin_write(&mut self) -> Result<Transaction<'_>> {
        Ok(self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?)
    }

    // == Queries ==
    /// Returns every contact with its emails, ordered by id.
    pub fn list_all(&self) -> Result<Vec<Contact>> {
        let mut emails = load_all_emails(self.conn)?;

        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} ORDER BY id"))?;
        let rows = stmt
            .query_map([], ContactRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter()
            .map(|row| {
                let owned = emails.remove(&row.id).unwrap_or_default();
                row.into_contact(owned)
            })
            .collect()
    }

    pub fn find_by_username(&self, username: &str) -> Result<Option<Contact>> {
        load_contact(self.conn, &ContactRef::Username(username.to_string()))
    }

    pub fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>> {
        load_contact(self.conn, &ContactRef::Id(id))
    }

    pub fn find(&self, reference: &ContactRef) -> Result<Option<Contact>> {
        load_contact(self.conn, reference)
    }

    pub fn count_contacts(&self) -> Result<usize> {
        count(self.conn, "SELECT COUNT(*) FROM contacts")
    }

    pub fn count_emails(&self) -> Result<usize> {
        count(self.conn, "SELECT COUNT(*) FROM emails")
    }

    // == Create ==
    /// Inserts a new contact stamped with the current instant.
    pub fn create(&mut self, new: &NewContact) -> Result<Contact> {
        self.create_at(new, Utc::now())
    }

    /// Inserts a new contact with both timestamps set to `now`.
    ///
    /// Fails with `Conflict` when the username is already taken.
    pub fn create_at(&mut self, new: &NewContact, now: DateTime<Utc>) -> Result<Contact> {
        let tx = self.begin_write()?;

        if username_taken(&tx, &new.username, None)? {
            return Err(ContactError::Conflict(format!(
                "username '{}' already exists",
                new.username
            )));
        }
        let id = insert_contact(&tx, new, now)?;
        let contact = require_contact(&tx, &ContactRef::Id(id))?;

        tx.commit()?;
        info!("Created contact {} (id {})", contact.username, contact.id);
        Ok(contact)
    }

    // == Update ==
    /// Overwrites the fields present in `update` and appends its email, if any.
    ///
    /// `updated_on` is refreshed even when no field value changes.
    pub fn update(&mut self, reference: &ContactRef, update: &ContactUpdate) -> Result<Contact> {
        let tx = self.begin_write()?;

        let id = resolve_id(&tx, reference)?
            .ok_or_else(|| ContactError::NotFound(reference.to_string()))?;

        if let Some(username) = &update.username {
            if username_taken(&tx, username, Some(id))? {
                return Err(ContactError::Conflict(format!(
                    "username '{}' already exists",
                    username
                )));
            }
        }

        tx.execute(
            "UPDATE contacts
             SET username = COALESCE(?1, username),
                 first_name = COALESCE(?2, first_name),
                 last_name = COALESCE(?3, last_name),
                 updated_on = MAX(?4, created_on)
             WHERE id = ?5",
            params![
                update.username,
                update.first_name,
                update.last_name,
                to_millis(Utc::now()),
                id
            ],
        )?;

        if let Some(email) = update.email.as_deref().filter(|e| !e.is_empty()) {
            tx.execute(
                "INSERT INTO emails (email_addr, contact_id) VALUES (?1, ?2)",
                params![email, id],
            )?;
        }

        let contact = require_contact(&tx, &ContactRef::Id(id))?;
        tx.commit()?;
        info!("Updated contact {} (id {})", contact.username, contact.id);
        Ok(contact)
    }

    // == Delete ==
    /// Deletes the contact and, first, every email it owns.
    pub fn delete(&mut self, reference: &ContactRef) -> Result<bool> {
        let tx = self.begin_write()?;

        let id = resolve_id(&tx, reference)?
            .ok_or_else(|| ContactError::NotFound(reference.to_string()))?;

        let emails = tx.execute("DELETE FROM emails WHERE contact_id = ?1", params![id])?;
        let removed = tx.execute("DELETE FROM contacts WHERE id = ?1", params![id])?;

        tx.commit()?;
        info!("Deleted contact {} with {} email(s)", reference, emails);
        Ok(removed == 1)
    }

    // == Purge ==
    /// Deletes contacts created more than `age` ago, together with their emails.
    pub fn purge_older_than(&mut self, age: Duration) -> Result<usize> {
        let age = chrono::Duration::from_std(age)
            .map_err(|e| ContactError::Internal(format!("purge age out of range: {}", e)))?;
        let cutoff = Utc::now()
            .checked_sub_signed(age)
            .ok_or_else(|| ContactError::Internal("purge age out of range".to_string()))?;
        self.purge_created_before(cutoff)
    }

    /// Deletes contacts whose `created_on` is strictly before `cutoff`.
    pub fn purge_created_before(&mut self, cutoff: DateTime<Utc>) -> Result<usize> {
        let cutoff = to_millis(cutoff);
        let tx = self.begin_write()?;

        let emails = tx.execute(
            "DELETE FROM emails
             WHERE contact_id IN (SELECT id FROM contacts WHERE created_on < ?1)",
            params![cutoff],
        )?;
        let contacts = tx.execute(
            "DELETE FROM contacts WHERE created_on < ?1",
            params![cutoff],
        )?;

        tx.commit()?;
        debug!("Purged {} contact(s) and {} email(s)", contacts, emails);
        Ok(contacts)
    }

    // == Synthetic Contacts ==
    /// Creates the next placeholder contact named `{first}.{last}` or `{first}.{last}-N`.
    ///
    /// `N` starts one past the highest existing id and grows until the username is free,
    /// so a run never collides with an existing contact.
    pub fn create_synthetic(&mut self, first_name: &str, last_name: &str) -> Result<Contact> {
        let tx = self.begin_write()?;

        let base = format!("{}.{}", first_name, last_name);
        let last_id: Option<ContactId> =
            tx.query_row("SELECT MAX(id) FROM contacts", [], |row| row.get(0))?;

        let username = match last_id {
            None => base,
            Some(last_id) => {
                let mut suffix = last_id + 1;
                loop {
                    let candidate = format!("{}-{}", base, suffix);
                    if !username_taken(&tx, &candidate, None)? {
                        break candidate;
                    }
                    suffix += 1;
                }
            }
        };

        let new = NewContact::new(username, first_name, last_name);
        let id = insert_contact(&tx, &new, Utc::now())?;
        let contact = require_contact(&tx, &ContactRef::Id(id))?;

        tx.commit()?;
        Ok(contact)
    }
}

// == Row Mapping ==
struct ContactRow {
    id: ContactId,
    username: String,
    first_name: String,
    last_name: String,
    created_on: i64,
    updated_on: i64,
}

impl ContactRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            username: row.get(1)?,
            first_name: row.get(2)?,
            last_name: row.get(3)?,
            created_on: row.get(4)?,
            updated_on: row.get(5)?,
        })
    }

    fn into_contact(self, emails: Vec<Email>) -> Result<Contact> {
        Ok(Contact {
            id: self.id,
            username: self.username,
            first_name: self.first_name,
            last_name: self.last_name,
            created_on: from_millis(self.created_on)?,
            updated_on: from_millis(self.updated_on)?,
            emails,
        })
    }
}

fn email_from_row(row: &Row<'_>) -> rusqlite::Result<Email> {
    Ok(Email {
        id: row.get(0)?,
        email_addr: row.get(1)?,
        contact_id: row.get(2)?,
    })
}

// == Helpers ==
fn load_contact(conn: &Connection, reference: &ContactRef) -> Result<Option<Contact>> {
    let row = match reference {
        ContactRef::Id(id) => conn
            .query_row(
                &format!("{CONTACT_SELECT_SQL} WHERE id = ?1"),
                params![id],
                ContactRow::from_row,
            )
            .optional()?,
        ContactRef::Username(username) => conn
            .query_row(
                &format!("{CONTACT_SELECT_SQL} WHERE username = ?1"),
                params![username],
                ContactRow::from_row,
            )
            .optional()?,
    };

    match row {
        Some(row) => {
            let emails = load_emails_for(conn, row.id)?;
            row.into_contact(emails).map(Some)
        }
        None => Ok(None),
    }
}

fn require_contact(conn: &Connection, reference: &ContactRef) -> Result<Contact> {
    load_contact(conn, reference)?.ok_or_else(|| ContactError::NotFound(reference.to_string()))
}

fn resolve_id(conn: &Connection, reference: &ContactRef) -> Result<Option<ContactId>> {
    let id = match reference {
        ContactRef::Id(id) => conn
            .query_row("SELECT id FROM contacts WHERE id = ?1", params![id], |row| {
                row.get(0)
            })
            .optional()?,
        ContactRef::Username(username) => conn
            .query_row(
                "SELECT id FROM contacts WHERE username = ?1",
                params![username],
                |row| row.get(0),
            )
            .optional()?,
    };
    Ok(id)
}

fn load_emails_for(conn: &Connection, contact_id: ContactId) -> Result<Vec<Email>> {
    let mut stmt = conn.prepare(
        "SELECT id, email_addr, contact_id FROM emails WHERE contact_id = ?1 ORDER BY id",
    )?;
    let emails = stmt
        .query_map(params![contact_id], email_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(emails)
}

fn load_all_emails(conn: &Connection) -> Result<HashMap<ContactId, Vec<Email>>> {
    let mut stmt = conn.prepare(
        "SELECT id, email_addr, contact_id FROM emails WHERE contact_id IS NOT NULL ORDER BY id",
    )?;
    let mut grouped: HashMap<ContactId, Vec<Email>> = HashMap::new();
    for email in stmt.query_map([], email_from_row)? {
        let email = email?;
        if let Some(owner) = email.contact_id {
            grouped.entry(owner).or_default().push(email);
        }
    }
    Ok(grouped)
}

/// True when `username` belongs to a contact other than `except`.
fn username_taken(conn: &Connection, username: &str, except: Option<ContactId>) -> Result<bool> {
    let owner: Option<ContactId> = conn
        .query_row(
            "SELECT id FROM contacts WHERE username = ?1",
            params![username],
            |row| row.get(0),
        )
        .optional()?;
    Ok(matches!(owner, Some(id) if Some(id) != except))
}

fn insert_contact(conn: &Connection, new: &NewContact, now: DateTime<Utc>) -> Result<ContactId> {
    let now = to_millis(now);
    conn.execute(
        "INSERT INTO contacts (username, first_name, last_name, created_on, updated_on)
         VALUES (?1, ?2, ?3, ?4, ?4)",
        params![new.username, new.first_name, new.last_name, now],
    )?;
    Ok(conn.last_insert_rowid())
}

fn count(conn: &Connection, sql: &str) -> Result<usize> {
    let n: i64 = conn.query_row(sql, [], |row| row.get(0))?;
    Ok(n as usize)
}
