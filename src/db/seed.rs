//! Demo Data
//!
//! Resets the store to two well-known contacts, each owning two emails.

use chrono::Utc;
use rusqlite::{params, Connection, TransactionBehavior};
use tracing::info;

use crate::error::Result;

const DEMO_CONTACTS: &[(&str, &str, &str, &[&str])] = &[
    (
        "foobar",
        "John",
        "Gotti",
        &["j-g@foobar.com", "jon.gotti.45@yahoo.com"],
    ),
    (
        "luckylu",
        "Lucky",
        "Luciano",
        &["lucky.luciano@fubar.com", "l.luciano_001@fubar.com"],
    ),
];

/// Deletes every row and inserts the demo contacts in a single transaction.
pub fn seed_demo_data(conn: &mut Connection) -> Result<()> {
    let now = Utc::now().timestamp_millis();
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    tx.execute("DELETE FROM emails", [])?;
    tx.execute("DELETE FROM contacts", [])?;

    for (username, first_name, last_name, emails) in DEMO_CONTACTS {
        tx.execute(
            "INSERT INTO contacts (username, first_name, last_name, created_on, updated_on)
             VALUES (?1, ?2, ?3, ?4, ?4)",
            params![username, first_name, last_name, now],
        )?;
        let contact_id = tx.last_insert_rowid();
        for email in emails.iter() {
            tx.execute(
                "INSERT INTO emails (email_addr, contact_id) VALUES (?1, ?2)",
                params![email, contact_id],
            )?;
        }
    }

    tx.commit()?;
    info!("Seeded {} demo contacts", DEMO_CONTACTS.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contacts::ContactRepository;
    use crate::db::apply_migrations;

    #[test]
    fn test_seed_is_repeatable() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        apply_migrations(&mut conn).unwrap();

        seed_demo_data(&mut conn).unwrap();
        seed_demo_data(&mut conn).unwrap();

        let repo = ContactRepository::new(&mut conn);
        assert_eq!(repo.count_contacts().unwrap(), 2);
        assert_eq!(repo.count_emails().unwrap(), 4);

        let foobar = repo.find_by_username("foobar").unwrap().unwrap();
        assert_eq!(foobar.first_name, "John");
        assert_eq!(
            foobar.email_addresses(),
            vec!["j-g@foobar.com", "jon.gotti.45@yahoo.com"]
        );
    }
}
