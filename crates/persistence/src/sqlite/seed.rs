// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Seed initialization: default admin credential and sample customers.
//!
//! Both operations are idempotent per their absent/empty guard, and both
//! are atomic with respect to concurrent first starts: the admin insert
//! relies on the unique `username` column via `INSERT OR IGNORE`, and the
//! sample-customer seed wraps its count-then-insert in an immediate
//! transaction.

use rusqlite::{Connection, TransactionBehavior, params};
use tracing::{debug, info};

use crate::error::PersistenceError;

/// Username of the seeded administrative account.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

/// Default password of the seeded administrative account.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Fixed sample customers, inserted only when the table is empty.
const SAMPLE_CUSTOMERS: &[(&str, &str, &str)] = &[
    ("João Silva", "joao@email.com", "(11) 99999-9999"),
    ("Maria Santos", "maria@email.com", "(21) 88888-8888"),
    ("Pedro Oliveira", "pedro@email.com", "(31) 77777-7777"),
    ("Ana Costa", "ana@email.com", "(41) 66666-6666"),
    ("Carlos Souza", "carlos@email.com", "(51) 55555-5555"),
];

/// Inserts the default admin user if absent.
///
/// The password is hashed with bcrypt before the insert. The unique
/// `username` constraint plus `INSERT OR IGNORE` make the operation
/// a single atomic insert-if-absent, so concurrent seed runs cannot
/// produce duplicate admin rows.
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Errors
///
/// Returns an error if hashing or the insert fails.
pub fn ensure_admin(conn: &Connection) -> Result<(), PersistenceError> {
    let password_hash: String = bcrypt::hash(DEFAULT_ADMIN_PASSWORD, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::Other(format!("Failed to hash password: {e}")))?;

    let inserted: usize = conn.execute(
        "INSERT OR IGNORE INTO users (username, password_hash) VALUES (?1, ?2)",
        params![DEFAULT_ADMIN_USERNAME, password_hash],
    )?;

    if inserted > 0 {
        info!(username = DEFAULT_ADMIN_USERNAME, "Seeded admin user");
    } else {
        debug!(
            username = DEFAULT_ADMIN_USERNAME,
            "Admin user already present, seed skipped"
        );
    }

    Ok(())
}

/// Inserts the fixed sample customers if the customer table is empty.
///
/// The emptiness check and the inserts run inside one immediate
/// transaction, so two processes seeding the same fresh database cannot
/// both observe an empty table.
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// The number of rows inserted (0 when the table already had customers).
///
/// # Errors
///
/// Returns an error if the transaction fails.
pub fn ensure_sample_customers(conn: &mut Connection) -> Result<usize, PersistenceError> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let count: i64 = tx.query_row("SELECT COUNT(*) FROM customers", [], |row| row.get(0))?;
    if count > 0 {
        debug!(count, "Customers already present, sample seed skipped");
        tx.commit()?;
        return Ok(0);
    }

    for (name, email, phone) in SAMPLE_CUSTOMERS {
        tx.execute(
            "INSERT INTO customers (name, email, phone) VALUES (?1, ?2, ?3)",
            params![name, email, phone],
        )?;
    }

    tx.commit()?;
    info!(count = SAMPLE_CUSTOMERS.len(), "Seeded sample customers");

    Ok(SAMPLE_CUSTOMERS.len())
}
