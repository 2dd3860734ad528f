// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rusqlite::Connection;
use tracing::info;

use crate::error::PersistenceError;

/// Initializes the database schema.
///
/// Creates the `users`, `customers`, and `sessions` tables if they are
/// missing. Declarative create-if-not-exists semantics, not migration:
/// safe to invoke on every process start with no effect when the tables
/// already exist.
///
/// # Arguments
///
/// * `conn` - The database connection to initialize
///
/// # Errors
///
/// Returns an error if schema creation fails.
pub fn initialize_schema(conn: &Connection) -> Result<(), PersistenceError> {
    info!("Initializing database schema");

    // Enable foreign key enforcement
    conn.execute("PRAGMA foreign_keys = ON", [])?;

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE TABLE IF NOT EXISTS customers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT,
            phone TEXT,
            registered_at DATETIME DEFAULT CURRENT_TIMESTAMP
        );

        CREATE TABLE IF NOT EXISTS sessions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            token TEXT NOT NULL UNIQUE,
            user_id INTEGER NOT NULL,
            created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
            expires_at DATETIME NOT NULL,
            FOREIGN KEY(user_id) REFERENCES users(id)
        );

        CREATE INDEX IF NOT EXISTS idx_sessions_token
            ON sessions(token);

        CREATE INDEX IF NOT EXISTS idx_customers_name
            ON customers(name);
        ",
    )?;

    Ok(())
}

/// Checks whether the `customers` table carries a `registered_at` column.
///
/// The simplified legacy schema stored customers without a registration
/// timestamp; when that schema is in use, the registered-this-month
/// statistic follows the caller's configured fallback policy instead of a
/// date comparison.
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Errors
///
/// Returns an error if the table metadata cannot be queried.
pub fn customers_have_registered_at(conn: &Connection) -> Result<bool, PersistenceError> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('customers')")?;
    let columns = stmt.query_map([], |row| row.get::<_, String>(0))?;

    for column in columns {
        if column? == "registered_at" {
            return Ok(true);
        }
    }

    Ok(false)
}
