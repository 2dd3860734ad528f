// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Customer Registry.
//!
//! This crate provides `SQLite` persistence for customer records, the
//! registry's single user account, and session tokens. It is built on
//! `rusqlite` with a declarative create-if-not-exists schema: there is no
//! migration tooling, and initialization is safe to run on every process
//! start.
//!
//! All statements are parameterized. Listing queries are composed from the
//! typed [`CustomerQuery`](custreg_domain::CustomerQuery) value, so caller
//! input never reaches query text.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf
)]

use std::path::Path;

use rusqlite::Connection;
use tracing::info;

use custreg_domain::{Customer, CustomerDraft, CustomerQuery, MissingTimestampPolicy, StatsSnapshot};

mod data_models;
mod error;
mod sqlite;

#[cfg(test)]
mod tests;

pub use data_models::{SessionData, UserData};
pub use error::PersistenceError;
pub use sqlite::{DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME};

/// Persistence adapter for the customer registry.
///
/// Wraps a single `SQLite` connection. Schema initialization runs in the
/// constructors, so a successfully built adapter always has its tables;
/// a schema failure is surfaced as an error and is fatal to startup by
/// design (the process cannot serve requests without its schema).
pub struct Persistence {
    pub(crate) conn: Connection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Used by tests and by the server when no database path is given.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the schema
    /// cannot be created.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let conn: Connection = Connection::open_in_memory()
            .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;
        sqlite::initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// Enables WAL journaling for better read concurrency.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let conn: Connection = Connection::open(path.as_ref())
            .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;

        let journal_mode: String =
            conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        info!(journal_mode = %journal_mode, "Opened database file");

        sqlite::initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Seeds the default admin credential if no admin user exists.
    ///
    /// # Errors
    ///
    /// Returns an error if hashing or the insert fails.
    pub fn ensure_admin(&self) -> Result<(), PersistenceError> {
        sqlite::ensure_admin(&self.conn)
    }

    /// Seeds the fixed sample customers if the customer table is empty.
    ///
    /// # Returns
    ///
    /// The number of rows inserted (0 when the table was already populated).
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails.
    pub fn ensure_sample_customers(&mut self) -> Result<usize, PersistenceError> {
        sqlite::ensure_sample_customers(&mut self.conn)
    }

    /// Lists customers matching the given filter, in the given order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_customers(&self, query: &CustomerQuery) -> Result<Vec<Customer>, PersistenceError> {
        sqlite::list_customers(&self.conn, query)
    }

    /// Retrieves a customer by id.
    ///
    /// Returns `Ok(None)` if no customer with that id exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_customer(&self, id: i64) -> Result<Option<Customer>, PersistenceError> {
        sqlite::get_customer(&self.conn, id)
    }

    /// Inserts a new customer and returns the created record.
    ///
    /// The store assigns the id and sets `registered_at` to the current
    /// time. Field validation is the caller's responsibility.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_customer(&self, draft: &CustomerDraft) -> Result<Customer, PersistenceError> {
        sqlite::insert_customer(&self.conn, draft)
    }

    /// Replaces the name, email, and phone of an existing customer.
    ///
    /// `registered_at` is left untouched.
    ///
    /// # Returns
    ///
    /// The number of rows affected (0 when the id does not exist).
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_customer(
        &self,
        id: i64,
        draft: &CustomerDraft,
    ) -> Result<usize, PersistenceError> {
        sqlite::update_customer(&self.conn, id, draft)
    }

    /// Deletes a customer if present.
    ///
    /// Succeeds whether or not a matching row existed.
    ///
    /// # Returns
    ///
    /// The deleted record's name, or `None` if nothing matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_customer(&self, id: i64) -> Result<Option<String>, PersistenceError> {
        sqlite::delete_customer(&self.conn, id)
    }

    /// Computes aggregate statistics over the customer table.
    ///
    /// # Arguments
    ///
    /// * `policy` - Fallback for the month statistic when the schema has
    ///   no `registered_at` column
    ///
    /// # Errors
    ///
    /// Returns an error if a count query fails.
    pub fn customer_stats(
        &self,
        policy: MissingTimestampPolicy,
    ) -> Result<StatsSnapshot, PersistenceError> {
        sqlite::customer_stats(&self.conn, policy)
    }

    /// Counts all customers.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_customers(&self) -> Result<usize, PersistenceError> {
        sqlite::count_customers(&self.conn)
    }

    /// Creates a user with a bcrypt-hashed password.
    ///
    /// # Errors
    ///
    /// Returns an error if hashing fails or the username already exists.
    pub fn create_user(&self, username: &str, password: &str) -> Result<i64, PersistenceError> {
        sqlite::create_user(&self.conn, username, password)
    }

    /// Retrieves a user by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserData>, PersistenceError> {
        sqlite::get_user_by_username(&self.conn, username)
    }

    /// Retrieves a user by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_user_by_id(&self, user_id: i64) -> Result<Option<UserData>, PersistenceError> {
        sqlite::get_user_by_id(&self.conn, user_id)
    }

    /// Counts all users.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_users(&self) -> Result<usize, PersistenceError> {
        sqlite::count_users(&self.conn)
    }

    /// Verifies a username/password pair against the stored hash.
    ///
    /// Unknown username and wrong password are deliberately collapsed to
    /// the same `Ok(None)` result so callers cannot distinguish them.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup or hash verification fails.
    pub fn verify_user_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserData>, PersistenceError> {
        sqlite::verify_user_credentials(&self.conn, username, password)
    }

    /// Creates a session row for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_session(
        &self,
        token: &str,
        user_id: i64,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        sqlite::create_session(&self.conn, token, user_id, expires_at)
    }

    /// Retrieves a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_session_by_token(
        &self,
        token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        sqlite::get_session_by_token(&self.conn, token)
    }

    /// Deletes a session by token. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_session(&self, token: &str) -> Result<(), PersistenceError> {
        sqlite::delete_session(&self.conn, token)
    }
}
