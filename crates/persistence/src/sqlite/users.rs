// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User and session persistence functions.

use rusqlite::{Connection, OptionalExtension, params};
use tracing::{debug, info};

use crate::data_models::{SessionData, UserData};
use crate::error::PersistenceError;

/// Creates a new user with a bcrypt-hashed password.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `username` - The unique username
/// * `password` - The plaintext password to hash
///
/// # Errors
///
/// Returns an error if hashing fails or the username already exists.
pub fn create_user(
    conn: &Connection,
    username: &str,
    password: &str,
) -> Result<i64, PersistenceError> {
    let password_hash: String = bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::Other(format!("Failed to hash password: {e}")))?;

    conn.execute(
        "INSERT INTO users (username, password_hash) VALUES (?1, ?2)",
        params![username, password_hash],
    )?;

    let user_id: i64 = conn.last_insert_rowid();
    info!(user_id, username, "Created user");

    Ok(user_id)
}

/// Retrieves a user by username.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `username` - The username to search for
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the user is not found.
pub fn get_user_by_username(
    conn: &Connection,
    username: &str,
) -> Result<Option<UserData>, PersistenceError> {
    debug!(username, "Looking up user by username");

    let result: Option<UserData> = conn
        .query_row(
            "SELECT id, username, password_hash, created_at FROM users WHERE username = ?1",
            params![username],
            |row| {
                Ok(UserData {
                    id: row.get(0)?,
                    username: row.get(1)?,
                    password_hash: row.get(2)?,
                    created_at: row.get(3)?,
                })
            },
        )
        .optional()?;

    Ok(result)
}

/// Retrieves a user by id.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `user_id` - The user id
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the user is not found.
pub fn get_user_by_id(
    conn: &Connection,
    user_id: i64,
) -> Result<Option<UserData>, PersistenceError> {
    let result: Option<UserData> = conn
        .query_row(
            "SELECT id, username, password_hash, created_at FROM users WHERE id = ?1",
            params![user_id],
            |row| {
                Ok(UserData {
                    id: row.get(0)?,
                    username: row.get(1)?,
                    password_hash: row.get(2)?,
                    created_at: row.get(3)?,
                })
            },
        )
        .optional()?;

    Ok(result)
}

/// Counts all users.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_users(conn: &Connection) -> Result<usize, PersistenceError> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
    usize::try_from(count)
        .map_err(|_| PersistenceError::Other(format!("Negative user count: {count}")))
}

/// Verifies a username/password pair against the stored hash.
///
/// Unknown username and wrong password both yield `Ok(None)`: callers
/// cannot distinguish the two cases, by policy.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `username` - The claimed username
/// * `password` - The supplied plaintext password
///
/// # Errors
///
/// Returns an error if the lookup or hash verification fails.
pub fn verify_user_credentials(
    conn: &Connection,
    username: &str,
    password: &str,
) -> Result<Option<UserData>, PersistenceError> {
    let Some(user) = get_user_by_username(conn, username)? else {
        debug!("Credential check failed");
        return Ok(None);
    };

    let verified: bool = bcrypt::verify(password, &user.password_hash)
        .map_err(|e| PersistenceError::Other(format!("Password verification failed: {e}")))?;

    if !verified {
        debug!("Credential check failed");
    }

    Ok(verified.then_some(user))
}

/// Creates a session row for a user.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `token` - The opaque session token
/// * `user_id` - The user this session belongs to
/// * `expires_at` - The expiration timestamp (ISO 8601)
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_session(
    conn: &Connection,
    token: &str,
    user_id: i64,
    expires_at: &str,
) -> Result<i64, PersistenceError> {
    conn.execute(
        "INSERT INTO sessions (token, user_id, expires_at) VALUES (?1, ?2, ?3)",
        params![token, user_id, expires_at],
    )?;

    let session_id: i64 = conn.last_insert_rowid();
    debug!(session_id, user_id, "Created session");

    Ok(session_id)
}

/// Retrieves a session by token.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `token` - The session token
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the session is not found.
pub fn get_session_by_token(
    conn: &Connection,
    token: &str,
) -> Result<Option<SessionData>, PersistenceError> {
    let result: Option<SessionData> = conn
        .query_row(
            "SELECT id, token, user_id, created_at, expires_at FROM sessions WHERE token = ?1",
            params![token],
            |row| {
                Ok(SessionData {
                    id: row.get(0)?,
                    token: row.get(1)?,
                    user_id: row.get(2)?,
                    created_at: row.get(3)?,
                    expires_at: row.get(4)?,
                })
            },
        )
        .optional()?;

    Ok(result)
}

/// Deletes a session by token.
///
/// Deleting an absent token is a no-op, so logout is idempotent.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `token` - The session token
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_session(conn: &Connection, token: &str) -> Result<(), PersistenceError> {
    let rows_affected: usize =
        conn.execute("DELETE FROM sessions WHERE token = ?1", params![token])?;
    debug!(rows_affected, "Deleted session");

    Ok(())
}
