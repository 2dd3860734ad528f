// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// A stored user row.
///
/// The registry has a single role, so a user row is just an identity plus
/// an opaque hashed credential. Rows are created once at seed time and are
/// read-only afterward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserData {
    /// The user's unique id.
    pub id: i64,
    /// The unique username.
    pub username: String,
    /// The bcrypt password hash.
    pub password_hash: String,
    /// When the user row was created (raw stored representation).
    pub created_at: String,
}

/// A stored session row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    /// The session's unique id.
    pub id: i64,
    /// The opaque session token.
    pub token: String,
    /// The id of the user this session belongs to.
    pub user_id: i64,
    /// When the session was created (raw stored representation).
    pub created_at: String,
    /// When the session expires (ISO 8601).
    pub expires_at: String,
}
