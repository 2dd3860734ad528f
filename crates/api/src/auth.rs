// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication types and the session-based authentication service.

use time::{Duration, OffsetDateTime};
use tracing::{debug, info};

use custreg_persistence::{Persistence, SessionData, UserData};

use crate::error::AuthError;

/// An authenticated user identity.
///
/// The registry has a single shared role, so an identity is just the
/// user's id and username held by the caller's session for the duration
/// of their authenticated state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The user's unique id.
    pub id: i64,
    /// The username.
    pub username: String,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user identity.
    #[must_use]
    pub const fn new(id: i64, username: String) -> Self {
        Self { id, username }
    }
}

/// Authentication service for session-based authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Default session expiration duration (30 days).
    const DEFAULT_SESSION_EXPIRATION: Duration = Duration::days(30);

    /// Authenticates a user and creates a session.
    ///
    /// Unknown username and wrong password are surfaced as the same
    /// [`AuthError::InvalidCredentials`]; no distinction reaches the
    /// caller.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `username` - The claimed username
    /// * `password` - The supplied plaintext password
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `authenticated_user`).
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials do not verify or the backing
    /// store fails.
    pub fn login(
        persistence: &Persistence,
        username: &str,
        password: &str,
    ) -> Result<(String, AuthenticatedUser), AuthError> {
        let user: UserData = persistence
            .verify_user_credentials(username, password)
            .map_err(|e| AuthError::Storage {
                message: e.to_string(),
            })?
            .ok_or(AuthError::InvalidCredentials)?;

        let session_token: String = Self::generate_session_token();

        let expires_at: OffsetDateTime =
            OffsetDateTime::now_utc() + Self::DEFAULT_SESSION_EXPIRATION;
        let expires_at_str: String = expires_at
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .map_err(|e| AuthError::Storage {
                message: format!("Failed to format expiration time: {e}"),
            })?;

        persistence
            .create_session(&session_token, user.id, &expires_at_str)
            .map_err(|e| AuthError::Storage {
                message: e.to_string(),
            })?;

        info!(username = %user.username, "Login succeeded");

        let identity: AuthenticatedUser = AuthenticatedUser::new(user.id, user.username);
        Ok((session_token, identity))
    }

    /// Validates a session token and returns the authenticated identity.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `session_token` - The session token to validate
    ///
    /// # Errors
    ///
    /// Returns an error if the session is unknown, expired, or orphaned.
    pub fn validate_session(
        persistence: &Persistence,
        session_token: &str,
    ) -> Result<AuthenticatedUser, AuthError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(|e| AuthError::Storage {
                message: e.to_string(),
            })?
            .ok_or_else(|| AuthError::InvalidSession {
                reason: String::from("Unknown session token"),
            })?;

        let expires_at: OffsetDateTime = OffsetDateTime::parse(
            &session.expires_at,
            &time::format_description::well_known::Iso8601::DEFAULT,
        )
        .map_err(|e| AuthError::InvalidSession {
            reason: format!("Failed to parse session expiration: {e}"),
        })?;

        if OffsetDateTime::now_utc() > expires_at {
            return Err(AuthError::InvalidSession {
                reason: String::from("Session expired"),
            });
        }

        let user: UserData = persistence
            .get_user_by_id(session.user_id)
            .map_err(|e| AuthError::Storage {
                message: e.to_string(),
            })?
            .ok_or_else(|| AuthError::InvalidSession {
                reason: String::from("Session user no longer exists"),
            })?;

        debug!(username = %user.username, "Session validated");

        Ok(AuthenticatedUser::new(user.id, user.username))
    }

    /// Logs out by deleting the session. Idempotent.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `session_token` - The session token to clear
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store fails.
    pub fn logout(persistence: &Persistence, session_token: &str) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(|e| AuthError::Storage {
                message: e.to_string(),
            })?;

        debug!("Session cleared");
        Ok(())
    }

    /// Generates an opaque session token.
    fn generate_session_token() -> String {
        use std::time::{SystemTime, UNIX_EPOCH};
        let timestamp: u128 = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_nanos();
        format!("session_{timestamp}_{}", rand::random::<u64>())
    }
}
