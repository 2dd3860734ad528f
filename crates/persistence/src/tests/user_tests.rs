// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::create_test_persistence;
use crate::{Persistence, SessionData, UserData};

#[test]
fn test_create_and_get_user() {
    let persistence: Persistence = create_test_persistence();

    let user_id: i64 = persistence.create_user("clerk", "hunter2").unwrap();

    let user: UserData = persistence
        .get_user_by_username("clerk")
        .unwrap()
        .expect("User must exist after creation");
    assert_eq!(user.id, user_id);
    assert_eq!(user.username, "clerk");
    // The stored credential is a hash, never the plaintext.
    assert_ne!(user.password_hash, "hunter2");

    let by_id: UserData = persistence.get_user_by_id(user_id).unwrap().unwrap();
    assert_eq!(by_id, user);
}

#[test]
fn test_get_unknown_user_returns_none() {
    let persistence: Persistence = create_test_persistence();
    assert!(persistence.get_user_by_username("nobody").unwrap().is_none());
    assert!(persistence.get_user_by_id(77).unwrap().is_none());
}

#[test]
fn test_duplicate_username_is_rejected() {
    let persistence: Persistence = create_test_persistence();
    persistence.create_user("clerk", "hunter2").unwrap();
    assert!(persistence.create_user("clerk", "other").is_err());
}

#[test]
fn test_verify_credentials_accepts_correct_password() {
    let persistence: Persistence = create_test_persistence();
    persistence.create_user("clerk", "hunter2").unwrap();

    let user: Option<UserData> = persistence
        .verify_user_credentials("clerk", "hunter2")
        .unwrap();
    assert!(user.is_some());
}

#[test]
fn test_verify_credentials_collapses_unknown_user_and_wrong_password() {
    let persistence: Persistence = create_test_persistence();
    persistence.create_user("clerk", "hunter2").unwrap();

    let wrong_password: Option<UserData> = persistence
        .verify_user_credentials("clerk", "wrong")
        .unwrap();
    let unknown_user: Option<UserData> = persistence
        .verify_user_credentials("nobody", "hunter2")
        .unwrap();

    // Both failures look identical from the caller's side.
    assert_eq!(wrong_password, None);
    assert_eq!(unknown_user, None);
}

#[test]
fn test_session_roundtrip_and_idempotent_delete() {
    let persistence: Persistence = create_test_persistence();
    let user_id: i64 = persistence.create_user("clerk", "hunter2").unwrap();

    persistence
        .create_session("token-abc", user_id, "2099-01-01T00:00:00Z")
        .unwrap();

    let session: SessionData = persistence
        .get_session_by_token("token-abc")
        .unwrap()
        .expect("Session must exist after creation");
    assert_eq!(session.user_id, user_id);
    assert_eq!(session.expires_at, "2099-01-01T00:00:00Z");

    persistence.delete_session("token-abc").unwrap();
    assert!(persistence.get_session_by_token("token-abc").unwrap().is_none());

    // Deleting an absent token is a no-op, not an error.
    persistence.delete_session("token-abc").unwrap();
}
