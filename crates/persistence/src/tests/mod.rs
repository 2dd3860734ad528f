// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test module for the persistence crate.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod user_tests;

use custreg_domain::CustomerDraft;

use crate::Persistence;

/// Creates a fresh in-memory persistence instance with the schema applied.
pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

/// Creates a fully seeded in-memory persistence instance (admin + samples).
pub fn create_seeded_persistence() -> Persistence {
    let mut persistence: Persistence = create_test_persistence();
    persistence.ensure_admin().expect("Failed to seed admin");
    persistence
        .ensure_sample_customers()
        .expect("Failed to seed sample customers");
    persistence
}

pub fn create_test_draft(name: &str) -> CustomerDraft {
    CustomerDraft::new(
        name.to_string(),
        Some(format!("{}@example.com", name.to_lowercase().replace(' ', "."))),
        Some(String::from("555-0100")),
    )
}
