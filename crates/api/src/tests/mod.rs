// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test module for the API crate.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use custreg_persistence::Persistence;

/// Creates a fully seeded in-memory persistence instance (admin + samples).
pub fn create_seeded_persistence() -> Persistence {
    let mut persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    persistence.ensure_admin().expect("Failed to seed admin");
    persistence
        .ensure_sample_customers()
        .expect("Failed to seed sample customers");
    persistence
}
