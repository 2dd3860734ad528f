// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::CustomerDraft;

/// Validates that a customer draft's field constraints are met.
///
/// Validation is presence-only: the single required field is `name`.
/// Email and phone are free text and may be absent or empty.
///
/// # Arguments
///
/// * `draft` - The draft to validate
///
/// # Errors
///
/// Returns an error if the name is empty or whitespace-only.
pub fn validate_customer_draft(draft: &CustomerDraft) -> Result<(), DomainError> {
    if draft.name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }

    Ok(())
}
