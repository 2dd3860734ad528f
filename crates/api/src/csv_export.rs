// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV export of the customer register.
//!
//! The export feeds the full unfiltered listing, in default order, to a
//! fixed-header CSV encoding. Null email/phone and an absent registration
//! timestamp serialize as empty strings.

use thiserror::Error;

use custreg_domain::{Customer, CustomerQuery};
use custreg_persistence::{Persistence, PersistenceError};

use crate::error::ApiError;

/// The fixed CSV column order.
pub const CSV_HEADERS: [&str; 5] = ["id", "name", "email", "phone", "registered_at"];

/// Errors that can occur during CSV export.
#[derive(Debug, Error)]
pub enum CsvExportError {
    /// Reading the rows from the store failed.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    /// Encoding a record failed.
    #[error("CSV encoding failed: {0}")]
    Encoding(#[from] csv::Error),
    /// Flushing the encoded buffer failed.
    #[error("CSV write failed: {0}")]
    Io(#[from] std::io::Error),
}

impl From<CsvExportError> for ApiError {
    fn from(err: CsvExportError) -> Self {
        match err {
            CsvExportError::Persistence(inner) => Self::from(inner),
            other => Self::Internal {
                message: other.to_string(),
            },
        }
    }
}

/// Exports every customer as CSV bytes.
///
/// Row order is the repository's default listing order (newest first).
///
/// # Arguments
///
/// * `persistence` - The persistence layer
///
/// # Errors
///
/// Returns an error if the listing or the encoding fails.
pub fn export_customers_csv(persistence: &Persistence) -> Result<Vec<u8>, CsvExportError> {
    let customers: Vec<Customer> = persistence.list_customers(&CustomerQuery::default())?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADERS)?;

    for customer in &customers {
        writer.write_record([
            customer.id.to_string(),
            customer.name.clone(),
            customer.email.clone().unwrap_or_default(),
            customer.phone.clone().unwrap_or_default(),
            customer.registered_at.clone().unwrap_or_default(),
        ])?;
    }

    let bytes: Vec<u8> = writer
        .into_inner()
        .map_err(csv::IntoInnerError::into_error)?;

    Ok(bytes)
}
