// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the Customer Registry.
//!
//! Presentation and export collaborators consume this surface: free
//! service functions over the persistence adapter, the session-based
//! authentication service, and the CSV export. Handlers above this layer
//! are expected to gate every customer operation behind a validated
//! session; the functions here assume the caller is already authorized.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use tracing::debug;

use custreg_domain::{
    CustomerDraft, CustomerQuery, MissingTimestampPolicy, SortSpec, validate_customer_draft,
};
use custreg_persistence::Persistence;

mod auth;
mod csv_export;
mod error;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedUser, AuthenticationService};
pub use csv_export::{CSV_HEADERS, CsvExportError, export_customers_csv};
pub use error::{ApiError, AuthError};
pub use request_response::{
    CustomerPayload, CustomerResponse, DeleteCustomerResponse, ListCustomersRequest,
    ListCustomersResponse, StatsResponse,
};

/// Lists customers matching the request's filter and sort.
///
/// An unrecognized sort token falls back to newest-first; the filter is
/// still applied. An empty search string is treated as no filter.
///
/// # Errors
///
/// Returns an error if the listing fails.
pub fn list_customers(
    persistence: &Persistence,
    request: &ListCustomersRequest,
) -> Result<ListCustomersResponse, ApiError> {
    let query: CustomerQuery = CustomerQuery::new(
        request.search.clone(),
        SortSpec::parse(request.sort.as_deref()),
    );

    let customers = persistence.list_customers(&query)?;
    debug!(count = customers.len(), "Listed customers");

    Ok(ListCustomersResponse {
        customers: customers.iter().map(CustomerResponse::from).collect(),
    })
}

/// Retrieves one customer by id.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the id does not resolve.
pub fn get_customer(persistence: &Persistence, id: i64) -> Result<CustomerResponse, ApiError> {
    persistence
        .get_customer(id)?
        .as_ref()
        .map(CustomerResponse::from)
        .ok_or_else(|| customer_not_found(id))
}

/// Creates a customer from the supplied fields.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the name is empty, or an internal
/// error if the insert fails.
pub fn create_customer(
    persistence: &Persistence,
    payload: &CustomerPayload,
) -> Result<CustomerResponse, ApiError> {
    let draft: CustomerDraft = draft_from_payload(payload);
    validate_customer_draft(&draft)?;

    let created = persistence.create_customer(&draft)?;
    Ok(CustomerResponse::from(&created))
}

/// Replaces a customer's name, email, and phone.
///
/// The registration timestamp is untouched.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the name is empty, or
/// `ApiError::ResourceNotFound` if the id does not resolve.
pub fn update_customer(
    persistence: &Persistence,
    id: i64,
    payload: &CustomerPayload,
) -> Result<CustomerResponse, ApiError> {
    let draft: CustomerDraft = draft_from_payload(payload);
    validate_customer_draft(&draft)?;

    let rows_affected: usize = persistence.update_customer(id, &draft)?;
    if rows_affected == 0 {
        return Err(customer_not_found(id));
    }

    get_customer(persistence, id)
}

/// Deletes a customer if present.
///
/// Succeeds whether or not the id existed; the response carries the
/// deleted record's name when one did.
///
/// # Errors
///
/// Returns an error only if the backing store fails.
pub fn delete_customer(
    persistence: &Persistence,
    id: i64,
) -> Result<DeleteCustomerResponse, ApiError> {
    let deleted_name: Option<String> = persistence.delete_customer(id)?;
    Ok(DeleteCustomerResponse { deleted_name })
}

/// Computes aggregate customer statistics.
///
/// # Errors
///
/// Returns an error if a count query fails.
pub fn customer_stats(
    persistence: &Persistence,
    policy: MissingTimestampPolicy,
) -> Result<StatsResponse, ApiError> {
    let stats = persistence.customer_stats(policy)?;
    Ok(StatsResponse::from(stats))
}

fn draft_from_payload(payload: &CustomerPayload) -> CustomerDraft {
    CustomerDraft::new(
        payload.name.clone(),
        payload.email.clone(),
        payload.phone.clone(),
    )
}

fn customer_not_found(id: i64) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from("Customer"),
        message: format!("No customer with id {id}"),
    }
}
