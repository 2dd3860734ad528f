// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the API boundary.

use serde::{Deserialize, Serialize};

use custreg_domain::{Customer, StatsSnapshot};

/// Request for listing customers.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ListCustomersRequest {
    /// Optional name-substring filter.
    #[serde(default)]
    pub search: Option<String>,
    /// Optional sort token (`name_asc`, `name_desc`, `id_asc`, `id_desc`).
    /// Unrecognized or absent values fall back to `id_desc`.
    #[serde(default)]
    pub sort: Option<String>,
}

/// The mutable customer fields, as supplied on create and edit.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CustomerPayload {
    /// The customer's name. Required, must not be empty.
    pub name: String,
    /// Optional contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Optional contact phone.
    #[serde(default)]
    pub phone: Option<String>,
}

/// A customer record as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CustomerResponse {
    /// The unique record identifier.
    pub id: i64,
    /// The customer's name.
    pub name: String,
    /// Optional contact email.
    pub email: Option<String>,
    /// Optional contact phone.
    pub phone: Option<String>,
    /// Raw stored registration timestamp, if present.
    pub registered_at: Option<String>,
}

impl From<&Customer> for CustomerResponse {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name.clone(),
            email: customer.email.clone(),
            phone: customer.phone.clone(),
            registered_at: customer.registered_at.clone(),
        }
    }
}

/// Response for listing customers.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListCustomersResponse {
    /// The matching customers, in listing order.
    pub customers: Vec<CustomerResponse>,
}

/// Response for deleting a customer.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeleteCustomerResponse {
    /// The deleted record's name, for confirmation messaging.
    /// `None` when no matching record existed.
    pub deleted_name: Option<String>,
}

/// Response carrying aggregate customer statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct StatsResponse {
    /// Total number of customers.
    pub total: u64,
    /// Customers with a non-empty email.
    pub with_email: u64,
    /// Customers with a non-empty phone.
    pub with_phone: u64,
    /// Customers registered in the current calendar month.
    pub registered_this_month: u64,
}

impl From<StatsSnapshot> for StatsResponse {
    fn from(stats: StatsSnapshot) -> Self {
        Self {
            total: stats.total,
            with_email: stats.with_email,
            with_phone: stats.with_phone,
            registered_this_month: stats.registered_this_month,
        }
    }
}
