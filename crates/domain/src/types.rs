// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// A customer record as stored in the registry.
///
/// `id` is assigned by the store on insert and is stable for the lifetime
/// of the record. `email` and `phone` are optional free text.
/// `registered_at` carries the raw stored timestamp representation and is
/// set once at insert time; it is `None` only when the backing schema
/// predates the timestamp column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// The unique record identifier.
    pub id: i64,
    /// The customer's name. Never empty.
    pub name: String,
    /// Optional contact email.
    pub email: Option<String>,
    /// Optional contact phone.
    pub phone: Option<String>,
    /// Raw stored registration timestamp, if the schema carries one.
    pub registered_at: Option<String>,
}

/// The mutable fields of a customer, used for create and full-replace edits.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CustomerDraft {
    /// The customer's name. Required, must not be empty.
    pub name: String,
    /// Optional contact email.
    pub email: Option<String>,
    /// Optional contact phone.
    pub phone: Option<String>,
}

impl CustomerDraft {
    /// Creates a new draft from the three mutable customer fields.
    #[must_use]
    pub const fn new(name: String, email: Option<String>, phone: Option<String>) -> Self {
        Self { name, email, phone }
    }
}

/// Enumerated ordering directive applied to a customer listing.
///
/// Parsing is total: any token that is not one of the four recognized
/// values falls back to [`SortSpec::IdDesc`] (most recently created
/// first), so an unrecognized sort combined with a valid filter still
/// applies the filter and never errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortSpec {
    /// Order by name, ascending.
    NameAsc,
    /// Order by name, descending.
    NameDesc,
    /// Order by id, ascending (oldest first).
    IdAsc,
    /// Order by id, descending (newest first). The default.
    #[default]
    IdDesc,
}

impl SortSpec {
    /// Parses a sort token, falling back to the default for unrecognized
    /// or absent values.
    #[must_use]
    pub fn parse(token: Option<&str>) -> Self {
        match token {
            Some("name_asc") => Self::NameAsc,
            Some("name_desc") => Self::NameDesc,
            Some("id_asc") => Self::IdAsc,
            _ => Self::IdDesc,
        }
    }

    /// Converts this sort spec to its token representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NameAsc => "name_asc",
            Self::NameDesc => "name_desc",
            Self::IdAsc => "id_asc",
            Self::IdDesc => "id_desc",
        }
    }

    /// The `ORDER BY` clause body for this sort spec.
    ///
    /// Always derived from the enum, never from caller input, so it is
    /// safe to splice into query text.
    #[must_use]
    pub const fn order_clause(self) -> &'static str {
        match self {
            Self::NameAsc => "name ASC",
            Self::NameDesc => "name DESC",
            Self::IdAsc => "id ASC",
            Self::IdDesc => "id DESC",
        }
    }
}

impl std::fmt::Display for SortSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Policy for the registered-this-month statistic when the backing schema
/// has no `registered_at` column.
///
/// There is no single right answer for a register without timestamps, so
/// the choice is configuration rather than a hard-coded guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingTimestampPolicy {
    /// Report the statistic as 0.
    #[default]
    ReportZero,
    /// Report the statistic as equal to the total customer count.
    ReportTotal,
}

/// Aggregate counts derived from the customer table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Total number of customers.
    pub total: u64,
    /// Customers whose email is non-null and non-empty.
    pub with_email: u64,
    /// Customers whose phone is non-null and non-empty.
    pub with_phone: u64,
    /// Customers registered in the current calendar month.
    pub registered_this_month: u64,
}
