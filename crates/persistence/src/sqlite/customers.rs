// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Customer queries and mutations.

use rusqlite::{Connection, OptionalExtension, Row, params};
use time::OffsetDateTime;
use time::macros::format_description;
use tracing::{debug, info};

use custreg_domain::{Customer, CustomerDraft, CustomerQuery, MissingTimestampPolicy, StatsSnapshot};

use crate::error::PersistenceError;
use crate::sqlite::schema::customers_have_registered_at;

/// Maps a `SELECT id, name, email, phone, registered_at` row to a Customer.
fn map_customer_row(row: &Row<'_>) -> rusqlite::Result<Customer> {
    Ok(Customer {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        registered_at: row.get(4)?,
    })
}

/// The customer column list, adjusted to the schema in use.
///
/// On the simplified legacy schema without a `registered_at` column the
/// select substitutes `NULL`, so reads still map and the timestamp comes
/// back as `None`. Only the month statistic treats the column's absence
/// specially; every other operation keeps working.
fn customer_select(conn: &Connection) -> Result<&'static str, PersistenceError> {
    Ok(if customers_have_registered_at(conn)? {
        "SELECT id, name, email, phone, registered_at FROM customers"
    } else {
        "SELECT id, name, email, phone, NULL AS registered_at FROM customers"
    })
}

/// Lists customers matching the given query.
///
/// The filter substring, when present, is bound as a `LIKE` parameter
/// (`SQLite`'s default `LIKE` is case-insensitive for ASCII). The
/// `ORDER BY` clause is derived from the [`SortSpec`] enum only.
/// Returns the full matching set; there is no pagination.
///
/// [`SortSpec`]: custreg_domain::SortSpec
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `query` - The composed filter and sort
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_customers(
    conn: &Connection,
    query: &CustomerQuery,
) -> Result<Vec<Customer>, PersistenceError> {
    let sql: String = format!(
        "{}{} ORDER BY {}",
        customer_select(conn)?,
        if query.filter().is_some() {
            " WHERE name LIKE ?1"
        } else {
            ""
        },
        query.sort().order_clause(),
    );

    let mut stmt = conn.prepare(&sql)?;

    let customers: Vec<Customer> = match query.like_pattern() {
        Some(pattern) => stmt
            .query_map(params![pattern], map_customer_row)?
            .collect::<Result<Vec<Customer>, rusqlite::Error>>()?,
        None => stmt
            .query_map([], map_customer_row)?
            .collect::<Result<Vec<Customer>, rusqlite::Error>>()?,
    };

    debug!(
        count = customers.len(),
        filter = ?query.filter(),
        sort = %query.sort(),
        "Listed customers"
    );

    Ok(customers)
}

/// Retrieves a customer by id.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `id` - The customer id
///
/// # Errors
///
/// Returns an error if the query fails.
/// Returns `Ok(None)` if the customer is not found.
pub fn get_customer(conn: &Connection, id: i64) -> Result<Option<Customer>, PersistenceError> {
    let sql: String = format!("{} WHERE id = ?1", customer_select(conn)?);
    let customer: Option<Customer> = conn
        .query_row(&sql, params![id], map_customer_row)
        .optional()?;

    Ok(customer)
}

/// Inserts a new customer and returns the created record.
///
/// The store assigns the id; `registered_at` defaults to the current
/// timestamp and is immutable afterward.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `draft` - The customer fields to insert
///
/// # Errors
///
/// Returns an error if the insert fails or the created row cannot be
/// read back.
pub fn insert_customer(
    conn: &Connection,
    draft: &CustomerDraft,
) -> Result<Customer, PersistenceError> {
    conn.execute(
        "INSERT INTO customers (name, email, phone) VALUES (?1, ?2, ?3)",
        params![draft.name, draft.email, draft.phone],
    )?;

    let id: i64 = conn.last_insert_rowid();
    info!(id, "Created customer");

    get_customer(conn, id)?
        .ok_or_else(|| PersistenceError::Other(format!("Customer {id} missing after insert")))
}

/// Replaces the name, email, and phone of an existing customer.
///
/// `registered_at` is deliberately excluded from the statement.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `id` - The customer id
/// * `draft` - The replacement field values
///
/// # Returns
///
/// The number of rows affected: 0 when no customer with that id exists.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_customer(
    conn: &Connection,
    id: i64,
    draft: &CustomerDraft,
) -> Result<usize, PersistenceError> {
    let rows_affected: usize = conn.execute(
        "UPDATE customers SET name = ?1, email = ?2, phone = ?3 WHERE id = ?4",
        params![draft.name, draft.email, draft.phone, id],
    )?;

    if rows_affected > 0 {
        info!(id, "Updated customer");
    }

    Ok(rows_affected)
}

/// Deletes a customer if present.
///
/// Reads the record's name first for caller-side confirmation messaging,
/// then deletes. Succeeds unconditionally whether or not a matching row
/// existed.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `id` - The customer id
///
/// # Returns
///
/// The deleted record's name, or `None` if nothing matched.
///
/// # Errors
///
/// Returns an error if the lookup or delete fails.
pub fn delete_customer(conn: &Connection, id: i64) -> Result<Option<String>, PersistenceError> {
    let name: Option<String> = conn
        .query_row(
            "SELECT name FROM customers WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )
        .optional()?;

    conn.execute("DELETE FROM customers WHERE id = ?1", params![id])?;

    if let Some(deleted) = &name {
        info!(id, name = %deleted, "Deleted customer");
    } else {
        debug!(id, "Delete requested for absent customer");
    }

    Ok(name)
}

/// Counts all customers.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_customers(conn: &Connection) -> Result<usize, PersistenceError> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM customers", [], |row| row.get(0))?;
    usize::try_from(count)
        .map_err(|_| PersistenceError::Other(format!("Negative customer count: {count}")))
}

/// Computes aggregate statistics over the customer table.
///
/// `with_email` and `with_phone` count rows where the field is non-null
/// and non-empty. `registered_this_month` compares `strftime('%Y-%m', ..)`
/// against the process-local current month; when the schema has no
/// `registered_at` column, the statistic follows the given policy.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `policy` - Fallback for the month statistic on a timestamp-less schema
///
/// # Errors
///
/// Returns an error if a count query fails.
pub fn customer_stats(
    conn: &Connection,
    policy: MissingTimestampPolicy,
) -> Result<StatsSnapshot, PersistenceError> {
    let total: u64 = count_to_u64(conn.query_row(
        "SELECT COUNT(*) FROM customers",
        [],
        |row| row.get(0),
    )?)?;

    let with_email: u64 = count_to_u64(conn.query_row(
        "SELECT COUNT(*) FROM customers WHERE email IS NOT NULL AND email != ''",
        [],
        |row| row.get(0),
    )?)?;

    let with_phone: u64 = count_to_u64(conn.query_row(
        "SELECT COUNT(*) FROM customers WHERE phone IS NOT NULL AND phone != ''",
        [],
        |row| row.get(0),
    )?)?;

    let registered_this_month: u64 = if customers_have_registered_at(conn)? {
        let month: String = current_month()?;
        count_to_u64(conn.query_row(
            "SELECT COUNT(*) FROM customers WHERE strftime('%Y-%m', registered_at) = ?1",
            params![month],
            |row| row.get(0),
        )?)?
    } else {
        match policy {
            MissingTimestampPolicy::ReportZero => 0,
            MissingTimestampPolicy::ReportTotal => total,
        }
    };

    Ok(StatsSnapshot {
        total,
        with_email,
        with_phone,
        registered_this_month,
    })
}

/// Formats the current UTC month as `YYYY-MM`, matching `strftime('%Y-%m')`
/// over the UTC timestamps `CURRENT_TIMESTAMP` stores.
fn current_month() -> Result<String, PersistenceError> {
    let format = format_description!("[year]-[month]");
    OffsetDateTime::now_utc()
        .format(&format)
        .map_err(|e| PersistenceError::Other(format!("Failed to format current month: {e}")))
}

fn count_to_u64(count: i64) -> Result<u64, PersistenceError> {
    u64::try_from(count).map_err(|_| PersistenceError::Other(format!("Negative count: {count}")))
}
