// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod customers;
mod schema;
mod seed;
mod users;

pub use customers::{
    count_customers, customer_stats, delete_customer, get_customer, insert_customer,
    list_customers, update_customer,
};
pub use schema::{customers_have_registered_at, initialize_schema};
pub use seed::{
    DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME, ensure_admin, ensure_sample_customers,
};
pub use users::{
    count_users, create_session, create_user, delete_session, get_session_by_token,
    get_user_by_id, get_user_by_username, verify_user_credentials,
};
