// III-IV
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Entry point to the REST server.

use crate::driver::CustomerDriver;
use crate::model::CustomerId;
use axum::Router;
use customers_core::model::EmailAddress;
use customers_core::rest::{RestError, RestResult};

mod customer_by_email_get;
mod customer_delete;
mod customer_get;
mod customer_put;
mod customers_get;
mod customers_post;
#[cfg(test)]
mod testutils;

/// Value of the `Cache-Control` header attached to responses for individual customers.
const CACHE_CONTROL: &str = "no-transform";

/// Creates the router for the application.
pub(crate) fn app(driver: CustomerDriver) -> Router {
    use axum::routing::get;
    Router::new()
        .route("/customers", get(customers_get::handler).post(customers_post::handler))
        .route(
            "/customers/:id",
            get(customer_get::handler).put(customer_put::handler).delete(customer_delete::handler),
        )
        .route("/customers/email/:email", get(customer_by_email_get::handler))
        .with_state(driver)
}

/// Parses a customer identifier given in a path.  Anything that is not a number cannot name a
/// customer, so it is reported as a missing resource.
fn parse_id(raw: &str) -> RestResult<CustomerId> {
    CustomerId::parse(raw)
        .map_err(|_| RestError::NotFound(format!("No Customer with the id {} was found!", raw)))
}

/// Parses an email address given in a path or query.  Malformed addresses cannot belong to any
/// customer, so they are reported as a missing resource.
fn parse_email(raw: &str) -> RestResult<EmailAddress> {
    EmailAddress::new(raw)
        .map_err(|_| RestError::NotFound(format!("No Customer with the email {} was found!", raw)))
}
