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

//! API to list customers, optionally filtered by email address or name.

use crate::driver::CustomerDriver;
use crate::rest::parse_email;
use axum::Json;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use customers_core::rest::{EmptyBody, RestError};
use serde::Deserialize;

/// Filters accepted by this API.
#[derive(Default, Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub(crate) struct ListQuery {
    /// Email address of the only customer to return.
    #[serde(default)]
    email: Option<String>,

    /// Exact name of the customers to return.
    #[serde(default)]
    name: Option<String>,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<CustomerDriver>,
    Query(query): Query<ListQuery>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let customers = match (query.email, query.name) {
        (Some(email), _) => {
            let email = parse_email(&email)?;
            vec![driver.find_by_email(&email).await?]
        }
        (None, Some(name)) => driver.find_all_by_name(&name).await?,
        (None, None) => driver.find_all_ordered_by_name().await?,
    };
    Ok(Json(customers))
}
