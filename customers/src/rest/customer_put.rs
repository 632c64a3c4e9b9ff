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

//! API to update an existing customer.

use crate::driver::CustomerDriver;
use crate::model::CustomerDraft;
use crate::rest::parse_id;
use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use customers_core::model::FieldErrors;
use customers_core::rest::{JsonBody, RestError};

/// API handler.
pub(crate) async fn handler(
    State(driver): State<CustomerDriver>,
    Path(id): Path<String>,
    JsonBody(draft): JsonBody<Option<CustomerDraft>>,
) -> Result<impl IntoResponse, RestError> {
    let id = parse_id(&id)?;

    let draft = match draft {
        Some(draft @ CustomerDraft { id: Some(_), .. }) => draft,
        _ => {
            return Err(RestError::InvalidRequest(
                "Invalid Customer supplied in request body".to_owned(),
            ));
        }
    };
    if draft.id != Some(id.as_i64()) {
        return Err(RestError::Conflict(FieldErrors::single(
            "id",
            "The Customer ID in the request body must match that of the Customer being updated",
        )));
    }

    let customer = driver.update(id, draft).await?;
    Ok(Json(customer))
}
