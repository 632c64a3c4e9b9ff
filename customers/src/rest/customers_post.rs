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

//! API to create a new customer.

use crate::driver::CustomerDriver;
use crate::model::CustomerDraft;
use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use customers_core::driver::DriverError;
use customers_core::rest::{JsonBody, RestError};

/// API handler.
pub(crate) async fn handler(
    State(driver): State<CustomerDriver>,
    JsonBody(draft): JsonBody<Option<CustomerDraft>>,
) -> Result<impl IntoResponse, RestError> {
    let draft = match draft {
        Some(draft) => draft,
        None => {
            return Err(RestError::InvalidRequest(
                "Customer must be supplied in the request body".to_owned(),
            ));
        }
    };

    let customer = match driver.create(draft).await {
        Ok(customer) => customer,
        // Creation has no client-facing status for unknown area codes.
        Err(DriverError::InvalidReference(fields)) => {
            return Err(RestError::InternalError(format!("Invalid reference: {}", fields)));
        }
        Err(e) => return Err(e.into()),
    };
    Ok((http::StatusCode::CREATED, Json(customer)))
}

#[cfg(test)]
mod tests {
    use crate::areacodes::AreaCodeSet;
    use crate::model::testutils::{customer, draft};
    use crate::model::*;
    use crate::rest::testutils::*;
    use axum::http;
    use customers_core::rest::testutils::*;
    use std::sync::Arc;

    fn route() -> (http::Method, String) {
        (http::Method::POST, "/customers".to_owned())
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let response = OneShotBuilder::new(context.app(), route())
            .send_json(draft("Jane Doe", "jane@example.com", "2015550123"))
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<Customer>()
            .await;
        let id = response.id().unwrap();
        assert_eq!(customer("Jane Doe", "jane@example.com", "2015550123").with_id(id), response);

        let stored = context.get(id).await.unwrap();
        assert_eq!("jane@example.com", stored.email);
    }

    #[tokio::test]
    async fn test_ignores_client_id() {
        let context = TestContext::setup().await;

        let existing = context.insert("John Doe", "john@example.com", "2015550124").await;

        let mut input = draft("Jane Doe", "jane@example.com", "2015550123");
        input.id = Some(existing.as_i64());
        let response = OneShotBuilder::new(context.app(), route())
            .send_json(input)
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<Customer>()
            .await;
        assert_ne!(Some(existing), *response.id());
        assert!(response.id().is_some());

        assert_eq!("John Doe", context.get(existing).await.unwrap().name);
        assert_eq!(2, context.all().await.len());
    }

    #[tokio::test]
    async fn test_null_body() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .send_json(serde_json::Value::Null)
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("must be supplied")
            .await;
        assert!(context.all().await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_field() {
        let context = TestContext::setup().await;

        let mut input = draft("Jane Doe", "jane@example.com", "2015550123");
        input.phone_number = None;
        let errors = OneShotBuilder::new(context.app(), route())
            .send_json(input)
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_field_errors()
            .await;
        assert_eq!(1, errors.len());
        assert_eq!(Some("must not be null"), errors.get("phoneNumber"));
        assert!(context.all().await.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_fields() {
        let context = TestContext::setup().await;

        let errors = OneShotBuilder::new(context.app(), route())
            .send_json(draft("J4ne", "jane", "12"))
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_field_errors()
            .await;
        assert_eq!(3, errors.len());
        assert!(errors.get("name").is_some());
        assert!(errors.get("email").is_some());
        assert!(errors.get("phoneNumber").is_some());
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let context = TestContext::setup().await;

        context.insert("John Doe", "jane@example.com", "2015550124").await;

        let errors = OneShotBuilder::new(context.app(), route())
            .send_json(draft("Jane Doe", "jane@example.com", "2015550123"))
            .await
            .expect_status(http::StatusCode::CONFLICT)
            .expect_field_errors()
            .await;
        assert_eq!(
            Some("The email jane@example.com is already used, please use a unique email"),
            errors.get("email")
        );
        assert_eq!(1, context.all().await.len());
    }

    #[tokio::test]
    async fn test_unknown_area_code() {
        let context =
            TestContext::setup_with(Arc::from(AreaCodeSet::from_list("201,202").unwrap())).await;

        OneShotBuilder::new(context.app(), route())
            .send_json(draft("Jane Doe", "jane@example.com", "9995550123"))
            .await
            .expect_status(http::StatusCode::INTERNAL_SERVER_ERROR)
            .expect_error("area code provided is not recognised")
            .await;
        assert!(context.all().await.is_empty());
    }

    #[tokio::test]
    async fn test_wrong_field_type() {
        let context = TestContext::setup().await;

        let input = serde_json::json!({
            "name": "Jane Doe",
            "email": "jane@example.com",
            "phoneNumber": 2015550123u64,
        });
        OneShotBuilder::new(context.app(), route())
            .send_json(input)
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("phoneNumber: invalid type: integer")
            .await;
        assert!(context.all().await.is_empty());
    }

    #[tokio::test]
    async fn test_truncated_body() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .with_header(http::header::CONTENT_TYPE, "application/json")
            .send_text(r#"{"name": "Jane Doe", "email": "#)
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("Failed to parse the request body as JSON")
            .await;
        assert!(context.all().await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_content_type() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .send_empty()
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("Content-Type")
            .await;
        assert!(context.all().await.is_empty());
    }

    test_payload_must_be_json!(TestContext::setup().await.into_app(), route());
}
