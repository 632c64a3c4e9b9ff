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

//! Test utilities for the REST API.

use crate::areacodes::{AnyAreaCode, AreaCodeLookup};
use crate::db::{self, CustomerEntity};
use crate::driver::CustomerDriver;
use crate::model::CustomerId;
use crate::rest::app;
use axum::Router;
use customers_core::db::Db;
use std::sync::Arc;

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the app, for direct manipulation.
    db: Arc<dyn Db + Send + Sync>,

    /// The router for the app under test.
    app: Router,
}

impl TestContext {
    /// Initializes the app using an in-memory database that accepts any area code.
    pub(crate) async fn setup() -> Self {
        Self::setup_with(Arc::from(AnyAreaCode::default())).await
    }

    /// Initializes the app using an in-memory database and the given `area_codes` registry.
    pub(crate) async fn setup_with(area_codes: Arc<dyn AreaCodeLookup + Send + Sync>) -> Self {
        let db: Arc<dyn Db + Send + Sync> =
            Arc::new(customers_core::db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let driver = CustomerDriver::new(db.clone(), area_codes);
        let app = app(driver);
        Self { db, app }
    }

    /// Gets a clone of the app router.
    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    /// Consumes the context and transforms it into the app router.
    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    /// Inserts a customer directly into the database and returns its identifier.
    pub(crate) async fn insert(&self, name: &str, email: &str, phone_number: &str) -> CustomerId {
        let entity = CustomerEntity {
            id: None,
            name: name.to_owned(),
            email: email.to_owned(),
            phone_number: phone_number.to_owned(),
        };
        let entity = db::create(&mut self.db.ex().await.unwrap(), entity).await.unwrap();
        CustomerId::new(entity.id.unwrap()).unwrap()
    }

    /// Gets the stored representation of the customer identified by `id`, if any.
    pub(crate) async fn get(&self, id: CustomerId) -> Option<CustomerEntity> {
        db::find_by_id(&mut self.db.ex().await.unwrap(), id).await.unwrap()
    }

    /// Gets the stored representations of all customers.
    pub(crate) async fn all(&self) -> Vec<CustomerEntity> {
        db::find_all_ordered_by_name(&mut self.db.ex().await.unwrap()).await.unwrap()
    }
}
