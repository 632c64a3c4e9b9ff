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

//! Test utilities for the business layer.

use crate::areacodes::{AnyAreaCode, AreaCodeLookup};
use crate::db::{self, CustomerEntity};
use crate::driver::CustomerDriver;
use crate::model::CustomerId;
use customers_core::db::{Db, Executor};
use std::sync::Arc;

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the driver, for direct manipulation.
    db: Arc<dyn Db + Send + Sync>,

    /// The driver under test.
    driver: CustomerDriver,
}

impl TestContext {
    /// Initializes the driver using an in-memory database that accepts any area code.
    pub(crate) async fn setup() -> Self {
        Self::setup_with(Arc::from(AnyAreaCode::default())).await
    }

    /// Initializes the driver using an in-memory database and the given `area_codes` registry.
    pub(crate) async fn setup_with(area_codes: Arc<dyn AreaCodeLookup + Send + Sync>) -> Self {
        let db: Arc<dyn Db + Send + Sync> =
            Arc::new(customers_core::db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let driver = CustomerDriver::new(db.clone(), area_codes);
        Self { db, driver }
    }

    /// Gets a direct executor against the database.
    pub(crate) async fn ex(&self) -> Executor {
        self.db.ex().await.unwrap()
    }

    /// Gets a copy of the driver in this test context.
    pub(crate) fn driver(&self) -> CustomerDriver {
        self.driver.clone()
    }

    /// Inserts a customer directly into the database, bypassing all validation, and returns
    /// its identifier.
    pub(crate) async fn insert(&self, name: &str, email: &str, phone_number: &str) -> CustomerId {
        let entity = CustomerEntity {
            id: None,
            name: name.to_owned(),
            email: email.to_owned(),
            phone_number: phone_number.to_owned(),
        };
        let entity = db::create(&mut self.ex().await, entity).await.unwrap();
        CustomerId::new(entity.id.unwrap()).unwrap()
    }

    /// Adds a unique index that treats email addresses differing only in case as equal, so that
    /// the database rejects writes that the exact-match email lookups let through.
    pub(crate) async fn add_case_insensitive_email_index(&self) {
        match &mut self.ex().await {
            Executor::Sqlite(ex) => {
                let query_str =
                    "CREATE UNIQUE INDEX customers_email_nocase ON customers (lower(email))";
                sqlx::query(query_str).execute(&mut **ex).await.unwrap();
            }

            #[allow(unused)]
            _ => unreachable!(),
        }
    }

    /// Counts the customers stored in the database.
    pub(crate) async fn count(&self) -> usize {
        db::find_all_ordered_by_name(&mut self.ex().await).await.unwrap().len()
    }
}
