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

//! Business logic for the service.

use crate::areacodes::AreaCodeLookup;
use crate::db;
use crate::model::{Customer, CustomerId};
use customers_core::db::{Db, DbError, DbResult, Executor};
use customers_core::driver::{DriverError, DriverResult};
use customers_core::model::{EmailAddress, FieldErrors};
use std::sync::Arc;

mod customer;
mod customers;
#[cfg(test)]
pub(crate) mod testutils;

/// Business logic.
///
/// The public operations exposed by the driver are all "one shot": they start and commit a
/// transaction, so it's incorrect for the caller to use two separate calls.  For this reason,
/// these operations consume the driver in an attempt to minimize the possibility of executing
/// two operations.
#[derive(Clone)]
pub struct CustomerDriver {
    /// The database that the driver uses for persistence.
    db: Arc<dyn Db + Send + Sync>,

    /// The registry used to validate the area code of phone numbers.
    area_codes: Arc<dyn AreaCodeLookup + Send + Sync>,
}

impl CustomerDriver {
    /// Creates a new driver backed by the given injected components.
    pub fn new(
        db: Arc<dyn Db + Send + Sync>,
        area_codes: Arc<dyn AreaCodeLookup + Send + Sync>,
    ) -> Self {
        Self { db, area_codes }
    }

    /// Checks that the area code of the phone number of `customer` is recognized.
    async fn check_area_code(&self, customer: &Customer) -> DriverResult<()> {
        let code = customer.phone_number().area_code();
        match self.area_codes.is_valid(&code).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(DriverError::InvalidReference(FieldErrors::single(
                "area_code",
                "The telephone area code provided is not recognised, please provide another",
            ))),
            Err(e) => Err(DriverError::BackendError(format!(
                "Failed to validate area code {}: {}",
                code.as_str(),
                e
            ))),
        }
    }
}

/// Builds the error returned when the customer identified by `id` does not exist.
fn not_found(id: CustomerId) -> DriverError {
    DriverError::NotFound(format!("No Customer with the id {} was found!", id.as_i64()))
}

/// Checks if `email` already belongs to a customer other than the one identified by `except`.
async fn email_in_use(
    ex: &mut Executor,
    email: &EmailAddress,
    except: Option<CustomerId>,
) -> DbResult<bool> {
    match db::find_by_email(ex, email).await {
        Ok(entity) => Ok(entity.id != except.map(CustomerId::as_i64)),
        Err(DbError::NotFound) => Ok(false),
        Err(e) => Err(e),
    }
}
