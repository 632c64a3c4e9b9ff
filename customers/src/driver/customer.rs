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

//! Operations on one customer.

use crate::db;
use crate::driver::{CustomerDriver, email_in_use, not_found};
use crate::mapper;
use crate::model::{Customer, CustomerDraft, CustomerId};
use customers_core::db::DbError;
use customers_core::driver::{DriverError, DriverResult};
use customers_core::model::{EmailAddress, FieldErrors};
use log::info;

impl CustomerDriver {
    /// Gets the customer identified by `id`, if it exists.
    pub(crate) async fn find_by_id(self, id: CustomerId) -> DriverResult<Option<Customer>> {
        let mut ex = self.db.ex().await?;
        let entity = db::find_by_id(&mut ex, id).await?;
        let customer = entity.map(mapper::to_domain).transpose().map_err(DbError::from)?;
        Ok(customer)
    }

    /// Gets the customer that owns the `email` address.
    pub(crate) async fn find_by_email(self, email: &EmailAddress) -> DriverResult<Customer> {
        let mut ex = self.db.ex().await?;
        let entity = match db::find_by_email(&mut ex, email).await {
            Ok(entity) => entity,
            Err(DbError::NotFound) => {
                return Err(DriverError::NotFound(format!(
                    "No Customer with the email {} was found!",
                    email.as_str()
                )));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(mapper::to_domain(entity).map_err(DbError::from)?)
    }

    /// Creates a new customer from `draft` and returns it with its newly-assigned identifier.
    ///
    /// Any identifier present in `draft` is ignored.
    pub(crate) async fn create(self, mut draft: CustomerDraft) -> DriverResult<Customer> {
        draft.id = None;
        let mut customer = draft.validate().map_err(DriverError::InvalidFields)?;
        self.check_area_code(&customer).await?;

        let email_taken = || {
            DriverError::UniqueViolation(FieldErrors::single(
                "email",
                format!(
                    "The email {} is already used, please use a unique email",
                    customer.email().as_str()
                ),
            ))
        };

        let mut tx = self.db.begin().await?;
        if email_in_use(tx.ex(), customer.email(), None).await? {
            return Err(email_taken());
        }
        let entity = match db::create(tx.ex(), mapper::to_entity(&customer)).await {
            Ok(entity) => entity,
            Err(DbError::AlreadyExists) => return Err(email_taken()),
            Err(e) => return Err(e.into()),
        };
        tx.commit().await?;

        mapper::update_domain_from_entity(&entity, &mut customer).map_err(DbError::from)?;
        info!("Created customer {:?}", customer);
        Ok(customer)
    }

    /// Replaces the details of the existing customer identified by `id` with those in `draft`.
    pub(crate) async fn update(
        self,
        id: CustomerId,
        mut draft: CustomerDraft,
    ) -> DriverResult<Customer> {
        let email_taken = || {
            DriverError::UniqueViolation(FieldErrors::single(
                "email",
                "That email is already used, please use a unique email",
            ))
        };

        let mut tx = self.db.begin().await?;
        let mut entity = match db::find_by_id(tx.ex(), id).await? {
            Some(entity) => entity,
            None => return Err(not_found(id)),
        };

        draft.id = Some(id.as_i64());
        let customer = draft.validate().map_err(DriverError::InvalidFields)?;
        self.check_area_code(&customer).await?;

        if email_in_use(tx.ex(), customer.email(), Some(id)).await? {
            return Err(email_taken());
        }
        mapper::update_entity_from_domain(&customer, &mut entity);
        let entity = match db::update(tx.ex(), entity).await {
            Ok(entity) => entity,
            Err(DbError::AlreadyExists) => return Err(email_taken()),
            Err(e) => return Err(e.into()),
        };
        let customer = mapper::to_domain(entity).map_err(DbError::from)?;
        tx.commit().await?;

        info!("Updated customer {:?}", customer);
        Ok(customer)
    }

    /// Deletes the existing customer identified by `id`.
    pub(crate) async fn delete(self, id: CustomerId) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;
        let entity = match db::find_by_id(tx.ex(), id).await? {
            Some(entity) => entity,
            None => return Err(not_found(id)),
        };
        db::delete(tx.ex(), &entity).await?;
        tx.commit().await?;

        info!("Deleted customer {}", id.as_i64());
        Ok(())
    }
}
