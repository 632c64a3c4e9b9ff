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

//! Conversions between the domain representation of customers and their persistence entities.

use crate::db::CustomerEntity;
use crate::model::{Customer, CustomerId, CustomerName, PhoneNumber};
use customers_core::model::{EmailAddress, ModelResult};

/// Builds a customer from its persisted form, re-validating all stored values.
pub(crate) fn to_domain(entity: CustomerEntity) -> ModelResult<Customer> {
    let customer = Customer::new(
        CustomerName::new(entity.name)?,
        EmailAddress::new(entity.email)?,
        PhoneNumber::new(entity.phone_number)?,
    );
    match entity.id {
        Some(id) => Ok(customer.with_id(CustomerId::new(id)?)),
        None => Ok(customer),
    }
}

/// Builds customers from their persisted forms, preserving their order.
pub(crate) fn to_domain_list(entities: Vec<CustomerEntity>) -> ModelResult<Vec<Customer>> {
    entities.into_iter().map(to_domain).collect()
}

/// Builds the persisted form of a customer.
pub(crate) fn to_entity(customer: &Customer) -> CustomerEntity {
    CustomerEntity {
        id: customer.id().map(CustomerId::as_i64),
        name: customer.name().as_str().to_owned(),
        email: customer.email().as_str().to_owned(),
        phone_number: customer.phone_number().as_str().to_owned(),
    }
}

/// Copies the data fields of `customer` into `entity`.  The identity of `entity` is kept as is.
pub(crate) fn update_entity_from_domain(customer: &Customer, entity: &mut CustomerEntity) {
    entity.name = customer.name().as_str().to_owned();
    entity.email = customer.email().as_str().to_owned();
    entity.phone_number = customer.phone_number().as_str().to_owned();
}

/// Copies all persisted fields of `entity` into `customer`, including the identifier that the
/// database assigned to it.
pub(crate) fn update_domain_from_entity(
    entity: &CustomerEntity,
    customer: &mut Customer,
) -> ModelResult<()> {
    let id = entity.id.map(CustomerId::new).transpose()?;
    customer.set_fields(
        id,
        CustomerName::new(entity.name.as_str())?,
        EmailAddress::new(entity.email.as_str())?,
        PhoneNumber::new(entity.phone_number.as_str())?,
    );
    Ok(())
}
