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

//! High-level data types.

use customers_core::model::{EmailAddress, FieldErrors, ModelError, ModelResult};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Minimum number of characters in a customer name.
const MIN_NAME_LENGTH: usize = 2;

/// Maximum number of characters in a customer name.
const MAX_NAME_LENGTH: usize = 25;

/// Minimum number of digits in a phone number.
const MIN_PHONE_DIGITS: usize = 10;

/// Maximum number of digits in a phone number.
const MAX_PHONE_DIGITS: usize = 12;

/// Number of leading digits of a phone number that make up its area code.
const AREA_CODE_DIGITS: usize = 3;

/// Message reported for fields that must be present but were not provided.
const MISSING_FIELD: &str = "must not be null";

/// Identifier of a customer, as assigned by the database.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct CustomerId(i64);

impl CustomerId {
    /// Creates a new identifier after validating that it is positive.
    pub fn new(id: i64) -> ModelResult<Self> {
        if id <= 0 {
            return Err(ModelError(format!("Customer id must be positive but got {}", id)));
        }
        Ok(Self(id))
    }

    /// Parses an identifier from its textual form, which must consist only of digits.
    pub fn parse(raw: &str) -> ModelResult<Self> {
        if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
            return Err(ModelError(format!("Customer id '{}' is not a number", raw)));
        }
        match raw.parse::<i64>() {
            Ok(id) => Self::new(id),
            Err(e) => Err(ModelError(format!("Customer id '{}' is out of range: {}", raw, e))),
        }
    }

    /// Returns the identifier as an `i64`, which is what the database stores.
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for CustomerId {
    type Error = ModelError;

    fn try_from(id: i64) -> ModelResult<Self> {
        Self::new(id)
    }
}

impl From<CustomerId> for i64 {
    fn from(id: CustomerId) -> Self {
        id.0
    }
}

/// Full name of a customer.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct CustomerName(String);

impl CustomerName {
    /// Creates a new name from an untrusted string `s`, making sure it is valid.
    pub fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();

        let length = s.chars().count();
        if !(MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&length) {
            return Err(ModelError(format!(
                "Name must be between {} and {} characters",
                MIN_NAME_LENGTH, MAX_NAME_LENGTH
            )));
        }
        if s.trim().is_empty() {
            return Err(ModelError("Name cannot be blank".to_owned()));
        }
        if !s.chars().all(|c| c.is_alphabetic() || c == ' ') {
            return Err(ModelError("Name can only contain letters and spaces".to_owned()));
        }

        Ok(Self(s))
    }

    /// Returns a string view of the name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CustomerName {
    type Error = ModelError;

    fn try_from(s: String) -> ModelResult<Self> {
        Self::new(s)
    }
}

impl From<CustomerName> for String {
    fn from(name: CustomerName) -> Self {
        name.0
    }
}

/// Telephone area code, which is the prefix of a phone number.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct AreaCode(String);

impl AreaCode {
    /// Creates a new area code from an untrusted string `s`, making sure it is valid.
    pub fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();
        if s.len() != AREA_CODE_DIGITS || !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(ModelError(format!(
                "Area code '{}' must have exactly {} digits",
                s, AREA_CODE_DIGITS
            )));
        }
        Ok(Self(s))
    }

    /// Returns a string view of the area code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Telephone number of a customer, made of digits only.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Creates a new phone number from an untrusted string `s`, making sure it is valid.
    pub fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();

        if !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(ModelError("Phone number can only contain digits".to_owned()));
        }
        if !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&s.len()) {
            return Err(ModelError(format!(
                "Phone number must have between {} and {} digits",
                MIN_PHONE_DIGITS, MAX_PHONE_DIGITS
            )));
        }

        Ok(Self(s))
    }

    /// Returns the area code of this phone number.
    pub fn area_code(&self) -> AreaCode {
        AreaCode(self.0[0..AREA_CODE_DIGITS].to_owned())
    }

    /// Returns a string view of the phone number.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = ModelError;

    fn try_from(s: String) -> ModelResult<Self> {
        Self::new(s)
    }
}

impl From<PhoneNumber> for String {
    fn from(phone: PhoneNumber) -> Self {
        phone.0
    }
}

/// A validated customer.
///
/// The `id` is only missing for customers that have not been persisted yet.
#[derive(Clone, Debug, Deserialize, Eq, Getters, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Identifier assigned by the database.
    id: Option<CustomerId>,

    /// Full name of the customer.
    name: CustomerName,

    /// Contact email address, unique across all customers.
    email: EmailAddress,

    /// Contact phone number.
    phone_number: PhoneNumber,
}

impl Customer {
    /// Creates a new customer that has not been persisted yet.
    pub fn new(name: CustomerName, email: EmailAddress, phone_number: PhoneNumber) -> Self {
        Self { id: None, name, email, phone_number }
    }

    /// Sets the identifier of the customer.
    pub fn with_id(mut self, id: CustomerId) -> Self {
        self.id = Some(id);
        self
    }

    /// Replaces all fields of the customer with the given values.
    pub(crate) fn set_fields(
        &mut self,
        id: Option<CustomerId>,
        name: CustomerName,
        email: EmailAddress,
        phone_number: PhoneNumber,
    ) {
        self.id = id;
        self.name = name;
        self.email = email;
        self.phone_number = phone_number;
    }
}

/// Unvalidated representation of a customer as received from a client.
///
/// All fields are optional so that every violation can be reported at once by `validate`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDraft {
    /// Identifier of the customer, if any.
    #[serde(default)]
    pub id: Option<i64>,

    /// Full name of the customer.
    #[serde(default)]
    pub name: Option<String>,

    /// Contact email address.
    #[serde(default)]
    pub email: Option<String>,

    /// Contact phone number.
    #[serde(default)]
    pub phone_number: Option<String>,
}

impl CustomerDraft {
    /// Validates all fields of the draft and returns the corresponding `Customer`.
    ///
    /// Failures are reported per field, keyed by the field names used on the wire.
    pub fn validate(self) -> Result<Customer, FieldErrors> {
        let mut errors = FieldErrors::default();

        let id = match self.id.map(CustomerId::new).transpose() {
            Ok(id) => id,
            Err(e) => {
                errors.add("id", e.to_string());
                None
            }
        };
        let name = validate_field(&mut errors, "name", self.name, CustomerName::new);
        let email = validate_field(&mut errors, "email", self.email, EmailAddress::new);
        let phone_number =
            validate_field(&mut errors, "phoneNumber", self.phone_number, PhoneNumber::new);

        match (name, email, phone_number) {
            (Some(name), Some(email), Some(phone_number)) if errors.is_empty() => {
                let mut customer = Customer::new(name, email, phone_number);
                customer.id = id;
                Ok(customer)
            }
            _ => Err(errors),
        }
    }
}

impl From<&Customer> for CustomerDraft {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id.map(CustomerId::as_i64),
            name: Some(customer.name.as_str().to_owned()),
            email: Some(customer.email.as_str().to_owned()),
            phone_number: Some(customer.phone_number.as_str().to_owned()),
        }
    }
}

/// Validates a required `value` with `parse`, recording any problem in `errors` under `field`.
fn validate_field<T, F>(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<String>,
    parse: F,
) -> Option<T>
where
    F: FnOnce(String) -> ModelResult<T>,
{
    match value {
        None => {
            errors.add(field, MISSING_FIELD);
            None
        }
        Some(value) => match parse(value) {
            Ok(value) => Some(value),
            Err(e) => {
                errors.add(field, e.to_string());
                None
            }
        },
    }
}
