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

//! Validation of telephone area codes against a registry of known codes.

use crate::model::AreaCode;
use async_trait::async_trait;
use customers_core::env::get_optional_var;
use customers_core::model::ModelResult;
use std::collections::BTreeSet;
use std::io;

/// Interface to check whether an area code is in service.
#[async_trait]
pub trait AreaCodeLookup {
    /// Returns true if `code` is a recognized area code.
    async fn is_valid(&self, code: &AreaCode) -> io::Result<bool>;
}

/// Lookup that accepts any area code.  Used when no registry is configured.
#[derive(Clone, Default)]
pub struct AnyAreaCode {}

#[async_trait]
impl AreaCodeLookup for AnyAreaCode {
    async fn is_valid(&self, _code: &AreaCode) -> io::Result<bool> {
        Ok(true)
    }
}

/// Lookup backed by a fixed set of known area codes.
#[derive(Clone, Debug, PartialEq)]
pub struct AreaCodeSet {
    /// The recognized area codes.
    codes: BTreeSet<AreaCode>,
}

impl AreaCodeSet {
    /// Creates a new set from a comma-separated `list` of area codes.  Whitespace around each
    /// code is ignored.
    pub fn from_list(list: &str) -> ModelResult<Self> {
        let mut codes = BTreeSet::default();
        for raw in list.split(',') {
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }
            codes.insert(AreaCode::new(raw)?);
        }
        Ok(Self { codes })
    }

    /// Creates a new set from the `<prefix>_AREA_CODES` environment variable, which holds a
    /// comma-separated list of area codes.  Returns `None` if the variable is not set.
    pub fn from_env(prefix: &str) -> Result<Option<Self>, String> {
        match get_optional_var::<String>(prefix, "AREA_CODES")? {
            Some(list) => match Self::from_list(&list) {
                Ok(codes) => Ok(Some(codes)),
                Err(e) => Err(format!("Invalid {}_AREA_CODES: {}", prefix, e)),
            },
            None => Ok(None),
        }
    }

    /// Returns the number of recognized area codes.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Returns true if there are no recognized area codes.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

#[async_trait]
impl AreaCodeLookup for AreaCodeSet {
    async fn is_valid(&self, code: &AreaCode) -> io::Result<bool> {
        Ok(self.codes.contains(code))
    }
}
