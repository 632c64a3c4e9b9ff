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

//! Operations on groups of customers.

use crate::db;
use crate::driver::CustomerDriver;
use crate::mapper;
use crate::model::Customer;
use customers_core::db::DbError;
use customers_core::driver::DriverResult;

impl CustomerDriver {
    /// Gets all customers sorted by name.
    pub(crate) async fn find_all_ordered_by_name(self) -> DriverResult<Vec<Customer>> {
        let mut ex = self.db.ex().await?;
        let entities = db::find_all_ordered_by_name(&mut ex).await?;
        Ok(mapper::to_domain_list(entities).map_err(DbError::from)?)
    }

    /// Gets all customers whose name matches `name` exactly.
    pub(crate) async fn find_all_by_name(self, name: &str) -> DriverResult<Vec<Customer>> {
        let mut ex = self.db.ex().await?;
        let entities = db::find_all_by_name(&mut ex, name).await?;
        Ok(mapper::to_domain_list(entities).map_err(DbError::from)?)
    }
}
