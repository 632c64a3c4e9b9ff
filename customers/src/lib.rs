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

//! REST service to manage customer records.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use customers_core::db::Db;
use customers_core::env::get_optional_var;
use log::info;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

pub mod areacodes;
use areacodes::{AnyAreaCode, AreaCodeLookup, AreaCodeSet};
pub mod db;
pub mod driver;
use driver::CustomerDriver;
pub(crate) mod mapper;
pub mod model;
mod rest;
use rest::app;

/// Default port to listen on when none is configured.
const DEFAULT_PORT: u16 = 3000;

/// Configuration options for the service.
#[derive(Debug, PartialEq)]
pub struct ServiceOptions {
    /// Port to listen on.
    pub port: u16,

    /// Known area codes.  If not set, any area code is accepted.
    pub area_codes: Option<AreaCodeSet>,
}

impl ServiceOptions {
    /// Creates a set of options from environment variables whose name is prefixed with the given
    /// `prefix`.
    ///
    /// This will use variables such as `<prefix>_PORT` and `<prefix>_AREA_CODES`.
    pub fn from_env(prefix: &str) -> Result<ServiceOptions, String> {
        Ok(ServiceOptions {
            port: get_optional_var::<u16>(prefix, "PORT")?.unwrap_or(DEFAULT_PORT),
            area_codes: AreaCodeSet::from_env(prefix)?,
        })
    }

    /// Returns the area code registry described by these options.
    pub fn area_code_lookup(&self) -> Arc<dyn AreaCodeLookup + Send + Sync> {
        match &self.area_codes {
            Some(codes) => Arc::from(codes.clone()),
            None => Arc::from(AnyAreaCode::default()),
        }
    }
}

/// Instantiates all resources to serve the application on `bind_addr`.
///
/// While it'd be nice to push this responsibility to `main`, doing so would force us to expose many
/// crate-internal types to the public, which in turn would make dead code detection harder.
pub async fn serve(
    bind_addr: impl Into<SocketAddr>,
    db: Arc<dyn Db + Send + Sync>,
    area_codes: Arc<dyn AreaCodeLookup + Send + Sync>,
) -> Result<(), Box<dyn Error>> {
    let driver = CustomerDriver::new(db, area_codes);
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    let app = app(driver).layer(cors);

    let bind_addr = bind_addr.into();
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("Listening on {}", bind_addr);
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
