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

//! Entry point to the customers service.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use customers::db::init_schema;
use customers::{ServiceOptions, serve};
use customers_core::db::Db;
use customers_core::db::postgres::{PostgresDb, PostgresOptions};
use std::net::Ipv4Addr;
use std::process;
use std::sync::Arc;

/// Prints `message` as a fatal error and exits the program.
fn fail(message: String) -> ! {
    log::error!("{}", message);
    eprintln!("customers: {}", message);
    process::exit(1);
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let opts = ServiceOptions::from_env("CUSTOMERS").unwrap_or_else(|e| fail(e));
    let addr = (Ipv4Addr::UNSPECIFIED, opts.port);

    let db_opts = PostgresOptions::from_env("PGSQL_PROD").unwrap_or_else(|e| fail(e));
    let db = PostgresDb::connect(db_opts).unwrap_or_else(|e| fail(e.to_string()));
    let db: Arc<dyn Db + Send + Sync> = Arc::new(db);
    let mut ex = db.ex().await.unwrap_or_else(|e| fail(e.to_string()));
    init_schema(&mut ex).await.unwrap_or_else(|e| fail(e.to_string()));
    drop(ex);

    if let Err(e) = serve(addr, db.clone(), opts.area_code_lookup()).await {
        fail(e.to_string());
    }
    db.close().await;
}
