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

//! Database abstraction to persist customers.
//!
//! The functions in this module operate on `CustomerEntity`, which mirrors the columns of the
//! `customers` table.  There is no validation here: converting to and from the domain types is
//! the job of the `mapper` module.

use crate::model::CustomerId;
#[cfg(feature = "postgres")]
use customers_core::db::postgres;
#[cfg(any(feature = "sqlite", test))]
use customers_core::db::sqlite;
use customers_core::db::{DbError, DbResult, Executor};
use customers_core::model::EmailAddress;
use log::info;
use sqlx::Row;
#[cfg(feature = "postgres")]
use sqlx::postgres::PgRow;
#[cfg(any(feature = "sqlite", test))]
use sqlx::sqlite::SqliteRow;

#[cfg(test)]
mod tests;

/// Persistence representation of a customer, one per row in the `customers` table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CustomerEntity {
    /// Row identifier.  Missing until the database assigns one.
    pub id: Option<i64>,

    /// Value of the `name` column.
    pub name: String,

    /// Value of the `email` column.
    pub email: String,

    /// Value of the `phone_number` column.
    pub phone_number: String,
}

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for CustomerEntity {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(postgres::map_sqlx_error)?;
        let email: String = row.try_get("email").map_err(postgres::map_sqlx_error)?;
        let phone_number: String = row.try_get("phone_number").map_err(postgres::map_sqlx_error)?;
        Ok(CustomerEntity { id: Some(id), name, email, phone_number })
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for CustomerEntity {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(sqlite::map_sqlx_error)?;
        let email: String = row.try_get("email").map_err(sqlite::map_sqlx_error)?;
        let phone_number: String = row.try_get("phone_number").map_err(sqlite::map_sqlx_error)?;
        Ok(CustomerEntity { id: Some(id), name, email, phone_number })
    }
}

/// Initializes the database schema.
pub async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => postgres::run_schema(ex, include_str!("postgres.sql")).await,

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => sqlite::run_schema(ex, include_str!("sqlite.sql")).await,

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Gets all customers sorted by name in ascending order.
pub(crate) async fn find_all_ordered_by_name(ex: &mut Executor) -> DbResult<Vec<CustomerEntity>> {
    let query_str = "SELECT id, name, email, phone_number FROM customers ORDER BY name, id";
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let rows = sqlx::query(query_str)
                .fetch_all(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            rows.into_iter().map(CustomerEntity::try_from).collect()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let rows =
                sqlx::query(query_str).fetch_all(&mut **ex).await.map_err(sqlite::map_sqlx_error)?;
            rows.into_iter().map(CustomerEntity::try_from).collect()
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Gets the customer identified by `id`, if it exists.
pub(crate) async fn find_by_id(
    ex: &mut Executor,
    id: CustomerId,
) -> DbResult<Option<CustomerEntity>> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT id, name, email, phone_number FROM customers WHERE id = $1";
            let maybe_row = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_optional(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            maybe_row.map(CustomerEntity::try_from).transpose()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT id, name, email, phone_number FROM customers WHERE id = ?";
            let maybe_row = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_optional(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            maybe_row.map(CustomerEntity::try_from).transpose()
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Gets the customer that owns the `email` address.  Fails with `NotFound` if there is none.
pub(crate) async fn find_by_email(
    ex: &mut Executor,
    email: &EmailAddress,
) -> DbResult<CustomerEntity> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT id, name, email, phone_number FROM customers
                WHERE email = $1 ORDER BY id LIMIT 1";
            let row = sqlx::query(query_str)
                .bind(email.as_str())
                .fetch_one(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            CustomerEntity::try_from(row)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                SELECT id, name, email, phone_number FROM customers
                WHERE email = ? ORDER BY id LIMIT 1";
            let row = sqlx::query(query_str)
                .bind(email.as_str())
                .fetch_one(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            CustomerEntity::try_from(row)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Gets all customers whose name is exactly `name`.
pub(crate) async fn find_all_by_name(
    ex: &mut Executor,
    name: &str,
) -> DbResult<Vec<CustomerEntity>> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT id, name, email, phone_number FROM customers
                WHERE name = $1 ORDER BY id";
            let rows = sqlx::query(query_str)
                .bind(name)
                .fetch_all(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            rows.into_iter().map(CustomerEntity::try_from).collect()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                SELECT id, name, email, phone_number FROM customers
                WHERE name = ? ORDER BY id";
            let rows = sqlx::query(query_str)
                .bind(name)
                .fetch_all(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            rows.into_iter().map(CustomerEntity::try_from).collect()
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Inserts a new customer and returns it with the identifier assigned by the database.
///
/// Any identifier already present in `entity` is ignored.
pub(crate) async fn create(ex: &mut Executor, entity: CustomerEntity) -> DbResult<CustomerEntity> {
    let id: i64 = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO customers (name, email, phone_number)
                VALUES ($1, $2, $3)
                RETURNING id";
            let row = sqlx::query(query_str)
                .bind(&entity.name)
                .bind(&entity.email)
                .bind(&entity.phone_number)
                .fetch_one(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get("id").map_err(postgres::map_sqlx_error)?
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                INSERT INTO customers (name, email, phone_number)
                VALUES (?, ?, ?)
                RETURNING id";
            let row = sqlx::query(query_str)
                .bind(&entity.name)
                .bind(&entity.email)
                .bind(&entity.phone_number)
                .fetch_one(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            row.try_get("id").map_err(sqlite::map_sqlx_error)?
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    Ok(CustomerEntity { id: Some(id), ..entity })
}

/// Stores `entity` under its identifier, inserting it if there is no row with that identifier
/// yet or replacing the existing row otherwise.
pub(crate) async fn update(ex: &mut Executor, entity: CustomerEntity) -> DbResult<CustomerEntity> {
    let id = match entity.id {
        Some(id) => id,
        None => {
            return Err(DbError::DataIntegrityError(
                "Cannot update a customer without an id".to_owned(),
            ));
        }
    };

    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO customers (id, name, email, phone_number)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (id) DO UPDATE SET
                    name = excluded.name,
                    email = excluded.email,
                    phone_number = excluded.phone_number";
            let done = sqlx::query(query_str)
                .bind(id)
                .bind(&entity.name)
                .bind(&entity.email)
                .bind(&entity.phone_number)
                .execute(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                INSERT INTO customers (id, name, email, phone_number)
                VALUES (?, ?, ?, ?)
                ON CONFLICT (id) DO UPDATE SET
                    name = excluded.name,
                    email = excluded.email,
                    phone_number = excluded.phone_number";
            let done = sqlx::query(query_str)
                .bind(id)
                .bind(&entity.name)
                .bind(&entity.email)
                .bind(&entity.phone_number)
                .execute(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    if rows_affected != 1 {
        return Err(DbError::BackendError("Upsert affected more than one row".to_owned()));
    }
    Ok(entity)
}

/// Deletes the row backing `entity`.
///
/// Entities without an identifier were never persisted, so there is nothing to delete.
pub(crate) async fn delete(ex: &mut Executor, entity: &CustomerEntity) -> DbResult<()> {
    let id = match entity.id {
        Some(id) => id,
        None => {
            info!("Ignoring deletion of customer {} without an id", entity.email);
            return Ok(());
        }
    };

    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "DELETE FROM customers WHERE id = $1";
            let done = sqlx::query(query_str)
                .bind(id)
                .execute(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM customers WHERE id = ?";
            let done = sqlx::query(query_str)
                .bind(id)
                .execute(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    match rows_affected {
        0 => Err(DbError::NotFound),
        1 => Ok(()),
        _ => Err(DbError::BackendError("Deletion affected more than one row".to_owned())),
    }
}
