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

//! Common tests for any database implementation.

use crate::db::*;
use crate::model::CustomerId;
use customers_core::db::{Db, DbError};
use customers_core::model::EmailAddress;
use std::sync::Arc;

/// Syntactic sugar to build an entity that has not been persisted yet.
fn entity(name: &str, email: &str, phone_number: &str) -> CustomerEntity {
    CustomerEntity {
        id: None,
        name: name.to_owned(),
        email: email.to_owned(),
        phone_number: phone_number.to_owned(),
    }
}

/// Initializes the schema in `db` and returns an executor against it.
async fn setup_ex(db: &Arc<dyn Db + Send + Sync>) -> Executor {
    let mut ex = db.ex().await.unwrap();
    init_schema(&mut ex).await.unwrap();
    ex
}

async fn test_init_schema_is_idempotent(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = setup_ex(&db).await;
    init_schema(&mut ex).await.unwrap();
    assert!(find_all_ordered_by_name(&mut ex).await.unwrap().is_empty());
}

async fn test_create_assigns_id(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = setup_ex(&db).await;

    let mut input = entity("Jane Doe", "jane@example.com", "2015550123");
    input.id = Some(12345);
    let created = create(&mut ex, input.clone()).await.unwrap();
    let id = created.id.unwrap();
    assert_ne!(12345, id);
    assert_eq!(CustomerEntity { id: Some(id), ..input }, created);

    let other =
        create(&mut ex, entity("John Doe", "john@example.com", "2015550124")).await.unwrap();
    assert_ne!(id, other.id.unwrap());
}

async fn test_create_duplicate_email(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = setup_ex(&db).await;

    create(&mut ex, entity("Jane Doe", "jane@example.com", "2015550123")).await.unwrap();
    assert_eq!(
        DbError::AlreadyExists,
        create(&mut ex, entity("Other Jane", "jane@example.com", "2015550999")).await.unwrap_err()
    );
    assert_eq!(1, find_all_ordered_by_name(&mut ex).await.unwrap().len());
}

async fn test_find_all_ordered_by_name(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = setup_ex(&db).await;

    assert!(find_all_ordered_by_name(&mut ex).await.unwrap().is_empty());

    let c = create(&mut ex, entity("Carol", "carol@example.com", "2015550003")).await.unwrap();
    let a = create(&mut ex, entity("Alice", "alice@example.com", "2015550001")).await.unwrap();
    let b = create(&mut ex, entity("Bob", "bob@example.com", "2015550002")).await.unwrap();

    assert_eq!(vec![a, b, c], find_all_ordered_by_name(&mut ex).await.unwrap());
}

async fn test_find_by_id(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = setup_ex(&db).await;

    let created =
        create(&mut ex, entity("Jane Doe", "jane@example.com", "2015550123")).await.unwrap();
    let id = CustomerId::new(created.id.unwrap()).unwrap();

    assert_eq!(Some(created), find_by_id(&mut ex, id).await.unwrap());

    let missing = CustomerId::new(id.as_i64() + 100).unwrap();
    assert_eq!(None, find_by_id(&mut ex, missing).await.unwrap());
}

async fn test_find_by_email(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = setup_ex(&db).await;

    let created =
        create(&mut ex, entity("Jane Doe", "jane@example.com", "2015550123")).await.unwrap();
    create(&mut ex, entity("John Doe", "john@example.com", "2015550124")).await.unwrap();

    assert_eq!(
        created,
        find_by_email(&mut ex, &EmailAddress::new("jane@example.com").unwrap()).await.unwrap()
    );
    assert_eq!(
        DbError::NotFound,
        find_by_email(&mut ex, &EmailAddress::new("nobody@example.com").unwrap())
            .await
            .unwrap_err()
    );
}

async fn test_find_all_by_name(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = setup_ex(&db).await;

    let jane1 = create(&mut ex, entity("Jane", "jane1@example.com", "2015550001")).await.unwrap();
    create(&mut ex, entity("Jane Doe", "jane2@example.com", "2015550002")).await.unwrap();
    let jane3 = create(&mut ex, entity("Jane", "jane3@example.com", "2015550003")).await.unwrap();

    assert_eq!(vec![jane1, jane3], find_all_by_name(&mut ex, "Jane").await.unwrap());
    assert!(find_all_by_name(&mut ex, "jane").await.unwrap().is_empty());
    assert!(find_all_by_name(&mut ex, "Ja").await.unwrap().is_empty());
}

async fn test_update_existing(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = setup_ex(&db).await;

    let mut created =
        create(&mut ex, entity("Jane Doe", "jane@example.com", "2015550123")).await.unwrap();
    let id = CustomerId::new(created.id.unwrap()).unwrap();

    created.name = "Jane Smith".to_owned();
    created.email = "smith@example.com".to_owned();
    let updated = update(&mut ex, created.clone()).await.unwrap();
    assert_eq!(created, updated);

    assert_eq!(Some(created), find_by_id(&mut ex, id).await.unwrap());
    assert_eq!(1, find_all_ordered_by_name(&mut ex).await.unwrap().len());
}

async fn test_update_inserts_missing(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = setup_ex(&db).await;

    let mut input = entity("Jane Doe", "jane@example.com", "2015550123");
    input.id = Some(40);
    update(&mut ex, input.clone()).await.unwrap();

    assert_eq!(Some(input), find_by_id(&mut ex, CustomerId::new(40).unwrap()).await.unwrap());
}

async fn test_update_without_id(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = setup_ex(&db).await;

    match update(&mut ex, entity("Jane Doe", "jane@example.com", "2015550123")).await {
        Err(DbError::DataIntegrityError(e)) => assert!(e.contains("without an id")),
        e => panic!("{:?}", e),
    }
}

async fn test_update_duplicate_email(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = setup_ex(&db).await;

    create(&mut ex, entity("Jane Doe", "jane@example.com", "2015550123")).await.unwrap();
    let mut john =
        create(&mut ex, entity("John Doe", "john@example.com", "2015550124")).await.unwrap();

    john.email = "jane@example.com".to_owned();
    assert_eq!(DbError::AlreadyExists, update(&mut ex, john).await.unwrap_err());
}

async fn test_delete(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = setup_ex(&db).await;

    let jane = create(&mut ex, entity("Jane Doe", "jane@example.com", "2015550123")).await.unwrap();
    let john = create(&mut ex, entity("John Doe", "john@example.com", "2015550124")).await.unwrap();

    delete(&mut ex, &jane).await.unwrap();
    assert_eq!(vec![john], find_all_ordered_by_name(&mut ex).await.unwrap());

    assert_eq!(DbError::NotFound, delete(&mut ex, &jane).await.unwrap_err());
}

async fn test_delete_without_id(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = setup_ex(&db).await;

    let jane = create(&mut ex, entity("Jane Doe", "jane@example.com", "2015550123")).await.unwrap();

    delete(&mut ex, &entity("Jane Doe", "jane@example.com", "2015550123")).await.unwrap();
    assert_eq!(vec![jane], find_all_ordered_by_name(&mut ex).await.unwrap());
}

async fn test_create_rolled_back_on_drop(db: Arc<dyn Db + Send + Sync>) {
    drop(setup_ex(&db).await);

    {
        let mut tx = db.begin().await.unwrap();
        create(tx.ex(), entity("Jane Doe", "jane@example.com", "2015550123")).await.unwrap();
    }

    let mut ex = db.ex().await.unwrap();
    assert!(find_all_ordered_by_name(&mut ex).await.unwrap().is_empty());
}

async fn test_create_committed(db: Arc<dyn Db + Send + Sync>) {
    drop(setup_ex(&db).await);

    let mut tx = db.begin().await.unwrap();
    let created =
        create(tx.ex(), entity("Jane Doe", "jane@example.com", "2015550123")).await.unwrap();
    tx.commit().await.unwrap();

    let mut ex = db.ex().await.unwrap();
    assert_eq!(vec![created], find_all_ordered_by_name(&mut ex).await.unwrap());
}

macro_rules! generate_db_tests [
    ( $setup:expr $(, #[$extra:meta])? ) => {
        customers_core::db::testutils::generate_tests!(
            $( #[$extra], )?
            $setup,
            $crate::db::tests,
            test_init_schema_is_idempotent,
            test_create_assigns_id,
            test_create_duplicate_email,
            test_find_all_ordered_by_name,
            test_find_by_id,
            test_find_by_email,
            test_find_all_by_name,
            test_update_existing,
            test_update_inserts_missing,
            test_update_without_id,
            test_update_duplicate_email,
            test_delete,
            test_delete_without_id,
            test_create_rolled_back_on_drop,
            test_create_committed
        );
    }
];

#[cfg(feature = "postgres")]
mod postgres {
    use super::*;
    use customers_core::db::postgres::testutils;

    generate_db_tests!(
        Arc::new(testutils::setup().await),
        #[ignore = "Requires environment configuration and is expensive"]
    );
}

mod sqlite {
    use super::*;
    use customers_core::db::sqlite::testutils;

    generate_db_tests!(Arc::new(testutils::setup().await));
}
