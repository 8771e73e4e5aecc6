//! PostgreSQL integration tests for the users domain.
//!
//! These start a container through `test_utils::TestDatabase` and are
//! ignored by default; run them with `cargo test -- --ignored` where Docker
//! is available.

use domain_users::*;
use test_utils::{TestDataBuilder, TestDatabase};

fn hasher() -> PasswordHasher {
    PasswordHasher::new(&PasswordHashConfig::fast()).unwrap()
}

#[tokio::test]
#[ignore]
async fn test_register_persists_user() {
    let db = TestDatabase::new().await;
    let repo = PgUsersRepository::new(db.connection());
    let use_case = RegisterUseCase::new(repo.clone(), hasher());
    let builder = TestDataBuilder::from_test_name("pg_register_persists");

    let output = use_case
        .execute(RegisterUserInput {
            name: "Juan Frederico".to_string(),
            email: builder.email("juan"),
            password: "123456".to_string(),
        })
        .await
        .unwrap();

    let stored = repo.find_by_id(output.user.id).await.unwrap().unwrap();
    assert_eq!(stored.email, builder.email("juan"));
    assert_eq!(stored.name, "Juan Frederico");
    assert!(hasher().verify("123456", &stored.password_hash).await.unwrap());
}

#[tokio::test]
#[ignore]
async fn test_register_twice_is_rejected() {
    let db = TestDatabase::new().await;
    let use_case = RegisterUseCase::new(PgUsersRepository::new(db.connection()), hasher());
    let builder = TestDataBuilder::from_test_name("pg_register_twice");

    let input = RegisterUserInput {
        name: "Juan Frederico".to_string(),
        email: builder.email("juan"),
        password: "123456".to_string(),
    };

    use_case.execute(input.clone()).await.unwrap();
    let err = use_case.execute(input).await.unwrap_err();
    assert!(matches!(err, UserError::AlreadyExists(_)));
}

#[tokio::test]
#[ignore]
async fn test_unique_index_rejects_direct_duplicate_insert() {
    let db = TestDatabase::new().await;
    let repo = PgUsersRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("pg_unique_index");

    let new_user = NewUser {
        name: "Juan Frederico".to_string(),
        email: builder.email("juan"),
        password_hash: "$argon2id$v=19$m=8,t=1,p=1$c2FsdHNhbHQ$aGFzaA".to_string(),
    };

    repo.create(new_user.clone()).await.unwrap();
    let err = repo.create(new_user).await.unwrap_err();
    assert!(matches!(err, UserError::AlreadyExists(ref e) if *e == builder.email("juan")));
}

#[tokio::test]
#[ignore]
async fn test_find_by_email_is_case_sensitive() {
    let db = TestDatabase::new().await;
    let repo = PgUsersRepository::new(db.connection());

    repo.create(NewUser {
        name: "Juan Frederico".to_string(),
        email: "juanFred@gmail.com".to_string(),
        password_hash: "hash".to_string(),
    })
    .await
    .unwrap();

    assert!(repo.find_by_email("juanFred@gmail.com").await.unwrap().is_some());
    assert!(repo.find_by_email("juanfred@gmail.com").await.unwrap().is_none());
}
