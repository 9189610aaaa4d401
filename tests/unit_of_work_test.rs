mod common;

use postgres_shop_dataset::{
    DatasetError, Executor, UnitOfWork, UnitOfWorkSession, User, UserRepository,
};

use common::{cleanup_dataset, setup_dataset};

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
#[serial_test::serial]
async fn test_commit_functionality() {
    let dataset = setup_dataset().await;
    let uow = dataset.unit_of_work();

    let session = uow.begin().await.expect("Failed to begin transaction");
    let user_repo = UserRepository::new(session.executor().clone());

    let user = User::new(42, "john_doe", "john@example.com");
    user_repo.insert(&user).await.expect("Failed to insert user");

    // Visible inside the transaction before commit
    let found = user_repo
        .find_by_id(42)
        .await
        .expect("Failed to find user")
        .expect("User not found");
    assert_eq!(found, user);

    session.commit().await.expect("Failed to commit transaction");

    let verify_session = uow.begin().await.expect("Failed to begin verify transaction");
    let verify_repo = UserRepository::new(verify_session.executor().clone());
    let persisted = verify_repo
        .find_by_id(42)
        .await
        .expect("Failed to find persisted user")
        .expect("Persisted user not found");
    assert_eq!(persisted.username, "john_doe");
    verify_session.commit().await.expect("Failed to commit verify transaction");

    cleanup_dataset(dataset).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
#[serial_test::serial]
async fn test_rollback_functionality() {
    let dataset = setup_dataset().await;
    let uow = dataset.unit_of_work();

    let session = uow.begin().await.expect("Failed to begin transaction");
    let user_repo = UserRepository::new(session.executor().clone());
    user_repo
        .insert(&User::new(7, "jane_doe", "jane@example.com"))
        .await
        .expect("Failed to insert user");
    assert_eq!(user_repo.count().await.expect("Failed to count users"), 1);

    session.rollback().await.expect("Failed to rollback transaction");

    let verify_session = uow.begin().await.expect("Failed to begin verify transaction");
    let verify_repo = UserRepository::new(verify_session.executor().clone());
    assert!(verify_repo
        .find_by_id(7)
        .await
        .expect("Failed to query user")
        .is_none());
    assert_eq!(verify_repo.count().await.expect("Failed to count users"), 0);
    verify_session.commit().await.expect("Failed to commit verify transaction");

    cleanup_dataset(dataset).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
#[serial_test::serial]
async fn test_executor_is_closed_after_commit() {
    let dataset = setup_dataset().await;
    let uow = dataset.unit_of_work();

    let session = uow.begin().await.expect("Failed to begin transaction");
    let executor: Executor = session.executor().clone();
    session.commit().await.expect("Failed to commit transaction");

    let err = UserRepository::new(executor)
        .count()
        .await
        .expect_err("Executor should be closed");
    assert!(matches!(err, DatasetError::TransactionClosed));

    cleanup_dataset(dataset).await;
}
