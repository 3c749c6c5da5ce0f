mod common;
use common::{create_test_app, for_each_backend, spawn_test_app, ErrorBody, TestAppClient};
use reqwest::StatusCode;
use todo_service::{TestStorageBuilder, Todo, TodoId, TodoStatus};

#[tokio::test]
async fn create_and_list_todo() {
    for_each_backend(|client| async move {
        let res = client.create_todo("Buy milk", None).await;
        assert_eq!(res.status(), StatusCode::OK);
        let created = res.json::<Todo>().await.unwrap();
        assert_eq!(created.name, "Buy milk");
        assert_eq!(created.status, TodoStatus::NotStarted);

        let res = client.get_all_todos().await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = res.json::<serde_json::Value>().await.unwrap();
        assert_eq!(
            body,
            serde_json::json!([{
                "id": created.id.to_string(),
                "name": "Buy milk",
                "status": 0,
            }])
        );
    })
    .await;
}

#[tokio::test]
async fn create_with_explicit_status() {
    for_each_backend(|client| async move {
        let created = client
            .create_todo("Walk dog", Some(1))
            .await
            .json::<Todo>()
            .await
            .unwrap();
        assert_eq!(created.status, TodoStatus::InProgress);

        let res = client.get_todo(&created.id.to_string()).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.json::<Todo>().await.unwrap(), created);
    })
    .await;
}

#[tokio::test]
async fn created_ids_are_distinct() {
    for_each_backend(|client| async move {
        let first = client.add("Buy milk").await;
        let second = client.add("Buy milk").await;
        assert_ne!(first.id, second.id);

        let todos = client.list().await;
        assert_eq!(todos.len(), 2);
    })
    .await;
}

#[tokio::test]
async fn update_changes_only_target() {
    for_each_backend(|client| async move {
        let milk = client.add("Buy milk").await;
        let dog = client.add("Walk dog").await;

        let res = client
            .update_todo(&milk.id.to_string(), "Buy oat milk", 2)
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let updated = res.json::<Todo>().await.unwrap();
        assert_eq!(updated.id, milk.id);
        assert_eq!(updated.name, "Buy oat milk");
        assert_eq!(updated.status, TodoStatus::Done);

        let todos = client.list().await;
        assert_eq!(todos.len(), 2);
        assert!(todos.contains(&updated));
        assert!(todos.contains(&dog));
    })
    .await;
}

#[tokio::test]
async fn update_unknown_id_is_not_found() {
    for_each_backend(|client| async move {
        let milk = client.add("Buy milk").await;

        let res = client
            .update_todo(&TodoId::new().to_string(), "Ghost", 1)
            .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(res.json::<ErrorBody>().await.unwrap().error, "not_found");

        assert_eq!(client.list().await, vec![milk]);
    })
    .await;
}

#[tokio::test]
async fn update_without_status_resets_to_not_started() {
    for_each_backend(|client| async move {
        let created = client
            .create_todo("Walk dog", Some(2))
            .await
            .json::<Todo>()
            .await
            .unwrap();

        let res = client
            .update_todo_raw(&created.id.to_string(), r#"{"name":"Walk cat"}"#)
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let updated = res.json::<Todo>().await.unwrap();
        assert_eq!(updated.name, "Walk cat");
        assert_eq!(updated.status, TodoStatus::NotStarted);
    })
    .await;
}

#[tokio::test]
async fn null_status_means_not_started() {
    for_each_backend(|client| async move {
        let res = client
            .create_todo_raw(r#"{"name":"Buy milk","status":null}"#)
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let created = res.json::<Todo>().await.unwrap();
        assert_eq!(created.status, TodoStatus::NotStarted);

        client.update_todo(&created.id.to_string(), "Buy milk", 2).await;
        let res = client
            .update_todo_raw(&created.id.to_string(), r#"{"name":"Buy milk","status":null}"#)
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.json::<Todo>().await.unwrap().status, TodoStatus::NotStarted);
    })
    .await;
}

#[tokio::test]
async fn update_with_malformed_body_keeps_item() {
    for_each_backend(|client| async move {
        let milk = client.add("Buy milk").await;

        let res = client
            .update_todo_raw(&milk.id.to_string(), r#"{"name":"x","status":7}"#)
            .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        assert_eq!(client.list().await, vec![milk]);
    })
    .await;
}

#[tokio::test]
async fn delete_removes_only_target() {
    for_each_backend(|client| async move {
        let milk = client.add("Buy milk").await;
        let dog = client.add("Walk dog").await;

        let res = client.delete_todo(&milk.id.to_string()).await;
        assert_eq!(res.status(), StatusCode::OK);

        assert_eq!(client.list().await, vec![dog]);

        let res = client.delete_todo(&milk.id.to_string()).await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);

        let res = client.get_todo(&milk.id.to_string()).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    })
    .await;
}

#[tokio::test]
async fn malformed_create_changes_nothing() {
    for_each_backend(|client| async move {
        for body in [
            "not json",
            r#"{"status":1}"#,
            r#"{"name":"Buy milk","status":3}"#,
            r#"{"name":"Buy milk","status":"DONE"}"#,
            "",
        ] {
            let res = client.create_todo_raw(body).await;
            assert_eq!(res.status(), StatusCode::BAD_REQUEST, "body: {body:?}");
        }

        assert!(client.list().await.is_empty());
    })
    .await;
}

#[tokio::test]
async fn malformed_id_is_bad_request() {
    for_each_backend(|client| async move {
        client.add("Buy milk").await;

        for id in ["42", "zzzzzzzzzzzzzzzzzzzzzzzz", "5f1d7a3b9c2e4f6a8b0c1d"] {
            let res = client.delete_todo(id).await;
            assert_eq!(res.status(), StatusCode::BAD_REQUEST);
            assert_eq!(res.json::<ErrorBody>().await.unwrap().error, "invalid_id");

            let res = client.update_todo(id, "Ghost", 0).await;
            assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        }

        assert_eq!(client.list().await.len(), 1);
    })
    .await;
}

#[tokio::test]
async fn seeded_storage_is_listed_in_creation_order() {
    let builder = TestStorageBuilder::in_memory().with_todos(3);
    let handle = spawn_test_app(create_test_app(builder).await).await;
    let client = TestAppClient::new(handle.address.clone());

    let names: Vec<String> = client.list().await.into_iter().map(|t| t.name).collect();
    assert_eq!(names, vec!["todo 0", "todo 1", "todo 2"]);
}

#[tokio::test]
async fn health_check() {
    let handle = spawn_test_app(create_test_app(TestStorageBuilder::in_memory()).await).await;
    let client = TestAppClient::new(handle.address.clone());

    assert_eq!(client.health().await.status(), StatusCode::OK);
}
