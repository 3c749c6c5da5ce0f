#![allow(dead_code, unused_imports)]

mod client;
mod server;

use std::future::Future;

use axum::Router;
pub use client::TestAppClient;
use todo_service::Service;
use todo_service::{build_app, TestStorageBuilder};

pub use server::{spawn_test_app, TestAppHandle};

#[derive(Debug, serde::Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

pub async fn create_test_app(builder: TestStorageBuilder) -> Router {
    let todo_storage = builder.build_todo().await;
    let flush_storage = builder.build_flush().await;

    build_app(Service::new(todo_storage, flush_storage))
}

/// Runs the scenario once against a fresh in-memory app and once against a
/// fresh sled-backed app.
pub async fn for_each_backend<F, Fut>(scenario: F)
where
    F: Fn(TestAppClient) -> Fut,
    Fut: Future<Output = ()>,
{
    for builder in [TestStorageBuilder::in_memory(), TestStorageBuilder::new()] {
        let handle = spawn_test_app(create_test_app(builder).await).await;
        scenario(TestAppClient::new(handle.address.clone())).await;
    }
}
