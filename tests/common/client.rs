#![allow(dead_code)]
use reqwest::Url;
use todo_service::Todo;

pub struct TestAppClient {
    url: Url,
    client: reqwest::Client,
}

impl TestAppClient {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }

    fn todo_url(&self, todo_id: &str) -> Url {
        self.url.join("todo/").unwrap().join(todo_id).unwrap()
    }

    pub async fn create_todo(&self, name: &str, status: Option<u8>) -> reqwest::Response {
        let body = match status {
            Some(status) => serde_json::json!({ "name": name, "status": status }),
            None => serde_json::json!({ "name": name }),
        };
        self.client
            .post(self.url.join("todo").unwrap())
            .json(&body)
            .send()
            .await
            .unwrap()
    }

    pub async fn create_todo_raw(&self, body: &str) -> reqwest::Response {
        self.client
            .post(self.url.join("todo/").unwrap())
            .body(body.to_string())
            .send()
            .await
            .unwrap()
    }

    /// Creates a todo and returns what the server persisted.
    pub async fn add(&self, name: &str) -> Todo {
        self.create_todo(name, None).await.json::<Todo>().await.unwrap()
    }

    pub async fn get_all_todos(&self) -> reqwest::Response {
        self.client
            .get(self.url.join("todo").unwrap())
            .send()
            .await
            .unwrap()
    }

    pub async fn list(&self) -> Vec<Todo> {
        self.get_all_todos().await.json::<Vec<Todo>>().await.unwrap()
    }

    pub async fn get_todo(&self, todo_id: &str) -> reqwest::Response {
        self.client
            .get(self.todo_url(todo_id))
            .send()
            .await
            .unwrap()
    }

    pub async fn update_todo(&self, todo_id: &str, name: &str, status: u8) -> reqwest::Response {
        self.client
            .put(self.todo_url(todo_id))
            .json(&serde_json::json!({
                "name": name,
                "status": status,
            }))
            .send()
            .await
            .unwrap()
    }

    pub async fn update_todo_raw(&self, todo_id: &str, body: &str) -> reqwest::Response {
        self.client
            .put(self.todo_url(todo_id))
            .body(body.to_string())
            .send()
            .await
            .unwrap()
    }

    pub async fn delete_todo(&self, todo_id: &str) -> reqwest::Response {
        self.client
            .delete(self.todo_url(todo_id))
            .send()
            .await
            .unwrap()
    }

    pub async fn health(&self) -> reqwest::Response {
        self.client
            .get(self.url.join("health").unwrap())
            .send()
            .await
            .unwrap()
    }
}
