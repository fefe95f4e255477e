//! Mock Clerk API and on-disk fixtures for integration tests

use homeowner_migration::config::{
    CLERK_API_URL, CLERK_SECRET_KEY, MONGODB_URL, SERVICE_ACCOUNT_KEY_FILE,
};
use homeowner_migration::MigrationConfig;
use mockito::{Matcher, Mock, Server, ServerGuard};
use std::path::Path;
use tempfile::TempDir;

pub const SECRET_KEY: &str = "sk_test_migration";

/// Test fixture that owns a mock server and a temporary project root
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
    pub root: TempDir,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        let root = tempfile::tempdir().expect("temp root");
        std::fs::write(root.path().join(SERVICE_ACCOUNT_KEY_FILE), "{}").expect("key file");
        std::fs::create_dir(root.path().join("data")).expect("data dir");
        Self {
            server,
            base_url,
            root,
        }
    }

    /// A validated config whose API base URL points at the mock server
    pub fn config(&self) -> MigrationConfig {
        let base_url = self.base_url.clone();
        MigrationConfig::from_lookup(self.root.path(), move |key| match key {
            CLERK_SECRET_KEY => Some(SECRET_KEY.to_string()),
            MONGODB_URL => Some("mongodb://localhost:27017".to_string()),
            CLERK_API_URL => Some(base_url.clone()),
            _ => None,
        })
        .expect("fixture config")
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Write `data/homeowners.csv` with the given data rows
    pub fn write_export(&self, rows: &[&str]) {
        let mut contents =
            String::from("Property Owner,Commission Percentage,Email,Google Drive Folders,All Props\n");
        for row in rows {
            contents.push_str(row);
            contents.push('\n');
        }
        std::fs::write(self.root().join("data").join("homeowners.csv"), contents)
            .expect("write export");
    }

    /// Mock a successful creation for the user with `first_name`
    pub async fn mock_user_created(&mut self, first_name: &str, user_id: &str) -> Mock {
        self.server
            .mock("POST", "/v1/users")
            .match_header("authorization", format!("Bearer {}", SECRET_KEY).as_str())
            .match_body(Matcher::PartialJson(serde_json::json!({ "first_name": first_name })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                serde_json::json!({ "id": user_id, "object": "user", "first_name": first_name })
                    .to_string(),
            )
            .expect(1)
            .create_async()
            .await
    }

    /// Mock a structured rejection for the user with `first_name`
    pub async fn mock_user_rejected(&mut self, first_name: &str, status: usize) -> Mock {
        self.server
            .mock("POST", "/v1/users")
            .match_body(Matcher::PartialJson(serde_json::json!({ "first_name": first_name })))
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"errors":[{"message":"That email address is taken.","long_message":"That email address is taken. Please try another.","code":"form_identifier_exists","meta":{"param_names":["email_address"]}}]}"#,
            )
            .expect(1)
            .create_async()
            .await
    }
}
