use std::path::Path;

use anyhow::Result;

use crate::client::WorkspaceClient;

pub const MEMORY_MIME: &str = "text/markdown";

/// Re-upload a memory file so the workspace can retrieve it later. A rejected
/// upload is reported as `Ok(false)`; only reading the file can fail.
pub async fn publish(client: &WorkspaceClient, file: &Path) -> Result<bool> {
    let bytes = tokio::fs::read(file).await?;
    let file_name = file
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("memory.md");

    tracing::info!(
        "publishing {} ({} bytes) to workspace {}",
        file_name,
        bytes.len(),
        client.workspace_slug()
    );
    Ok(client.upload_document(bytes, file_name, MEMORY_MIME).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn falls_back_to_workspace_upload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/document/upload"))
            .respond_with(ResponseTemplate::new(422).set_body_string("unsupported"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/workspace/pal/upload"))
            .and(body_string_contains("remember the tabs fix"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("2025-03-14-memory.md");
        std::fs::write(&file, "# Memory: 2025-03-14\n\nremember the tabs fix\n").unwrap();

        let client = WorkspaceClient::new(&Config::for_test(&server.uri(), tmp.path())).unwrap();
        assert!(publish(&client, &file).await.unwrap());

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 2);
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let server = MockServer::start().await;
        let tmp = tempfile::tempdir().unwrap();
        let client = WorkspaceClient::new(&Config::for_test(&server.uri(), tmp.path())).unwrap();

        let result = publish(&client, &tmp.path().join("absent.md")).await;
        assert!(result.is_err());
    }
}
