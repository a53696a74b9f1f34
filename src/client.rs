use anyhow::Result;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::{Config, REPLY_FIELDS};
use crate::types::{ChatMessage, Thread};

/// Thin client over the AnythingLLM workspace API. Expected failures (bad
/// status, transport errors, undecodable bodies) are logged and surface as
/// empty values, never as errors.
pub struct WorkspaceClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    workspace_slug: String,
}

impl WorkspaceClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            workspace_slug: config.workspace_slug.clone(),
        })
    }

    pub fn workspace_slug(&self) -> &str {
        &self.workspace_slug
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Threads of the configured workspace, in listing order.
    pub async fn list_threads(&self) -> Vec<Thread> {
        let url = self.url(&format!("/workspace/{}", self.workspace_slug));
        match self.get_json(&url, "workspace").await {
            Some(data) => threads_from_workspace(&data),
            None => Vec::new(),
        }
    }

    /// Message history of one thread, oldest first.
    pub async fn thread_history(&self, thread_slug: &str) -> Vec<ChatMessage> {
        let url = self.url(&format!(
            "/workspace/{}/thread/{}/chats",
            self.workspace_slug, thread_slug
        ));
        match self.get_json(&url, "thread history").await {
            Some(data) => messages_from_history(&data),
            None => Vec::new(),
        }
    }

    /// Send one chat message to the workspace and return the reply text.
    pub async fn send_chat(&self, message: &str) -> Option<String> {
        let url = self.url(&format!("/workspace/{}/chat", self.workspace_slug));
        let body = serde_json::json!({
            "message": message,
            "mode": "chat",
        });

        let resp = match self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                warn!("chat request failed: {}", e);
                return None;
            }
        };

        let status = resp.status();
        info!("chat status: {}", status);

        let text = match resp.text().await {
            Ok(text) => text,
            Err(e) => {
                warn!("failed to read chat response: {}", e);
                return None;
            }
        };

        if !status.is_success() {
            warn!("chat request rejected ({}): {}", status, text);
            return None;
        }

        match serde_json::from_str::<Value>(&text) {
            Ok(data) => {
                if let Some(obj) = data.as_object() {
                    debug!("response keys: {:?}", obj.keys().collect::<Vec<_>>());
                }
                extract_reply(&data, REPLY_FIELDS)
            }
            Err(e) => {
                warn!("error parsing chat response: {}", e);
                warn!("raw response: {}", text);
                None
            }
        }
    }

    /// Upload a document for embedding. Tries `/document/upload` first and
    /// falls back to the workspace upload endpoint once if that is rejected.
    pub async fn upload_document(&self, bytes: Vec<u8>, file_name: &str, mime: &str) -> bool {
        let primary = match upload_form(bytes.clone(), file_name, mime) {
            Ok(form) => form.text("workspaceSlug", self.workspace_slug.clone()),
            Err(e) => {
                warn!("cannot build upload for {} ({}): {}", file_name, mime, e);
                return false;
            }
        };

        if self.send_upload(&self.url("/document/upload"), primary, "upload").await {
            info!("memory embedded via document upload");
            return true;
        }

        info!("trying alternate upload method");
        let fallback = match upload_form(bytes, file_name, mime) {
            Ok(form) => form,
            Err(e) => {
                warn!("cannot build upload for {} ({}): {}", file_name, mime, e);
                return false;
            }
        };
        let url = self.url(&format!("/workspace/{}/upload", self.workspace_slug));
        let ok = self.send_upload(&url, fallback, "alternate upload").await;
        if ok {
            info!("memory embedded via workspace upload");
        }
        ok
    }

    async fn send_upload(&self, url: &str, form: Form, label: &str) -> bool {
        let resp = match self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                warn!("{} request failed: {}", label, e);
                return false;
            }
        };

        let status = resp.status();
        info!("{} status: {}", label, status);
        if status.is_success() {
            return true;
        }

        let text = resp.text().await.unwrap_or_default();
        warn!("{} response: {}", label, text);
        false
    }

    async fn get_json(&self, url: &str, what: &str) -> Option<Value> {
        let resp = match self.http.get(url).bearer_auth(&self.api_key).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!("{} request failed: {}", what, e);
                return None;
            }
        };

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            warn!("{} request rejected ({}): {}", what, status, text);
            return None;
        }

        match resp.json::<Value>().await {
            Ok(data) => Some(data),
            Err(e) => {
                warn!("error parsing {} response: {}", what, e);
                None
            }
        }
    }
}

fn upload_form(bytes: Vec<u8>, file_name: &str, mime: &str) -> reqwest::Result<Form> {
    let part = Part::bytes(bytes)
        .file_name(file_name.to_string())
        .mime_str(mime)?;
    Ok(Form::new().part("file", part))
}

/// Pick the reply text out of a chat response. The first field in `fields`
/// that is present decides: strings are returned as-is, `null` means the
/// workspace produced no reply (its abort/error shape), anything else is
/// serialized. With no known field the whole body is serialized.
pub fn extract_reply(data: &Value, fields: &[&str]) -> Option<String> {
    for field in fields {
        match data.get(*field) {
            None => continue,
            Some(Value::String(text)) => return Some(text.clone()),
            Some(Value::Null) => {
                warn!(
                    "chat reply field '{}' is null: {}",
                    field,
                    data.get("error").unwrap_or(&serde_json::Value::Null)
                );
                return None;
            }
            Some(other) => return Some(other.to_string()),
        }
    }
    warn!("unknown response format: {}", data);
    Some(data.to_string())
}

/// The workspace endpoint answers with `{"workspace": [ {..., "threads": [...]} ]}`;
/// threads come from the first record. A bare object is accepted too.
pub fn threads_from_workspace(data: &Value) -> Vec<Thread> {
    let record = &data["workspace"];
    let workspace = match record {
        Value::Array(records) => records.first(),
        Value::Object(_) => Some(record),
        _ => None,
    };

    let Some(threads) = workspace
        .and_then(|w| w.get("threads"))
        .and_then(|t| t.as_array())
    else {
        warn!("workspace response carried no thread list");
        return Vec::new();
    };

    threads
        .iter()
        .filter_map(|t| match serde_json::from_value::<Thread>(t.clone()) {
            Ok(thread) => Some(thread),
            Err(e) => {
                debug!("skipping malformed thread record: {}", e);
                None
            }
        })
        .collect()
}

pub fn messages_from_history(data: &Value) -> Vec<ChatMessage> {
    let Some(history) = data["history"].as_array() else {
        return Vec::new();
    };

    history
        .iter()
        .filter_map(|entry| match serde_json::from_value::<ChatMessage>(entry.clone()) {
            Ok(message) => Some(message),
            Err(e) => {
                debug!("skipping history entry with role {:?}: {}", entry["role"], e);
                None
            }
        })
        .collect()
}
