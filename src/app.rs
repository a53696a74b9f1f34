use std::path::Path;

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};

use crate::client::WorkspaceClient;
use crate::config::Config;
use crate::prompt;
use crate::publish;
use crate::store::MemoryStore;
use crate::types::{ChatMessage, MemoryWrite};

/// Everything a memory run needs. The workflows in `crate::workflows` are
/// implemented as methods on this type and share its client and store.
pub struct MemorySync {
    pub config: Config,
    pub client: WorkspaceClient,
    pub store: MemoryStore,
}

impl MemorySync {
    pub fn new(config: Config) -> Result<Self> {
        let client = WorkspaceClient::new(&config)?;
        let store = MemoryStore::new(&config.memory_dir);
        Ok(Self { config, client, store })
    }

    /// Ask the workspace for a memory summary. Blank replies count as no reply.
    pub async fn summarize(
        &self,
        today: NaiveDate,
        transcript: Option<&[ChatMessage]>,
    ) -> Option<String> {
        let request = prompt::build_prompt(&self.config.assistant_name, today, transcript);
        self.client
            .send_chat(&request)
            .await
            .filter(|text| !text.trim().is_empty())
    }

    pub fn save(
        &self,
        content: &str,
        label: Option<&str>,
        now: NaiveDateTime,
    ) -> Result<MemoryWrite> {
        let written = self.store.write(content, label, now)?;
        println!(
            "✓ Memory {}: {}",
            if written.appended { "appended to" } else { "saved to" },
            written.path.display()
        );
        Ok(written)
    }

    pub async fn publish(&self, file: &Path) -> Result<bool> {
        let embedded = publish::publish(&self.client, file).await?;
        if embedded {
            println!("✓ Memory embedded successfully!");
        } else {
            println!("✗ Could not embed {} into the workspace", file.display());
        }
        Ok(embedded)
    }
}
