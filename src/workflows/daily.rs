use anyhow::Result;
use chrono::NaiveDateTime;

use crate::app::MemorySync;
use crate::workflows::{banner, closing, RunOutcome};

impl MemorySync {
    /// extract -> save -> publish, relying on the workspace's own view of
    /// today's conversation.
    pub async fn run_daily(&self, now: NaiveDateTime) -> Result<RunOutcome> {
        banner(&format!("{} Memory System", self.config.assistant_name));

        println!("\n[1/3] Extracting memories from today's conversations...");
        let Some(content) = self.summarize(now.date(), None).await else {
            println!("\n✗ Failed to extract memory");
            return Ok(RunOutcome::Stopped);
        };

        println!("\n[2/3] Saving memory...");
        let written = self.save(&content, None, now)?;

        println!("\n[3/3] Embedding into workspace...");
        let embedded = self.publish(&written.path).await?;

        closing("✓ Daily memory routine complete!");
        Ok(RunOutcome::Completed {
            file: written.path,
            sections: 1,
            embedded,
        })
    }
}
