use anyhow::Result;
use chrono::NaiveDateTime;

use crate::app::MemorySync;
use crate::workflows::{banner, closing, RunOutcome};

impl MemorySync {
    pub async fn run_thread(&self, thread_slug: &str, now: NaiveDateTime) -> Result<RunOutcome> {
        banner(&format!(
            "{} Memory System - thread {}",
            self.config.assistant_name, thread_slug
        ));

        println!("\n[1/4] Fetching thread history...");
        let history = self.client.thread_history(thread_slug).await;
        if history.is_empty() {
            println!("\n✗ No messages found in thread {}", thread_slug);
            return Ok(RunOutcome::Stopped);
        }
        println!("Found {} messages", history.len());

        println!("\n[2/4] Summarizing thread...");
        let Some(summary) = self.summarize(now.date(), Some(history.as_slice())).await else {
            println!("\n✗ Failed to extract memory");
            return Ok(RunOutcome::Stopped);
        };

        println!("\n[3/4] Saving memory...");
        let label = format!("Thread: {}", thread_slug);
        let written = self.save(&summary, Some(&label), now)?;

        println!("\n[4/4] Embedding into workspace...");
        let embedded = self.publish(&written.path).await?;

        closing("✓ Thread memory complete!");
        Ok(RunOutcome::Completed {
            file: written.path,
            sections: 1,
            embedded,
        })
    }
}
