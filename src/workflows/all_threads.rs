use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDateTime;
use tracing::info;

use crate::app::MemorySync;
use crate::workflows::{banner, closing, RunOutcome};

impl MemorySync {
    /// Summarize every thread of the workspace into today's file, one section
    /// per thread, then publish the file once.
    pub async fn run_all_threads(&self, now: NaiveDateTime) -> Result<RunOutcome> {
        banner(&format!(
            "{} Memory System - all threads",
            self.config.assistant_name
        ));

        println!("\n[1/3] Listing threads in workspace {}...", self.client.workspace_slug());
        let threads = self.client.list_threads().await;
        if threads.is_empty() {
            println!("\n✗ No threads found");
            return Ok(RunOutcome::Stopped);
        }
        println!("Found {} threads", threads.len());

        println!("\n[2/3] Summarizing threads...");
        let mut last_file: Option<PathBuf> = None;
        let mut sections = 0;
        for (i, thread) in threads.iter().enumerate() {
            println!("\n({}/{}) {}", i + 1, threads.len(), thread.display_name());

            let history = self.client.thread_history(&thread.slug).await;
            if history.is_empty() {
                println!("  - no messages, skipping");
                continue;
            }
            info!("thread {} has {} messages", thread.slug, history.len());

            let Some(summary) = self.summarize(now.date(), Some(history.as_slice())).await else {
                println!("  ✗ no summary produced, skipping");
                continue;
            };

            let label = format!("Thread: {}", thread.slug);
            let written = self.save(&summary, Some(&label), now)?;
            last_file = Some(written.path);
            sections += 1;
        }

        let Some(file) = last_file else {
            println!("\n✗ No memories extracted from any thread");
            return Ok(RunOutcome::Stopped);
        };

        println!("\n[3/3] Embedding {} memories into workspace...", sections);
        let embedded = self.publish(&file).await?;

        closing(&format!("✓ Saved {} thread memories", sections));
        Ok(RunOutcome::Completed { file, sections, embedded })
    }
}
