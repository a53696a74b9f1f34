pub mod markdown;

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};

use crate::types::MemoryWrite;

/// One markdown file per calendar day under a single directory.
pub struct MemoryStore {
    dir: PathBuf,
}

impl MemoryStore {
    pub fn new(dir: &Path) -> Self {
        Self { dir: dir.to_path_buf() }
    }

    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(markdown::memory_file_name(date))
    }

    /// Write `content` as a new section of the day file for `now`, creating
    /// the directory and file as needed.
    pub fn write(
        &self,
        content: &str,
        label: Option<&str>,
        now: NaiveDateTime,
    ) -> Result<MemoryWrite> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(now.date());
        let appended = markdown::write_section(&path, content, label, now)?;
        tracing::debug!(
            "memory section {} {}",
            if appended { "appended to" } else { "created in" },
            path.display()
        );
        Ok(MemoryWrite { path, appended })
    }
}
