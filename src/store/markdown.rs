use std::io::Write;
use std::path::Path;

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

pub const DEFAULT_SECTION_LABEL: &str = "Memory Entry";
pub const SECTION_SEPARATOR: &str = "\n---\n\n";

pub fn memory_file_name(date: NaiveDate) -> String {
    format!("{}-memory.md", date.format("%Y-%m-%d"))
}

pub fn file_heading(date: NaiveDate) -> String {
    format!("# Memory: {}\n\n", date.format("%Y-%m-%d"))
}

pub fn section_heading(label: Option<&str>, time: NaiveTime) -> String {
    format!(
        "## {} - {}\n\n",
        label.unwrap_or(DEFAULT_SECTION_LABEL),
        time.format("%H:%M:%S")
    )
}

/// Add one section to a day file. A fresh file gets the day heading first,
/// an existing one gets a separator. Returns true when the file already had
/// content. Existing bytes are never rewritten.
pub fn write_section(
    file: &Path,
    content: &str,
    label: Option<&str>,
    now: NaiveDateTime,
) -> Result<bool> {
    let mut f = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(file)?;

    let appended = f.metadata()?.len() > 0;
    let mut section = String::new();
    if appended {
        section.push_str(SECTION_SEPARATOR);
    } else {
        section.push_str(&file_heading(now.date()));
    }
    section.push_str(&section_heading(label, now.time()));
    section.push_str(content);
    section.push('\n');

    f.write_all(section.as_bytes())?;
    Ok(appended)
}
