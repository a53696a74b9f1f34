pub mod all_threads;
pub mod daily;
pub mod single_thread;

use std::path::PathBuf;

const RULE_WIDTH: usize = 60;

/// How a run ended. Failure paths are not errors; they stop early after
/// printing why.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Completed {
        file: PathBuf,
        sections: usize,
        embedded: bool,
    },
    Stopped,
}

pub(crate) fn banner(title: &str) {
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("{}", title);
    println!("{}", "=".repeat(RULE_WIDTH));
}

pub(crate) fn closing(message: &str) {
    println!("\n{}", "=".repeat(RULE_WIDTH));
    println!("{}", message);
    println!("{}", "=".repeat(RULE_WIDTH));
}
