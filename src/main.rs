mod app;
mod client;
mod config;
mod prompt;
mod publish;
mod store;
mod types;
mod workflows;

use anyhow::Result;
use chrono::Local;
use tracing::debug;

use crate::app::MemorySync;
use crate::config::Config;
use crate::workflows::RunOutcome;

const USAGE: &str = "\
usage: pal-memory [--daily | <thread-slug>]

  (no arguments)   summarize every thread in the workspace
  <thread-slug>    summarize a single thread
  --daily          ask the workspace for a summary of today's session

configuration is read from the environment (or a .env file):
  ANYTHINGLLM_API_KEY, ANYTHINGLLM_WORKSPACE, ANYTHINGLLM_BASE_URL,
  PAL_MEMORY_DIR, PAL_ASSISTANT_NAME, PAL_HTTP_TIMEOUT_SECS";

#[derive(Debug, PartialEq)]
enum Mode {
    AllThreads,
    Thread(String),
    Daily,
    Help,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pal_memory=info".parse()?)
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mode = match parse_mode(&args) {
        Ok(mode) => mode,
        Err(e) => {
            eprintln!("{}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    if mode == Mode::Help {
        println!("{}", USAGE);
        return Ok(());
    }

    let app = MemorySync::new(Config::from_env()?)?;
    let now = Local::now().naive_local();

    let outcome = match mode {
        Mode::AllThreads => app.run_all_threads(now).await?,
        Mode::Thread(slug) => app.run_thread(&slug, now).await?,
        Mode::Daily => app.run_daily(now).await?,
        Mode::Help => return Ok(()),
    };

    match outcome {
        RunOutcome::Completed { file, sections, embedded } => debug!(
            "{} section(s) written to {} (embedded: {})",
            sections,
            file.display(),
            embedded
        ),
        RunOutcome::Stopped => debug!("run stopped early"),
    }
    Ok(())
}

fn parse_mode(args: &[String]) -> Result<Mode> {
    let mut daily = false;
    let mut positional = Vec::new();
    for arg in args {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Mode::Help),
            "--daily" => daily = true,
            flag if flag.starts_with('-') => anyhow::bail!("unknown option '{}'", flag),
            slug => positional.push(slug.to_string()),
        }
    }

    match (daily, positional.len()) {
        (true, 0) => Ok(Mode::Daily),
        (true, _) => anyhow::bail!("--daily does not take a thread slug"),
        (false, 0) => Ok(Mode::AllThreads),
        (false, 1) => Ok(Mode::Thread(positional.remove(0))),
        (false, n) => anyhow::bail!("expected at most one thread slug, got {}", n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_arguments_runs_all_threads() {
        assert_eq!(parse_mode(&args(&[])).unwrap(), Mode::AllThreads);
    }

    #[test]
    fn one_positional_selects_thread() {
        assert_eq!(
            parse_mode(&args(&["4f1c-thread"])).unwrap(),
            Mode::Thread("4f1c-thread".into())
        );
    }

    #[test]
    fn daily_flag_selects_session_summary() {
        assert_eq!(parse_mode(&args(&["--daily"])).unwrap(), Mode::Daily);
    }

    #[test]
    fn rejects_extra_or_unknown_arguments() {
        assert!(parse_mode(&args(&["a", "b"])).is_err());
        assert!(parse_mode(&args(&["--daily", "a"])).is_err());
        assert!(parse_mode(&args(&["--verbose"])).is_err());
    }
}
