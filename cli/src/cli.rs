use std::io::IsTerminal;
use std::time::Duration;

use anyhow::anyhow;
use clap::{ArgAction, Parser};
use todo_core::SessionConfig;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Clone)]
#[command(name = "todo", version, about = "Terminal todo list backed by a remote todo service")]
pub struct Cli {
    /// Base URL of the todo service.
    #[arg(long, env = "TODO_API_URL", default_value = "https://dummyjson.com")]
    pub base_url: String,

    #[arg(long, env = "TODO_PAGE_SIZE", default_value_t = todo_core::pagination::DEFAULT_PAGE_SIZE)]
    pub page_size: u32,

    /// Owner id attached to new todos.
    #[arg(long, env = "TODO_USER_ID", default_value_t = todo_core::types::DEFAULT_USER_ID)]
    pub user_id: i64,

    /// Don't re-fetch the page after a change settles. Useful against
    /// services that acknowledge writes without persisting them.
    #[arg(long)]
    pub no_refresh: bool,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    pub quiet: u8,
}

impl Cli {
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            page_size: self.page_size.max(1),
            user_id: self.user_id,
            refresh_after_mutation: !self.no_refresh,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// Logs go to stderr so they never interleave with the rendered list.
pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let default_level = if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 2 {
        "trace"
    } else if verbose == 1 {
        "debug"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}
