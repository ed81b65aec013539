mod app;
mod cli;
mod command;
mod transport;

use clap::Parser;
use todo_core::{TodoClient, TodoSession};
use tracing::info;

use crate::cli::{init_tracing, Cli};
use crate::transport::HttpTransport;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet)?;

    let config = cli.session_config();
    info!(base_url = %cli.base_url, page_size = config.page_size, "starting todo session");

    let session = TodoSession::new(TodoClient::new(&cli.base_url), config);
    let transport = HttpTransport::new(cli.timeout());
    app::run(session, transport).await
}
