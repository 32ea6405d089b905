use anyhow::Context;
use cdesk::domain::config::ApiConfig;
use cdesk::kernel::config::{DEFAULT_CONFIG_FILE, load_config};
use cdesk_logger::Logger;
use cdesk_server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_owned());
    let cfg: ApiConfig = load_config(Some(&path)).context("Critical: Configuration is malformed")?;

    let _log = Logger::builder().name(env!("CARGO_PKG_NAME")).config(&cfg.logging)?.init()?;

    Server::builder().config(cfg).build().await?.run().await
}
