use std::sync::Arc;

use bw_core::{breach::BreachApi, config::Config};
use bw_hibp::HibpClient;

#[tokio::main]
async fn main() -> Result<(), bw_core::Error> {
    bw_core::logging::init("breachwatcher")?;

    let cfg = Arc::new(Config::load()?);
    tracing::info!(api_base = %cfg.hibp.api_base, "configuration loaded");

    let api: Arc<dyn BreachApi> = Arc::new(HibpClient::new(&cfg.hibp)?);

    bw_telegram::router::run_polling(cfg, api)
        .await
        .map_err(|e| bw_core::Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}
