use std::sync::Arc;

use cfb_core::{config::Config, feed::FeedSource};
use cfb_pullpush::PullPushClient;

#[tokio::main]
async fn main() -> Result<(), cfb_core::Error> {
    cfb_core::logging::init("cfb")?;

    let cfg = Arc::new(Config::load()?);
    let feed: Arc<dyn FeedSource> = Arc::new(PullPushClient::from_config(&cfg)?);

    cfb_telegram::router::run_polling(cfg, feed)
        .await
        .map_err(|e| cfb_core::Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}
