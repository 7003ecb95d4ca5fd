use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};

use tokio_util::sync::CancellationToken;

use cfb_core::{
    browse::Browser, cache::PostCache, config::Config, feed::FeedSource,
    messaging::port::MessagingPort, refresh::Refresher, session::SessionStore,
};

use crate::handlers;
use crate::TelegramMessenger;

#[derive(Clone)]
pub struct AppState {
    pub browser: Arc<Browser>,
    pub messenger: Arc<dyn MessagingPort>,
}

pub async fn run_polling(cfg: Arc<Config>, feed: Arc<dyn FeedSource>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    // Basic startup info.
    match bot.get_me().await {
        Ok(me) => tracing::info!("bot started: @{}", me.username()),
        Err(e) => tracing::warn!("get_me failed: {e}"),
    }
    tracing::info!(
        topics = cfg.topics.len(),
        refresh_secs = cfg.refresh_interval.as_secs(),
        "feed configuration loaded"
    );

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(bot.clone()));
    let cache = Arc::new(PostCache::new());
    let sessions = Arc::new(SessionStore::new());

    let refresher = Arc::new(Refresher::new(
        cache.clone(),
        feed,
        cfg.topics.clone(),
        cfg.refresh_interval,
    ));
    let cancel = CancellationToken::new();
    let refresh_task = refresher.spawn(cancel.clone());

    let state = Arc::new(AppState {
        browser: Arc::new(Browser::new(
            cfg.topics.clone(),
            cache,
            sessions,
            messenger.clone(),
        )),
        messenger,
    });

    let handler = dptree::entry()
        .branch(Update::filter_callback_query().endpoint(handlers::handle_callback))
        .branch(Update::filter_message().endpoint(handlers::handle_message));

    tracing::info!("bot running...");
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    cancel.cancel();
    if let Err(e) = refresh_task.await {
        tracing::warn!("refresh task ended abnormally: {e}");
    }

    Ok(())
}
