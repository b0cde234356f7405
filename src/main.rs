//! Herald Telegram Bot
//!
//! Main application entry point

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use teloxide::{prelude::*, types::Update};
use teloxide::dispatching::UpdateHandler;
use teloxide::update_listeners::webhooks;
use teloxide::utils::command::BotCommands;
use tracing::{info, warn, debug};

use herald::{
    config::Settings,
    utils::logging,
    database::Store,
    services::{BotProfile, ServiceFactory},
    i18n::I18n,
    handlers::{
        handle_callback_query, handle_command, handle_my_chat_member, record_message, Command,
    },
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard flushes the log file on shutdown
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", herald::info());

    // Initialize storage
    let store = Store::connect(&settings).await?;
    info!(backend = store.backend_name(), "Store ready");

    // Initialize i18n system
    info!("Loading translations...");
    let mut i18n = I18n::new(&settings.i18n)?;
    i18n.load_translations().await?;

    // Initialize bot
    let bot = Bot::new(&settings.bot.token);
    let me = bot.get_me().await?;
    let profile = BotProfile::from_me(&me);
    info!(bot_id = profile.id.0, username = %profile.username, "Bot identity loaded");

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "Failed to register the command list");
    }

    // Initialize services
    let services = Arc::new(ServiceFactory::new(bot.clone(), settings.clone(), store, profile));
    let health = services.health_check().await;
    for issue in health.get_issues() {
        warn!("{}", issue);
    }

    let i18n = Arc::new(i18n);

    // Create dispatcher with dependencies registered
    let mut dispatcher = Dispatcher::builder(bot.clone(), create_handler())
        .dependencies(dptree::deps![services, i18n])
        .default_handler(|upd| async move {
            debug!("Unhandled update: {:?}", upd.id);
        })
        .enable_ctrlc_handler()
        .build();

    match &settings.webhook.url {
        Some(webhook_url) => {
            let ip: IpAddr = settings.webhook.listen_addr.parse()?;
            let address = SocketAddr::new(ip, settings.webhook.port);
            let url = url::Url::parse(webhook_url)?;

            let mut options = webhooks::Options::new(address, url);
            if let Some(secret) = &settings.webhook.secret_token {
                options = options.secret_token(secret.clone());
            }

            info!(%address, url = %webhook_url, "Starting bot in webhook mode");
            let listener = webhooks::axum(bot.clone(), options).await?;
            dispatcher
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("An error from the webhook listener"),
                )
                .await;
        }
        None => {
            info!("Starting bot with polling mode...");
            dispatcher.dispatch().await;
        }
    }

    info!("Herald has been shut down.");

    Ok(())
}

/// Create the main update handler
fn create_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    dptree::entry()
        .branch(
            Update::filter_message()
                .inspect_async(|msg: Message, services: Arc<ServiceFactory>, i18n: Arc<I18n>| async move {
                    record_message(&msg, &services, &i18n).await;
                })
                .branch(
                    dptree::entry()
                        .filter_command::<Command>()
                        .endpoint(handle_commands)
                )
                .branch(dptree::endpoint(ignore_message))
        )
        .branch(
            Update::filter_callback_query()
                .endpoint(handle_callbacks)
        )
        .branch(
            // Bot added to or removed from a chat
            Update::filter_my_chat_member()
                .endpoint(handle_chat_member_updates)
        )
}

/// Handle bot commands
async fn handle_commands(
    bot: Bot,
    msg: Message,
    cmd: Command,
    services: Arc<ServiceFactory>,
    i18n: Arc<I18n>,
) -> HandlerResult {
    if let Err(e) = handle_command(bot, msg, cmd.clone(), &services, &i18n).await {
        logging::log_handler_error(&format!("command {:?}", cmd), &e);
        return Err(e.into());
    }

    Ok(())
}

/// Plain messages only need to be recorded
async fn ignore_message() -> HandlerResult {
    Ok(())
}

/// Handle callback queries
async fn handle_callbacks(
    bot: Bot,
    query: teloxide::types::CallbackQuery,
    i18n: Arc<I18n>,
) -> HandlerResult {
    if let Err(e) = handle_callback_query(bot, query, &i18n).await {
        logging::log_handler_error("callback query", &e);
        return Err(e.into());
    }

    Ok(())
}

/// Handle chat member updates (bot added/removed from groups)
async fn handle_chat_member_updates(
    update: teloxide::types::ChatMemberUpdated,
    services: Arc<ServiceFactory>,
    i18n: Arc<I18n>,
) -> HandlerResult {
    if let Err(e) = handle_my_chat_member(update, &services, &i18n).await {
        logging::log_handler_error("my_chat_member", &e);
        return Err(e.into());
    }

    Ok(())
}
