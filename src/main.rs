//! GroupWarden Telegram Bot
//!
//! Main application entry point

use std::sync::Arc;
use anyhow::Context;
use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, ChatJoinRequest, Update};
use teloxide::dispatching::UpdateHandler;
use teloxide::error_handlers::LoggingErrorHandler;
use tracing::{info, error, trace};

use GroupWarden::{
    config::Settings,
    utils::logging,
    services::{GroupPolicyRegistry, ServiceFactory, TelegramBotAdapter, TelegramGateway},
    state::InviteLinkStore,
    handlers::{
        Command,
        handle_command,
        handle_callback_query,
        handle_chat_join_request,
        handle_new_chat_member,
    },
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("failed to load configuration")?;
    settings.validate().context("invalid configuration")?;

    // Initialize logging; the guard keeps the file writer alive
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", GroupWarden::info());

    let registry = GroupPolicyRegistry::from_settings(&settings).context("invalid group configuration")?;

    info!(path = %settings.storage.path, "Opening invite link store...");
    let store = InviteLinkStore::open(&settings.storage.path)
        .await
        .context("failed to open invite link store")?;

    // Initialize bot
    let bot = Bot::new(&settings.bot.token);
    let telegram: Arc<dyn TelegramGateway> = Arc::new(TelegramBotAdapter::new(bot.clone()));
    let services = ServiceFactory::new(registry, store, telegram);

    info!("Setting up bot handlers...");
    let handler = create_handler();

    let mut dispatcher = Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![services])
        .default_handler(|upd| async move {
            trace!(update_id = ?upd.id, "Unhandled update");
        })
        .error_handler(LoggingErrorHandler::with_custom_text("An error from the update handler"))
        .enable_ctrlc_handler()
        .build();

    info!("GroupWarden bot is ready, starting long polling...");
    dispatcher.dispatch().await;

    info!("GroupWarden bot has been shut down.");
    Ok(())
}

/// Create the main update handler.
///
/// Polling subscribes to exactly the update kinds branched on here.
fn create_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    use teloxide::dispatching::UpdateFilterExt;

    dptree::entry()
        .branch(Update::filter_message()
            .branch(
                // Handle commands
                dptree::entry()
                    .filter_command::<Command>()
                    .endpoint(handle_commands)
            )
            .branch(
                // Handle new chat members
                dptree::filter(|msg: Message| msg.new_chat_members().is_some())
                    .endpoint(handle_new_members)
            )
        )
        .branch(
            Update::filter_chat_join_request()
                .endpoint(handle_join_requests)
        )
        .branch(
            Update::filter_callback_query()
                .endpoint(handle_callbacks)
        )
}

/// Handle bot commands
async fn handle_commands(msg: Message, cmd: Command, services: ServiceFactory) -> HandlerResult {
    if let Err(e) = handle_command(msg, cmd, services).await {
        error!(error = %e, severity = %e.severity(), "Error handling command");
        return Err(e.into());
    }

    Ok(())
}

/// Handle new chat members
async fn handle_new_members(msg: Message, services: ServiceFactory) -> HandlerResult {
    if let Err(e) = handle_new_chat_member(msg, services).await {
        error!(error = %e, severity = %e.severity(), "Error handling new chat member");
        return Err(e.into());
    }

    Ok(())
}

/// Handle chat join requests
async fn handle_join_requests(request: ChatJoinRequest, services: ServiceFactory) -> HandlerResult {
    if let Err(e) = handle_chat_join_request(request, services).await {
        error!(error = %e, severity = %e.severity(), "Error handling join request");
        return Err(e.into());
    }

    Ok(())
}

/// Handle callback queries
async fn handle_callbacks(query: CallbackQuery, services: ServiceFactory) -> HandlerResult {
    if let Err(e) = handle_callback_query(query, services).await {
        error!(error = %e, severity = %e.severity(), "Error handling callback query");
        return Err(e.into());
    }

    Ok(())
}
