use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use backon::{ExponentialBuilder, Retryable};
use dotenvy::dotenv;
use furiabot::cli::{describe_award, describe_profile, Cli, Commands};
use furiabot::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps};
use furiacore::core::init_logger;
use furiacore::{AppError, Config, FanTracker, MemoryStore, MongoStore, NewsFeed, NewsStore, ProfileStore};
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;

/// Attempts for the first MongoDB connection and the first Bot API call.
const STARTUP_ATTEMPTS: usize = 5;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Load environment variables from .env if present
    let _ = dotenv();

    let config = Config::from_env().context("Failed to load configuration")?;
    init_logger(config.log_file_path.as_deref())?;

    match cli.command.unwrap_or(Commands::Run { in_memory: false }) {
        Commands::Run { in_memory } => run_bot(&config, in_memory).await,
        Commands::Check => check_storage(&config).await,
        Commands::AwardXp { user, amount } => award_xp(&config, user, amount).await,
        Commands::Show { user } => show(&config, user).await,
        Commands::Unlock { user, achievement } => unlock(&config, user, &achievement).await,
    }
}

fn startup_backoff() -> ExponentialBuilder {
    ExponentialBuilder::default()
        .with_min_delay(Duration::from_secs(1))
        .with_max_delay(Duration::from_secs(30))
        .with_max_times(STARTUP_ATTEMPTS)
}

/// Connect to MongoDB, retrying while the server is unreachable.
///
/// The connection string is never logged; it may carry credentials.
async fn connect_mongo(config: &Config) -> Result<MongoStore> {
    let store = (|| MongoStore::connect(&config.mongodb_uri, &config.mongodb_database, config.mongodb_timeout()))
        .retry(startup_backoff())
        .when(AppError::is_connection)
        .notify(|err: &AppError, delay: Duration| {
            log::warn!("MongoDB not reachable ({}), retrying in {:?}", err, delay);
        })
        .await
        .with_context(|| format!("Failed to connect to MongoDB database '{}'", config.mongodb_database))?;
    Ok(store)
}

async fn run_bot(config: &Config, in_memory: bool) -> Result<()> {
    if !config.has_bot_token() {
        bail!("BOT_TOKEN (or TELOXIDE_TOKEN) is not set");
    }

    let bot = create_bot(config)?;
    let me = (|| async { bot.get_me().await })
        .retry(startup_backoff())
        .notify(|err: &teloxide::RequestError, delay: Duration| {
            log::warn!("Bot API not reachable ({}), retrying in {:?}", err, delay);
        })
        .await
        .context("Failed to reach the Telegram Bot API")?;
    log::info!("Bot started as @{}", me.username());

    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to register the command menu: {}", e);
    }

    let mongo = if in_memory {
        log::warn!("Running with in-memory storage; profiles are lost on exit");
        None
    } else {
        Some(connect_mongo(config).await?)
    };
    let (profiles, news): (Arc<dyn ProfileStore>, Arc<dyn NewsStore>) = match &mongo {
        Some(mongo) => (Arc::new(mongo.clone()), Arc::new(mongo.clone())),
        None => {
            let memory = Arc::new(MemoryStore::new());
            (memory.clone(), memory)
        }
    };

    let deps = HandlerDeps::new(FanTracker::new(profiles), NewsFeed::new(news));

    log::info!("Starting long polling");
    Dispatcher::builder(bot, schema(deps))
        .default_handler(|update| async move {
            log::debug!("Unhandled update: {:?}", update.kind);
        })
        .error_handler(LoggingErrorHandler::with_custom_text("An error has occurred in the dispatcher"))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
    log::info!("Dispatcher shutdown gracefully");

    if let Some(mongo) = mongo {
        mongo.shutdown().await;
    }
    Ok(())
}

async fn check_storage(config: &Config) -> Result<()> {
    let store = connect_mongo(config).await?;
    store.ping().await?;
    println!("✅ MongoDB is reachable (database '{}')", config.mongodb_database);
    store.shutdown().await;
    Ok(())
}

async fn award_xp(config: &Config, user: i64, amount: i64) -> Result<()> {
    let store = connect_mongo(config).await?;
    let tracker = FanTracker::new(Arc::new(store.clone()));
    let result = tracker.award_xp(user, amount).await;
    store.shutdown().await;

    println!("{}", describe_award(user, &result?));
    Ok(())
}

async fn show(config: &Config, user: i64) -> Result<()> {
    let store = connect_mongo(config).await?;
    let tracker = FanTracker::new(Arc::new(store.clone()));
    let result = tracker.lookup(user).await;
    store.shutdown().await;

    println!("{}", describe_profile(user, result?.as_ref()));
    Ok(())
}

async fn unlock(config: &Config, user: i64, achievement: &str) -> Result<()> {
    let store = connect_mongo(config).await?;
    let tracker = FanTracker::new(Arc::new(store.clone()));
    let result = tracker.unlock_achievement(user, achievement).await;
    store.shutdown().await;

    if result? {
        println!("🏆 Unlocked '{}' for user {}", achievement.trim(), user);
    } else {
        println!("User {} already had '{}'", user, achievement.trim());
    }
    Ok(())
}
