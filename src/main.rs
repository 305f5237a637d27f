// SFC Tracker
// A Discord bot for ANA premium point planning and flight logging

mod api;
mod commands;
mod features;
mod models;
mod utils;

use std::env;
use std::sync::Arc;

use anyhow::Context as _;
use poise::serenity_prelude as serenity;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::store::JsonStore;
use crate::utils::config::Settings;
use crate::utils::mileage::MileageTable;

/// Data shared across all commands
pub struct Data {
    pub store: Arc<JsonStore>,
    pub settings: Settings,
}

// Manual Debug impl so the token never ends up in logs
impl std::fmt::Debug for Data {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Data")
            .field("store", &"JsonStore")
            .field("owner_id", &self.settings.owner_id)
            .field("data_dir", &self.settings.data_dir)
            .finish()
    }
}

type Error = Box<dyn std::error::Error + Send + Sync>;
type Context<'a> = poise::Context<'a, Data, Error>;

/// Register all slash commands
fn get_commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        commands::flight::flight(),
        commands::dashboard::dashboard(),
        commands::history::history(),
        commands::target::target(),
        commands::backup::backup(),
        commands::optimizer::optimizer(),
        commands::help::help(),
    ]
}

/// Only the configured owner may use the bot
async fn owner_only(ctx: Context<'_>) -> Result<bool, Error> {
    Ok(ctx.author().id.get() == ctx.data().settings.owner_id)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "sfc_tracker=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;

    info!("Starting SFC Tracker...");

    let store = JsonStore::open(settings.store_path())
        .await
        .with_context(|| format!("Failed to open store at {}", settings.store_path().display()))?;
    let store = Arc::new(store);
    info!(
        "Loaded {} airports, {} distance pairs",
        utils::airports::AIRPORTS.len(),
        MileageTable::builtin().len()
    );

    let token = settings.discord_token.clone();
    let prefix = settings.prefix.clone();

    // Setup framework
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: get_commands(),
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(prefix),
                ..Default::default()
            },
            command_check: Some(|ctx| Box::pin(owner_only(ctx))),
            on_error: |error| {
                Box::pin(async move {
                    match error {
                        poise::FrameworkError::Command { error, ctx, .. } => {
                            error!("Command error: {:?}", error);
                            let _ = ctx.say(format!("❌ Error: {}", error)).await;
                        }
                        poise::FrameworkError::CommandCheckFailed { ctx, .. } => {
                            warn!("Rejected command from user {}", ctx.author().id);
                            let _ = ctx
                                .send(
                                    poise::CreateReply::default()
                                        .content("⛔ Access denied.")
                                        .ephemeral(true),
                                )
                                .await;
                        }
                        err => {
                            error!("Framework error: {:?}", err);
                        }
                    }
                })
            },
            ..Default::default()
        })
        .setup(|ctx, _ready, framework| {
            Box::pin(async move {
                info!("Bot is ready! Registering commands...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                info!("Commands registered successfully!");

                Ok(Data { store, settings })
            })
        })
        .build();

    // MESSAGE_CONTENT is privileged, enable in Discord Dev Portal for prefix commands
    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::DIRECT_MESSAGES;

    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await
        .context("Failed to create client")?;

    // Run with graceful shutdown
    let shard_manager = client.shard_manager.clone();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to register Ctrl+C handler: {:?}", e);
            return;
        }
        info!("Shutting down...");
        shard_manager.shutdown_all().await;
    });

    if let Err(why) = client.start().await {
        error!("Client error: {:?}", why);
    }

    info!("Goodbye!");
    Ok(())
}
