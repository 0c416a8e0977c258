#![recursion_limit = "256"]
//! # Main Entry Point
//!
//! Wires the layers together:
//! - Domain: Configuration, Types and Traits
//! - Infrastructure: Matrix, HTTP, xkcd
//! - Application: Parsing, Image sniffing, State, Router
//! - Interface: Command Handlers
//!

mod application;
mod domain;
mod infrastructure;
mod interface;
mod strings;
#[cfg(test)]
mod testkit;

use anyhow::{Context, Result};
use clap::Parser;
use matrix_sdk::{
    Client,
    config::SyncSettings,
    room::Room,
    ruma::events::room::{
        member::{MembershipState, StrippedRoomMemberEvent},
        message::{MessageType, SyncRoomMessageEvent},
    },
};
use std::fs;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::application::router::CommandRouter;
use crate::application::state::BotState;
use crate::domain::config::AppConfig;
use crate::domain::traits::ChatProvider;
use crate::domain::types::IncomingMessage;
use crate::infrastructure::http::ReqwestTransport;
use crate::infrastructure::matrix::{MatrixDirectory, MatrixService};
use crate::infrastructure::xkcd::XkcdClient;
use crate::strings::logs;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "data/config.yaml")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Load Configuration
    let config = AppConfig::load(&args.config)?;

    // 2. Logging Setup
    if !std::path::Path::new("data").exists() {
        fs::create_dir("data").context("Failed to create data directory")?;
    }

    // Clear previous session log
    let log_path = std::path::Path::new("data/session.log");
    if log_path.exists() {
        let _ = fs::remove_file(log_path);
    }

    let file_appender = tracing_appender::rolling::never("data", "session.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(
            "info,matrix_sdk=warn,matrix_sdk_base=warn,matrix_sdk_crypto=error,ruma=warn,hyper=warn",
        )
    });

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false);
    let console_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stdout);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    tracing::info!("{}", logs::STARTING);
    tracing::info!("{}", logs::config_loaded(&config.services.matrix.username));
    if config.feedback.room.is_none() {
        tracing::warn!("{}", logs::NO_FEEDBACK_ROOM);
    }

    // 3. Matrix Setup
    let client = Client::builder()
        .homeserver_url(&config.services.matrix.homeserver)
        .build()
        .await?;

    client
        .matrix_auth()
        .login_username(
            &config.services.matrix.username,
            &config.services.matrix.password,
        )
        .send()
        .await?;

    tracing::info!("{}", logs::login_success(&config.services.matrix.username));

    if let Some(name) = &config.services.matrix.display_name
        && let Err(e) = client.account().set_display_name(Some(name.as_str())).await
    {
        tracing::warn!("{}", logs::set_display_name_fail(&e.to_string()));
    }

    // 4. Application Components
    let transport = Arc::new(ReqwestTransport::new(config.comics.timeout_secs)?);
    let comics = Arc::new(XkcdClient::new(transport, config.comics.clone()));
    let directory = Arc::new(MatrixDirectory::new(client.clone()));
    let state = Arc::new(Mutex::new(BotState::default()));
    let router = Arc::new(CommandRouter::new(&config, comics, directory, state));

    // 5. Event Handlers
    let start_time = std::time::SystemTime::now();

    let message_router = router.clone();
    client.add_event_handler(move |ev: SyncRoomMessageEvent, room: Room| {
        let router = message_router.clone();

        async move {
            let Some(original_msg) = ev.as_original() else {
                return;
            };

            // Ignore events older than start_time
            let ts = ev.origin_server_ts();
            let event_time =
                std::time::UNIX_EPOCH + std::time::Duration::from_millis(ts.get().into());
            if event_time < start_time {
                return;
            }

            if original_msg.sender == room.own_user_id() {
                return;
            }

            if let MessageType::Text(text_content) = &original_msg.content.msgtype {
                tracing::info!(
                    "Received message from {}: \n{}",
                    original_msg.sender,
                    text_content.body
                );

                let chat = MatrixService::new(room);
                let message = IncomingMessage {
                    event_id: original_msg.event_id.to_string(),
                    sender: original_msg.sender.to_string(),
                    body: text_content.body.clone(),
                };

                if let Err(e) = router.route(&chat, &message).await {
                    tracing::error!("{}", logs::route_failed(&chat.room_id(), &e.to_string()));
                }
            }
        }
    });

    // Handle Invites: join, then introduce ourselves
    let invite_router = router.clone();
    client.add_event_handler(
        move |ev: StrippedRoomMemberEvent, room: Room, client: Client| {
            let router = invite_router.clone();

            async move {
                if ev.content.membership != MembershipState::Invite {
                    return;
                }
                if client
                    .user_id()
                    .is_none_or(|own| ev.state_key.as_str() != own.as_str())
                {
                    return;
                }

                tracing::info!("{}", logs::invite_received(room.room_id().as_str()));
                if let Err(e) = room.join().await {
                    tracing::error!("{}", logs::join_invite_fail(&e.to_string()));
                    return;
                }

                let chat = MatrixService::new(room);
                if let Err(e) = router.greet(&chat).await {
                    tracing::error!("{}", logs::route_failed(&chat.room_id(), &e.to_string()));
                }
            }
        },
    );

    // 6. Sync Loop
    tracing::info!("{}", logs::SYNC_LOOP_START);
    if let Err(e) = client.sync(SyncSettings::default()).await {
        tracing::error!("{}", logs::sync_loop_fail(&e.to_string()));
        return Err(e.into());
    }

    Ok(())
}
