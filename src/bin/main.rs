use std::{net::SocketAddr, process::ExitCode, sync::Arc};

use log::{error, info};
use tokio::sync::mpsc::unbounded_channel;
use tower_http::trace::{TraceLayer, self};
use tracing::Level;

use devconnect_quests::{
    app::{self, AppServices},
    background_svcs::reward_ledger_svc::apply_rewards_async,
    resources::quest_resources::load_quest_catalog,
    services::{
        auth_service::{data_layer::InMemoryAuthDataLayer, CoreAuthService},
        quest_service::{data_layer::InMemoryQuestDataLayer, events::QuestEvent, CoreQuestService},
        token_service::CoreTokenService,
        wallet_service::{data_layer::InMemoryWalletDataLayer, CoreWalletService},
    },
    settings::{AppSettings, Secrets, DEFAULT_SETTINGS_PATH},
};

#[tokio::main]
async fn main() -> ExitCode {
    // Setup tracing_subscriber
    tracing_subscriber::fmt().with_target(false).compact().init();

    // Setup settings and secrets
    let settings_path = dotenvy::var("SETTINGS_PATH").unwrap_or_else(|_| DEFAULT_SETTINGS_PATH.to_string());
    let settings = match AppSettings::load(&settings_path) {
        Ok(settings) => settings,
        Err(e) => {
            error!("{e} ({settings_path}): {e:?}");
            return ExitCode::FAILURE;
        }
    };
    let secrets = match Secrets::from_env() {
        Ok(secrets) => secrets,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    if secrets.admin_secret.is_none() {
        info!("ADMIN_SECRET not set, admin routes are disabled");
    }

    let catalog = match load_quest_catalog(&settings.res_folder) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("{e}: {e:?}");
            return ExitCode::FAILURE;
        }
    };
    info!("Loaded {} catalog quests", catalog.len());

    // Setup state
    let token_service = Arc::new(CoreTokenService::new(settings.token.clone(), secrets.jwt_secret, secrets.admin_secret));

    let auth_data_layer = Arc::new(InMemoryAuthDataLayer::default());
    let auth_service = Arc::new(CoreAuthService::new(auth_data_layer, token_service.clone()));

    let wallet_data_layer = Arc::new(InMemoryWalletDataLayer::default());
    let wallet_service = Arc::new(CoreWalletService::new(wallet_data_layer));

    let (events_tx, events_rx) = unbounded_channel::<QuestEvent>();
    let quest_data_layer = Arc::new(InMemoryQuestDataLayer::new(catalog));
    let quest_service = Arc::new(CoreQuestService::new(quest_data_layer, Arc::new(events_tx), settings.quests.clone()));

    // Reward ledger background service
    tokio::spawn(apply_rewards_async(events_rx, wallet_service.clone()));

    let app = app::router(AppServices { token_service, auth_service, quest_service, wallet_service })
        // Logging
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new().level(Level::INFO))
        );

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    info!("Listening on {addr}");

    if let Err(e) = axum::Server::bind(&addr).serve(app.into_make_service()).await {
        error!("Server error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
