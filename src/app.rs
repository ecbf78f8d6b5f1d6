use std::sync::Arc;

use axum::{routing::get, Router};

use crate::{
    models::api_models::ApiResponse,
    routes::{auth_routes, quest_routes, wallet_routes},
    services::{auth_service::AuthService, quest_service::QuestService, token_service::TokenService, wallet_service::WalletService},
};

///
/// The services the HTTP layer is built over
///
#[derive(Clone)]
pub struct AppServices {
    pub token_service: Arc<dyn TokenService>,
    pub auth_service: Arc<dyn AuthService>,
    pub quest_service: Arc<dyn QuestService>,
    pub wallet_service: Arc<dyn WalletService>,
}

pub fn router(services: AppServices) -> Router {
    let AppServices { token_service, auth_service, quest_service, wallet_service } = services;

    Router::new()
        .route("/health", get(health))
        .nest("/api/auth", auth_routes::routes(auth_service, token_service.clone()))
        .nest("/api/quests", quest_routes::routes(quest_service, token_service.clone()))
        .nest("/api/wallet", wallet_routes::routes(wallet_service, token_service))
}

async fn health() -> ApiResponse<()> {
    ApiResponse::message("ok")
}
