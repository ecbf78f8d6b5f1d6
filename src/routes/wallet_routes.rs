use std::sync::Arc;

use axum::{Router, routing::get, extract::{FromRef, State}, middleware};

use crate::{
    middleware::auth_middleware::{AuthContext, auth_middleware},
    models::api_models::ApiResponse,
    services::{token_service::TokenService, wallet_service::{error::Result, models::WalletModel, WalletService}},
};

#[derive(Clone, FromRef)]
pub struct WalletRoutesState {
    wallet_service: Arc<dyn WalletService>
}

pub fn routes(wallet_service: Arc<dyn WalletService>, token_service: Arc<dyn TokenService>) -> Router {
    Router::new()
        .route("/", get(get_wallet))
        .layer(middleware::from_fn_with_state(token_service, auth_middleware))
        .with_state(WalletRoutesState { wallet_service })
}

async fn get_wallet(
    State(wallet_service): State<Arc<dyn WalletService>>,
    ctx: AuthContext,
) -> Result<ApiResponse<WalletModel>> {
    Ok(ApiResponse::ok(wallet_service.get_wallet(ctx.user_id).await?))
}
