use std::sync::Arc;

use axum::{Router, routing::{get, post, put}, extract::{FromRef, Path, State}, middleware};
use serde::Deserialize;

use crate::{
    middleware::{auth_middleware::{AuthContext, AdminContext, auth_middleware}, validation::{Validate, ValidJson, ValidQuery}},
    models::api_models::{ApiResponse, FieldError},
    services::{
        quest_service::{
            error::Result,
            models::{ClaimedRewards, Quest, QuestFilter, QuestView, UserQuestProgress, UserQuestStats},
            QuestService,
        },
        token_service::TokenService,
    },
};

#[derive(Clone, FromRef)]
pub struct QuestRoutesState {
    quest_service: Arc<dyn QuestService>
}

#[derive(Debug, Deserialize)]
pub struct UpdateProgressRequest {
    pub progress: i64,
    #[serde(default)]
    pub completed: bool,
}

impl Validate for UpdateProgressRequest {
    fn validate(&self) -> Vec<FieldError> {
        vec![]
    }
}

pub fn routes(quest_service: Arc<dyn QuestService>, token_service: Arc<dyn TokenService>) -> Router {
    Router::new()
        // Routes
        .route("/", get(list_quests))
        .route("/user/stats", get(user_stats))
        .route("/:id", get(get_quest).put(upsert_quest))
        .route("/:id/start", post(start_quest))
        .route("/:id/progress", put(update_progress))
        .route("/:id/claim", post(claim_rewards))
        .route("/:id/verify", post(verify_quest))
        // Auth middleware
        .layer(middleware::from_fn_with_state(token_service, auth_middleware))
        // State
        .with_state(QuestRoutesState { quest_service })
}

async fn list_quests(
    State(quest_service): State<Arc<dyn QuestService>>,
    ctx: AuthContext,
    ValidQuery(filter): ValidQuery<QuestFilter>,
) -> Result<ApiResponse<Vec<QuestView>>> {
    Ok(ApiResponse::ok(quest_service.list_quests(ctx.user_id, filter).await?))
}

async fn get_quest(
    State(quest_service): State<Arc<dyn QuestService>>,
    Path(id): Path<String>,
    ctx: AuthContext,
) -> Result<ApiResponse<QuestView>> {
    Ok(ApiResponse::ok(quest_service.get_quest(ctx.user_id, &id).await?))
}

async fn upsert_quest(
    State(quest_service): State<Arc<dyn QuestService>>,
    Path(id): Path<String>,
    _admin: AdminContext,
    ValidJson(mut quest): ValidJson<Quest>,
) -> Result<ApiResponse<Quest>> {
    // The path is authoritative for the quest id
    quest.id = id;
    Ok(ApiResponse::ok(quest_service.upsert_quest(quest).await?))
}

async fn start_quest(
    State(quest_service): State<Arc<dyn QuestService>>,
    Path(id): Path<String>,
    ctx: AuthContext,
) -> Result<ApiResponse<UserQuestProgress>> {
    Ok(ApiResponse::created(quest_service.start_quest(ctx.user_id, &id).await?)
        .with_message("Quest started successfully"))
}

async fn update_progress(
    State(quest_service): State<Arc<dyn QuestService>>,
    Path(id): Path<String>,
    ctx: AuthContext,
    ValidJson(req): ValidJson<UpdateProgressRequest>,
) -> Result<ApiResponse<UserQuestProgress>> {
    Ok(ApiResponse::ok(quest_service.update_progress(ctx.user_id, &id, req.progress, req.completed).await?))
}

async fn claim_rewards(
    State(quest_service): State<Arc<dyn QuestService>>,
    Path(id): Path<String>,
    ctx: AuthContext,
) -> Result<ApiResponse<ClaimedRewards>> {
    Ok(ApiResponse::ok(quest_service.claim_rewards(ctx.user_id, &id).await?)
        .with_message("Rewards claimed successfully"))
}

async fn verify_quest(
    State(quest_service): State<Arc<dyn QuestService>>,
    Path(id): Path<String>,
    ctx: AuthContext,
) -> Result<ApiResponse<UserQuestProgress>> {
    Ok(ApiResponse::ok(quest_service.verify_quest(ctx.user_id, &id).await?)
        .with_message("Quest verified"))
}

async fn user_stats(
    State(quest_service): State<Arc<dyn QuestService>>,
    ctx: AuthContext,
) -> Result<ApiResponse<UserQuestStats>> {
    Ok(ApiResponse::ok(quest_service.user_stats(ctx.user_id).await?))
}
