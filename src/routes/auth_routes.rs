use std::sync::Arc;

use axum::{Router, routing::{get, post}, extract::{FromRef, State}, middleware};
use serde::Deserialize;

use crate::{
    middleware::{auth_middleware::{AuthContext, auth_middleware}, validation::{is_email, Validate, ValidJson}},
    models::api_models::{ApiResponse, FieldError},
    services::{auth_service::{error::Result, is_otp, models::{AuthTokensModel, UserModel}, AuthService}, token_service::TokenService},
};

#[derive(Clone, FromRef)]
pub struct AuthRoutesState {
    auth_service: Arc<dyn AuthService>
}

#[derive(Debug, Deserialize)]
pub struct SendOtpRequest {
    pub email: String,
}

impl Validate for SendOtpRequest {
    fn validate(&self) -> Vec<FieldError> {
        if is_email(self.email.trim()) {
            vec![]
        } else {
            vec![FieldError::new("email", "must be a valid email address")]
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

impl Validate for VerifyOtpRequest {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if !is_email(self.email.trim()) {
            errors.push(FieldError::new("email", "must be a valid email address"));
        }
        if !is_otp(&self.otp) {
            errors.push(FieldError::new("otp", "must be a 6-digit code"));
        }
        errors
    }
}

pub fn routes(auth_service: Arc<dyn AuthService>, token_service: Arc<dyn TokenService>) -> Router {
    Router::new()
        // Routes
        .route("/send-otp", post(send_otp))
        .route("/verify-otp", post(verify_otp))
        .route("/me", get(me))
        // Auth middleware
        .layer(middleware::from_fn_with_state(token_service, auth_middleware))
        // State
        .with_state(AuthRoutesState { auth_service })
}

async fn send_otp(
    State(auth_service): State<Arc<dyn AuthService>>,
    ValidJson(req): ValidJson<SendOtpRequest>,
) -> Result<ApiResponse<()>> {
    auth_service.send_otp(req.email).await?;
    Ok(ApiResponse::message("OTP sent"))
}

async fn verify_otp(
    State(auth_service): State<Arc<dyn AuthService>>,
    ValidJson(req): ValidJson<VerifyOtpRequest>,
) -> Result<ApiResponse<AuthTokensModel>> {
    Ok(ApiResponse::ok(auth_service.verify_otp(req.email, req.otp).await?))
}

async fn me(
    State(auth_service): State<Arc<dyn AuthService>>,
    ctx: AuthContext,
) -> Result<ApiResponse<UserModel>> {
    Ok(ApiResponse::ok(auth_service.get_user(ctx.user_id).await?))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::app::testing::TestApp;

    #[tokio::test]
    async fn test_otp_login_flow() {
        let app = TestApp::new();

        let (status, body) = app.send(
            Method::POST, "/api/auth/send-otp", None, Some(json!({ "email": "alice@devconnect.org" })),
        ).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "OTP sent");

        let (status, body) = app.send(
            Method::POST, "/api/auth/verify-otp", None, Some(json!({ "email": "alice@devconnect.org", "otp": "424242" })),
        ).await;
        assert_eq!(status, StatusCode::OK);
        let token = body["data"]["token"].as_str().unwrap().to_string();
        let user_id = body["data"]["user"]["id"].clone();

        let (status, body) = app.send(Method::GET, "/api/auth/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id"], user_id);
        assert_eq!(body["data"]["email"], "alice@devconnect.org");
    }

    #[tokio::test]
    async fn test_verify_otp_validation() {
        let app = TestApp::new();

        let (status, body) = app.send(
            Method::POST, "/api/auth/verify-otp", None, Some(json!({ "email": "alice", "otp": "12" })),
        ).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let fields: Vec<&str> = body["details"].as_array().unwrap()
            .iter().map(|d| d["field"].as_str().unwrap()).collect();
        assert_eq!(fields, vec!["email", "otp"]);
    }

    #[tokio::test]
    async fn test_me_for_unknown_user() {
        let app = TestApp::new();
        let (status, body) = app.send(Method::GET, "/api/auth/me", Some(&app.token(404)), None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "User not found");
    }
}
