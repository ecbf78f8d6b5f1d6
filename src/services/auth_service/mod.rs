pub mod error;
pub mod data_layer;
pub mod models;

use std::sync::Arc;

use axum::async_trait;
use derive_more::Constructor;
use log::info;

use self::{error::{Result, AuthServiceError}, data_layer::AuthDataLayer, models::{AuthTokensModel, UserModel}};

use super::token_service::TokenService;

pub const OTP_LENGTH: usize = 6;

///
/// Whether `otp` has the shape of a one-time code: exactly six ASCII digits
///
pub fn is_otp(otp: &str) -> bool {
    otp.len() == OTP_LENGTH && otp.chars().all(|c| c.is_ascii_digit())
}

#[async_trait]
pub trait AuthService: Send + Sync {
    ///
    /// Requests a one-time code for `email`. No code is delivered; any
    /// well-formed code is accepted by `verify_otp`
    ///
    async fn send_otp(&self, email: String) -> Result<()>;
    ///
    /// Accepts a one-time code for `email`, registering the user on first login,
    /// and returns an access token for them
    ///
    async fn verify_otp(&self, email: String, otp: String) -> Result<AuthTokensModel>;
    async fn get_user(&self, user_id: i64) -> Result<UserModel>;
}

#[derive(Clone, Constructor)]
pub struct CoreAuthService {
    data_layer: Arc<dyn AuthDataLayer>,
    token_service: Arc<dyn TokenService>,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait]
impl AuthService for CoreAuthService {
    async fn send_otp(&self, email: String) -> Result<()> {
        let email = normalize_email(&email);
        let known = self.data_layer.get_user_by_email(&email).await?.is_some();
        info!("OTP requested for {email} (registered: {known})");
        Ok(())
    }

    async fn verify_otp(&self, email: String, otp: String) -> Result<AuthTokensModel> {
        if !is_otp(&otp) {
            return Err(AuthServiceError::InvalidOtp);
        }

        let user = self.data_layer.find_or_create_user(&normalize_email(&email)).await?;
        let token = self.token_service.generate_access_token(user.id)?;

        info!("User {} signed in", user.id);
        Ok(AuthTokensModel { token, user })
    }

    async fn get_user(&self, user_id: i64) -> Result<UserModel> {
        self.data_layer.get_user_by_id(user_id).await?
            .ok_or(AuthServiceError::UserNotFound(user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::data_layer::InMemoryAuthDataLayer;
    use crate::services::token_service::{settings::TokenSettings, CoreTokenService};

    fn service() -> (CoreAuthService, Arc<CoreTokenService>) {
        let tokens = Arc::new(CoreTokenService::new(TokenSettings { jwt_lifetime_s: 60 }, "secret".to_string(), None));
        (CoreAuthService::new(Arc::new(InMemoryAuthDataLayer::default()), tokens.clone()), tokens)
    }

    #[test]
    fn test_is_otp() {
        assert!(is_otp("123456"));
        assert!(!is_otp("12345"));
        assert!(!is_otp("1234567"));
        assert!(!is_otp("12a456"));
    }

    #[tokio::test]
    async fn test_verify_otp_issues_token_for_same_user() {
        let (svc, tokens) = service();

        let first = svc.verify_otp("Alice@Devconnect.org".to_string(), "000000".to_string()).await.unwrap();
        let second = svc.verify_otp("alice@devconnect.org ".to_string(), "987654".to_string()).await.unwrap();

        assert_eq!(first.user, second.user);
        assert_eq!(first.user.email, "alice@devconnect.org");
        assert_eq!(tokens.verify_access_token(&first.token).unwrap(), first.user.id);

        let bob = svc.verify_otp("bob@devconnect.org".to_string(), "111111".to_string()).await.unwrap();
        assert_ne!(bob.user.id, first.user.id);
    }

    #[tokio::test]
    async fn test_verify_otp_rejects_malformed_code() {
        let (svc, _) = service();
        let result = svc.verify_otp("alice@devconnect.org".to_string(), "12345".to_string()).await;
        assert!(matches!(result, Err(AuthServiceError::InvalidOtp)));
    }

    #[tokio::test]
    async fn test_get_user() {
        let (svc, _) = service();
        let login = svc.verify_otp("alice@devconnect.org".to_string(), "123456".to_string()).await.unwrap();

        assert_eq!(svc.get_user(login.user.id).await.unwrap(), login.user);
        assert!(matches!(svc.get_user(99).await, Err(AuthServiceError::UserNotFound(99))));
    }
}
