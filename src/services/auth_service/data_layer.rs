use axum::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::data_layer_error::Result;

use super::models::UserModel;

#[async_trait]
pub trait AuthDataLayer : Send + Sync {
    async fn get_user_by_id(&self, user_id: i64) -> Result<Option<UserModel>>;
    async fn get_user_by_email<'a>(&self, email: &'a str) -> Result<Option<UserModel>>;
    ///
    /// Returns the user registered under `email`, registering a new one
    /// if none exists yet
    ///
    async fn find_or_create_user<'a>(&self, email: &'a str) -> Result<UserModel>;
}

#[derive(Default)]
pub struct InMemoryAuthDataLayer {
    users: RwLock<Vec<UserModel>>,
}

#[async_trait]
impl AuthDataLayer for InMemoryAuthDataLayer {
    async fn get_user_by_id(&self, user_id: i64) -> Result<Option<UserModel>> {
        Ok(self.users.read().await.iter().find(|u| u.id == user_id).cloned())
    }

    async fn get_user_by_email<'a>(&self, email: &'a str) -> Result<Option<UserModel>> {
        Ok(self.users.read().await.iter().find(|u| u.email == email).cloned())
    }

    async fn find_or_create_user<'a>(&self, email: &'a str) -> Result<UserModel> {
        let mut users = self.users.write().await;
        if let Some(user) = users.iter().find(|u| u.email == email) {
            return Ok(user.clone());
        }

        let user = UserModel { id: users.len() as i64 + 1, email: email.to_string(), created_at: Utc::now() };
        users.push(user.clone());
        Ok(user)
    }
}
