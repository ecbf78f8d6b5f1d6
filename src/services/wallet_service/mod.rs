pub mod data_layer;
pub mod error;
pub mod models;

use std::sync::Arc;

use axum::async_trait;
use derive_more::Constructor;

use self::{
    data_layer::WalletDataLayer,
    error::{Result, WalletServiceError},
    models::{RewardCredit, WalletModel},
};

///
/// Ledger of the XP and coins users earned from claimed quests
///
#[async_trait]
pub trait WalletService: Send + Sync {
    ///
    /// Credits the rewards of one claimed quest to the user with the given `user_id`.
    /// Returns `WalletServiceError::AlreadyCredited` if that quest was already credited
    ///
    async fn credit_rewards(&self, user_id: i64, credit: RewardCredit) -> Result<WalletModel>;
    ///
    /// Retrieves the user's wallet. Users never credited have an empty wallet
    ///
    async fn get_wallet(&self, user_id: i64) -> Result<WalletModel>;
}

#[derive(Constructor)]
pub struct CoreWalletService {
    data_layer: Arc<dyn WalletDataLayer>,
}

#[async_trait]
impl WalletService for CoreWalletService {
    async fn credit_rewards(&self, user_id: i64, credit: RewardCredit) -> Result<WalletModel> {
        let quest_id = credit.quest_id.clone();
        self.data_layer.apply_credit(user_id, credit).await?
            .ok_or(WalletServiceError::AlreadyCredited(quest_id))
    }

    async fn get_wallet(&self, user_id: i64) -> Result<WalletModel> {
        Ok(self.data_layer.get_wallet(user_id).await?
            .unwrap_or_else(|| WalletModel::empty(user_id)))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use super::data_layer::InMemoryWalletDataLayer;

    fn credit(quest_id: &str, xp: u32, coins: u32) -> RewardCredit {
        RewardCredit { quest_id: quest_id.to_string(), xp, coins, at: Utc::now() }
    }

    #[tokio::test]
    async fn test_credit_accumulates() {
        let svc = CoreWalletService::new(Arc::new(InMemoryWalletDataLayer::default()));

        svc.credit_rewards(1, credit("event-explorer", 75, 25)).await.unwrap();
        let wallet = svc.credit_rewards(1, credit("welcome-to-devconnect", 100, 50)).await.unwrap();

        assert_eq!((wallet.xp, wallet.coins), (175, 75));
        assert_eq!(wallet.transactions.len(), 2);
        assert_eq!(svc.get_wallet(1).await.unwrap(), wallet);
    }

    #[tokio::test]
    async fn test_duplicate_credit_is_rejected() {
        let svc = CoreWalletService::new(Arc::new(InMemoryWalletDataLayer::default()));

        svc.credit_rewards(1, credit("event-explorer", 75, 25)).await.unwrap();
        let again = svc.credit_rewards(1, credit("event-explorer", 75, 25)).await;
        assert!(matches!(again, Err(WalletServiceError::AlreadyCredited(id)) if id == "event-explorer"));

        let wallet = svc.get_wallet(1).await.unwrap();
        assert_eq!((wallet.xp, wallet.coins), (75, 25));

        // Same quest for another user is a separate credit
        assert!(svc.credit_rewards(2, credit("event-explorer", 75, 25)).await.is_ok());
    }

    #[tokio::test]
    async fn test_empty_wallet() {
        let svc = CoreWalletService::new(Arc::new(InMemoryWalletDataLayer::default()));
        assert_eq!(svc.get_wallet(7).await.unwrap(), WalletModel::empty(7));
    }
}
