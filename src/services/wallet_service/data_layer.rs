use std::{collections::HashMap, sync::atomic::{AtomicU64, Ordering}};

use axum::async_trait;
use tokio::sync::RwLock;

use crate::data_layer_error::Result;

use super::models::{RewardCredit, WalletModel, WalletTransaction};

#[async_trait]
pub trait WalletDataLayer : Send + Sync {
    ///
    /// Retrieves the wallet of the user with the given `user_id`, if one was ever credited
    ///
    async fn get_wallet(&self, user_id: i64) -> Result<Option<WalletModel>>;
    ///
    /// Adds the `credit` to the user's balances and transaction list.
    /// Returns None, leaving the wallet untouched, if the credit's quest
    /// was already credited to this user
    ///
    async fn apply_credit(&self, user_id: i64, credit: RewardCredit) -> Result<Option<WalletModel>>;
}

#[derive(Default)]
pub struct InMemoryWalletDataLayer {
    wallets: RwLock<HashMap<i64, WalletModel>>,
    next_tx_id: AtomicU64,
}

#[async_trait]
impl WalletDataLayer for InMemoryWalletDataLayer {
    async fn get_wallet(&self, user_id: i64) -> Result<Option<WalletModel>> {
        Ok(self.wallets.read().await.get(&user_id).cloned())
    }

    async fn apply_credit(&self, user_id: i64, credit: RewardCredit) -> Result<Option<WalletModel>> {
        let mut wallets = self.wallets.write().await;
        let wallet = wallets.entry(user_id).or_insert_with(|| WalletModel::empty(user_id));

        if wallet.transactions.iter().any(|tx| tx.quest_id == credit.quest_id) {
            return Ok(None);
        }

        wallet.xp += credit.xp as u64;
        wallet.coins += credit.coins as u64;
        wallet.transactions.push(WalletTransaction {
            id: self.next_tx_id.fetch_add(1, Ordering::Relaxed) + 1,
            quest_id: credit.quest_id,
            xp: credit.xp,
            coins: credit.coins,
            created_at: credit.at,
        });

        Ok(Some(wallet.clone()))
    }
}
