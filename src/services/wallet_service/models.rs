use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletModel {
    pub user_id: i64,
    pub xp: u64,
    pub coins: u64,
    pub transactions: Vec<WalletTransaction>,
}

impl WalletModel {
    pub fn empty(user_id: i64) -> Self {
        Self { user_id, xp: 0, coins: 0, transactions: vec![] }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletTransaction {
    pub id: u64,
    pub quest_id: String,
    pub xp: u32,
    pub coins: u32,
    pub created_at: DateTime<Utc>,
}

///
/// Rewards to credit to a wallet for one claimed quest
///
#[derive(Debug, Clone, PartialEq)]
pub struct RewardCredit {
    pub quest_id: String,
    pub xp: u32,
    pub coins: u32,
    pub at: DateTime<Utc>,
}
