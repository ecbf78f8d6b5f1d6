use std::sync::Arc;

use log::{error, info, warn};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::services::{
    quest_service::events::QuestEvent,
    wallet_service::{error::WalletServiceError, models::RewardCredit, WalletService},
};

/// 
/// Credits claimed quest rewards to user wallets. Runs until every
/// event sender has been dropped.
/// 
pub async fn apply_rewards_async(mut events: UnboundedReceiver<QuestEvent>, wallet_service: Arc<dyn WalletService>) {
    while let Some(event) = events.recv().await {
        match event {
            QuestEvent::Claimed(claimed) => {
                let credit = RewardCredit {
                    quest_id: claimed.quest_id,
                    xp: claimed.xp,
                    coins: claimed.coins,
                    at: claimed.claimed_at,
                };

                match wallet_service.credit_rewards(claimed.user_id, credit).await {
                    Ok(wallet) => info!(
                        "Credited user {}: now {} xp, {} coins", claimed.user_id, wallet.xp, wallet.coins
                    ),
                    Err(WalletServiceError::AlreadyCredited(quest_id)) => warn!(
                        "Ignoring duplicate reward for user {} on quest `{quest_id}`", claimed.user_id
                    ),
                    Err(e) => error!("Failed to credit user {}: {:?}", claimed.user_id, e),
                }
            }
        }
    }
    info!("Reward ledger stopped");
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use tokio::sync::mpsc::unbounded_channel;

    use super::*;
    use crate::services::{
        quest_service::events::{QuestClaimed, QuestEventSink},
        wallet_service::{data_layer::InMemoryWalletDataLayer, CoreWalletService},
    };

    fn claimed(user_id: i64, quest_id: &str) -> QuestEvent {
        QuestEvent::Claimed(QuestClaimed {
            user_id,
            quest_id: quest_id.to_string(),
            xp: 75,
            coins: 25,
            claimed_at: Utc::now(),
        })
    }

    #[tokio::test]
    async fn test_ledger_applies_claims_once() {
        let wallets: Arc<dyn WalletService> = Arc::new(CoreWalletService::new(Arc::new(InMemoryWalletDataLayer::default())));
        let (tx, rx) = unbounded_channel::<QuestEvent>();

        tx.publish(claimed(1, "event-explorer"));
        tx.publish(claimed(1, "event-explorer"));
        tx.publish(claimed(2, "event-explorer"));
        drop(tx);

        apply_rewards_async(rx, wallets.clone()).await;

        let wallet = wallets.get_wallet(1).await.unwrap();
        assert_eq!((wallet.xp, wallet.coins), (75, 25));
        assert_eq!(wallet.transactions.len(), 1);
        assert_eq!(wallets.get_wallet(2).await.unwrap().xp, 75);
    }
}
