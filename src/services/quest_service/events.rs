use chrono::{DateTime, Utc};
use log::error;
use tokio::sync::mpsc::UnboundedSender;

///
/// Domain events raised by quest transitions
///
#[derive(Debug, Clone, PartialEq)]
pub enum QuestEvent {
    Claimed(QuestClaimed),
}

///
/// Raised once per (user, quest) when rewards are claimed. Consumers
/// (the reward ledger) apply the balance change.
///
#[derive(Debug, Clone, PartialEq)]
pub struct QuestClaimed {
    pub user_id: i64,
    pub quest_id: String,
    pub xp: u32,
    pub coins: u32,
    pub claimed_at: DateTime<Utc>,
}

pub trait QuestEventSink: Send + Sync {
    fn publish(&self, event: QuestEvent);
}

impl QuestEventSink for UnboundedSender<QuestEvent> {
    fn publish(&self, event: QuestEvent) {
        if let Err(e) = self.send(event) {
            error!("Quest event dropped, no consumer running: {:?}", e.0);
        }
    }
}
