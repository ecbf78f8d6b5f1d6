pub mod data_layer;
pub mod error;
pub mod events;
pub mod models;
pub mod settings;

use std::sync::Arc;

use axum::async_trait;
use chrono::Utc;
use log::info;
use tokio::sync::Mutex;

use self::{
    data_layer::QuestDataLayer,
    error::{QuestServiceError, Result},
    events::{QuestClaimed, QuestEvent, QuestEventSink},
    models::{
        ClaimedRewards, Quest, QuestFilter, QuestRewards, QuestStatus, QuestView, UserQuestProgress,
        UserQuestStats,
    },
    settings::QuestSettings,
};

#[async_trait]
pub trait QuestService: Send + Sync {
    ///
    /// Lists the active catalog quests, plus any quest the user with the given
    /// `user_id` has a record for, merged with that progress and sorted by
    /// quest type and then by status
    ///
    async fn list_quests(&self, user_id: i64, filter: QuestFilter) -> Result<Vec<QuestView>>;
    ///
    /// Returns a single catalog quest merged with the user's progress on it
    ///
    async fn get_quest(&self, user_id: i64, quest_id: &str) -> Result<QuestView>;
    ///
    /// Starts the quest for the user. Throws Error if the user already
    /// started it, or if the quest is inactive or expired
    ///
    async fn start_quest(&self, user_id: i64, quest_id: &str) -> Result<UserQuestProgress>;
    ///
    /// Sets the user's progress on an active quest. Reaching `max_progress`, or
    /// passing `completed`, completes the quest
    ///
    async fn update_progress(&self, user_id: i64, quest_id: &str, progress: i64, completed: bool) -> Result<UserQuestProgress>;
    ///
    /// Claims the rewards of a completed quest. Each quest can be claimed once
    ///
    async fn claim_rewards(&self, user_id: i64, quest_id: &str) -> Result<ClaimedRewards>;
    ///
    /// Force-completes an active quest without checking its requirements.
    /// Only available when `force_verify_enabled` is set
    ///
    async fn verify_quest(&self, user_id: i64, quest_id: &str) -> Result<UserQuestProgress>;
    ///
    /// Aggregates the user's quest counts and claimed rewards
    ///
    async fn user_stats(&self, user_id: i64) -> Result<UserQuestStats>;
    ///
    /// Inserts or replaces a catalog quest. Progress records already started
    /// keep their `max_progress`
    ///
    async fn upsert_quest(&self, quest: Quest) -> Result<Quest>;
}

pub struct CoreQuestService {
    data_layer: Arc<dyn QuestDataLayer>,
    events: Arc<dyn QuestEventSink>,
    settings: QuestSettings,
    // Serializes progress transitions so each check-then-write runs to completion
    transitions: Mutex<()>,
}

impl CoreQuestService {
    pub fn new(data_layer: Arc<dyn QuestDataLayer>, events: Arc<dyn QuestEventSink>, settings: QuestSettings) -> Self {
        Self { data_layer, events, settings, transitions: Mutex::new(()) }
    }

    async fn require_quest(&self, quest_id: &str) -> Result<Quest> {
        self.data_layer.get_quest(quest_id).await?
            .ok_or(QuestServiceError::QuestNotFound)
    }

    async fn require_progress(&self, user_id: i64, quest_id: &str) -> Result<UserQuestProgress> {
        self.data_layer.get_progress(user_id, quest_id).await?
            .ok_or(QuestServiceError::ProgressNotFound)
    }
}

#[async_trait]
impl QuestService for CoreQuestService {
    async fn list_quests(&self, user_id: i64, filter: QuestFilter) -> Result<Vec<QuestView>> {
        let now = Utc::now();
        let records = self.data_layer.get_user_progress(user_id).await?;

        // Quests the user already has a record for stay listed after they close
        let mut views: Vec<QuestView> = self.data_layer.get_quests().await?
            .into_iter()
            .filter_map(|quest| {
                let record = records.iter().find(|p| p.quest_id == quest.id);
                (record.is_some() || quest.is_available(now)).then(|| QuestView::merge(quest, record))
            })
            .filter(|view| filter.matches(view))
            .collect();

        // Stable sort, so catalog order breaks ties
        views.sort_by_key(|view| (view.quest.quest_type.priority(), view.status.priority()));
        Ok(views)
    }

    async fn get_quest(&self, user_id: i64, quest_id: &str) -> Result<QuestView> {
        let quest = self.require_quest(quest_id).await?;
        let record = self.data_layer.get_progress(user_id, quest_id).await?;
        Ok(QuestView::merge(quest, record.as_ref()))
    }

    async fn start_quest(&self, user_id: i64, quest_id: &str) -> Result<UserQuestProgress> {
        let _guard = self.transitions.lock().await;

        let quest = self.require_quest(quest_id).await?;
        if let Some(existing) = self.data_layer.get_progress(user_id, quest_id).await? {
            if existing.status != QuestStatus::Available {
                return Err(QuestServiceError::AlreadyStarted);
            }
        }

        let now = Utc::now();
        if !quest.is_available(now) {
            return Err(QuestServiceError::QuestUnavailable);
        }

        let progress = UserQuestProgress {
            user_id,
            quest_id: quest.id.clone(),
            status: QuestStatus::Active,
            progress: 0,
            max_progress: quest.max_progress(),
            started_at: now,
            completed_at: None,
            claimed_at: None,
            rewards: None,
        };
        self.data_layer.put_progress(progress.clone()).await?;

        info!("User {user_id} started quest `{quest_id}`");
        Ok(progress)
    }

    async fn update_progress(&self, user_id: i64, quest_id: &str, progress: i64, completed: bool) -> Result<UserQuestProgress> {
        let _guard = self.transitions.lock().await;

        self.require_quest(quest_id).await?;
        let mut record = self.require_progress(user_id, quest_id).await?;
        if record.status != QuestStatus::Active {
            return Err(QuestServiceError::NotActive);
        }

        record.progress = progress;
        if completed || progress >= record.max_progress {
            record.status = QuestStatus::Completed;
            record.progress = record.max_progress;
            record.completed_at = Some(Utc::now());
            info!("User {user_id} completed quest `{quest_id}`");
        }

        self.data_layer.put_progress(record.clone()).await?;
        Ok(record)
    }

    async fn claim_rewards(&self, user_id: i64, quest_id: &str) -> Result<ClaimedRewards> {
        let _guard = self.transitions.lock().await;

        let quest = self.require_quest(quest_id).await?;
        let mut record = self.require_progress(user_id, quest_id).await?;
        if record.status != QuestStatus::Completed {
            return Err(QuestServiceError::NotCompleted);
        }
        if record.claimed_at.is_some() {
            return Err(QuestServiceError::AlreadyClaimed);
        }

        let claimed_at = Utc::now();
        let rewards = QuestRewards { xp: quest.xp_reward, coins: quest.coin_reward };
        record.claimed_at = Some(claimed_at);
        record.rewards = Some(rewards);
        self.data_layer.put_progress(record).await?;

        self.events.publish(QuestEvent::Claimed(QuestClaimed {
            user_id,
            quest_id: quest.id.clone(),
            xp: rewards.xp,
            coins: rewards.coins,
            claimed_at,
        }));

        info!("User {user_id} claimed quest `{quest_id}`: {} xp, {} coins", rewards.xp, rewards.coins);
        Ok(ClaimedRewards { quest_id: quest.id, rewards, claimed_at })
    }

    async fn verify_quest(&self, user_id: i64, quest_id: &str) -> Result<UserQuestProgress> {
        if !self.settings.force_verify_enabled {
            return Err(QuestServiceError::VerificationDisabled);
        }
        let _guard = self.transitions.lock().await;

        self.require_quest(quest_id).await?;
        let mut record = self.require_progress(user_id, quest_id).await?;
        if record.status != QuestStatus::Active {
            return Err(QuestServiceError::NotActive);
        }

        record.status = QuestStatus::Completed;
        record.progress = record.max_progress;
        record.completed_at = Some(Utc::now());
        self.data_layer.put_progress(record.clone()).await?;

        info!("User {user_id} force-verified quest `{quest_id}`");
        Ok(record)
    }

    async fn user_stats(&self, user_id: i64) -> Result<UserQuestStats> {
        let now = Utc::now();
        let catalog = self.data_layer.get_quests().await?;
        let records = self.data_layer.get_user_progress(user_id).await?;

        let mut stats = UserQuestStats {
            total_quests: catalog.iter()
                .filter(|q| q.is_available(now) || records.iter().any(|p| p.quest_id == q.id))
                .count() as u32,
            started: records.len() as u32,
            ..Default::default()
        };

        for record in &records {
            match record.status {
                QuestStatus::Active => stats.active += 1,
                QuestStatus::Completed => stats.completed += 1,
                QuestStatus::Available => { }
            }
            if record.claimed_at.is_some() {
                stats.claimed += 1;
            }
            if let Some(rewards) = record.rewards {
                stats.total_xp_earned += rewards.xp as u64;
                stats.total_coins_earned += rewards.coins as u64;
            }
        }

        if stats.total_quests > 0 {
            stats.completion_rate = (stats.completed * 100 / stats.total_quests).min(100);
        }
        Ok(stats)
    }

    async fn upsert_quest(&self, quest: Quest) -> Result<Quest> {
        self.data_layer.put_quest(quest.clone()).await?;
        info!("Catalog quest `{}` upserted", quest.id);
        Ok(quest)
    }
}
