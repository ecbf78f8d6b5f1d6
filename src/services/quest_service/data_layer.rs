use std::collections::HashMap;

use axum::async_trait;
use tokio::sync::RwLock;

use crate::data_layer_error::Result;

use super::models::{Quest, UserQuestProgress};

#[async_trait]
pub trait QuestDataLayer : Send + Sync {
    ///
    /// Retrieves every catalog quest, in catalog order
    ///
    async fn get_quests(&self) -> Result<Vec<Quest>>;
    ///
    /// Retrieves the catalog quest with the given `quest_id`, if one exists
    ///
    async fn get_quest(&self, quest_id: &str) -> Result<Option<Quest>>;
    ///
    /// Replaces the catalog quest with the same id, or appends it if new
    ///
    async fn put_quest(&self, quest: Quest) -> Result<()>;
    ///
    /// Retrieves all progress records of the user with the given `user_id`
    ///
    async fn get_user_progress(&self, user_id: i64) -> Result<Vec<UserQuestProgress>>;
    ///
    /// Retrieves the user's progress record for one quest, if they've started it
    ///
    async fn get_progress(&self, user_id: i64, quest_id: &str) -> Result<Option<UserQuestProgress>>;
    ///
    /// Stores a progress record, replacing the user's existing record for the same quest
    ///
    async fn put_progress(&self, progress: UserQuestProgress) -> Result<()>;
}

///
/// Process-local `QuestDataLayer`. All state is lost on restart.
///
#[derive(Default)]
pub struct InMemoryQuestDataLayer {
    catalog: RwLock<Vec<Quest>>,
    progress: RwLock<HashMap<i64, Vec<UserQuestProgress>>>,
}

impl InMemoryQuestDataLayer {
    pub fn new(catalog: Vec<Quest>) -> Self {
        Self { catalog: RwLock::new(catalog), progress: RwLock::default() }
    }
}

#[async_trait]
impl QuestDataLayer for InMemoryQuestDataLayer {
    async fn get_quests(&self) -> Result<Vec<Quest>> {
        Ok(self.catalog.read().await.clone())
    }

    async fn get_quest(&self, quest_id: &str) -> Result<Option<Quest>> {
        Ok(self.catalog.read().await.iter().find(|q| q.id == quest_id).cloned())
    }

    async fn put_quest(&self, quest: Quest) -> Result<()> {
        let mut catalog = self.catalog.write().await;
        match catalog.iter_mut().find(|q| q.id == quest.id) {
            Some(existing) => *existing = quest,
            None => catalog.push(quest),
        }
        Ok(())
    }

    async fn get_user_progress(&self, user_id: i64) -> Result<Vec<UserQuestProgress>> {
        Ok(self.progress.read().await.get(&user_id).cloned().unwrap_or_default())
    }

    async fn get_progress(&self, user_id: i64, quest_id: &str) -> Result<Option<UserQuestProgress>> {
        Ok(self.progress.read().await
            .get(&user_id)
            .and_then(|records| records.iter().find(|p| p.quest_id == quest_id).cloned()))
    }

    async fn put_progress(&self, progress: UserQuestProgress) -> Result<()> {
        let mut all = self.progress.write().await;
        let records = all.entry(progress.user_id).or_default();

        // A user has at most one record per quest
        match records.iter_mut().find(|p| p.quest_id == progress.quest_id) {
            Some(existing) => *existing = progress,
            None => records.push(progress),
        }
        Ok(())
    }
}
