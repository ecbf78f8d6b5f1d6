use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{middleware::validation::Validate, models::api_models::FieldError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestType {
    Story,
    Daily,
    Weekly,
    Achievement,
}

impl QuestType {
    /// Listing order: story quests first, achievements last
    pub fn priority(&self) -> u8 {
        match self {
            QuestType::Story => 0,
            QuestType::Daily => 1,
            QuestType::Weekly => 2,
            QuestType::Achievement => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestStatus {
    Available,
    Active,
    Completed,
}

impl QuestStatus {
    /// Listing order within a quest type: in-progress quests first
    pub fn priority(&self) -> u8 {
        match self {
            QuestStatus::Active => 0,
            QuestStatus::Available => 1,
            QuestStatus::Completed => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestRequirement {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

impl QuestRequirement {
    pub fn new(kind: &str, count: Option<u32>) -> Self {
        Self { kind: kind.to_string(), target: None, count }
    }
}

///
/// A catalog quest definition
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub quest_type: QuestType,
    pub difficulty: Difficulty,
    pub xp_reward: u32,
    pub coin_reward: u32,
    #[serde(default)]
    pub requirements: Vec<QuestRequirement>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool { true }

impl Quest {
    ///
    /// The progress needed to complete this quest: the sum of each
    /// requirement's `count`, a requirement without one counting as 1
    ///
    pub fn max_progress(&self) -> i64 {
        self.requirements.iter().map(|req| req.count.unwrap_or(1) as i64).sum()
    }

    /// Whether the quest can be started at `now`
    pub fn is_available(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.expires_at.map_or(true, |expires_at| expires_at > now)
    }
}

impl Validate for Quest {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.title.trim().is_empty() {
            errors.push(FieldError::new("title", "must not be empty"));
        }
        for (idx, req) in self.requirements.iter().enumerate() {
            if req.kind.trim().is_empty() {
                errors.push(FieldError::new(format!("requirements[{idx}].type"), "must not be empty"));
            }
            if req.count == Some(0) {
                errors.push(FieldError::new(format!("requirements[{idx}].count"), "must be at least 1"));
            }
        }
        errors
    }
}

///
/// A user's progress on one quest. Created on start; `max_progress`
/// is frozen at that point.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuestProgress {
    pub user_id: i64,
    pub quest_id: String,
    pub status: QuestStatus,
    pub progress: i64,
    pub max_progress: i64,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub claimed_at: Option<DateTime<Utc>>,
    /// Rewards credited at claim time. Later catalog edits do not change them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rewards: Option<QuestRewards>,
}

///
/// A catalog quest merged with the caller's progress on it
///
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestView {
    #[serde(flatten)]
    pub quest: Quest,
    pub status: QuestStatus,
    pub progress: i64,
    pub max_progress: i64,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub claimed_at: Option<DateTime<Utc>>,
}

impl QuestView {
    pub fn merge(quest: Quest, progress: Option<&UserQuestProgress>) -> Self {
        match progress {
            Some(p) => Self {
                status: p.status,
                progress: p.progress,
                max_progress: p.max_progress,
                started_at: Some(p.started_at),
                completed_at: p.completed_at,
                claimed_at: p.claimed_at,
                quest,
            },
            None => Self {
                status: QuestStatus::Available,
                progress: 0,
                max_progress: quest.max_progress(),
                started_at: None,
                completed_at: None,
                claimed_at: None,
                quest,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestRewards {
    pub xp: u32,
    pub coins: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimedRewards {
    pub quest_id: String,
    pub rewards: QuestRewards,
    pub claimed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuestStats {
    pub total_quests: u32,
    pub started: u32,
    pub active: u32,
    pub completed: u32,
    pub claimed: u32,
    pub total_xp_earned: u64,
    pub total_coins_earned: u64,
    pub completion_rate: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct QuestFilter {
    #[serde(rename = "type")]
    pub quest_type: Option<QuestType>,
    pub status: Option<QuestStatus>,
}

impl QuestFilter {
    pub fn matches(&self, view: &QuestView) -> bool {
        self.quest_type.map_or(true, |t| t == view.quest.quest_type)
            && self.status.map_or(true, |s| s == view.status)
    }
}

impl Validate for QuestFilter {
    fn validate(&self) -> Vec<FieldError> {
        vec![]
    }
}
