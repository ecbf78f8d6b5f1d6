use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestSettings {
    ///
    /// Enables `POST /quests/:id/verify`, which force-completes an active
    /// quest without checking its requirements
    ///
    #[serde(default = "default_force_verify")]
    pub force_verify_enabled: bool,
}

fn default_force_verify() -> bool { true }

impl Default for QuestSettings {
    fn default() -> Self {
        Self { force_verify_enabled: default_force_verify() }
    }
}
