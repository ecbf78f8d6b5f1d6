use std::{collections::HashSet, fs, path::{Path, PathBuf}};

use thiserror::Error;

use crate::{middleware::validation::Validate, services::quest_service::models::Quest};

const QUESTS_FILE: &str = "quests.json";

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("Could not read resource file {}", .path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("Could not parse resource file {}", .path.display())]
    Parse { path: PathBuf, source: serde_json::Error },
    #[error("Quest `{0}` is defined more than once")]
    DuplicateQuest(String),
    #[error("Quest `{id}` is invalid: {field} {message}")]
    InvalidQuest { id: String, field: String, message: String },
}

///
/// Loads the quest catalog from `quests.json` in `folder_path`.
/// Ids must be unique and every quest must pass validation.
///
pub fn load_quest_catalog(folder_path: impl AsRef<Path>) -> Result<Vec<Quest>, ResourceError> {
    let path = folder_path.as_ref().join(QUESTS_FILE);
    let contents = fs::read_to_string(&path)
        .map_err(|source| ResourceError::Io { path: path.clone(), source })?;
    let quests: Vec<Quest> = serde_json::from_str(&contents)
        .map_err(|source| ResourceError::Parse { path, source })?;

    let mut ids = HashSet::new();
    for quest in &quests {
        if !ids.insert(quest.id.as_str()) {
            return Err(ResourceError::DuplicateQuest(quest.id.clone()));
        }
        if quest.id.trim().is_empty() {
            return Err(ResourceError::InvalidQuest {
                id: quest.id.clone(), field: "id".to_string(), message: "must not be empty".to_string(),
            });
        }
        if let Some(err) = quest.validate().into_iter().next() {
            return Err(ResourceError::InvalidQuest { id: quest.id.clone(), field: err.field, message: err.message });
        }
    }

    Ok(quests)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_catalog(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("devconnect_quests_{name}_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(QUESTS_FILE), contents).unwrap();
        dir
    }

    #[test]
    fn test_load_bundled_catalog() {
        let quests = load_quest_catalog(concat!(env!("CARGO_MANIFEST_DIR"), "/res")).unwrap();

        let explorer = quests.iter().find(|q| q.title == "Event Explorer").unwrap();
        assert_eq!((explorer.xp_reward, explorer.coin_reward), (75, 25));
        assert_eq!(explorer.max_progress(), 1);
        assert!(quests.iter().any(|q| q.title == "Welcome to Devconnect"));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let quest = r#"{"id":"a","title":"A","type":"daily","difficulty":"easy","xpReward":1,"coinReward":1}"#;
        let dir = write_catalog("dup", &format!("[{quest},{quest}]"));

        assert!(matches!(load_quest_catalog(&dir), Err(ResourceError::DuplicateQuest(id)) if id == "a"));
    }

    #[test]
    fn test_invalid_requirement_rejected() {
        let dir = write_catalog("invalid", r#"[{"id":"a","title":"A","type":"daily","difficulty":"easy",
            "xpReward":1,"coinReward":1,"requirements":[{"type":"attend_event","count":0}]}]"#);

        assert!(matches!(load_quest_catalog(&dir), Err(ResourceError::InvalidQuest { .. })));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(load_quest_catalog("/nonexistent/folder"), Err(ResourceError::Io { .. })));
    }
}
