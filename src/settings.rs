use std::{fs, path::Path};

use serde::Deserialize;
use thiserror::Error;

use crate::services::{quest_service::settings::QuestSettings, token_service::settings::TokenSettings};

pub const DEFAULT_SETTINGS_PATH: &str = "./settings.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Could not read settings file")]
    Io(#[from] std::io::Error),
    #[error("Could not parse settings file")]
    Parse(#[from] serde_json::Error),
    #[error("Environment variable {0} must be set")]
    MissingEnv(&'static str),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_res_folder")]
    pub res_folder: String,
    pub token: TokenSettings,
    #[serde(default)]
    pub quests: QuestSettings,
}

fn default_port() -> u16 { 3005 }

fn default_res_folder() -> String { "./res".to_string() }

impl AppSettings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }
}

///
/// Secrets read from the environment (or a `.env` file)
///
#[derive(Clone)]
pub struct Secrets {
    pub jwt_secret: String,
    pub admin_secret: Option<String>,
}

impl Secrets {
    pub fn from_env() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();
        let jwt_secret = dotenvy::var("JWT_SECRET").map_err(|_| SettingsError::MissingEnv("JWT_SECRET"))?;
        let admin_secret = dotenvy::var("ADMIN_SECRET").ok().filter(|s| !s.is_empty());
        Ok(Self { jwt_secret, admin_secret })
    }
}
