use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::errors::{AppError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub collector: CollectorConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path(".")
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Config::builder()
            .add_source(
                File::with_name(
                    path.as_ref()
                        .join("config/default")
                        .to_string_lossy()
                        .as_ref(),
                )
                .required(false),
            )
            .add_source(
                File::with_name(
                    path.as_ref()
                        .join("config/local")
                        .to_string_lossy()
                        .as_ref(),
                )
                .required(false),
            )
            .add_source(Environment::default().separator("__"))
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GithubConfig {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "GithubConfig::default_endpoint")]
    pub endpoint: String,
    #[serde(default = "GithubConfig::default_user_agent")]
    pub user_agent: String,
}

impl GithubConfig {
    fn default_endpoint() -> String {
        "https://api.github.com/graphql".to_string()
    }

    fn default_user_agent() -> String {
        "github-year-in-review".to_string()
    }

    /// Token from configuration, falling back to the conventional `GITHUB_TOKEN` variable.
    pub fn resolved_token(&self) -> Result<String> {
        self.token
            .clone()
            .or_else(|| std::env::var("GITHUB_TOKEN").ok())
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
            .ok_or(AppError::MissingToken)
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            token: None,
            endpoint: Self::default_endpoint(),
            user_agent: Self::default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectorConfig {
    #[serde(default = "CollectorConfig::default_max_concurrent_repos")]
    pub max_concurrent_repos: usize,
    #[serde(default = "CollectorConfig::default_org_limit")]
    pub org_limit: u32,
    #[serde(default = "CollectorConfig::default_org_repo_limit")]
    pub org_repo_limit: u32,
    #[serde(default = "CollectorConfig::default_commit_limit")]
    pub commit_limit: u32,
    #[serde(default = "CollectorConfig::default_top_repo_limit")]
    pub top_repo_limit: u32,
    #[serde(default = "CollectorConfig::default_language_repo_limit")]
    pub language_repo_limit: u32,
    #[serde(default = "CollectorConfig::default_languages_per_repo")]
    pub languages_per_repo: u32,
    #[serde(default = "CollectorConfig::default_item_limit")]
    pub item_limit: u32,
    #[serde(default = "CollectorConfig::default_active_repo_limit")]
    pub active_repo_limit: usize,
}

impl CollectorConfig {
    const fn default_max_concurrent_repos() -> usize {
        4
    }

    const fn default_org_limit() -> u32 {
        20
    }

    const fn default_org_repo_limit() -> u32 {
        50
    }

    const fn default_commit_limit() -> u32 {
        100
    }

    const fn default_top_repo_limit() -> u32 {
        10
    }

    const fn default_language_repo_limit() -> u32 {
        100
    }

    const fn default_languages_per_repo() -> u32 {
        10
    }

    const fn default_item_limit() -> u32 {
        100
    }

    const fn default_active_repo_limit() -> usize {
        10
    }
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            max_concurrent_repos: Self::default_max_concurrent_repos(),
            org_limit: Self::default_org_limit(),
            org_repo_limit: Self::default_org_repo_limit(),
            commit_limit: Self::default_commit_limit(),
            top_repo_limit: Self::default_top_repo_limit(),
            language_repo_limit: Self::default_language_repo_limit(),
            languages_per_repo: Self::default_languages_per_repo(),
            item_limit: Self::default_item_limit(),
            active_repo_limit: Self::default_active_repo_limit(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_string()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
        }
    }
}
