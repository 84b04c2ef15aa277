pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("no GitHub token configured (set GITHUB__TOKEN or GITHUB_TOKEN)")]
    MissingToken,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
