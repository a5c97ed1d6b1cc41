//! API token lookup
//!
//! The harvester authenticates with a bearer token. In CI the token comes
//! from an environment variable; tests inject one directly.

use async_trait::async_trait;

/// Default environment variable holding the GitHub token
pub const DEFAULT_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Trait for token providers
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Get the API token, or `None` if no token is configured
    async fn token(&self) -> anyhow::Result<Option<String>>;
}

/// Reads the token from an environment variable
#[derive(Debug, Clone)]
pub struct EnvTokenProvider {
    var: String,
}

impl EnvTokenProvider {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    /// Name of the variable consulted
    pub fn var(&self) -> &str {
        &self.var
    }
}

impl Default for EnvTokenProvider {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_ENV)
    }
}

#[async_trait]
impl TokenProvider for EnvTokenProvider {
    async fn token(&self) -> anyhow::Result<Option<String>> {
        match std::env::var(&self.var) {
            Ok(value) if !value.trim().is_empty() => Ok(Some(value.trim().to_string())),
            Ok(_) | Err(std::env::VarError::NotPresent) => Ok(None),
            Err(e) => Err(anyhow::anyhow!("Invalid value in {}: {}", self.var, e)),
        }
    }
}

/// Fixed token, for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct StaticTokenProvider {
    token: Option<String>,
}

impl StaticTokenProvider {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self { token: Some(token.into()) }
    }

    pub fn without_token() -> Self {
        Self { token: None }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn token(&self) -> anyhow::Result<Option<String>> {
        Ok(self.token.clone())
    }
}
