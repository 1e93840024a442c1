//! Configuration Management
//!
//! Handles persistent configuration storage for the `starkbank` CLI.

use crate::api::{Client, ClientConfig, Environment, OpensslSigner, User};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

const ENV_PROJECT_ID: &str = "STARKBANK_PROJECT_ID";
const ENV_ORGANIZATION_ID: &str = "STARKBANK_ORGANIZATION_ID";
const ENV_WORKSPACE_ID: &str = "STARKBANK_WORKSPACE_ID";
const ENV_PRIVATE_KEY: &str = "STARKBANK_PRIVATE_KEY";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// "production" or "sandbox"
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub workspace_id: Option<String>,
    /// PEM private key used to sign requests
    #[serde(default)]
    pub private_key_path: Option<PathBuf>,
    /// "en-US" or "pt-BR"
    #[serde(default)]
    pub language: Option<String>,
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("starkbank").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed config {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };

        // Create parent directory
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }

    /// Overlay values that are set in `other` (CLI flags win over the file)
    pub fn merge(&mut self, other: Config) {
        if other.environment.is_some() {
            self.environment = other.environment;
        }
        if other.project_id.is_some() {
            self.project_id = other.project_id;
        }
        if other.organization_id.is_some() {
            self.organization_id = other.organization_id;
        }
        if other.workspace_id.is_some() {
            self.workspace_id = other.workspace_id;
        }
        if other.private_key_path.is_some() {
            self.private_key_path = other.private_key_path;
        }
        if other.language.is_some() {
            self.language = other.language;
        }
    }

    /// Get effective environment (CLI > config > STARKBANK_ENVIRONMENT > sandbox)
    pub fn effective_environment(&self) -> Result<Environment> {
        match &self.environment {
            Some(name) => Environment::from_str(name)
                .with_context(|| format!("Unknown environment {:?}", name)),
            None => Ok(Environment::from_env().unwrap_or_default()),
        }
    }

    pub fn effective_project_id(&self) -> Option<String> {
        self.project_id.clone().or_else(|| env_var(ENV_PROJECT_ID))
    }

    pub fn effective_organization_id(&self) -> Option<String> {
        self.organization_id
            .clone()
            .or_else(|| env_var(ENV_ORGANIZATION_ID))
    }

    pub fn effective_workspace_id(&self) -> Option<String> {
        self.workspace_id.clone().or_else(|| env_var(ENV_WORKSPACE_ID))
    }

    pub fn effective_private_key(&self) -> Option<PathBuf> {
        self.private_key_path
            .clone()
            .or_else(|| env_var(ENV_PRIVATE_KEY).map(PathBuf::from))
    }

    /// Build the signing user; a project id takes precedence over an organization
    pub fn build_user(&self) -> Result<User> {
        let environment = self.effective_environment()?;

        let Some(key_path) = self.effective_private_key() else {
            bail!("No private key configured. Use --private-key or {}", ENV_PRIVATE_KEY);
        };
        let signer = Arc::new(OpensslSigner::new(&key_path)?);

        if let Some(project_id) = self.effective_project_id() {
            return Ok(User::project(environment, &project_id, signer)?);
        }

        if let Some(organization_id) = self.effective_organization_id() {
            let workspace_id = self.effective_workspace_id();
            return Ok(User::organization(
                environment,
                &organization_id,
                workspace_id.as_deref(),
                signer,
            )?);
        }

        bail!(
            "No user configured. Use --project-id, --organization-id, {} or {}",
            ENV_PROJECT_ID,
            ENV_ORGANIZATION_ID
        )
    }

    /// Build an API client for the configured user
    pub fn build_client(&self) -> Result<Client> {
        let user = self.build_user()?;

        let mut client_config = ClientConfig::default();
        if let Some(language) = &self.language {
            client_config = client_config.with_language(language)?;
        }

        Client::with_config(Some(user), client_config).context("Failed to create API client")
    }
}
