//! API Authentication
//!
//! Users (projects and organizations), the environment they live in, and the
//! process-wide default user used when a client carries no user of its own.

use crate::error::{Error, Result};
use std::fmt;
use std::sync::{Arc, RwLock};

/// Environment variables consulted for the default environment
const ENVIRONMENT_VARS: &[&str] = &["STARKBANK_ENVIRONMENT", "STARK_ENVIRONMENT"];

/// API environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Production,
    #[default]
    Sandbox,
}

impl Environment {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Some(Self::Production),
            "sandbox" => Some(Self::Sandbox),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Sandbox => "sandbox",
        }
    }

    /// Base URL of the API for this environment
    pub fn base_url(&self) -> &'static str {
        match self {
            Self::Production => "https://api.starkbank.com/",
            Self::Sandbox => "https://sandbox.api.starkbank.com/",
        }
    }

    /// Read the environment from `STARKBANK_ENVIRONMENT`
    pub fn from_env() -> Option<Self> {
        for var in ENVIRONMENT_VARS {
            if let Ok(value) = std::env::var(var) {
                match Self::from_str(&value) {
                    Some(env) => return Some(env),
                    None => tracing::warn!("Invalid environment in {}", var),
                }
            }
        }
        None
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Produces `Access-Signature` values for request messages.
///
/// The message is `"{access_id}:{access_time}:{body}"`; the returned string is
/// sent verbatim in the header.
pub trait Signer: Send + Sync {
    fn sign(&self, message: &str) -> Result<String>;
}

/// Kind of credential a user authenticates with
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credential {
    Project {
        id: String,
    },
    Organization {
        id: String,
        workspace_id: Option<String>,
    },
}

/// An authenticated API identity
#[derive(Clone)]
pub struct User {
    pub environment: Environment,
    pub credential: Credential,
    signer: Arc<dyn Signer>,
}

impl User {
    /// Create a project user
    pub fn project(environment: Environment, id: &str, signer: Arc<dyn Signer>) -> Result<Self> {
        validate_id(id)?;
        Ok(Self {
            environment,
            credential: Credential::Project { id: id.to_string() },
            signer,
        })
    }

    /// Create an organization user, optionally scoped to a workspace
    pub fn organization(
        environment: Environment,
        id: &str,
        workspace_id: Option<&str>,
        signer: Arc<dyn Signer>,
    ) -> Result<Self> {
        validate_id(id)?;
        if let Some(workspace_id) = workspace_id {
            validate_id(workspace_id)?;
        }
        Ok(Self {
            environment,
            credential: Credential::Organization {
                id: id.to_string(),
                workspace_id: workspace_id.map(|s| s.to_string()),
            },
            signer,
        })
    }

    /// Copy of an organization user scoped to another workspace
    pub fn with_workspace(&self, workspace_id: &str) -> Result<Self> {
        match &self.credential {
            Credential::Organization { id, .. } => {
                Self::organization(self.environment, id, Some(workspace_id), self.signer.clone())
            }
            Credential::Project { .. } => Err(Error::Config(
                "only organization users can be scoped to a workspace".to_string(),
            )),
        }
    }

    /// Value of the `Access-Id` header
    pub fn access_id(&self) -> String {
        match &self.credential {
            Credential::Project { id } => format!("project/{}", id),
            Credential::Organization {
                id,
                workspace_id: Some(workspace_id),
            } => format!("organization/{}/workspace/{}", id, workspace_id),
            Credential::Organization {
                id,
                workspace_id: None,
            } => format!("organization/{}", id),
        }
    }

    pub fn sign(&self, message: &str) -> Result<String> {
        self.signer.sign(message)
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Security: never print signer state
        f.debug_struct("User")
            .field("environment", &self.environment)
            .field("credential", &self.credential)
            .finish_non_exhaustive()
    }
}

/// IDs are numeric strings
fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::Config(format!("invalid user id: {:?}", id)));
    }
    Ok(())
}

/// Process-wide default user
static DEFAULT_USER: RwLock<Option<User>> = RwLock::new(None);

/// Set the process-wide default user. The last call wins.
pub fn set_default_user(user: Option<User>) {
    let mut slot = DEFAULT_USER.write().unwrap_or_else(|e| e.into_inner());
    *slot = user;
}

/// Get the process-wide default user, if any
pub fn default_user() -> Option<User> {
    DEFAULT_USER
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .clone()
}

/// Resolve the user for a request: explicit user, then default, then error
pub fn resolve_user(user: Option<&User>) -> Result<User> {
    user.cloned().or_else(default_user).ok_or(Error::MissingUser)
}
