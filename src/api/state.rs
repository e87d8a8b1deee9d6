//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::RwLock;
use tracing::warn;

use crate::config::AppConfig;
use crate::gateway::{AssistantService, GenerativeClient};
use crate::workspace::WorkspaceStore;

/// Application state shared across all handlers.
///
/// The workspace store is exclusively owned here; presentation layers get a
/// handle and dispatch its operations, never a copy of the collection.
#[derive(Clone)]
pub struct AppState {
    /// The in-memory workspace.
    pub workspace: Arc<RwLock<WorkspaceStore>>,
    /// The AI edit gateway.
    pub assistant: Arc<AssistantService>,
}

impl AppState {
    /// Build state from configuration.
    ///
    /// A missing API key is tolerated: the gateway is constructed without a
    /// client and fails closed per request.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let store = if config.workspace.seed_starter_file {
            WorkspaceStore::seeded()
        } else {
            WorkspaceStore::new()
        };
        let workspace = Arc::new(RwLock::new(store));

        let client = match &config.gateway.api_key {
            Some(key) if !key.trim().is_empty() => Some(
                GenerativeClient::new(
                    &config.gateway.base_url,
                    &config.gateway.model,
                    key.trim(),
                    config.gateway.generation.into(),
                    Duration::from_secs(config.gateway.timeout_secs),
                )
                .context("building generative client")?,
            ),
            _ => {
                warn!("no gateway API key configured, assistant will report a configuration error");
                None
            }
        };

        let assistant = Arc::new(AssistantService::new(client, workspace.clone()));

        Ok(Self {
            workspace,
            assistant,
        })
    }
}
