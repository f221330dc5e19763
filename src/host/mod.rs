//! Facilities borrowed from the host application.
//!
//! The pipeline never reaches for host state on its own; every action takes a
//! [`Host`] that bundles one implementation of each capability.

pub mod local;

use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;

use crate::resource::ResourceNode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub include_private: bool,
    pub format: String,
    pub workspace_id: String,
}

impl ExportOptions {
    /// The export used for folder discovery: public data only, as JSON.
    pub fn json(workspace_id: &str) -> Self {
        Self {
            include_private: false,
            format: "json".to_string(),
            workspace_id: workspace_id.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptOptions {
    pub label: String,
    pub default_value: String,
    pub cancelable: bool,
    pub submit_name: String,
}

/// Where the host left the body of a sent request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentResponse {
    pub body_path: PathBuf,
}

#[async_trait]
pub trait ExportCapability: Send + Sync {
    /// Serialized workspace snapshot containing a `resources` array.
    async fn export(&self, options: &ExportOptions) -> Result<String>;
}

#[async_trait]
pub trait PromptCapability: Send + Sync {
    /// `Ok(None)` when the user dismissed the prompt.
    async fn prompt(&self, title: &str, options: &PromptOptions) -> Result<Option<String>>;
}

#[async_trait]
pub trait NetworkCapability: Send + Sync {
    async fn send_request(&self, request: &ResourceNode) -> Result<SentResponse>;
}

#[async_trait]
pub trait WindowCapability: Send + Sync {
    async fn open(&self, content_uri: &str) -> Result<()>;
}

pub struct Host<'a> {
    pub export: &'a dyn ExportCapability,
    pub prompt: &'a dyn PromptCapability,
    pub network: &'a dyn NetworkCapability,
    pub window: &'a dyn WindowCapability,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionScope {
    RequestGroup,
    Workspace,
}

/// Static metadata the host shows for a registered action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginAction {
    pub label: &'static str,
    pub icon: &'static str,
    pub scope: ActionScope,
}

pub const REQUEST_GROUP_ACTIONS: &[PluginAction] = &[PluginAction {
    label: "Diff Requests",
    icon: "fa-columns",
    scope: ActionScope::RequestGroup,
}];

pub const WORKSPACE_ACTIONS: &[PluginAction] = &[PluginAction {
    label: "Diff Requests",
    icon: "fa-columns",
    scope: ActionScope::Workspace,
}];
