//! The two "Diff Requests" actions, from host capabilities to an opened report.

use std::pin::pin;

use futures::stream::{self, StreamExt};

use crate::config::{PairErrorPolicy, RdiffConfig, UnmatchedPolicy};
use crate::diff::{concat, DiffDocument, DiffEngine};
use crate::error::{DiffError, Result};
use crate::execution::execute_pair;
use crate::host::{ExportOptions, Host, NetworkCapability, PromptCapability, PromptOptions};
use crate::pairing::{list_folders, require_two_folders, resolve_pairs, select_folders, RequestPair};
use crate::render::DiffRenderer;
use crate::report::{build_report, to_data_uri};
use crate::resource::{parse_export, ResourceNode};

/// What was shown to the user.
#[derive(Debug, Clone)]
pub struct Report {
    pub documents: Vec<DiffDocument>,
    /// All documents concatenated in pairing order.
    pub diff_text: String,
    pub html: String,
}

/// Request-group action: diff exactly two selected requests.
pub async fn diff_selected_requests(
    host: &Host<'_>,
    requests: &[ResourceNode],
    config: &RdiffConfig,
) -> Result<Report> {
    let [first, second] = requests else {
        return Err(DiffError::RequestCountMismatch {
            found: requests.len(),
        });
    };
    tracing::info!(first = %first.name, second = %second.name, "diffing selected requests");

    let pair = RequestPair::new(first.clone(), Some(second.clone()));
    let (old, new) = execute_pair(&pair, host.network).await?;
    let document = DiffEngine::diff_pair(&old, &new, config.context_lines);

    publish(host, vec![document], config).await
}

/// Workspace action: prompt for two folders and diff every same-named request.
pub async fn diff_workspace_folders(
    host: &Host<'_>,
    workspace_id: &str,
    config: &RdiffConfig,
) -> Result<Report> {
    let snapshot = host
        .export
        .export(&ExportOptions::json(workspace_id))
        .await
        .map_err(|e| DiffError::Export {
            message: format!("{e:#}"),
        })?;
    let resources = parse_export(&snapshot)?;

    diff_exported_folders(host, &resources, workspace_id, config).await
}

/// Workspace action over an export the caller already took and parsed.
pub async fn diff_exported_folders(
    host: &Host<'_>,
    resources: &[ResourceNode],
    workspace_id: &str,
    config: &RdiffConfig,
) -> Result<Report> {
    let folders = list_folders(resources, workspace_id);
    require_two_folders(&folders)?;

    let first_name = ask(
        host.prompt,
        "First Diff Folder? (1/2)",
        "1. folder",
        &folders[0].name,
        "Next",
    )
    .await?;
    let second_name = ask(
        host.prompt,
        "Second Diff Folder? (2/2)",
        "2. folder",
        &folders[1].name,
        "Done",
    )
    .await?;

    let selection = select_folders(&folders, &first_name, &second_name)?;
    tracing::info!(
        first = %selection.first.name,
        second = %selection.second.name,
        "diffing folders"
    );

    let pairs = resolve_pairs(resources, selection.first, selection.second);
    let pairs = apply_unmatched_policy(pairs, config.unmatched)?;
    let documents = run_pairs(&pairs, host.network, config).await?;
    if documents.is_empty() {
        return Err(DiffError::NothingToCompare);
    }

    publish(host, documents, config).await
}

async fn ask(
    prompt: &dyn PromptCapability,
    title: &str,
    label: &str,
    default_value: &str,
    submit_name: &str,
) -> Result<String> {
    let options = PromptOptions {
        label: label.to_string(),
        default_value: default_value.to_string(),
        cancelable: true,
        submit_name: submit_name.to_string(),
    };
    let answer = prompt
        .prompt(title, &options)
        .await
        .map_err(|e| DiffError::Prompt {
            message: format!("{e:#}"),
        })?;

    match answer {
        Some(name) => Ok(name),
        None => {
            tracing::info!(title, "prompt cancelled, aborting");
            Err(DiffError::PromptCancelled)
        }
    }
}

fn apply_unmatched_policy(
    pairs: Vec<RequestPair>,
    policy: UnmatchedPolicy,
) -> Result<Vec<RequestPair>> {
    let mut kept = Vec::with_capacity(pairs.len());
    for pair in pairs {
        if pair.is_resolved() {
            kept.push(pair);
            continue;
        }
        match policy {
            UnmatchedPolicy::Skip => {
                tracing::warn!(name = %pair.name(), "no counterpart in second folder, skipping");
            }
            UnmatchedPolicy::Abort => {
                return Err(DiffError::UnmatchedRequest {
                    name: pair.name().to_string(),
                });
            }
        }
    }
    Ok(kept)
}

/// Execute pairs concurrently and diff them in pairing order, whatever order
/// they complete in. Under [`PairErrorPolicy::Abort`] the first failure in
/// pairing order stops the run; pairs not yet started are never sent.
async fn run_pairs(
    pairs: &[RequestPair],
    network: &dyn NetworkCapability,
    config: &RdiffConfig,
) -> Result<Vec<DiffDocument>> {
    let outcomes = stream::iter(
        pairs
            .iter()
            .map(|pair| async move { (pair, execute_pair(pair, network).await) }),
    )
    .buffered(config.max_concurrent_pairs.max(1));
    let mut outcomes = pin!(outcomes);

    let mut documents = Vec::with_capacity(pairs.len());
    while let Some((pair, outcome)) = outcomes.next().await {
        match outcome {
            Ok((old, new)) => {
                documents.push(DiffEngine::diff_pair(&old, &new, config.context_lines));
            }
            Err(e) if config.on_pair_error == PairErrorPolicy::Skip => {
                tracing::warn!(name = %pair.name(), "skipping pair: {e}");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(documents)
}

async fn publish(
    host: &Host<'_>,
    documents: Vec<DiffDocument>,
    config: &RdiffConfig,
) -> Result<Report> {
    let diff_text = concat(&documents);
    let fragment = DiffRenderer::new(config.render).render_html(&diff_text);
    let html = build_report(&fragment, &config.theme);

    host.window
        .open(&to_data_uri(&html))
        .await
        .map_err(|e| DiffError::Window {
            message: format!("{e:#}"),
        })?;
    tracing::info!(pairs = documents.len(), "report opened");

    Ok(Report {
        documents,
        diff_text,
        html,
    })
}
