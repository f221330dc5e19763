mod cli;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;

use response_diff::config::{self, RdiffConfig};
use response_diff::host::local::{
    FileExport, FixedAnswers, HtmlFileWindow, RecordedResponses, StdinPrompt,
};
use response_diff::host::{ExportCapability, ExportOptions, Host, PromptCapability};
use response_diff::logging::init_logging;
use response_diff::render::OutputFormat;
use response_diff::resource::{parse_export, workspaces, ResourceNode};
use response_diff::theme::Theme;
use response_diff::workflow::{diff_exported_folders, diff_selected_requests};

use crate::cli::Cli;

/// Merge CLI flags with config-file settings (CLI wins).
fn apply_cli_overrides(config: &mut RdiffConfig, cli: &Cli) {
    if let Some(ref theme_name) = cli.theme {
        config.theme = Theme::from_name(theme_name);
    }
    if let Some(context_lines) = cli.context_lines {
        config.context_lines = context_lines;
    }
    if cli.line_by_line {
        config.render.output_format = OutputFormat::LineByLine;
    }
    if cli.no_file_list {
        config.render.draw_file_list = false;
    }
}

/// The two requests named on the command line, which must share a folder.
fn find_selected_requests(
    resources: &[ResourceNode],
    ids: &[String],
) -> Result<Vec<ResourceNode>> {
    let requests = ids
        .iter()
        .map(|id| {
            resources
                .iter()
                .find(|r| r.id == *id && r.is_request())
                .cloned()
                .ok_or_else(|| anyhow!("no request with id {id} in the export"))
        })
        .collect::<Result<Vec<_>>>()?;

    if let [first, second] = requests.as_slice() {
        let group = first
            .parent_id
            .as_deref()
            .and_then(|parent| resources.iter().find(|r| r.id == parent))
            .filter(|parent| parent.is_folder());
        let Some(group) = group else {
            bail!("request {} is not inside a request group", first.id);
        };
        if !second.is_child_of(&group.id) {
            bail!(
                "requests {} and {} are not in the same request group",
                first.id,
                second.id
            );
        }
    }
    Ok(requests)
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = config::load_config();
    apply_cli_overrides(&mut config, &cli);

    let export = FileExport::new(&cli.export);
    let network = RecordedResponses::new(&cli.responses);
    let window = match cli.out {
        Some(ref path) => HtmlFileWindow::new(path),
        None => HtmlFileWindow::timestamped(),
    };
    let prompt: Box<dyn PromptCapability> = if cli.first.is_some() || cli.second.is_some() {
        Box::new(FixedAnswers::new(vec![cli.first.clone(), cli.second.clone()]))
    } else {
        Box::new(StdinPrompt::new())
    };

    let snapshot = export
        .export(&ExportOptions::json(cli.workspace.as_deref().unwrap_or_default()))
        .await?;
    let resources = parse_export(&snapshot).context("Invalid workspace export")?;

    let host = Host {
        export: &export,
        prompt: prompt.as_ref(),
        network: &network,
        window: &window,
    };

    let result = match cli.requests {
        Some(ref ids) => {
            let requests = find_selected_requests(&resources, ids)?;
            diff_selected_requests(&host, &requests, &config).await
        }
        None => {
            let workspace_id = match cli.workspace {
                Some(ref id) => id.clone(),
                None => workspaces(&resources)
                    .next()
                    .map(|w| w.id.clone())
                    .ok_or_else(|| anyhow!("the export contains no workspace"))?,
            };
            diff_exported_folders(&host, &resources, &workspace_id, &config).await
        }
    };

    match result {
        Ok(report) => {
            eprintln!(
                "rdiff: compared {} pair(s), report written to {}",
                report.documents.len(),
                window.path().display()
            );
            Ok(())
        }
        Err(e) if e.is_cancellation() => Ok(()),
        Err(e) => {
            eprintln!("rdiff: {:#}", anyhow::Error::new(e));
            std::process::exit(1);
        }
    }
}
