//! File-backed capabilities so the pipeline can run outside the host app.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

use super::{
    ExportCapability, ExportOptions, NetworkCapability, PromptCapability, PromptOptions,
    SentResponse, WindowCapability,
};
use crate::report::DATA_URI_PREFIX;
use crate::resource::ResourceNode;

/// Reads a previously exported workspace from disk.
pub struct FileExport {
    path: PathBuf,
}

impl FileExport {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

#[async_trait]
impl ExportCapability for FileExport {
    async fn export(&self, options: &ExportOptions) -> Result<String> {
        if options.format != "json" {
            bail!("unsupported export format: {}", options.format);
        }
        tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read export {}", self.path.display()))
    }
}

/// Asks on stderr, answers from stdin. Empty input takes the default, EOF cancels.
pub struct StdinPrompt {
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl StdinPrompt {
    pub fn new() -> Self {
        Self {
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }
}

impl Default for StdinPrompt {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PromptCapability for StdinPrompt {
    async fn prompt(&self, title: &str, options: &PromptOptions) -> Result<Option<String>> {
        let mut stderr = tokio::io::stderr();
        let question = format!(
            "{title}\n{} [{}] ({}): ",
            options.label, options.default_value, options.submit_name
        );
        stderr.write_all(question.as_bytes()).await?;
        stderr.flush().await?;

        let mut lines = self.lines.lock().await;
        match lines.next_line().await? {
            Some(line) if line.trim().is_empty() => Ok(Some(options.default_value.clone())),
            Some(line) => Ok(Some(line.trim().to_string())),
            None => Ok(None),
        }
    }
}

/// Answers prompts from preset values, in order. `None` takes the prompt's
/// default; running out of answers cancels.
pub struct FixedAnswers {
    answers: Mutex<VecDeque<Option<String>>>,
}

impl FixedAnswers {
    pub fn new(answers: Vec<Option<String>>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
        }
    }
}

#[async_trait]
impl PromptCapability for FixedAnswers {
    async fn prompt(&self, title: &str, options: &PromptOptions) -> Result<Option<String>> {
        let next = self.answers.lock().await.pop_front();
        let answer = next.map(|a| a.unwrap_or_else(|| options.default_value.clone()));
        tracing::debug!(title, answer = ?answer, "answered prompt");
        Ok(answer)
    }
}

/// Serves response bodies recorded on disk as `<dir>/<request id>.body` or
/// `<dir>/<request id>`.
pub struct RecordedResponses {
    dir: PathBuf,
}

impl RecordedResponses {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }
}

#[async_trait]
impl NetworkCapability for RecordedResponses {
    async fn send_request(&self, request: &ResourceNode) -> Result<SentResponse> {
        for candidate in [
            self.dir.join(format!("{}.body", request.id)),
            self.dir.join(&request.id),
        ] {
            if tokio::fs::try_exists(&candidate).await.unwrap_or(false) {
                return Ok(SentResponse {
                    body_path: candidate,
                });
            }
        }
        bail!(
            "no recorded response for {} ({}) in {}",
            request.name,
            request.id,
            self.dir.display()
        )
    }
}

/// Writes the report carried by a `data:text/html` URI to an HTML file.
pub struct HtmlFileWindow {
    path: PathBuf,
}

impl HtmlFileWindow {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// `response-diff-<local timestamp>.html` in the current directory.
    pub fn timestamped() -> Self {
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        Self {
            path: PathBuf::from(format!("response-diff-{stamp}.html")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl WindowCapability for HtmlFileWindow {
    async fn open(&self, content_uri: &str) -> Result<()> {
        let Some(encoded) = content_uri.strip_prefix(DATA_URI_PREFIX) else {
            bail!("not an HTML data URI");
        };
        let html = urlencoding::decode(encoded).context("Report URI is not valid UTF-8")?;
        tokio::fs::write(&self.path, html.as_bytes())
            .await
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        tracing::info!(path = %self.path.display(), "wrote diff report");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::to_data_uri;
    use crate::resource::ResourceType;

    fn prompt_options(default: &str) -> PromptOptions {
        PromptOptions {
            label: "1. folder".to_string(),
            default_value: default.to_string(),
            cancelable: true,
            submit_name: "Next".to_string(),
        }
    }

    #[tokio::test]
    async fn test_file_export_reads_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");
        std::fs::write(&path, r#"{"resources": []}"#).unwrap();

        let export = FileExport::new(&path);
        let snapshot = export.export(&ExportOptions::json("wrk_1")).await.unwrap();
        assert_eq!(snapshot, r#"{"resources": []}"#);

        let mut yaml = ExportOptions::json("wrk_1");
        yaml.format = "yaml".to_string();
        assert!(export.export(&yaml).await.is_err());
    }

    #[tokio::test]
    async fn test_fixed_answers_default_then_cancel() {
        let prompt = FixedAnswers::new(vec![None, Some("V2".to_string())]);
        let options = prompt_options("V1");
        assert_eq!(
            prompt.prompt("first", &options).await.unwrap(),
            Some("V1".to_string())
        );
        assert_eq!(
            prompt.prompt("second", &options).await.unwrap(),
            Some("V2".to_string())
        );
        assert_eq!(prompt.prompt("third", &options).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_recorded_responses_prefers_body_suffix() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("req_1"), "plain").unwrap();
        std::fs::write(dir.path().join("req_1.body"), "suffixed").unwrap();
        std::fs::write(dir.path().join("req_2"), "plain").unwrap();

        let network = RecordedResponses::new(dir.path());
        let req_1 = ResourceNode::new("req_1", ResourceType::Request, Some("fld"), "A");
        let req_2 = ResourceNode::new("req_2", ResourceType::Request, Some("fld"), "B");
        let req_3 = ResourceNode::new("req_3", ResourceType::Request, Some("fld"), "C");

        assert_eq!(
            network.send_request(&req_1).await.unwrap().body_path,
            dir.path().join("req_1.body")
        );
        assert_eq!(
            network.send_request(&req_2).await.unwrap().body_path,
            dir.path().join("req_2")
        );
        assert!(network.send_request(&req_3).await.is_err());
    }

    #[tokio::test]
    async fn test_html_file_window_decodes_uri() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.html");
        let window = HtmlFileWindow::new(&path);

        let html = "<p>a & b, 100% \"done\"</p>";
        window.open(&to_data_uri(html)).await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), html);

        assert!(window.open("https://example.com").await.is_err());
    }
}
