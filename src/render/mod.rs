pub mod display_map;
pub mod html;

use serde::Deserialize;

use crate::diff::{DiffEngine, FileDelta};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    SideBySide,
    LineByLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    pub draw_file_list: bool,
    pub output_format: OutputFormat,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            draw_file_list: true,
            output_format: OutputFormat::SideBySide,
        }
    }
}

/// Turns unified diff text into an HTML fragment.
#[derive(Debug, Clone, Default)]
pub struct DiffRenderer {
    config: RenderConfig,
}

impl DiffRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn render_html(&self, diff_text: &str) -> String {
        let deltas = DiffEngine::parse_unified(diff_text);
        self.render_deltas(&deltas)
    }

    pub fn render_deltas(&self, deltas: &[FileDelta]) -> String {
        let mut out = String::new();
        if self.config.draw_file_list {
            html::write_file_list(&mut out, deltas);
        }
        out.push_str("<div class=\"rd-wrapper\">\n");
        for (index, delta) in deltas.iter().enumerate() {
            html::write_file(&mut out, index, delta, self.config.output_format);
        }
        out.push_str("</div>\n");
        out
    }
}
