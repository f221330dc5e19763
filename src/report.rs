//! Static page around the rendered diff, and the URI handed to the window.

use crate::theme::Theme;

pub const DATA_URI_PREFIX: &str = "data:text/html;charset=UTF-8,";

const TITLE: &str = "Response Diff";
const FOOTER: &str = "Generated by response-diff. Bodies are compared as text, line by line.";

/// Stylesheet for the classes emitted by the renderer.
pub fn stylesheet(theme: &Theme) -> String {
    format!(
        "body {{ margin: 0; padding: 16px; background: {surface}; color: {text}; \
font-family: -apple-system, 'Segoe UI', Helvetica, Arial, sans-serif; font-size: 13px; }}
a {{ color: {accent}; text-decoration: none; }}
a:hover {{ text-decoration: underline; }}
.rd-file-list {{ border: 1px solid {border}; border-radius: 4px; margin-bottom: 16px; }}
.rd-file-list-header {{ padding: 8px 12px; font-weight: 600; border-bottom: 1px solid {border}; }}
.rd-file-list-items {{ margin: 0; padding: 4px 12px 4px 32px; }}
.rd-file-list-line {{ padding: 2px 0; }}
.rd-file {{ border: 1px solid {border}; border-radius: 4px; margin-bottom: 16px; overflow-x: auto; }}
.rd-file-header {{ padding: 8px 12px; border-bottom: 1px solid {border}; background: {collapsed}; }}
.rd-file-status {{ display: inline-block; min-width: 1.5em; font-weight: 700; color: {secondary}; }}
.rd-old-name, .rd-new-name {{ font-family: monospace; }}
.rd-file-stats {{ margin-left: 12px; font-family: monospace; }}
.rd-lines-added {{ color: {success}; margin-right: 6px; }}
.rd-lines-deleted {{ color: {error}; }}
table.rd-diff {{ width: 100%; border-collapse: collapse; font-family: Menlo, Consolas, monospace; font-size: 12px; }}
.rd-info td {{ padding: 4px 8px; color: {hunk}; background: {collapsed}; }}
.rd-num {{ width: 1%; min-width: 3.5em; padding: 0 8px; text-align: right; color: {muted}; \
user-select: none; border-right: 1px solid {border}; }}
.rd-code {{ padding: 0 8px; white-space: pre-wrap; word-break: break-all; color: {context}; }}
.rd-side-by-side .rd-code {{ width: 49%; }}
.rd-add {{ background: {add_bg}; color: {add_fg}; }}
.rd-del {{ background: {del_bg}; color: {del_fg}; }}
.rd-empty {{ background: {collapsed}; }}
.rd-prefix {{ display: inline-block; width: 1.2em; user-select: none; }}
.rd-no-newline {{ margin-left: 4px; color: {muted}; }}
footer {{ margin-top: 24px; color: {muted}; font-size: 11px; }}
",
        surface = theme.surface,
        text = theme.text,
        accent = theme.accent,
        secondary = theme.secondary,
        border = theme.border,
        collapsed = theme.collapsed_bg,
        success = theme.success,
        error = theme.error,
        hunk = theme.diff_hunk_header_fg,
        muted = theme.text_muted,
        context = theme.diff_context_fg,
        add_bg = theme.diff_add_bg,
        add_fg = theme.diff_add_fg,
        del_bg = theme.diff_del_bg,
        del_fg = theme.diff_del_fg,
    )
}

/// Wrap a rendered fragment into a complete HTML document.
pub fn build_report(fragment: &str, theme: &Theme) -> String {
    format!(
        "<!DOCTYPE html>
<html lang=\"en\">
 <head>
  <meta charset=\"utf-8\">
  <title>{TITLE}</title>
  <style>
{css}  </style>
 </head>
 <body>
{fragment}  <footer>
    {FOOTER}
  </footer>
 </body>
</html>
",
        css = stylesheet(theme),
    )
}

pub fn to_data_uri(html: &str) -> String {
    format!("{DATA_URI_PREFIX}{}", urlencoding::encode(html))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_embeds_fragment_and_theme() {
        let theme = Theme::default();
        let html = build_report("<div class=\"rd-wrapper\"></div>\n", &theme);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Response Diff</title>"));
        assert!(html.contains("<div class=\"rd-wrapper\"></div>"));
        assert!(html.contains(&format!("background: {}", theme.surface)));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_themes_change_only_colors() {
        let light = stylesheet(&Theme::from_name("github-light"));
        let dark = stylesheet(&Theme::from_name("dracula"));
        assert_ne!(light, dark);
        assert_eq!(light.lines().count(), dark.lines().count());
    }

    #[test]
    fn test_data_uri_is_percent_encoded() {
        let uri = to_data_uri("<p>a b#</p>");
        assert_eq!(uri, "data:text/html;charset=UTF-8,%3Cp%3Ea%20b%23%3C%2Fp%3E");
    }
}
