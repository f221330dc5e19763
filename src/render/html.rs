use std::fmt::Write as _;

use crate::diff::{DiffLine, DiffLineOrigin, FileDelta};

use super::display_map::{build_display_map, DisplayRow};
use super::OutputFormat;

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn write_names(out: &mut String, delta: &FileDelta) {
    let _ = write!(
        out,
        "<span class=\"rd-old-name\">{}</span> → <span class=\"rd-new-name\">{}</span>",
        escape_html(&delta.old_name),
        escape_html(&delta.new_name)
    );
}

fn write_status(out: &mut String, delta: &FileDelta) {
    let _ = write!(
        out,
        "<span class=\"rd-file-status rd-{}\">{}</span>",
        delta.status.css_class(),
        delta.status.label()
    );
}

fn write_stats(out: &mut String, delta: &FileDelta) {
    let _ = write!(
        out,
        "<span class=\"rd-file-stats\"><span class=\"rd-lines-added\">+{}</span>\
         <span class=\"rd-lines-deleted\">-{}</span></span>",
        delta.additions, delta.deletions
    );
}

/// Clickable list of every compared pair, linking to `#file-<index>`.
pub fn write_file_list(out: &mut String, deltas: &[FileDelta]) {
    let _ = writeln!(
        out,
        "<div class=\"rd-file-list\">\n<div class=\"rd-file-list-header\">Compared responses ({})</div>\n<ol class=\"rd-file-list-items\">",
        deltas.len()
    );
    for (index, delta) in deltas.iter().enumerate() {
        out.push_str("<li class=\"rd-file-list-line\">");
        write_status(out, delta);
        let _ = write!(out, "<a class=\"rd-file-name\" href=\"#file-{index}\">");
        write_names(out, delta);
        out.push_str("</a>");
        write_stats(out, delta);
        out.push_str("</li>\n");
    }
    out.push_str("</ol>\n</div>\n");
}

pub fn write_file(out: &mut String, index: usize, delta: &FileDelta, format: OutputFormat) {
    let _ = writeln!(out, "<div id=\"file-{index}\" class=\"rd-file\">");
    out.push_str("<div class=\"rd-file-header\">");
    write_status(out, delta);
    out.push_str("<span class=\"rd-file-name\">");
    write_names(out, delta);
    out.push_str("</span>");
    write_stats(out, delta);
    out.push_str("</div>\n");

    let (table_class, columns) = match format {
        OutputFormat::SideBySide => ("rd-side-by-side", 4),
        OutputFormat::LineByLine => ("rd-line-by-line", 3),
    };
    let _ = writeln!(out, "<table class=\"rd-diff {table_class}\">\n<tbody>");

    if delta.hunks.is_empty() {
        let _ = writeln!(
            out,
            "<tr class=\"rd-info\"><td colspan=\"{columns}\">Response bodies are identical</td></tr>"
        );
    }

    for row in build_display_map(delta, format) {
        match row {
            DisplayRow::HunkHeader(hunk) => {
                let _ = writeln!(
                    out,
                    "<tr class=\"rd-info\"><td colspan=\"{columns}\">{}</td></tr>",
                    escape_html(&hunk.header)
                );
            }
            DisplayRow::Line { old, new } => match format {
                OutputFormat::SideBySide => write_split_row(out, old, new),
                OutputFormat::LineByLine => write_unified_row(out, old, new),
            },
        }
    }

    out.push_str("</tbody>\n</table>\n</div>\n");
}

fn origin_class(origin: DiffLineOrigin) -> &'static str {
    match origin {
        DiffLineOrigin::Context => "rd-ctx",
        DiffLineOrigin::Addition => "rd-add",
        DiffLineOrigin::Deletion => "rd-del",
    }
}

fn write_code_cell(out: &mut String, line: &DiffLine, with_prefix: bool) {
    let _ = write!(out, "<td class=\"rd-code {}\">", origin_class(line.origin));
    if with_prefix {
        let _ = write!(out, "<span class=\"rd-prefix\">{}</span>", line.origin.prefix());
    }
    out.push_str(&escape_html(&line.content));
    if line.missing_newline {
        out.push_str("<span class=\"rd-no-newline\" title=\"No newline at end of file\">⏎</span>");
    }
    out.push_str("</td>");
}

fn write_number_cell(out: &mut String, number: Option<u32>) {
    match number {
        Some(n) => {
            let _ = write!(out, "<td class=\"rd-num\">{n}</td>");
        }
        None => out.push_str("<td class=\"rd-num rd-empty\"></td>"),
    }
}

fn write_split_row(out: &mut String, old: Option<&DiffLine>, new: Option<&DiffLine>) {
    out.push_str("<tr>");
    for (line, lineno) in [
        (old, old.and_then(|l| l.old_lineno)),
        (new, new.and_then(|l| l.new_lineno)),
    ] {
        write_number_cell(out, lineno);
        match line {
            Some(line) => write_code_cell(out, line, false),
            None => out.push_str("<td class=\"rd-code rd-empty\"></td>"),
        }
    }
    out.push_str("</tr>\n");
}

fn write_unified_row(out: &mut String, old: Option<&DiffLine>, new: Option<&DiffLine>) {
    let Some(line) = old.or(new) else {
        return;
    };
    out.push_str("<tr>");
    write_number_cell(out, line.old_lineno);
    write_number_cell(out, line.new_lineno);
    write_code_cell(out, line, true);
    out.push_str("</tr>\n");
}
