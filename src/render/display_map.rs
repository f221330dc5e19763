use crate::diff::{DiffLine, DiffLineOrigin, FileDelta, Hunk};

use super::OutputFormat;

/// What a single rendered row of a file shows.
#[derive(Debug, Clone, Copy)]
pub enum DisplayRow<'a> {
    HunkHeader(&'a Hunk),
    /// Old side and new side. Context lines appear on both; a change row may
    /// have only one side.
    Line {
        old: Option<&'a DiffLine>,
        new: Option<&'a DiffLine>,
    },
}

/// Build rows for the side-by-side view: each run of deletions is laid next
/// to the run of additions that follows it.
pub fn build_split_display_map(delta: &FileDelta) -> Vec<DisplayRow<'_>> {
    let mut rows = Vec::new();

    for hunk in &delta.hunks {
        rows.push(DisplayRow::HunkHeader(hunk));

        let lines = &hunk.lines;
        let mut i = 0;
        while i < lines.len() {
            match lines[i].origin {
                DiffLineOrigin::Context => {
                    rows.push(DisplayRow::Line {
                        old: Some(&lines[i]),
                        new: Some(&lines[i]),
                    });
                    i += 1;
                }
                DiffLineOrigin::Deletion => {
                    // Collect consecutive deletions
                    let del_start = i;
                    while i < lines.len() && lines[i].origin == DiffLineOrigin::Deletion {
                        i += 1;
                    }
                    // Collect consecutive additions
                    let add_start = i;
                    while i < lines.len() && lines[i].origin == DiffLineOrigin::Addition {
                        i += 1;
                    }

                    let dels = &lines[del_start..add_start];
                    let adds = &lines[add_start..i];
                    for j in 0..dels.len().max(adds.len()) {
                        rows.push(DisplayRow::Line {
                            old: dels.get(j),
                            new: adds.get(j),
                        });
                    }
                }
                DiffLineOrigin::Addition => {
                    rows.push(DisplayRow::Line {
                        old: None,
                        new: Some(&lines[i]),
                    });
                    i += 1;
                }
            }
        }
    }

    rows
}

/// Build rows for the line-by-line view: one row per diff line, in diff order.
pub fn build_unified_display_map(delta: &FileDelta) -> Vec<DisplayRow<'_>> {
    let mut rows = Vec::new();

    for hunk in &delta.hunks {
        rows.push(DisplayRow::HunkHeader(hunk));
        for line in &hunk.lines {
            let (old, new) = match line.origin {
                DiffLineOrigin::Context => (Some(line), Some(line)),
                DiffLineOrigin::Deletion => (Some(line), None),
                DiffLineOrigin::Addition => (None, Some(line)),
            };
            rows.push(DisplayRow::Line { old, new });
        }
    }

    rows
}

pub fn build_display_map(delta: &FileDelta, format: OutputFormat) -> Vec<DisplayRow<'_>> {
    match format {
        OutputFormat::SideBySide => build_split_display_map(delta),
        OutputFormat::LineByLine => build_unified_display_map(delta),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::DiffEngine;

    fn delta(text: &str) -> FileDelta {
        DiffEngine::parse_unified(text).remove(0)
    }

    /// Contents of each row as `(old, new)`, `None` for headers.
    fn contents<'a>(rows: &[DisplayRow<'a>]) -> Vec<Option<(Option<&'a str>, Option<&'a str>)>> {
        rows.iter()
            .map(|row| match row {
                DisplayRow::HunkHeader(_) => None,
                DisplayRow::Line { old, new } => Some((
                    old.map(|l| l.content.as_str()),
                    new.map(|l| l.content.as_str()),
                )),
            })
            .collect()
    }

    const TEXT: &str = "\
--- a
+++ b
@@ -1,4 +1,4 @@
 keep
-one
-two
+ONE
 tail
+extra
";

    #[test]
    fn test_split_pairs_deletions_with_additions() {
        let delta = delta(TEXT);
        let rows = build_split_display_map(&delta);
        assert_eq!(
            contents(&rows),
            vec![
                None,
                Some((Some("keep"), Some("keep"))),
                Some((Some("one"), Some("ONE"))),
                Some((Some("two"), None)),
                Some((Some("tail"), Some("tail"))),
                Some((None, Some("extra"))),
            ]
        );
    }

    #[test]
    fn test_unified_keeps_diff_order() {
        let delta = delta(TEXT);
        let rows = build_display_map(&delta, OutputFormat::LineByLine);
        assert_eq!(
            contents(&rows),
            vec![
                None,
                Some((Some("keep"), Some("keep"))),
                Some((Some("one"), None)),
                Some((Some("two"), None)),
                Some((None, Some("ONE"))),
                Some((Some("tail"), Some("tail"))),
                Some((None, Some("extra"))),
            ]
        );
    }

    #[test]
    fn test_no_hunks_no_rows() {
        let delta = delta("--- a\n+++ b\n");
        assert!(build_split_display_map(&delta).is_empty());
    }
}
