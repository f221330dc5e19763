#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Added,
    Deleted,
    Modified,
    Unchanged,
}

impl FileStatus {
    pub fn label(&self) -> &'static str {
        match self {
            FileStatus::Added => "A",
            FileStatus::Deleted => "D",
            FileStatus::Modified => "M",
            FileStatus::Unchanged => "=",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            FileStatus::Added => "added",
            FileStatus::Deleted => "deleted",
            FileStatus::Modified => "modified",
            FileStatus::Unchanged => "unchanged",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffLineOrigin {
    Context,
    Addition,
    Deletion,
}

impl DiffLineOrigin {
    pub fn prefix(&self) -> char {
        match self {
            DiffLineOrigin::Context => ' ',
            DiffLineOrigin::Addition => '+',
            DiffLineOrigin::Deletion => '-',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub origin: DiffLineOrigin,
    pub old_lineno: Option<u32>,
    pub new_lineno: Option<u32>,
    pub content: String,
    /// Followed by `\ No newline at end of file` in the diff text.
    pub missing_newline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    pub header: String,
    pub old_start: u32,
    pub old_lines: u32,
    pub new_start: u32,
    pub new_lines: u32,
    pub lines: Vec<DiffLine>,
}

/// One file (one compared pair) of a unified diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDelta {
    pub old_name: String,
    pub new_name: String,
    pub status: FileStatus,
    pub hunks: Vec<Hunk>,
    pub additions: usize,
    pub deletions: usize,
}

impl FileDelta {
    pub fn new(old_name: &str, new_name: &str) -> Self {
        Self {
            old_name: old_name.to_string(),
            new_name: new_name.to_string(),
            status: FileStatus::Unchanged,
            hunks: Vec::new(),
            additions: 0,
            deletions: 0,
        }
    }

    pub fn push_hunk(&mut self, hunk: Hunk) {
        for line in &hunk.lines {
            match line.origin {
                DiffLineOrigin::Addition => self.additions += 1,
                DiffLineOrigin::Deletion => self.deletions += 1,
                DiffLineOrigin::Context => {}
            }
        }
        self.hunks.push(hunk);
        self.status = if self.hunks.iter().all(|h| h.old_lines == 0) {
            FileStatus::Added
        } else if self.hunks.iter().all(|h| h.new_lines == 0) {
            FileStatus::Deleted
        } else {
            FileStatus::Modified
        };
    }
}

/// Unified diff of one compared pair, tagged with the two source names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffDocument {
    pub old_name: String,
    pub new_name: String,
    pub text: String,
}

impl DiffDocument {
    /// True when the document carries no hunks.
    pub fn is_identical(&self) -> bool {
        !self.text.lines().any(|l| l.starts_with("@@ "))
    }
}

/// Join documents in the given order into one composite diff text.
pub fn concat(documents: &[DiffDocument]) -> String {
    documents.iter().map(|d| d.text.as_str()).collect()
}
