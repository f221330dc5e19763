use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "rdiff",
    version,
    about = "Diff the response bodies of two folders of saved API requests"
)]
pub struct Cli {
    /// Workspace export (JSON) holding the folders and requests
    #[arg(short = 'e', long)]
    pub export: PathBuf,

    /// Directory of recorded response bodies, one file per request id
    #[arg(short = 'r', long)]
    pub responses: PathBuf,

    /// Workspace id (defaults to the first workspace in the export)
    #[arg(short = 'w', long)]
    pub workspace: Option<String>,

    /// First folder name, answered instead of prompting
    #[arg(long)]
    pub first: Option<String>,

    /// Second folder name, answered instead of prompting
    #[arg(long)]
    pub second: Option<String>,

    /// Diff exactly these two requests instead of two folders
    #[arg(
        long,
        num_args = 2,
        value_names = ["FIRST_ID", "SECOND_ID"],
        conflicts_with_all = ["first", "second"]
    )]
    pub requests: Option<Vec<String>>,

    /// Report file (defaults to response-diff-<timestamp>.html)
    #[arg(short = 'o', long)]
    pub out: Option<PathBuf>,

    /// Context lines around each change
    #[arg(short = 'U', long = "context")]
    pub context_lines: Option<usize>,

    /// Render one column per file instead of side by side
    #[arg(long)]
    pub line_by_line: bool,

    /// Leave out the list of compared responses
    #[arg(long)]
    pub no_file_list: bool,

    /// Report color theme
    #[arg(long)]
    pub theme: Option<String>,

    /// Debug logging for this crate
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_requests_take_two_ids() {
        let cli = Cli::try_parse_from([
            "rdiff", "-e", "export.json", "-r", "bodies", "--requests", "req_1", "req_2",
        ])
        .unwrap();
        assert_eq!(
            cli.requests,
            Some(vec!["req_1".to_string(), "req_2".to_string()])
        );

        assert!(Cli::try_parse_from([
            "rdiff", "-e", "export.json", "-r", "bodies", "--requests", "req_1",
        ])
        .is_err());
    }

    #[test]
    fn test_requests_conflict_with_folder_names() {
        assert!(Cli::try_parse_from([
            "rdiff", "-e", "x.json", "-r", "b", "--requests", "a", "b", "--first", "V1",
        ])
        .is_err());
    }
}
