//! Issue summary formatting.

use std::io::{self, Write};

use issue_courier::{Issue, IssueState};

use super::CliError;

/// Writes a summary of the issue to stdout.
pub fn write_issue_summary(issue: &Issue) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    write_issue_summary_to(&mut stdout, issue)
}

/// Writes a summary of the issue to the given writer.
pub fn write_issue_summary_to<W: Write>(writer: &mut W, issue: &Issue) -> Result<(), CliError> {
    let number = issue
        .number
        .map_or_else(|| "?".to_owned(), |number| number.to_string());
    let state = issue.state.map_or("unknown", IssueState::as_str);
    let author = issue.author.as_deref().unwrap_or("unknown author");
    let url = issue.html_url.as_deref().unwrap_or("no HTML URL provided");

    writeln!(
        writer,
        "#{number} [{state}] {title}\nAuthor: {author}\nURL: {url}",
        title = issue.title
    )
    .map_err(|error| CliError::Io {
        message: error.to_string(),
    })
}
