//! Commit history entries parsed from `git log`.

use serde::Serialize;

/// `git log --format` string: hash, author date, subject, author, relative
/// committer date, separated by the ASCII unit separator so subjects may
/// contain any printable character.
pub const LOG_FORMAT: &str = "%h%x1f%ad%x1f%s%x1f%an%x1f%cr";

const SEP: char = '\u{1f}';

/// One commit in a project's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitEntry {
    pub hash: String,
    /// Author date, `YYYY-MM-DD`.
    pub date: String,
    pub subject: String,
    pub author: String,
    /// e.g. `"2 hours ago"`.
    pub relative: String,
}

/// Parse the output of `git log --format=LOG_FORMAT`. Malformed lines are
/// skipped.
pub fn parse_log(output: &str) -> Vec<CommitEntry> {
    output
        .lines()
        .filter_map(|line| {
            let mut parts = line.splitn(5, SEP);
            Some(CommitEntry {
                hash: parts.next()?.trim().to_string(),
                date: parts.next()?.to_string(),
                subject: parts.next()?.to_string(),
                author: parts.next()?.to_string(),
                relative: parts.next()?.trim_end().to_string(),
            })
        })
        .collect()
}

/// Shorten `text` to at most `max` characters, marking the cut with `…`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_entries_with_pipes_in_subject() {
        let out = "a1b2c3d\u{1f}2024-05-01\u{1f}Fix a|b parsing\u{1f}Ada\u{1f}2 days ago\n\
                   e4f5a6b\u{1f}2024-04-30\u{1f}Initial commit: demo\u{1f}Ada\u{1f}3 days ago\n";
        let entries = parse_log(out);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].subject, "Fix a|b parsing");
        assert_eq!(entries[0].author, "Ada");
        assert_eq!(entries[1].relative, "3 days ago");
    }

    #[test]
    fn skips_malformed_lines() {
        assert!(parse_log("garbage without separators\n").is_empty());
    }

    #[test]
    fn truncate_marks_the_cut() {
        assert_eq!(truncate("short", 44), "short");
        assert_eq!(truncate("abcdef", 3), "abc…");
        assert_eq!(truncate("日本語テキスト", 3), "日本語…");
    }
}
