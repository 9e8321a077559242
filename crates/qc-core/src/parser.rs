//! Command text parsing
//!
//! Splits the raw `/quickchat` argument into a chat title and the list of
//! usernames to invite. Supported shapes:
//!
//! ```text
//! Project hub
//! Project hub | @user1 @user2
//! Project hub
//! @user1, @user2
//! "Project hub" @user1 @user2
//! Project hub @user1 @user2
//! ```

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Title/invitee separators, tried in this order
const SEPARATORS: [char; 3] = ['|', '\n', '\r'];

/// Characters accepted around a quoted title
const QUOTES: [char; 2] = ['"', '\''];

/// Result of parsing one command invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCommand {
    /// Chat title, trimmed and never empty
    pub title: String,

    /// Usernames without the leading `@`, in first-seen order
    pub invitees: Vec<String>,
}

impl ParsedCommand {
    pub fn has_invitees(&self) -> bool {
        !self.invitees.is_empty()
    }

    /// Non-fatal observations about the parsed command
    pub fn notice(&self) -> Option<ParseNotice> {
        if self.has_invitees() {
            None
        } else {
            Some(ParseNotice::NoInvitees)
        }
    }
}

/// Informational signal attached to a successful parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseNotice {
    /// The chat will be created without inviting anyone
    NoInvitees,
}

impl fmt::Display for ParseNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoInvitees => write!(f, "no invitees given, creating an empty chat"),
        }
    }
}

/// Parse the raw command argument into a title and invitee list
///
/// Fails with [`Error::EmptyTitle`] when no title can be found.
pub fn parse_command(raw: &str) -> Result<ParsedCommand> {
    let (title, invitees) = split_title(raw);
    let title = title.trim();

    if title.is_empty() {
        return Err(Error::EmptyTitle);
    }

    Ok(ParsedCommand {
        title: title.to_string(),
        invitees: normalize_invitees(invitees),
    })
}

/// Split an invitee list on commas and whitespace
///
/// Leading `@` is stripped, empty tokens are dropped and duplicates are
/// removed case-insensitively, keeping the first spelling seen.
pub fn normalize_invitees(blob: &str) -> Vec<String> {
    let mut seen = HashSet::new();

    blob.split(|c: char| c == ',' || c.is_whitespace())
        .map(|token| token.trim_start_matches('@'))
        .filter(|token| !token.is_empty())
        .filter(|token| seen.insert(token.to_lowercase()))
        .map(str::to_string)
        .collect()
}

fn split_title(raw: &str) -> (&str, &str) {
    for separator in SEPARATORS {
        if let Some(parts) = raw.split_once(separator) {
            return parts;
        }
    }

    let trimmed = raw.trim();
    split_quoted(trimmed).unwrap_or_else(|| split_trailing_mentions(trimmed))
}

/// `"Project hub" @a @b` -> (`Project hub`, ` @a @b`)
fn split_quoted(s: &str) -> Option<(&str, &str)> {
    let quote = s.chars().next().filter(|c| QUOTES.contains(c))?;
    let body = &s[quote.len_utf8()..];
    let end = body.find(quote)?;

    Some((&body[..end], &body[end + quote.len_utf8()..]))
}

/// `Project hub @a @b` -> (`Project hub `, `@a @b`)
fn split_trailing_mentions(s: &str) -> (&str, &str) {
    let mut cut = s.len();
    let mut head = s.trim_end();

    while let Some(token) = head.split_whitespace().next_back() {
        if !token.starts_with('@') {
            break;
        }
        cut = head.len() - token.len();
        head = s[..cut].trim_end();
    }

    (&s[..cut], &s[cut..])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> ParsedCommand {
        parse_command(raw).unwrap()
    }

    #[test]
    fn test_title_only() {
        let parsed = parse("Project hub");
        assert_eq!(parsed.title, "Project hub");
        assert!(parsed.invitees.is_empty());
        assert_eq!(parsed.notice(), Some(ParseNotice::NoInvitees));
    }

    #[test]
    fn test_pipe_separator() {
        let parsed = parse("Project hub | @user1 @user2");
        assert_eq!(parsed.title, "Project hub");
        assert_eq!(parsed.invitees, vec!["user1", "user2"]);
        assert_eq!(parsed.notice(), None);
    }

    #[test]
    fn test_pipe_title_is_trimmed_left_side() {
        for (raw, title) in [
            ("  Team  |a", "Team"),
            ("Design review|bob", "Design review"),
            ("x | ", "x"),
            ("Q3 planning   |  @alice,@bob", "Q3 planning"),
            ("'Quoted' | @alice", "'Quoted'"),
        ] {
            let parsed = parse(raw);
            assert_eq!(parsed.title, title, "input: {raw:?}");
            let right = raw.split_once('|').unwrap().1;
            assert_eq!(parsed.invitees, normalize_invitees(right), "input: {raw:?}");
        }
    }

    #[test]
    fn test_only_first_pipe_splits() {
        let parsed = parse("Team | alice | bob");
        assert_eq!(parsed.title, "Team");
        assert_eq!(parsed.invitees, vec!["alice", "|", "bob"]);
    }

    #[test]
    fn test_newline_separator() {
        let parsed = parse("Project hub\n@user1, @user2\n@user3");
        assert_eq!(parsed.title, "Project hub");
        assert_eq!(parsed.invitees, vec!["user1", "user2", "user3"]);
    }

    #[test]
    fn test_crlf_separator() {
        let parsed = parse("Project hub\r\n@user1");
        assert_eq!(parsed.title, "Project hub");
        assert_eq!(parsed.invitees, vec!["user1"]);
    }

    #[test]
    fn test_bare_carriage_return_separator() {
        let parsed = parse("Project hub\r@user1 @user2");
        assert_eq!(parsed.title, "Project hub");
        assert_eq!(parsed.invitees, vec!["user1", "user2"]);
    }

    #[test]
    fn test_pipe_takes_precedence_over_newline() {
        let parsed = parse("Line one\nline two | @user1");
        assert_eq!(parsed.title, "Line one\nline two");
        assert_eq!(parsed.invitees, vec!["user1"]);
    }

    #[test]
    fn test_quoted_title() {
        let parsed = parse("\"Project hub\" @user1 @user2");
        assert_eq!(parsed.title, "Project hub");
        assert_eq!(parsed.invitees, vec!["user1", "user2"]);

        let parsed = parse("'Project hub' user1, user2");
        assert_eq!(parsed.title, "Project hub");
        assert_eq!(parsed.invitees, vec!["user1", "user2"]);
    }

    #[test]
    fn test_separator_wins_over_quotes() {
        let parsed = parse("\"Project | hub\" @user1");
        assert_eq!(parsed.title, "\"Project");
        assert_eq!(parsed.invitees, vec!["hub\"", "user1"]);

        let raw = "\"Project hub\" | @user1";
        let parsed = parse(raw);
        assert_eq!(parsed.title, raw.split_once('|').unwrap().0.trim());
        assert_eq!(parsed.title, "\"Project hub\"");
        assert_eq!(parsed.invitees, vec!["user1"]);
    }

    #[test]
    fn test_unterminated_quote_is_plain_title() {
        let parsed = parse("\"Project hub");
        assert_eq!(parsed.title, "\"Project hub");
        assert!(parsed.invitees.is_empty());
    }

    #[test]
    fn test_trailing_mentions() {
        let parsed = parse("Project hub @user1 @user2");
        assert_eq!(parsed.title, "Project hub");
        assert_eq!(parsed.invitees, vec!["user1", "user2"]);
    }

    #[test]
    fn test_mention_inside_title_is_kept() {
        let parsed = parse("Chat with @bob about releases");
        assert_eq!(parsed.title, "Chat with @bob about releases");
        assert!(parsed.invitees.is_empty());

        let parsed = parse("Chat with @bob about releases @carol");
        assert_eq!(parsed.title, "Chat with @bob about releases");
        assert_eq!(parsed.invitees, vec!["carol"]);
    }

    #[test]
    fn test_duplicates_removed() {
        let parsed = parse("T | @a @a @b");
        assert_eq!(parsed.invitees, vec!["a", "b"]);
    }

    #[test]
    fn test_duplicates_are_case_insensitive() {
        let parsed = parse("T | @Alice alice @ALICE bob");
        assert_eq!(parsed.invitees, vec!["Alice", "bob"]);
    }

    #[test]
    fn test_comma_and_space_are_interchangeable() {
        assert_eq!(parse("T | a,b").invitees, parse("T | a b").invitees);
        assert_eq!(parse("T | a, ,b,,").invitees, vec!["a", "b"]);
    }

    #[test]
    fn test_bare_at_signs_dropped() {
        assert_eq!(parse("T | @ @@ a").invitees, vec!["a"]);
    }

    #[test]
    fn test_empty_title() {
        for raw in ["", "   ", "| @a", "\n@a", "@a @b", "\"\" @a", "''"] {
            assert!(
                matches!(parse_command(raw), Err(Error::EmptyTitle)),
                "input: {raw:?}"
            );
        }
    }

    #[test]
    fn test_normalize_invitees() {
        assert_eq!(
            normalize_invitees(" @one,two\n\t@three  one "),
            vec!["one", "two", "three"]
        );
        assert!(normalize_invitees("").is_empty());
        assert!(normalize_invitees(" , ,\n").is_empty());
    }

    #[test]
    fn test_parsed_command_serializes() {
        let parsed = parse("Project hub | @user1");
        let json = serde_json::to_value(&parsed).unwrap();
        assert_eq!(json["title"], "Project hub");
        assert_eq!(json["invitees"][0], "user1");
    }
}
