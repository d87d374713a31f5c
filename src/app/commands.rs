//! User slash-command parser.
//!
//! Parses `/command arg1 arg2 ...` input lines into typed [`ParsedCommand`]
//! values that the event handler can act on.

use crate::engine::pool::parse_number;

/// A parsed user command. Each variant corresponds to a `/command`.
#[derive(Debug, PartialEq)]
pub enum ParsedCommand {
    Add { value: String },
    AddMany { list: String },
    Range { bounds: Option<(i64, i64)> },
    Remove { value: i64 },
    Clear,
    Import { path: String },
    Template { dir: Option<String> },
    Draw,
    Auto { count: String },
    Next,
    Prev,
    Page { page: usize },
    Reset,
    SaveConfig,
    Help,
    Quit,
}

/// Command names offered by Tab completion.
pub const COMMANDS: &[&str] = &[
    "add", "addmany", "range", "remove", "clear", "import", "template", "draw", "auto", "next",
    "prev", "page", "reset", "saveconfig", "help", "quit",
];

/// One-line usage for each command, shown by `/help`.
pub const HELP: &[(&str, &str)] = &[
    ("/add <n>", "Add a single number"),
    ("/addmany <a,b,...>", "Add a comma-separated list"),
    ("/range [lo hi]", "Add every number in a range (default from config)"),
    ("/remove <n>", "Remove a number from the pool"),
    ("/clear", "Empty the pool (results are kept)"),
    ("/import <path>", "Import numbers from a CSV or text file"),
    ("/template [dir]", "Write a sample import file"),
    ("/draw", "Draw one number (F5)"),
    ("/auto <n>", "Draw n numbers in a row (F6)"),
    ("/next, /prev, /page <n>", "Browse result pages (PgUp/PgDn)"),
    ("/reset", "Clear everything (Ctrl+R)"),
    ("/saveconfig", "Write the current settings to the config file"),
    ("/quit", "Exit (Ctrl+C)"),
];

/// Parse a slash-command string into a [`ParsedCommand`].
///
/// Returns `None` if the input does not start with `/`, is not a recognized
/// command, or is missing a required argument. Commands are case-insensitive.
pub fn parse_command(input: &str) -> Option<ParsedCommand> {
    let input = input.trim();
    let body = input.strip_prefix('/')?;

    let mut parts = body.splitn(2, ' ');
    let cmd = parts.next()?.to_lowercase();
    let rest = parts.next().map(str::trim).unwrap_or("");

    match cmd.as_str() {
        "add" | "a" => {
            if rest.is_empty() {
                return None;
            }
            Some(ParsedCommand::Add { value: rest.to_string() })
        }
        "addmany" | "am" => {
            if rest.is_empty() {
                return None;
            }
            Some(ParsedCommand::AddMany { list: rest.to_string() })
        }
        "range" => {
            if rest.is_empty() {
                return Some(ParsedCommand::Range { bounds: None });
            }
            let (lo, hi) = split_range(rest)?;
            Some(ParsedCommand::Range {
                bounds: Some((parse_number(lo)?, parse_number(hi)?)),
            })
        }
        "remove" | "rm" => {
            let value = parse_number(rest)?;
            Some(ParsedCommand::Remove { value })
        }
        "clear" => Some(ParsedCommand::Clear),
        "import" => {
            if rest.is_empty() {
                return None;
            }
            Some(ParsedCommand::Import { path: rest.to_string() })
        }
        "template" => {
            let dir = if rest.is_empty() { None } else { Some(rest.to_string()) };
            Some(ParsedCommand::Template { dir })
        }
        "draw" | "roll" | "spin" => Some(ParsedCommand::Draw),
        "auto" => {
            if rest.is_empty() {
                return None;
            }
            Some(ParsedCommand::Auto { count: rest.to_string() })
        }
        "next" => Some(ParsedCommand::Next),
        "prev" | "previous" => Some(ParsedCommand::Prev),
        "page" => {
            let page = rest.parse().ok()?;
            Some(ParsedCommand::Page { page })
        }
        "reset" => Some(ParsedCommand::Reset),
        "saveconfig" => Some(ParsedCommand::SaveConfig),
        "help" | "h" => Some(ParsedCommand::Help),
        "quit" | "exit" | "q" => Some(ParsedCommand::Quit),
        _ => None,
    }
}

/// Accepts `lo hi`, `lo..hi` and `lo-hi` (a leading `-` is a sign).
fn split_range(arg: &str) -> Option<(&str, &str)> {
    let args: Vec<&str> = arg.split_whitespace().collect();
    match *args.as_slice() {
        [lo, hi] => Some((lo, hi)),
        [single] => {
            if let Some(pair) = single.split_once("..") {
                return Some(pair);
            }
            let (idx, _) = single.char_indices().skip(1).find(|(_, c)| *c == '-')?;
            Some((&single[..idx], &single[idx + 1..]))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_commands() {
        assert_eq!(parse_command("/draw"), Some(ParsedCommand::Draw));
        assert_eq!(parse_command("  /CLEAR "), Some(ParsedCommand::Clear));
        assert_eq!(parse_command("/remove 12"), Some(ParsedCommand::Remove { value: 12 }));
        assert_eq!(parse_command("/page 3"), Some(ParsedCommand::Page { page: 3 }));
        assert_eq!(
            parse_command("/auto 5"),
            Some(ParsedCommand::Auto { count: "5".into() })
        );
        assert_eq!(
            parse_command("/addmany 1, 2, 3"),
            Some(ParsedCommand::AddMany { list: "1, 2, 3".into() })
        );
    }

    #[test]
    fn test_parse_range_forms() {
        assert_eq!(parse_command("/range"), Some(ParsedCommand::Range { bounds: None }));
        assert_eq!(
            parse_command("/range 5 10"),
            Some(ParsedCommand::Range { bounds: Some((5, 10)) })
        );
        assert_eq!(
            parse_command("/range 1-50"),
            Some(ParsedCommand::Range { bounds: Some((1, 50)) })
        );
        assert_eq!(
            parse_command("/range 1..50"),
            Some(ParsedCommand::Range { bounds: Some((1, 50)) })
        );
        assert_eq!(
            parse_command("/range -5 5"),
            Some(ParsedCommand::Range { bounds: Some((-5, 5)) })
        );
        assert_eq!(
            parse_command("/range -5--1"),
            Some(ParsedCommand::Range { bounds: Some((-5, -1)) })
        );
        assert_eq!(parse_command("/range 7"), None);
    }

    #[test]
    fn test_parse_optional_and_missing_args() {
        assert_eq!(parse_command("/template"), Some(ParsedCommand::Template { dir: None }));
        assert_eq!(
            parse_command("/template ~/out"),
            Some(ParsedCommand::Template { dir: Some("~/out".into()) })
        );
        assert_eq!(parse_command("/import"), None);
        assert_eq!(parse_command("/add"), None);
        assert_eq!(parse_command("/remove x"), None);
        assert_eq!(parse_command("/frobnicate"), None);
        assert_eq!(parse_command("draw"), None);
    }
}
