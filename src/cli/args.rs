//! Command-line argument parsing for the closet CLI.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::{FeedbackReaction, WardrobeFilter};

/// Parsed command line: global flags plus the command to run.
#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    /// `--verbose` / `-v`: debug logging for this crate
    pub verbose: bool,
    pub command: CliCommand,
}

/// Command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Print usage
    Help,
    /// Show version information
    Version,
    Login {
        username: String,
        password: Option<String>,
    },
    Signup {
        username: String,
        password: Option<String>,
    },
    Logout,
    /// Show the signed-in user
    Whoami,
    /// List wardrobe items, optionally filtered
    Wardrobe { filter: WardrobeFilter },
    /// Add an item with an optional image
    Add {
        category: String,
        style: String,
        weather: String,
        image: Option<PathBuf>,
    },
    Delete { item_id: String },
    Weather,
    /// Generate an outfit for an occasion and the current weather
    Generate { occasion: String },
    Saved,
    Save { outfit_id: String },
    Feedback {
        outfit_id: String,
        reaction: FeedbackReaction,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgsError {
    #[error("unknown command '{0}', run 'closet help' for usage")]
    UnknownCommand(String),
    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),
    #[error("missing {0}")]
    Missing(&'static str),
    #[error("option '{0}' needs a value")]
    MissingValue(String),
    #[error("{0}")]
    InvalidValue(String),
}

pub const USAGE: &str = "\
Usage: closet [--verbose] <command>

Commands:
  login <username> [--password <pw>]
  signup <username> [--password <pw>]
  logout
  whoami
  wardrobe [--category c] [--style s] [--weather w]
  add --category c --style s --weather w [--image path]
  delete <item_id>
  weather
  generate <occasion>
  saved
  save <outfit_id>
  feedback <outfit_id> <liked|disliked>
  help
  --version

Environment:
  CLOSET_API_URL           backend URL (default http://localhost:8000)
  CLOSET_DEV_MODE          synthesize sessions without a backend
  CLOSET_CREDENTIALS_PATH  credentials file (default ~/.closet/credentials.json)
";

/// Parse command-line arguments.
///
/// The first item is the program name and is skipped. No command means
/// [`CliCommand::Help`].
///
/// # Examples
///
/// ```
/// use closet::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["closet".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()).unwrap().command, CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> Result<CliArgs, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut verbose = false;
    let mut rest = Vec::new();
    for arg in args.skip(1) {
        match arg.as_str() {
            "--verbose" | "-v" => verbose = true,
            _ => rest.push(arg),
        }
    }

    let mut rest = rest.into_iter();
    let command = match rest.next() {
        None => CliCommand::Help,
        Some(name) => parse_command(&name, Tokens::new(rest))?,
    };
    Ok(CliArgs { verbose, command })
}

fn parse_command(name: &str, mut tokens: Tokens) -> Result<CliCommand, ArgsError> {
    let command = match name {
        "help" | "--help" | "-h" => CliCommand::Help,
        "--version" | "-V" | "version" => CliCommand::Version,
        "login" | "signup" => {
            let password = tokens.option("--password")?;
            let username = tokens.positional("username")?;
            if name == "login" {
                CliCommand::Login { username, password }
            } else {
                CliCommand::Signup { username, password }
            }
        }
        "logout" => CliCommand::Logout,
        "whoami" => CliCommand::Whoami,
        "wardrobe" | "list" => {
            let mut filter = WardrobeFilter::new();
            filter.category = tokens.option("--category")?;
            filter.style = tokens.option("--style")?;
            filter.weather = tokens.option("--weather")?;
            CliCommand::Wardrobe { filter }
        }
        "add" => CliCommand::Add {
            category: tokens.required_option("--category")?,
            style: tokens.required_option("--style")?,
            weather: tokens.required_option("--weather")?,
            image: tokens.option("--image")?.map(PathBuf::from),
        },
        "delete" => CliCommand::Delete {
            item_id: tokens.positional("item id")?,
        },
        "weather" => CliCommand::Weather,
        "generate" => CliCommand::Generate {
            occasion: tokens.positional("occasion")?,
        },
        "saved" => CliCommand::Saved,
        "save" => CliCommand::Save {
            outfit_id: tokens.positional("outfit id")?,
        },
        "feedback" => {
            let outfit_id = tokens.positional("outfit id")?;
            let reaction = tokens
                .positional("reaction")?
                .parse::<FeedbackReaction>()
                .map_err(ArgsError::InvalidValue)?;
            CliCommand::Feedback {
                outfit_id,
                reaction,
            }
        }
        other => return Err(ArgsError::UnknownCommand(other.to_string())),
    };

    tokens.finish()?;
    Ok(command)
}

/// Remaining arguments of one command. Options may appear anywhere.
struct Tokens {
    items: Vec<String>,
}

impl Tokens {
    fn new(items: impl Iterator<Item = String>) -> Self {
        Self {
            items: items.collect(),
        }
    }

    /// Take `--name value` or `--name=value`.
    fn option(&mut self, name: &str) -> Result<Option<String>, ArgsError> {
        let prefix = format!("{}=", name);
        let Some(index) = self
            .items
            .iter()
            .position(|a| a == name || a.starts_with(&prefix))
        else {
            return Ok(None);
        };

        let flag = self.items.remove(index);
        if let Some(value) = flag.strip_prefix(&prefix) {
            return Ok(Some(value.to_string()));
        }
        if index >= self.items.len() || self.items[index].starts_with("--") {
            return Err(ArgsError::MissingValue(name.to_string()));
        }
        Ok(Some(self.items.remove(index)))
    }

    fn required_option(&mut self, name: &'static str) -> Result<String, ArgsError> {
        self.option(name)?.ok_or(ArgsError::Missing(name))
    }

    fn positional(&mut self, what: &'static str) -> Result<String, ArgsError> {
        match self.items.iter().position(|a| !a.starts_with("--")) {
            Some(index) => Ok(self.items.remove(index)),
            None => Err(ArgsError::Missing(what)),
        }
    }

    fn finish(self) -> Result<(), ArgsError> {
        match self.items.into_iter().next() {
            Some(extra) => Err(ArgsError::UnexpectedArgument(extra)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliArgs, ArgsError> {
        let mut all = vec!["closet".to_string()];
        all.extend(args.iter().map(|a| a.to_string()));
        parse_args(all.into_iter())
    }

    #[test]
    fn test_parse_no_args_is_help() {
        assert_eq!(parse(&[]).unwrap().command, CliCommand::Help);
    }

    #[test]
    fn test_parse_version_flags() {
        assert_eq!(parse(&["--version"]).unwrap().command, CliCommand::Version);
        assert_eq!(parse(&["-V"]).unwrap().command, CliCommand::Version);
    }

    #[test]
    fn test_parse_verbose_anywhere() {
        let args = parse(&["whoami", "--verbose"]).unwrap();
        assert!(args.verbose);
        assert_eq!(args.command, CliCommand::Whoami);
        assert!(parse(&["-v", "logout"]).unwrap().verbose);
    }

    #[test]
    fn test_parse_login() {
        assert_eq!(
            parse(&["login", "alice"]).unwrap().command,
            CliCommand::Login {
                username: "alice".to_string(),
                password: None
            }
        );
        assert_eq!(
            parse(&["signup", "--password=pw", "bob"]).unwrap().command,
            CliCommand::Signup {
                username: "bob".to_string(),
                password: Some("pw".to_string())
            }
        );
        assert_eq!(parse(&["login"]), Err(ArgsError::Missing("username")));
    }

    #[test]
    fn test_parse_wardrobe_filter() {
        let command = parse(&["wardrobe", "--category", "shirt", "--weather", "cold"])
            .unwrap()
            .command;
        assert_eq!(
            command,
            CliCommand::Wardrobe {
                filter: WardrobeFilter::new().category("shirt").weather("cold")
            }
        );
    }

    #[test]
    fn test_parse_add_requires_fields() {
        assert_eq!(
            parse(&["add", "--category", "shirt", "--style", "casual"]),
            Err(ArgsError::Missing("--weather"))
        );
        let command = parse(&[
            "add", "--category", "shirt", "--style", "casual", "--weather", "cold", "--image",
            "tee.png",
        ])
        .unwrap()
        .command;
        assert_eq!(
            command,
            CliCommand::Add {
                category: "shirt".to_string(),
                style: "casual".to_string(),
                weather: "cold".to_string(),
                image: Some(PathBuf::from("tee.png")),
            }
        );
    }

    #[test]
    fn test_parse_option_without_value() {
        assert_eq!(
            parse(&["wardrobe", "--style"]),
            Err(ArgsError::MissingValue("--style".to_string()))
        );
    }

    #[test]
    fn test_parse_feedback() {
        assert_eq!(
            parse(&["feedback", "o1", "liked"]).unwrap().command,
            CliCommand::Feedback {
                outfit_id: "o1".to_string(),
                reaction: FeedbackReaction::Liked
            }
        );
        assert!(matches!(
            parse(&["feedback", "o1", "meh"]),
            Err(ArgsError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_parse_rejects_unknown_and_extra() {
        assert_eq!(
            parse(&["dance"]),
            Err(ArgsError::UnknownCommand("dance".to_string()))
        );
        assert_eq!(
            parse(&["weather", "now"]),
            Err(ArgsError::UnexpectedArgument("now".to_string()))
        );
    }
}
