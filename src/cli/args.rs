//! Command-line argument parsing for the folio CLI.

use crate::models::ContentKind;

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Sign in and remember the session
    Login { email: String, password: String },
    /// Create an account; a code is emailed for `verify`
    Signup {
        name: String,
        email: String,
        password: String,
    },
    /// Confirm a new account with its emailed code and sign in
    Verify { email: String, code: String },
    /// Forget the stored session
    Logout,
    /// Library overview with top rated items and the free plan
    Home,
    /// List the library, optionally one kind only
    Library { kind: Option<ContentKind> },
    /// Search the library
    Search { query: String },
    /// List subscription plans
    Plans,
    /// Show the signed-in profile
    Profile,
    /// Page through a document
    Read { content_id: String },
    /// Download a document for offline reading
    Download { content_id: String },
    /// Report disk usage, optionally clearing the cache
    Storage { clear_cache: bool },
    /// Arguments could not be understood
    Invalid(String),
}

/// Parse command-line arguments and return the appropriate command.
///
/// # Examples
///
/// ```
/// use folio::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["folio".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    // Skip the program name
    let args: Vec<String> = args.skip(1).collect();
    let Some(first) = args.first() else {
        return CliCommand::Help;
    };
    let rest = &args[1..];

    match first.as_str() {
        "--version" | "-V" => CliCommand::Version,
        "help" | "--help" | "-h" => CliCommand::Help,
        "login" => match rest {
            [email, password] => CliCommand::Login {
                email: email.clone(),
                password: password.clone(),
            },
            _ => CliCommand::Invalid("usage: folio login <email> <password>".to_string()),
        },
        "signup" => match rest {
            [name, email, password] => CliCommand::Signup {
                name: name.clone(),
                email: email.clone(),
                password: password.clone(),
            },
            _ => CliCommand::Invalid("usage: folio signup <name> <email> <password>".to_string()),
        },
        "verify" => match rest {
            [email, code] => CliCommand::Verify {
                email: email.clone(),
                code: code.clone(),
            },
            _ => CliCommand::Invalid("usage: folio verify <email> <code>".to_string()),
        },
        "logout" => CliCommand::Logout,
        "home" => CliCommand::Home,
        "library" => match rest {
            [] => CliCommand::Library { kind: None },
            [kind] => match ContentKind::parse(kind) {
                Some(kind) => CliCommand::Library { kind: Some(kind) },
                None => CliCommand::Invalid(format!(
                    "unknown kind '{}', expected magazine, article or digest",
                    kind
                )),
            },
            _ => CliCommand::Invalid("usage: folio library [magazine|article|digest]".to_string()),
        },
        "search" if !rest.is_empty() => CliCommand::Search {
            query: rest.join(" "),
        },
        "search" => CliCommand::Invalid("usage: folio search <query>".to_string()),
        "plans" => CliCommand::Plans,
        "profile" => CliCommand::Profile,
        "read" => match rest {
            [id] => CliCommand::Read {
                content_id: id.clone(),
            },
            _ => CliCommand::Invalid("usage: folio read <content-id>".to_string()),
        },
        "download" => match rest {
            [id] => CliCommand::Download {
                content_id: id.clone(),
            },
            _ => CliCommand::Invalid("usage: folio download <content-id>".to_string()),
        },
        "storage" => match rest {
            [] => CliCommand::Storage { clear_cache: false },
            [flag] if flag == "--clear-cache" => CliCommand::Storage { clear_cache: true },
            _ => CliCommand::Invalid("usage: folio storage [--clear-cache]".to_string()),
        },
        other => CliCommand::Invalid(format!("unknown command '{}'", other)),
    }
}

/// Usage text for `folio help`.
pub const USAGE: &str = "\
usage: folio <command> [args]

commands:
  login <email> <password>            sign in
  signup <name> <email> <password>    create an account
  verify <email> <code>               confirm a new account and sign in
  logout                              sign out
  home                                overview of the library and plans
  library [magazine|article|digest]   list the library
  search <query>                      search by name, category or description
  plans                               list subscription plans
  profile                             show your profile
  read <content-id>                   page through a document
  download <content-id>               save a document for offline reading
  storage [--clear-cache]             show disk usage
  --version, -V                       print the version

environment:
  FOLIO_API_URL        API base URL
  FOLIO_TIMEOUT_SECS   request timeout in seconds
  FOLIO_LOG            log filter, e.g. debug or folio=trace";

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliCommand {
        let mut all = vec!["folio".to_string()];
        all.extend(args.iter().map(|s| s.to_string()));
        parse_args(all.into_iter())
    }

    #[test]
    fn test_parse_version_flags() {
        assert_eq!(parse(&["--version"]), CliCommand::Version);
        assert_eq!(parse(&["-V"]), CliCommand::Version);
    }

    #[test]
    fn test_parse_no_args_is_help() {
        assert_eq!(parse(&[]), CliCommand::Help);
        assert_eq!(parse(&["help"]), CliCommand::Help);
    }

    #[test]
    fn test_parse_login() {
        assert_eq!(
            parse(&["login", "ada@example.com", "pw"]),
            CliCommand::Login {
                email: "ada@example.com".to_string(),
                password: "pw".to_string()
            }
        );
        assert!(matches!(parse(&["login", "ada@example.com"]), CliCommand::Invalid(_)));
    }

    #[test]
    fn test_parse_signup_and_verify() {
        assert_eq!(
            parse(&["signup", "Ada", "ada@example.com", "password1"]),
            CliCommand::Signup {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                password: "password1".to_string()
            }
        );
        assert_eq!(
            parse(&["verify", "ada@example.com", "123456"]),
            CliCommand::Verify {
                email: "ada@example.com".to_string(),
                code: "123456".to_string()
            }
        );
        assert!(matches!(parse(&["signup", "Ada"]), CliCommand::Invalid(_)));
        assert!(matches!(parse(&["verify"]), CliCommand::Invalid(_)));
    }

    #[test]
    fn test_parse_library_kind() {
        assert_eq!(parse(&["library"]), CliCommand::Library { kind: None });
        assert_eq!(
            parse(&["library", "digest"]),
            CliCommand::Library {
                kind: Some(ContentKind::Digest)
            }
        );
        assert!(matches!(parse(&["library", "poster"]), CliCommand::Invalid(_)));
    }

    #[test]
    fn test_parse_search_joins_words() {
        assert_eq!(
            parse(&["search", "tech", "weekly"]),
            CliCommand::Search {
                query: "tech weekly".to_string()
            }
        );
        assert!(matches!(parse(&["search"]), CliCommand::Invalid(_)));
    }

    #[test]
    fn test_parse_read_download_storage() {
        assert_eq!(
            parse(&["read", "m1"]),
            CliCommand::Read {
                content_id: "m1".to_string()
            }
        );
        assert_eq!(
            parse(&["download", "m1"]),
            CliCommand::Download {
                content_id: "m1".to_string()
            }
        );
        assert_eq!(parse(&["storage"]), CliCommand::Storage { clear_cache: false });
        assert_eq!(
            parse(&["storage", "--clear-cache"]),
            CliCommand::Storage { clear_cache: true }
        );
        assert!(matches!(parse(&["storage", "--nuke"]), CliCommand::Invalid(_)));
    }

    #[test]
    fn test_parse_home() {
        assert_eq!(parse(&["home"]), CliCommand::Home);
    }

    #[test]
    fn test_parse_unknown_command() {
        assert!(matches!(parse(&["--unknown"]), CliCommand::Invalid(_)));
    }
}
