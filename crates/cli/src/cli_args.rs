//! Command-line argument parsing.

use clap::{Parser, Subcommand};

/// Command-line arguments for the `ck` demo tool.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use console_kit_cli::cli_args::{Args, Demo};
///
/// let args = Args::parse_from(["ck", "int"]);
/// assert_eq!(args.demo, Demo::Int);
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Path to the theme YAML.
    ///
    /// If not provided, defaults to `~/.console-kit/theme.yml`. A missing
    /// file means the built-in colors are used.
    #[arg(long, short = 't', global = true)]
    pub theme_path: Option<String>,

    #[command(subcommand)]
    pub demo: Demo,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Demo {
    /// Ask for a username, then a password masked while it is typed.
    Login,

    /// Ask for a secret that is shown while typed and covered afterwards.
    Cover,

    /// Ask for a whole number.
    Int,

    /// Pick one of a list of options with the arrow keys.
    Options {
        /// Title written above the list.
        #[arg(long)]
        title: Option<String>,

        /// Let Tab pick the only option matching the typed text.
        #[arg(long, short = 'p', action)]
        predict: bool,

        /// Write a line of key help above the list.
        #[arg(long, short = 'i', action)]
        instructions: bool,

        /// The options. Five sample options are used when none are given.
        items: Vec<String>,
    },

    /// Write the items as a word-wrapped bullet list.
    Bullets {
        #[arg(required = true)]
        items: Vec<String>,
    },

    /// Write a horizontal rule.
    Rule {
        /// Unsupported characters fall back to `-`.
        #[arg(long = "char", short = 'c', default_value_t = '-')]
        rule_char: char,

        /// Defaults to the window width.
        #[arg(long, short = 'l')]
        length: Option<u16>,
    },

    /// Write text in cycling colors.
    Rainbow { text: String },

    /// Run the other demos as typed commands until `exit`.
    Shell {
        /// Written before every command line.
        #[arg(long, default_value = ">> ")]
        prompt: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_args_default_values() {
        let args = Args::parse_from(["ck", "login"]);

        assert!(args.theme_path.is_none());
        assert_eq!(args.demo, Demo::Login);
    }

    #[test]
    fn test_theme_path_flags() {
        let args = Args::parse_from(["ck", "-t", "/custom/theme.yml", "cover"]);
        assert_eq!(args.theme_path, Some("/custom/theme.yml".to_string()));

        let args = Args::parse_from(["ck", "int", "--theme-path", "/other.yml"]);
        assert_eq!(args.theme_path, Some("/other.yml".to_string()));
        assert_eq!(args.demo, Demo::Int);
    }

    #[test]
    fn test_options_arguments() {
        let args = Args::parse_from([
            "ck", "options", "--title", "days", "-p", "-i", "Mon", "Tue",
        ]);

        assert_eq!(
            args.demo,
            Demo::Options {
                title: Some("days".to_string()),
                predict: true,
                instructions: true,
                items: vec!["Mon".to_string(), "Tue".to_string()],
            }
        );
    }

    #[test]
    fn test_options_without_items() {
        let args = Args::parse_from(["ck", "options"]);

        assert_eq!(
            args.demo,
            Demo::Options {
                title: None,
                predict: false,
                instructions: false,
                items: Vec::new(),
            }
        );
    }

    #[test]
    fn test_rule_arguments() {
        let args = Args::parse_from(["ck", "rule"]);
        assert_eq!(
            args.demo,
            Demo::Rule {
                rule_char: '-',
                length: None
            }
        );

        let args = Args::parse_from(["ck", "rule", "--char", "=", "-l", "20"]);
        assert_eq!(
            args.demo,
            Demo::Rule {
                rule_char: '=',
                length: Some(20)
            }
        );
    }

    #[test]
    fn test_bullets_require_items() {
        assert!(Args::try_parse_from(["ck", "bullets"]).is_err());

        let args = Args::parse_from(["ck", "bullets", "one", "two"]);
        assert_eq!(
            args.demo,
            Demo::Bullets {
                items: vec!["one".to_string(), "two".to_string()]
            }
        );
    }

    #[test]
    fn test_shell_prompt() {
        let args = Args::parse_from(["ck", "shell"]);
        assert_eq!(
            args.demo,
            Demo::Shell {
                prompt: ">> ".to_string()
            }
        );

        let args = Args::parse_from(["ck", "shell", "--prompt", "$ "]);
        assert_eq!(
            args.demo,
            Demo::Shell {
                prompt: "$ ".to_string()
            }
        );
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Args::try_parse_from(["ck"]).is_err());
    }
}
