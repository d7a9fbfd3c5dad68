//! Type definitions for console commands.

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

fn clean_alias(alias: &str) -> &str {
    alias
        .trim_start_matches(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .trim_end()
}

fn same_alias(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// The distinct words a user may type to run one command, such as `exit`,
/// `x`, `quit` and `q`.
///
/// Leading dashes, underscores and whitespace are stripped from every alias,
/// and aliases differing only by case are kept once. Matching ignores case.
#[derive(Debug, Clone, Default)]
pub struct CommandName {
    aliases: Vec<String>,
}

impl CommandName {
    pub fn new<I, S>(aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut name = Self::default();
        for alias in aliases {
            let alias = clean_alias(alias.as_ref());
            if !alias.is_empty() && !name.aliases.iter().any(|a| same_alias(a, alias)) {
                name.aliases.push(alias.to_string());
            }
        }
        name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// The first alias, used when the command is named in messages.
    pub fn primary(&self) -> &str {
        self.aliases.first().map(String::as_str).unwrap_or_default()
    }

    pub fn is_match(&self, input: &str) -> bool {
        let input = clean_alias(input);
        self.aliases.iter().any(|alias| same_alias(alias, input))
    }

    /// True when the two names share any alias.
    pub fn overlaps(&self, other: &Self) -> bool {
        other.aliases.iter().any(|alias| self.is_match(alias))
    }
}

/// Equal when both hold the same aliases, in any order and ignoring case.
impl PartialEq for CommandName {
    fn eq(&self, other: &Self) -> bool {
        self.aliases.len() == other.aliases.len()
            && self.aliases.iter().all(|alias| other.is_match(alias))
    }
}

impl Eq for CommandName {}

impl Display for CommandName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.aliases.join(", "))
    }
}

/// An argument a command understands, listed in its long help.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandParameter {
    pub name: String,
    pub required: bool,
    /// Position among parameters with the same `required` flag.
    pub order: i32,
    pub description: String,
}

impl CommandParameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Required parameters come before optional ones, then lower `order` first.
    pub fn compare(&self, other: &Self) -> Ordering {
        other
            .required
            .cmp(&self.required)
            .then_with(|| self.order.cmp(&other.order))
    }

    /// The help line with the name padded to `name_width`, so a list of
    /// parameters lines up on the `=`.
    pub fn describe(&self, name_width: usize) -> String {
        let requirement = if self.required { "Required" } else { "Optional" };

        if self.description.trim().is_empty() {
            format!("{:<name_width$} {requirement}", self.name)
        } else {
            format!(
                "{:<name_width$} = {requirement}, {}",
                self.name, self.description
            )
        }
    }
}

impl Display for CommandParameter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let width = self.name.chars().count();
        f.write_str(self.describe(width).trim_start())
    }
}

/// What a command asks of the session that ran it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionRequest {
    Help,
    Exit,
}

/// The outcome of running a command.
///
/// `ran_successfully` says whether the command could do its work at all.
/// `result_is_good` answers the question the command asked, such as whether
/// a login was accepted, and is never true for a command that failed to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandReturn {
    ran_successfully: bool,
    result_good: bool,
    pub result_value: i32,
    pub request: Option<SessionRequest>,
    pub messages: Vec<String>,
}

impl Default for CommandReturn {
    fn default() -> Self {
        Self::success()
    }
}

impl CommandReturn {
    pub fn success() -> Self {
        Self {
            ran_successfully: true,
            result_good: true,
            result_value: 0,
            request: None,
            messages: Vec::new(),
        }
    }

    pub fn failed() -> Self {
        Self {
            ran_successfully: false,
            result_good: false,
            ..Self::success()
        }
    }

    pub fn help_request() -> Self {
        Self {
            request: Some(SessionRequest::Help),
            ..Self::success()
        }
    }

    pub fn exit_request() -> Self {
        Self {
            request: Some(SessionRequest::Exit),
            ..Self::success()
        }
    }

    pub fn with_result(mut self, good: bool) -> Self {
        self.result_good = good;
        self
    }

    pub fn with_value(mut self, value: i32) -> Self {
        self.result_value = value;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.messages.push(message.into());
        self
    }

    pub fn ran_successfully(&self) -> bool {
        self.ran_successfully
    }

    pub fn result_is_good(&self) -> bool {
        self.result_good && self.ran_successfully
    }

    pub fn is_help_request(&self) -> bool {
        self.request == Some(SessionRequest::Help)
    }

    pub fn is_exit_request(&self) -> bool {
        self.request == Some(SessionRequest::Exit)
    }

    /// A single status number: `0` for a good result, the result value when
    /// one was set, `i32::MIN` when the command failed to run and
    /// `i32::MIN + 1` for a bad result.
    pub fn status_code(&self) -> i32 {
        if self.result_value != 0 {
            self.result_value
        } else if self.result_is_good() {
            0
        } else if !self.ran_successfully {
            i32::MIN
        } else {
            i32::MIN + 1
        }
    }
}

impl Display for CommandReturn {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.ran_successfully {
            writeln!(f, "Ran Successfully")?;
        } else {
            writeln!(f, "FAILED to run")?;
        }
        if self.result_is_good() {
            writeln!(f, "Command Result is Good")?;
        } else {
            writeln!(f, "Command Result is Bad")?;
        }
        writeln!(f, "Result Value = {}", self.result_value)?;

        if !self.messages.is_empty() {
            writeln!(f, "Messages...")?;
            for message in &self.messages {
                writeln!(f, " - {message}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_are_cleaned_and_deduplicated() {
        let name = CommandName::new(["Exit", "--x", " _quit ", "EXIT", "q", "-"]);

        assert_eq!(name.aliases(), ["Exit", "x", "quit", "q"]);
        assert_eq!(name.primary(), "Exit");
        assert_eq!(name.to_string(), "Exit, x, quit, q");
    }

    #[test]
    fn test_is_match_ignores_case_and_dashes() {
        let name = CommandName::new(["help", "?"]);

        assert!(name.is_match("HELP"));
        assert!(name.is_match("--help"));
        assert!(name.is_match("?"));
        assert!(!name.is_match("hel"));
        assert!(!name.is_match(""));
    }

    #[test]
    fn test_name_equality_ignores_order() {
        assert_eq!(CommandName::new(["a", "B"]), CommandName::new(["b", "A"]));
        assert_ne!(CommandName::new(["a", "b"]), CommandName::new(["a"]));
        assert!(CommandName::new(["login", "l"]).overlaps(&CommandName::new(["L", "list"])));
    }

    #[test]
    fn test_parameters_sort_required_first() {
        let mut parameters = vec![
            CommandParameter::new("verbose").with_order(0),
            CommandParameter::new("count").required().with_order(2),
            CommandParameter::new("path").required().with_order(1),
        ];
        parameters.sort_by(|p1, p2| p1.compare(p2));

        let names: Vec<&str> = parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["path", "count", "verbose"]);
    }

    #[test]
    fn test_parameter_descriptions_line_up() {
        let path = CommandParameter::new("path")
            .required()
            .with_description("where to start");
        let flag = CommandParameter::new("all");

        assert_eq!(path.describe(6), "path   = Required, where to start");
        assert_eq!(flag.describe(6), "all    Optional");
        assert_eq!(path.to_string(), "path = Required, where to start");
    }

    #[test]
    fn test_failed_result_is_never_good() {
        let result = CommandReturn::failed().with_result(true);

        assert!(!result.ran_successfully());
        assert!(!result.result_is_good());
        assert_eq!(result.status_code(), i32::MIN);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(CommandReturn::success().status_code(), 0);
        assert_eq!(CommandReturn::success().with_value(7).status_code(), 7);
        assert_eq!(
            CommandReturn::success().with_result(false).status_code(),
            i32::MIN + 1
        );
    }

    #[test]
    fn test_requests() {
        assert!(CommandReturn::help_request().is_help_request());
        assert!(CommandReturn::exit_request().is_exit_request());
        assert!(!CommandReturn::success().is_exit_request());
    }

    #[test]
    fn test_report() {
        let report = CommandReturn::success()
            .with_result(false)
            .with_value(3)
            .with_message("not found")
            .to_string();

        assert_eq!(
            report,
            "Ran Successfully\nCommand Result is Bad\nResult Value = 3\nMessages...\n - not found\n"
        );
    }
}
