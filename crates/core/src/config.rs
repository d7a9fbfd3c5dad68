//! Theme configuration.
//!
//! A theme is an optional YAML file that overrides the default colors and
//! glyphs of the readers and the option selector. Every field may be left out:
//!
//! ```yaml
//! prompt_color:
//!   name: darkgrey
//! highlight_background:
//!   rgb: [0, 95, 0]
//! bullet: " * "
//! mask_char: "#"
//! ```

use std::fs;
use std::path::Path;

use crossterm::style::Color;
use log::debug;
use serde::Deserialize;

use crate::colors::{color_from_definition, ColorDefinition};
use crate::error::{Error, Result};
use crate::masked::MaskedInputConfig;
use crate::output::BulletListStyle;
use crate::prompt::InputPrompt;
use crate::selection::SelectorConfig;

/// Default path for the theme file
const DEFAULT_THEME_PATH: &str = "~/.console-kit/theme.yml";

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ThemeDefinition {
    pub prompt_color: Option<ColorDefinition>,
    pub input_color: Option<ColorDefinition>,
    pub title_color: Option<ColorDefinition>,
    pub instructions_color: Option<ColorDefinition>,
    pub option_color: Option<ColorDefinition>,
    pub option_background: Option<ColorDefinition>,
    pub highlight_color: Option<ColorDefinition>,
    pub highlight_background: Option<ColorDefinition>,
    /// Used by both the option selector and bullet lists.
    pub bullet: Option<String>,
    /// Unaccepted characters fall back to `*`.
    pub mask_char: Option<char>,
    /// Prompt written below the option list.
    pub input_prompt: Option<String>,
}

/// Resolves the theme file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// theme path. Shell expansions like `~` are resolved.
///
/// # Examples
///
/// ```
/// use console_kit_core::config::get_theme_path;
///
/// let custom_path = get_theme_path(&Some("/path/to/theme.yml".to_string()));
/// assert_eq!(custom_path, "/path/to/theme.yml");
/// ```
pub fn get_theme_path(theme_path_arg: &Option<String>) -> String {
    let theme_path = match theme_path_arg {
        Some(theme_path) => theme_path,
        None => DEFAULT_THEME_PATH,
    };

    shellexpand::tilde(theme_path).to_string()
}

/// Reads the theme at `theme_path`. A missing file gives the default theme.
///
/// # Errors
///
/// Returns an error if the file exists but can't be opened, isn't valid YAML,
/// or doesn't match the theme structure.
pub fn load_theme(theme_path: &str) -> Result<ThemeDefinition> {
    if !Path::new(theme_path).exists() {
        debug!("No theme file at {theme_path}, using defaults");
        return Ok(ThemeDefinition::default());
    }

    let contents = fs::read_to_string(theme_path)
        .map_err(|e| Error::config_io_error(theme_path.to_string(), e))?;

    if contents.trim().is_empty() {
        return Ok(ThemeDefinition::default());
    }

    let theme = serde_yaml::from_str(&contents)
        .map_err(|e| Error::yaml_error("reading".to_string(), theme_path.to_string(), e))?;

    debug!("Loaded theme from {theme_path}");
    Ok(theme)
}

fn apply_color(target: &mut Color, definition: &Option<ColorDefinition>) -> Result<()> {
    if let Some(color) = color_from_definition(definition)? {
        *target = color;
    }

    Ok(())
}

impl ThemeDefinition {
    /// Builds a prompt for a plain or integer read.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid color definition.
    pub fn input_prompt(&self, text: &str) -> Result<InputPrompt> {
        Ok(InputPrompt {
            text: text.to_string(),
            prompt_color: color_from_definition(&self.prompt_color)?,
            input_color: color_from_definition(&self.input_color)?,
        })
    }

    /// # Errors
    ///
    /// Returns an error for an invalid color definition.
    pub fn masked_config(&self, text: &str) -> Result<MaskedInputConfig> {
        let config = MaskedInputConfig::new(self.input_prompt(text)?);

        Ok(match self.mask_char {
            Some(mask_char) => config.with_mask_char(mask_char),
            None => config,
        })
    }

    /// # Errors
    ///
    /// Returns an error for an invalid color definition.
    pub fn selector_config(&self, title: &str) -> Result<SelectorConfig> {
        let mut config = SelectorConfig {
            title: title.to_string(),
            ..SelectorConfig::default()
        };

        apply_color(&mut config.title_color, &self.title_color)?;
        apply_color(&mut config.instructions_color, &self.instructions_color)?;
        apply_color(&mut config.option_color, &self.option_color)?;
        apply_color(&mut config.option_background, &self.option_background)?;
        apply_color(&mut config.highlight_color, &self.highlight_color)?;
        apply_color(&mut config.highlight_background, &self.highlight_background)?;
        apply_color(&mut config.prompt_color, &self.prompt_color)?;
        apply_color(&mut config.input_color, &self.input_color)?;

        if let Some(bullet) = &self.bullet {
            config.bullet.clone_from(bullet);
        }
        if let Some(input_prompt) = &self.input_prompt {
            config.input_prompt.clone_from(input_prompt);
        }

        Ok(config)
    }

    /// Bullets take the title color and items the option color.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid color definition.
    pub fn bullet_style(&self) -> Result<BulletListStyle> {
        let mut style = BulletListStyle {
            bullet_color: color_from_definition(&self.title_color)?,
            item_color: color_from_definition(&self.option_color)?,
            ..BulletListStyle::default()
        };

        if let Some(bullet) = &self.bullet {
            style.bullet.clone_from(bullet);
        }

        Ok(style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn theme_file(yaml: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{yaml}").unwrap();
        file
    }

    fn path_of(file: &NamedTempFile) -> String {
        file.path().to_str().unwrap().to_string()
    }

    #[test]
    fn test_get_theme_path_with_custom_path() {
        let custom_path = Some("/custom/path/theme.yml".to_string());
        assert_eq!(get_theme_path(&custom_path), "/custom/path/theme.yml");
    }

    #[test]
    fn test_get_theme_path_with_none() {
        let result = get_theme_path(&None);
        assert!(result.ends_with(".console-kit/theme.yml"));
        assert!(!result.starts_with('~'));
    }

    #[test]
    fn test_missing_file_gives_default_theme() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yml");

        let theme = load_theme(path.to_str().unwrap()).unwrap();
        assert_eq!(theme, ThemeDefinition::default());
    }

    #[test]
    fn test_empty_file_gives_default_theme() {
        let file = theme_file("");
        assert_eq!(load_theme(&path_of(&file)).unwrap(), ThemeDefinition::default());
    }

    #[test]
    fn test_partial_theme() {
        let file = theme_file(
            r##"
highlight_background:
  ansi: 22
bullet: " > "
mask_char: "#"
"##,
        );

        let theme = load_theme(&path_of(&file)).unwrap();
        assert_eq!(theme.bullet.as_deref(), Some(" > "));
        assert_eq!(theme.mask_char, Some('#'));
        assert!(theme.prompt_color.is_none());

        let config = theme.selector_config("Pick").unwrap();
        assert_eq!(config.title, "Pick");
        assert_eq!(config.highlight_background, Color::AnsiValue(22));
        assert_eq!(config.bullet, " > ");
        assert_eq!(config.option_color, SelectorConfig::default().option_color);
    }

    #[test]
    fn test_malformed_theme_is_error() {
        let file = theme_file("bullet: [unclosed");
        assert!(matches!(load_theme(&path_of(&file)), Err(Error::Yaml { .. })));

        let file = theme_file("prompt_color: 12");
        assert!(matches!(load_theme(&path_of(&file)), Err(Error::Yaml { .. })));
    }

    #[test]
    fn test_bad_color_surfaces_when_converted() {
        let file = theme_file("prompt_color:\n  name: chartreuse\n");
        let theme = load_theme(&path_of(&file)).unwrap();

        assert!(matches!(
            theme.input_prompt("> "),
            Err(Error::UnknownColorName(_))
        ));
    }

    #[test]
    fn test_masked_config_mask_char() {
        let theme = ThemeDefinition {
            mask_char: Some('a'),
            ..ThemeDefinition::default()
        };
        assert_eq!(theme.masked_config("pw: ").unwrap().mask_char(), '*');

        let theme = ThemeDefinition {
            mask_char: Some('~'),
            prompt_color: Some(ColorDefinition {
                name: Some("cyan".to_string()),
                ..ColorDefinition::default()
            }),
            ..ThemeDefinition::default()
        };
        let config = theme.masked_config("pw: ").unwrap();
        assert_eq!(config.mask_char(), '~');
        assert_eq!(config.prompt.prompt_color, Some(Color::Cyan));
        assert_eq!(config.prompt.text, "pw: ");
    }

    #[test]
    fn test_bullet_style() {
        assert_eq!(
            ThemeDefinition::default().bullet_style().unwrap(),
            BulletListStyle::default()
        );

        let theme = ThemeDefinition {
            bullet: Some(" * ".to_string()),
            ..ThemeDefinition::default()
        };
        assert_eq!(theme.bullet_style().unwrap().bullet, " * ");
    }
}
