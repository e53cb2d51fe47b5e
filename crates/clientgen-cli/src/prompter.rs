//! Terminal prompts backed by `dialoguer`.

use std::io::{self, IsTerminal};

use clientgen_core::{Error, Prompter, Validator};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect, Select};

/// Asks on the terminal; answers every question with its default when stdin
/// is not a terminal.
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
    non_interactive: bool,
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
            non_interactive: !io::stdin().is_terminal(),
        }
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new()
    }
}

fn prompt_error(e: dialoguer::Error) -> Error {
    Error::prompt(e.to_string())
}

impl Prompter for DialoguerPrompter {
    fn select(
        &mut self,
        message: &str,
        items: &[String],
        default: usize,
    ) -> clientgen_core::Result<usize> {
        if self.non_interactive {
            tracing::debug!("{message} -> {}", items.get(default).map_or("", String::as_str));
            return Ok(default);
        }
        Select::with_theme(&self.theme)
            .with_prompt(message)
            .items(items)
            .default(default)
            .interact()
            .map_err(prompt_error)
    }

    fn multi_select(
        &mut self,
        message: &str,
        items: &[String],
        defaults: &[bool],
    ) -> clientgen_core::Result<Vec<usize>> {
        if self.non_interactive {
            return Ok(defaults
                .iter()
                .enumerate()
                .filter_map(|(i, checked)| checked.then_some(i))
                .collect());
        }
        MultiSelect::with_theme(&self.theme)
            .with_prompt(format!("{message} (space to select, enter to confirm)"))
            .items(items)
            .defaults(defaults)
            .interact()
            .map_err(prompt_error)
    }

    fn confirm(&mut self, message: &str, default: bool) -> clientgen_core::Result<bool> {
        if self.non_interactive {
            return Ok(default);
        }
        Confirm::with_theme(&self.theme)
            .with_prompt(message)
            .default(default)
            .interact()
            .map_err(prompt_error)
    }

    fn input(
        &mut self,
        message: &str,
        default: &str,
        validate: Option<Validator>,
    ) -> clientgen_core::Result<String> {
        if self.non_interactive {
            if let Some(validate) = validate {
                validate(default).map_err(Error::prompt)?;
            }
            return Ok(default.to_string());
        }
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(message)
            .default(default.to_string());
        if let Some(validate) = validate {
            input = input.validate_with(move |value: &String| validate(value));
        }
        input.interact_text().map_err(prompt_error)
    }
}
