//! Interactive surface: confirm, input, select and editor prompts.
//!
//! Command code only sees the [`Prompter`] trait, so flows can be driven by a scripted
//! prompter in tests instead of a terminal.

use crate::error::CliError;
use dialoguer::{Confirm, Editor, Input, Select};
use owo_colors::OwoColorize;

/// Operator-facing prompts.
pub trait Prompter: Send + Sync {
    /// Binary yes/no question.
    fn confirm(&self, message: &str, default: bool) -> Result<bool, CliError>;

    /// Free-text answer; an empty reply takes `default` when one is given.
    fn input(&self, message: &str, default: Option<&str>) -> Result<String, CliError>;

    /// Pick one of `items`, returning its index.
    fn select(&self, message: &str, items: &[&str], default: usize) -> Result<usize, CliError>;

    /// Open `text` in the operator's editor.
    ///
    /// `rejection` carries the reason the previous edit was refused, if any. Returns
    /// `None` when the operator quit without saving.
    fn edit(&self, text: &str, rejection: Option<&str>) -> Result<Option<String>, CliError>;
}

/// dialoguer-backed prompter for a real terminal.
#[derive(Debug, Clone, Default)]
pub struct TerminalPrompter {
    editor: Option<String>,
}

impl TerminalPrompter {
    /// `editor` overrides `$VISUAL`/`$EDITOR`.
    pub fn new(editor: Option<String>) -> Self {
        Self { editor }
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&self, message: &str, default: bool) -> Result<bool, CliError> {
        Ok(Confirm::new()
            .with_prompt(message)
            .default(default)
            .interact()?)
    }

    fn input(&self, message: &str, default: Option<&str>) -> Result<String, CliError> {
        let mut input = Input::<String>::new().with_prompt(message).allow_empty(true);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        Ok(input.interact_text()?)
    }

    fn select(&self, message: &str, items: &[&str], default: usize) -> Result<usize, CliError> {
        Ok(Select::new()
            .with_prompt(message)
            .items(items)
            .default(default)
            .interact()?)
    }

    fn edit(&self, text: &str, rejection: Option<&str>) -> Result<Option<String>, CliError> {
        if let Some(reason) = rejection {
            eprintln!(
                "{} {}",
                "✘ Sorry, your reply was invalid:".red(),
                reason
            );
        }

        let mut editor = Editor::new();
        editor.extension(".json");
        if let Some(executable) = &self.editor {
            editor.executable(executable);
        }
        editor
            .edit(text)
            .map_err(|e| CliError::Prompt(format!("failed to open editor: {}", e)))
    }
}

/// Whether prompts may be shown: not disabled and stdin is a terminal.
pub fn is_interactive(no_interactive: bool) -> bool {
    use std::io::IsTerminal;
    !no_interactive && std::io::stdin().is_terminal()
}
