//! The interactive side of a session.
//!
//! Handlers talk to the user only through [`Host`]: free-text input, picking
//! from a short list, yes/no confirmation and notifications. Every prompt
//! may come back empty, which means the user cancelled.

mod terminal;

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::exec::ProjectRoot;

pub use terminal::TerminalHost;

/// Validator for free-text input: `Some(message)` rejects the value.
pub type Validator<'a> = &'a dyn Fn(&str) -> Option<String>;

pub struct InputRequest<'a> {
    pub prompt: &'a str,
    pub placeholder: Option<&'a str>,
    /// Text pre-filled in the input.
    pub value: Option<&'a str>,
    pub validate: Option<Validator<'a>>,
}

impl<'a> InputRequest<'a> {
    pub fn new(prompt: &'a str) -> Self {
        Self {
            prompt,
            placeholder: None,
            value: None,
            validate: None,
        }
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn value(mut self, value: &'a str) -> Self {
        self.value = Some(value);
        self
    }

    pub fn validate(mut self, validate: Validator<'a>) -> Self {
        self.validate = Some(validate);
        self
    }

    /// Run the validator, if any, against `answer`.
    pub fn check(&self, answer: &str) -> Option<String> {
        self.validate.and_then(|v| v(answer))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub description: String,
}

impl Choice {
    pub fn new(label: &str, description: &str) -> Self {
        Self {
            label: label.to_string(),
            description: description.to_string(),
        }
    }
}

pub trait Host: ProjectRoot {
    /// `Ok(None)` when the user dismissed the prompt.
    fn input(&self, req: &InputRequest<'_>) -> Result<Option<String>>;
    /// Index into `choices`, `Ok(None)` when dismissed.
    fn pick(&self, placeholder: &str, choices: &[Choice]) -> Result<Option<usize>>;
    /// Dismissal counts as `false`.
    fn confirm(&self, message: &str) -> Result<bool>;
    fn pick_folder(&self, prompt: &str) -> Result<Option<PathBuf>>;
    fn show_info(&self, message: &str);
    fn show_error(&self, message: &str);
    fn open_folder(&self, path: &Path);
}
