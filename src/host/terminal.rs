use anyhow::Result;
use colored::Colorize;
use inquire::{Confirm, InquireError, Select, Text};
use std::env;
use std::path::{Path, PathBuf};

use super::{Choice, Host, InputRequest};
use crate::exec::ProjectRoot;
use crate::git::discover_workdir;

/// [`Host`] backed by `inquire` prompts on the controlling terminal.
///
/// The project root is `root` when given, otherwise the git work tree
/// around the current directory.
pub struct TerminalHost {
    root: Option<PathBuf>,
}

impl TerminalHost {
    pub fn new(root: Option<PathBuf>) -> Self {
        Self { root }
    }
}

/// Esc and Ctrl-C both mean "no answer".
fn skippable<T>(res: Result<Option<T>, InquireError>) -> Result<Option<T>> {
    match res {
        Ok(v) => Ok(v),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl ProjectRoot for TerminalHost {
    fn active_root(&self) -> Option<PathBuf> {
        if let Some(root) = &self.root {
            return Some(root.clone());
        }
        let cwd = env::current_dir().ok()?;
        discover_workdir(&cwd)
    }
}

impl Host for TerminalHost {
    fn input(&self, req: &InputRequest<'_>) -> Result<Option<String>> {
        loop {
            let mut text = Text::new(req.prompt);
            if let Some(p) = req.placeholder {
                text = text.with_placeholder(p);
            }
            if let Some(v) = req.value {
                text = text.with_initial_value(v);
            }

            let Some(answer) = skippable(text.prompt_skippable())? else {
                return Ok(None);
            };
            match req.check(&answer) {
                Some(msg) => eprintln!("{} {}", "✘".red(), msg),
                None => return Ok(Some(answer)),
            }
        }
    }

    fn pick(&self, placeholder: &str, choices: &[Choice]) -> Result<Option<usize>> {
        let options: Vec<String> = choices
            .iter()
            .map(|c| {
                if c.description.is_empty() {
                    c.label.clone()
                } else {
                    format!("{} - {}", c.label, c.description)
                }
            })
            .collect();

        let picked = skippable(Select::new(placeholder, options).raw_prompt_skippable())?;
        Ok(picked.map(|o| o.index))
    }

    fn confirm(&self, message: &str) -> Result<bool> {
        let answer = skippable(Confirm::new(message).with_default(false).prompt_skippable())?;
        Ok(answer.unwrap_or(false))
    }

    fn pick_folder(&self, prompt: &str) -> Result<Option<PathBuf>> {
        let start = env::current_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        let not_a_dir = |v: &str| {
            if Path::new(v).is_dir() {
                None
            } else {
                Some(format!("Not a directory: {v}"))
            }
        };
        let req = InputRequest::new(prompt).value(&start).validate(&not_a_dir);
        Ok(self.input(&req)?.map(PathBuf::from))
    }

    fn show_info(&self, message: &str) {
        println!("{} {}", "✔".green(), message);
    }

    fn show_error(&self, message: &str) {
        eprintln!("{} {}", "✘".red(), message);
    }

    fn open_folder(&self, path: &Path) {
        println!("{} {}", "→".cyan(), path.display());
    }
}
