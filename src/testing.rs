//! Test doubles shared by the unit tests.

use anyhow::Result;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::commands::Context;
use crate::config::Settings;
use crate::exec::{Executor, ProcessOutput, ProcessRunner, ProjectRoot};
use crate::host::{Choice, Host, InputRequest};
use crate::logging::MemorySink;

type Reply = Result<ProcessOutput, String>;

/// Records every spawn; answers from a script keyed by the exact command line.
///
/// Each scripted reply is used once, in the order given. Unscripted lines
/// succeed with empty output.
#[derive(Default)]
pub struct FakeRunner {
    script: Mutex<Vec<(String, Reply)>>,
    calls: Mutex<Vec<(String, PathBuf)>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, line: &str, reply: Reply) -> Self {
        self.script.lock().unwrap().push((line.to_string(), reply));
        self
    }

    pub fn calls(&self) -> Vec<(String, PathBuf)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.calls().into_iter().map(|(l, _)| l).collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl ProcessRunner for FakeRunner {
    fn run(&self, command_line: &str, cwd: &Path) -> io::Result<ProcessOutput> {
        self.calls
            .lock()
            .unwrap()
            .push((command_line.to_string(), cwd.to_path_buf()));

        let mut script = self.script.lock().unwrap();
        let reply = match script.iter().position(|(l, _)| l == command_line) {
            Some(i) => script.remove(i).1,
            None => Ok(ProcessOutput::ok("")),
        };
        reply.map_err(|msg| io::Error::new(io::ErrorKind::NotFound, msg))
    }
}

#[derive(Debug, Clone)]
pub enum Answer {
    Input(Option<String>),
    Pick(Option<usize>),
    Confirm(bool),
    Folder(Option<PathBuf>),
}

pub fn typed(s: &str) -> Answer {
    Answer::Input(Some(s.to_string()))
}

/// Host that replays queued answers and records what it was asked and told.
pub struct ScriptedHost {
    root: Option<PathBuf>,
    answers: RefCell<VecDeque<Answer>>,
    pub prompts: RefCell<Vec<String>>,
    pub prefilled: RefCell<Vec<Option<String>>>,
    pub infos: RefCell<Vec<String>>,
    pub errors: RefCell<Vec<String>>,
    pub rejections: RefCell<Vec<String>>,
    pub opened: RefCell<Vec<PathBuf>>,
}

impl ScriptedHost {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            root: Some(PathBuf::from("/repo")),
            answers: RefCell::new(answers.into()),
            prompts: RefCell::default(),
            prefilled: RefCell::default(),
            infos: RefCell::default(),
            errors: RefCell::default(),
            rejections: RefCell::default(),
            opened: RefCell::default(),
        }
    }

    pub fn without_root(mut self) -> Self {
        self.root = None;
        self
    }

    pub fn remaining(&self) -> usize {
        self.answers.borrow().len()
    }

    fn next(&self, prompt: &str) -> Answer {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.answers
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted answer for prompt: {prompt}"))
    }
}

impl ProjectRoot for ScriptedHost {
    fn active_root(&self) -> Option<PathBuf> {
        self.root.clone()
    }
}

impl Host for ScriptedHost {
    fn input(&self, req: &InputRequest<'_>) -> Result<Option<String>> {
        self.prefilled
            .borrow_mut()
            .push(req.value.map(str::to_string));
        loop {
            match self.next(req.prompt) {
                Answer::Input(Some(v)) => match req.check(&v) {
                    Some(msg) => self.rejections.borrow_mut().push(msg),
                    None => return Ok(Some(v)),
                },
                Answer::Input(None) => return Ok(None),
                other => panic!("expected input answer for {:?}, got {other:?}", req.prompt),
            }
        }
    }

    fn pick(&self, placeholder: &str, choices: &[Choice]) -> Result<Option<usize>> {
        match self.next(placeholder) {
            Answer::Pick(i) => {
                if let Some(i) = i {
                    assert!(i < choices.len(), "pick {i} out of {} choices", choices.len());
                }
                Ok(i)
            }
            other => panic!("expected pick answer for {placeholder:?}, got {other:?}"),
        }
    }

    fn confirm(&self, message: &str) -> Result<bool> {
        match self.next(message) {
            Answer::Confirm(b) => Ok(b),
            other => panic!("expected confirm answer for {message:?}, got {other:?}"),
        }
    }

    fn pick_folder(&self, prompt: &str) -> Result<Option<PathBuf>> {
        match self.next(prompt) {
            Answer::Folder(p) => Ok(p),
            other => panic!("expected folder answer for {prompt:?}, got {other:?}"),
        }
    }

    fn show_info(&self, message: &str) {
        self.infos.borrow_mut().push(message.to_string());
    }

    fn show_error(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_string());
    }

    fn open_folder(&self, path: &Path) {
        self.opened.borrow_mut().push(path.to_path_buf());
    }
}

/// Build a handler [`Context`] over the given doubles and run `f` with it.
pub fn with_ctx<R>(
    host: &ScriptedHost,
    runner: &FakeRunner,
    settings: &Settings,
    log: &MemorySink,
    f: impl FnOnce(&Context<'_>) -> R,
) -> R {
    let exec = Executor::new(runner, host, log);
    let ctx = Context {
        host,
        exec: &exec,
        settings,
        log,
    };
    f(&ctx)
}
