use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::Path;
use std::time::Duration;

use crate::exec::{ProcessOutput, ProcessRunner};

/// Spinner style used while a command runs.
/// - Yellow spinner with animated braille-style frames.
/// - Displays the current message (`{wide_msg}`) next to the spinner.
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("\x1b[33m{spinner}\x1b[0m {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"])
}

/// Green check mark followed by the final message.
pub fn ok_style() -> ProgressStyle {
    ProgressStyle::with_template("\x1b[32m✔\x1b[0m {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Red cross followed by the final message.
pub fn err_style() -> ProgressStyle {
    ProgressStyle::with_template("\x1b[31m✘\x1b[0m {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Shows a spinner on stderr for as long as the wrapped runner is busy.
///
/// Output is passed through untouched. With `enabled == false` the bar is
/// hidden, which keeps `--quiet` sessions and pipes clean.
pub struct SpinnerRunner<R> {
    inner: R,
    enabled: bool,
}

impl<R: ProcessRunner> SpinnerRunner<R> {
    pub fn new(inner: R, enabled: bool) -> Self {
        Self { inner, enabled }
    }

    fn bar(&self) -> ProgressBar {
        if self.enabled {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        }
    }
}

impl<R: ProcessRunner> ProcessRunner for SpinnerRunner<R> {
    fn run(&self, command_line: &str, cwd: &Path) -> io::Result<ProcessOutput> {
        let pb = self.bar();
        pb.set_style(spinner_style());
        pb.set_message(command_line.to_string());
        pb.enable_steady_tick(Duration::from_millis(80));

        let res = self.inner.run(command_line, cwd);
        match &res {
            Ok(out) if out.success() => {
                pb.set_style(ok_style());
                pb.finish();
            }
            Ok(out) => {
                pb.set_style(err_style());
                let code = out.code.map_or("signal".to_string(), |c| c.to_string());
                pb.finish_with_message(format!("{command_line} (exit: {code})"));
            }
            Err(e) => {
                pb.set_style(err_style());
                pb.finish_with_message(format!("{command_line} (error: {e})"));
            }
        }
        res
    }
}
