//! Non-interactive UI for pipes, CI and other headless environments.

use super::{OutputMode, SpinnerHandle, UserInterface};

/// Variables set by common CI providers.
const CI_ENV_VARS: &[&str] = &[
    "CI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "CIRCLECI",
    "TRAVIS",
    "JENKINS_URL",
];

/// Check if running under a CI provider.
pub fn is_ci() -> bool {
    CI_ENV_VARS.iter().any(|var| std::env::var_os(var).is_some())
}

/// Plain line-oriented output without colors or redraws.
///
/// Spinners become a single line printed when the stage finishes. Under CI
/// those lines are dropped since they only add noise to build logs.
pub struct NonInteractiveUI {
    mode: OutputMode,
    is_ci: bool,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            is_ci: is_ci(),
        }
    }

    /// Create with explicit CI flag (for testing).
    pub fn with_ci(mode: OutputMode, is_ci: bool) -> Self {
        Self { mode, is_ci }
    }

    fn shows_progress(&self) -> bool {
        self.mode.shows_spinners() && !self.is_ci
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn start_spinner(&mut self, _message: &str) -> Box<dyn SpinnerHandle> {
        Box::new(LineSpinner {
            visible: self.shows_progress(),
        })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("{}", title);
        }
    }

    fn show_detail(&mut self, key: &str, value: &str) {
        if self.mode.shows_status() {
            println!("  {:<12} {}", format!("{}:", key), value);
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Prints one line when finished; failures always go to stderr.
struct LineSpinner {
    visible: bool,
}

impl SpinnerHandle for LineSpinner {
    fn finish_success(&mut self, msg: &str) {
        if self.visible {
            println!("✓ {}", msg);
        }
    }

    fn finish_error(&mut self, msg: &str) {
        if self.visible {
            eprintln!("✗ {}", msg);
        }
    }

    fn finish_skipped(&mut self, msg: &str) {
        if self.visible {
            println!("○ {}", msg);
        }
    }
}
