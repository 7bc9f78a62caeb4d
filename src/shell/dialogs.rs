//! User-facing notices.

use std::io::{self, Write};

/// Output surface of the shell.
///
/// Errors and confirmations are modal in spirit: each is one complete,
/// titled notice.
#[cfg_attr(test, mockall::automock)]
pub trait Dialogs {
    fn show_error(&mut self, title: &str, message: &str);

    fn show_info(&mut self, title: &str, message: &str);

    /// Plain output such as listings.
    fn print(&mut self, text: &str);

    /// Input prompt, without a trailing newline.
    fn prompt(&mut self, prompt: &str);
}

/// Dialogs rendered on the terminal.
#[derive(Debug, Default)]
pub struct TerminalDialogs;

impl TerminalDialogs {
    pub fn new() -> Self {
        Self
    }
}

impl Dialogs for TerminalDialogs {
    fn show_error(&mut self, title: &str, message: &str) {
        println!("\n[{title}] {message}");
    }

    fn show_info(&mut self, title: &str, message: &str) {
        println!("\n[{title}] {message}");
    }

    fn print(&mut self, text: &str) {
        println!("{text}");
    }

    fn prompt(&mut self, prompt: &str) {
        print!("{prompt}");
        // A failed flush only delays the prompt.
        let _ = io::stdout().flush();
    }
}
