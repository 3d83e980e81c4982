//! Prompter adapters
//!
//! `DialoguerPrompter` drives an interactive terminal. `LinePrompter` reads
//! one answer per line from any buffered reader, for piped or redirected
//! input where dialoguer refuses to run.

use std::io::{self, BufRead, Write};
use std::sync::Mutex;

use dialoguer::theme::{ColorfulTheme, SimpleTheme, Theme};
use dialoguer::{Input, Password};

use crate::domain::ports::Prompter;

/// Terminal prompter built on dialoguer
pub struct DialoguerPrompter {
    theme: Box<dyn Theme>,
}

impl DialoguerPrompter {
    pub fn new(color: bool) -> Self {
        let theme: Box<dyn Theme> = if color {
            Box::new(ColorfulTheme::default())
        } else {
            Box::new(SimpleTheme)
        };
        Self { theme }
    }
}

fn to_io(err: dialoguer::Error) -> io::Error {
    io::Error::new(io::ErrorKind::Other, err.to_string())
}

impl Prompter for DialoguerPrompter {
    fn input(&self, prompt: &str, default: &str) -> io::Result<String> {
        Input::<String>::with_theme(self.theme.as_ref())
            .with_prompt(prompt)
            .default(default.to_string())
            .allow_empty(true)
            .interact_text()
            .map_err(to_io)
    }

    fn secret(&self, prompt: &str) -> io::Result<String> {
        Password::with_theme(self.theme.as_ref())
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .map_err(to_io)
    }
}

/// Line-oriented prompter. End of input reads as a blank answer.
pub struct LinePrompter<R, W> {
    io: Mutex<(R, W)>,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            io: Mutex::new((reader, writer)),
        }
    }

    fn ask(&self, label: &str) -> io::Result<String> {
        let mut io = self
            .io
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "prompt lock poisoned"))?;
        let (reader, writer) = &mut *io;

        write!(writer, "{label}: ")?;
        writer.flush()?;

        let mut line = String::new();
        let read = reader.read_line(&mut line)?;
        // Keep the transcript readable when the answer didn't come from a tty.
        writeln!(writer)?;

        if read == 0 {
            return Ok(String::new());
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn input(&self, prompt: &str, default: &str) -> io::Result<String> {
        self.ask(&format!("{prompt} [{default}]"))
    }

    fn secret(&self, prompt: &str) -> io::Result<String> {
        self.ask(prompt)
    }
}
