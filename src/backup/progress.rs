//! Per-secret progress output.
//!
//! Progress is informational only. Write failures (for example a closed
//! stdout pipe) are logged at debug level and otherwise ignored so they can
//! never change the outcome of a backup.

use std::io::{self, Stdout, Write};

/// How much to print per secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    /// One line naming the secret, followed by a blank line
    Verbose,
    /// A single `.` with no newline
    Quiet,
}

impl ProgressMode {
    pub fn from_quiet(quiet: bool) -> Self {
        if quiet {
            Self::Quiet
        } else {
            Self::Verbose
        }
    }
}

/// Progress reporter writing to any sink.
#[derive(Debug)]
pub struct Progress<W> {
    mode: ProgressMode,
    out: W,
    leaves: usize,
}

impl Progress<Stdout> {
    /// Reporter on standard output.
    pub fn stdout(quiet: bool) -> Self {
        Self::new(ProgressMode::from_quiet(quiet), io::stdout())
    }
}

impl<W: Write> Progress<W> {
    pub fn new(mode: ProgressMode, out: W) -> Self {
        Self { mode, out, leaves: 0 }
    }

    /// Report that the secret at `path` is about to be fetched.
    pub fn leaf(&mut self, path: &str) {
        self.leaves += 1;

        let result = match self.mode {
            ProgressMode::Verbose => write!(self.out, "getting secrets at `{path}`\n\n"),
            ProgressMode::Quiet => write!(self.out, "."),
        }
        .and_then(|_| self.out.flush());

        if let Err(e) = result {
            tracing::debug!(error = %e, "Failed to write progress");
        }
    }

    /// Number of secrets reported so far.
    pub fn leaves(&self) -> usize {
        self.leaves
    }

    pub fn mode(&self) -> ProgressMode {
        self.mode
    }

    /// Consume the reporter and return its sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}
