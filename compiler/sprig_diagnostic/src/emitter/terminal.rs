//! Plain-text diagnostic output for terminals.

use std::io::{self, Write};

use super::DiagnosticEmitter;
use crate::{colors, Diagnostic, FormatOptions};

fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Whether to color terminal output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Color when the sink is a TTY.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }

    /// Parse a `--color` flag value.
    pub fn from_flag(value: &str) -> Option<Self> {
        match value {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }
}

/// Writes each diagnostic tree followed by a blank line.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    options: FormatOptions,
}

impl<W: Write> TerminalEmitter<W> {
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            options: FormatOptions::default().colors(mode.should_use_colors(is_tty)),
        }
    }

    /// Headers only, no source excerpts.
    #[must_use]
    pub fn short(mut self, short: bool) -> Self {
        self.options.short = short;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl TerminalEmitter<io::Stderr> {
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        Self::with_color_mode(io::stderr(), mode, is_tty)
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        let _ = writeln!(self.writer, "{}\n", diagnostic.format(&self.options));
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize) {
        if error_count == 0 {
            return;
        }
        let text = format!("{error_count} error{}", plural_s(error_count));
        if self.options.colors {
            let _ = writeln!(self.writer, "{}{text}{}", colors::ERROR, colors::RESET);
        } else {
            let _ = writeln!(self.writer, "{text}");
        }
    }
}
