//! Output management and formatting.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::{OwoColorize, Style};
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // Resolve Auto → Human (TTY) or Plain (piped/redirected).
        let resolved_format = if args.output_format == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            args.output_format
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Command results (rendered HTML, completion scripts, JSON documents).
    /// Never suppressed and written without a trailing newline.
    pub fn emit(&self, data: &str) -> io::Result<()> {
        self.term.write_str(data)?;
        self.term.flush()
    }

    /// Pretty-printed JSON followed by a newline. Never suppressed.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&json)
    }

    /// `✓ <msg>` in green.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.status('\u{2713}', msg, Style::new().green())
    }

    /// `⚠ <msg>` in yellow.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.status('\u{26a0}', msg, Style::new().yellow())
    }

    /// `ℹ <msg>` in blue.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.status('\u{2139}', msg, Style::new().blue())
    }

    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(&paint(text, Style::new().cyan().bold(), self.no_color))
    }

    fn status(&self, symbol: char, msg: &str, style: Style) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(&status_line(symbol, msg, style, self.no_color))
    }

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }

    pub fn is_json(&self) -> bool {
        self.resolved_format == OutputFormat::Json
    }
}

fn paint(text: &str, style: Style, no_color: bool) -> String {
    if no_color {
        text.to_owned()
    } else {
        text.style(style).to_string()
    }
}

fn status_line(symbol: char, msg: &str, style: Style, no_color: bool) -> String {
    let symbol = symbol.to_string();
    format!(
        "{} {}",
        paint(&symbol, style.bold(), no_color),
        paint(msg, style, no_color)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_manager(format: OutputFormat, quiet: bool, no_color: bool) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
            output_format: format,
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn quiet_suppresses_print() {
        let out = make_manager(OutputFormat::Plain, true, true);
        assert!(out.print("hello").is_ok());
        assert!(out.emit("").is_ok());
    }

    #[test]
    fn human_format_honours_no_color_flag() {
        assert!(make_manager(OutputFormat::Human, false, false).supports_color());
        assert!(!make_manager(OutputFormat::Human, false, true).supports_color());
    }

    #[test]
    fn plain_and_json_never_color() {
        assert!(!make_manager(OutputFormat::Plain, false, false).supports_color());
        assert!(!make_manager(OutputFormat::Json, false, false).supports_color());
    }

    #[test]
    fn config_no_color_is_respected() {
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: false,
            config: None,
            output_format: OutputFormat::Human,
        };
        let mut config = AppConfig::default();
        config.output.no_color = true;
        assert!(!OutputManager::new(&args, &config).supports_color());
    }

    #[test]
    fn format_accessor_returns_resolved() {
        let out = make_manager(OutputFormat::Json, false, false);
        assert_eq!(out.format(), OutputFormat::Json);
        assert!(out.is_json());
    }

    #[test]
    fn status_lines_are_plain_without_color() {
        let line = status_line('\u{2713}', "Rendered 2 documents", Style::new().green(), true);
        assert_eq!(line, "\u{2713} Rendered 2 documents");
    }

    #[test]
    fn status_lines_carry_ansi_with_color() {
        let line = status_line('\u{2713}', "done", Style::new().green(), false);
        assert!(line.contains("\u{1b}["));
        assert!(line.contains("done"));
    }
}
