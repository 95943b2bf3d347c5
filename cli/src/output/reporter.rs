//! `TerminalReporter`: Presentation-layer implementation of `ProgressReporter`.
//!
//! Wraps `&OutputContext` and implements the `application::ports::ProgressReporter`
//! trait so application services can emit progress events without depending on
//! any presentation type directly.

use owo_colors::OwoColorize as _;
use serde_yaml::Mapping;

use crate::application::ports::ProgressReporter;
use crate::output::OutputContext;

/// Terminal progress reporter that wraps an `OutputContext`.
///
/// - `step()` prints `"  → {message}"`
/// - `success()` prints `"  ✓ {message}"`
/// - `warn()` prints `"  ! {message}"`
/// - `info()` prints `"  {message}"`
///
/// All of them are suppressed when `ctx.quiet`.
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
}

impl<'a> TerminalReporter<'a> {
    /// Create a new `TerminalReporter` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }
}

/// Indented YAML rendering of a values tree.
#[must_use]
pub fn format_values(values: &Mapping) -> String {
    if values.is_empty() {
        return "    {}".to_string();
    }
    match serde_yaml::to_string(values) {
        Ok(yaml) => yaml
            .lines()
            .map(|line| format!("    {line}"))
            .collect::<Vec<_>>()
            .join("\n"),
        Err(e) => format!("    <unrenderable values: {e}>"),
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        if !self.ctx.quiet {
            println!("  {} {message}", "→".style(self.ctx.styles.step));
        }
    }

    fn success(&self, message: &str) {
        if !self.ctx.quiet {
            println!("  {} {message}", "✓".style(self.ctx.styles.success));
        }
    }

    fn warn(&self, message: &str) {
        if !self.ctx.quiet {
            println!("  {} {message}", "!".style(self.ctx.styles.warning));
        }
    }

    fn info(&self, message: &str) {
        if !self.ctx.quiet {
            println!("  {message}");
        }
    }

    fn values(&self, release: &str, values: &Mapping) {
        if !self.ctx.quiet {
            println!(
                "  {}",
                format!("values for {release}:").style(self.ctx.styles.dim)
            );
            println!("{}", format_values(values));
        }
    }
}
