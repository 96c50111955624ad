//! Rendering contract and the default terminal renderer.
//!
//! `RenderSink` is the console contract consumed by the engine and runner.
//! `Renderer` is the terminal implementation; tests substitute a recording
//! sink without touching stdout/stderr.

use crossterm::style::Stylize;

use super::settings;

/// Injectable console interface used by the engine.
pub trait RenderSink {
    /// Render a sequence banner: title and description framed by rules.
    fn banner(&self, title: &str, desc: &str);
    /// Render progress text (window/pane switches, splits). Hidden when quiet.
    fn activity(&self, text: &str);
    /// Render the outcome of a DECIDE lookup.
    fn decision(&self, text: &str);
    /// Render a transfer of control to another sequence.
    fn redirect(&self, target: &str);
    /// Render an ECHO message on stdout.
    fn echo(&self, message: &str);
    /// Render captured pane text as an indented block.
    fn output_block(&self, text: &str);
    /// Render an undecorated stdout line (listings).
    fn plain(&self, text: &str);
    /// Render a warning line.
    fn warn(&self, msg: &str);
    /// Render an error line.
    fn error(&self, msg: &str);
}

/// Banner lines for `title`/`desc`, rules as wide as the longer text.
pub fn banner_lines(title: &str, desc: &str) -> Vec<String> {
    let width = title.chars().count().max(desc.chars().count());
    let top = settings::BANNER_RULE_TOP.to_string().repeat(width);
    let sub = settings::BANNER_RULE_SUB.to_string().repeat(width);
    let mut lines = Vec::new();
    if !title.is_empty() {
        lines.push(String::new());
        lines.push(top);
        lines.push(title.to_string());
        lines.push(sub.clone());
    }
    if !desc.is_empty() {
        lines.push(desc.to_string());
        lines.push(sub);
    }
    lines
}

/// Handles all terminal output formatting.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    /// Whether ANSI color/style output is enabled.
    color: bool,
    /// Suppress activity lines and banners.
    quiet: bool,
}

impl Renderer {
    pub fn new(color: bool, quiet: bool) -> Self {
        Self { color, quiet }
    }

    fn styled_line(&self, text: &str, color: crossterm::style::Color) {
        if self.color {
            eprintln!("{}", text.with(color));
        } else {
            eprintln!("{text}");
        }
    }
}

impl RenderSink for Renderer {
    fn banner(&self, title: &str, desc: &str) {
        if self.quiet {
            return;
        }
        for line in banner_lines(title, desc) {
            let color = if line == title {
                settings::COLOR_BANNER_TITLE
            } else if line == desc {
                settings::COLOR_BANNER_DESC
            } else {
                settings::COLOR_BANNER_RULE
            };
            if self.color {
                println!("{}", line.as_str().with(color).bold());
            } else {
                println!("{line}");
            }
        }
    }

    fn activity(&self, text: &str) {
        if self.quiet {
            return;
        }
        if self.color {
            eprintln!(
                "{} {}",
                settings::GLYPH_ACTIVITY.with(settings::COLOR_ACTIVITY_GLYPH),
                text.with(settings::COLOR_ACTIVITY_TEXT)
            );
        } else {
            eprintln!("{} {text}", settings::GLYPH_ACTIVITY);
        }
    }

    fn decision(&self, text: &str) {
        if !self.quiet {
            self.styled_line(text, settings::COLOR_DECISION);
        }
    }

    fn redirect(&self, target: &str) {
        if !self.quiet {
            self.styled_line(
                &format!("Switching sequence to {target}"),
                settings::COLOR_REDIRECT,
            );
        }
    }

    fn echo(&self, message: &str) {
        println!("{message}");
    }

    fn output_block(&self, text: &str) {
        for line in text.lines() {
            if self.color {
                eprintln!(
                    "{}{}",
                    settings::INDENT_1,
                    line.with(settings::COLOR_OUTPUT)
                );
            } else {
                eprintln!("{}{line}", settings::INDENT_1);
            }
        }
    }

    fn plain(&self, text: &str) {
        println!("{text}");
    }

    fn warn(&self, msg: &str) {
        if self.color {
            eprintln!(
                "{} {msg}",
                settings::LABEL_WARNING.with(settings::COLOR_WARNING).bold()
            );
        } else {
            eprintln!("{} {msg}", settings::LABEL_WARNING);
        }
    }

    fn error(&self, msg: &str) {
        if self.color {
            eprintln!(
                "{} {msg}",
                settings::LABEL_ERROR.with(settings::COLOR_ERROR).bold()
            );
        } else {
            eprintln!("{} {msg}", settings::LABEL_ERROR);
        }
    }
}
