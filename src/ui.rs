//! Terminal adapter for the workflow engine.
//!
//! A pure presentation layer: it renders [`EngineView`]s and translates
//! operator gestures into engine commands. No workflow state lives here.

use crate::api::{Candidate, MediaKind};
use colored::Colorize;
use std::io::{self, IsTerminal, Write};

const OVERVIEW_MAX_CHARS: usize = 120;

/// One operator gesture, as typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gesture {
    /// 1-based index into the displayed candidate list.
    Select(usize),
    MarkProcessed,
    Skip,
    ManualSearch(String),
    Quit,
}

/// Parse a prompt line into a gesture.
///
/// `<number>` selects, `m` marks processed, `s` skips, `/ text` searches
/// manually, `q` quits. Unrecognized input yields `None`.
pub fn parse_gesture(line: &str) -> Option<Gesture> {
    let line = line.trim();

    if let Some(query) = line.strip_prefix('/') {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        return Some(Gesture::ManualSearch(query.to_string()));
    }

    if let Ok(n) = line.parse::<usize>() {
        if n >= 1 {
            return Some(Gesture::Select(n));
        }
        return None;
    }

    match line {
        "m" | "mark" => Some(Gesture::MarkProcessed),
        "s" | "skip" => Some(Gesture::Skip),
        "q" | "quit" => Some(Gesture::Quit),
        _ => None,
    }
}

/// UI configuration
#[derive(Debug, Clone)]
pub struct UiConfig {
    pub colors_enabled: bool,
}

impl UiConfig {
    pub fn new() -> Self {
        Self {
            colors_enabled: should_use_colors(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if we should use colors in output
fn should_use_colors() -> bool {
    // Check NO_COLOR env (standard: https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    io::stderr().is_terminal()
}

/// Styled output writer
pub struct Ui {
    config: UiConfig,
    writer: Box<dyn Write>,
}

impl Ui {
    /// Create a new UI with stderr output
    pub fn new(config: UiConfig) -> Self {
        if !config.colors_enabled {
            colored::control::set_override(false);
        }

        Self {
            config,
            writer: Box::new(io::stderr()),
        }
    }

    /// Create UI with custom writer (for testing)
    #[allow(dead_code)]
    pub fn with_writer(config: UiConfig, writer: Box<dyn Write>) -> Self {
        if !config.colors_enabled {
            colored::control::set_override(false);
        }

        Self { config, writer }
    }

    pub fn print_header(&mut self, version: &str) {
        let _ = writeln!(self.writer);
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{} v{}", "tmdb2folder".cyan().bold(), version);
        } else {
            let _ = writeln!(self.writer, "tmdb2folder v{}", version);
        }
        let _ = writeln!(self.writer);
    }

    /// Header for the folder currently being processed.
    pub fn folder_header(&mut self, folder: &str, kind: MediaKind, remaining: usize) {
        let _ = writeln!(self.writer);
        let tail = format!("({}, {} more queued)", kind.description(), remaining);
        if self.config.colors_enabled {
            let _ = writeln!(
                self.writer,
                "{} {} {}",
                "Processing:".bold(),
                folder.cyan().bold(),
                tail.dimmed()
            );
        } else {
            let _ = writeln!(self.writer, "Processing: {} {}", folder, tail);
        }
    }

    /// Numbered candidate list for the operator to pick from.
    pub fn candidate_list(&mut self, candidates: &[Candidate]) {
        for (i, c) in candidates.iter().enumerate() {
            let year = crate::rename::display_year(c.release_date.as_deref());
            let heading = format!("{}. {} ({}) [id-{}]", i + 1, c.title, year, c.id);

            if self.config.colors_enabled {
                let _ = writeln!(self.writer, "  {}", heading.bold());
            } else {
                let _ = writeln!(self.writer, "  {}", heading);
            }

            if !c.overview.is_empty() {
                let overview = trim_overview(&c.overview);
                if self.config.colors_enabled {
                    let _ = writeln!(self.writer, "     {}", overview.dimmed());
                } else {
                    let _ = writeln!(self.writer, "     {}", overview);
                }
            }
        }
    }

    pub fn no_matches(&mut self, folder: &str) {
        let msg = format!(
            "No TMDB results for '{}'. Search manually or skip.",
            folder
        );
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "!".yellow().bold(), msg.yellow());
        } else {
            let _ = writeln!(self.writer, "! {}", msg);
        }
    }

    /// Prompt for the next gesture.
    pub fn prompt(&mut self, has_candidates: bool) {
        let hint = if has_candidates {
            "[number] select | m mark processed | s skip | /text manual search | q quit"
        } else {
            "m mark processed | s skip | /text manual search | q quit"
        };
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{}", hint.dimmed());
            let _ = write!(self.writer, "{} ", ">".cyan().bold());
        } else {
            let _ = writeln!(self.writer, "{}", hint);
            let _ = write!(self.writer, "> ");
        }
        let _ = self.writer.flush();
    }

    /// Blocking-query loading indication.
    pub fn step(&mut self, msg: &str) {
        if self.config.colors_enabled {
            let _ = write!(self.writer, "{}", format!("{}... ", msg).dimmed());
        } else {
            let _ = write!(self.writer, "{}... ", msg);
        }
        let _ = self.writer.flush();
    }

    pub fn step_done(&mut self) {
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{}", "done".green());
        } else {
            let _ = writeln!(self.writer, "done");
        }
    }

    pub fn info(&mut self, msg: &str) {
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{}", msg.cyan());
        } else {
            let _ = writeln!(self.writer, "{}", msg);
        }
    }

    pub fn success(&mut self, msg: &str) {
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "✓".green().bold(), msg.green());
        } else {
            let _ = writeln!(self.writer, "* {}", msg);
        }
    }

    pub fn warning(&mut self, msg: &str) {
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "!".yellow().bold(), msg.yellow());
        } else {
            let _ = writeln!(self.writer, "! {}", msg);
        }
    }

    pub fn error(&mut self, msg: &str) {
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "✗".red().bold(), msg.red());
        } else {
            let _ = writeln!(self.writer, "X {}", msg);
        }
    }
}

fn trim_overview(overview: &str) -> String {
    let mut out: String = overview.chars().take(OVERVIEW_MAX_CHARS).collect();
    if overview.chars().count() > OVERVIEW_MAX_CHARS {
        out.push_str("...");
    }
    out
}
