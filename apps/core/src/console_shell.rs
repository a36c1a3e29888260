//! Terminal stand-in for the floating search window.
//!
//! Every input line is one event: plain text replaces the query, an empty
//! line submits, and `:`-prefixed commands cover the rest (`:up`, `:down`,
//! `:N` to pick row N, `:toggle` for the hotkey/status icon, `:esc`, `:quit`).

use std::io::{BufRead, Write};

use crate::model::SearchResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayEvent {
    Toggle,
    QueryChanged(String),
    MoveSelection(i32),
    Submit,
    /// Zero-based row index.
    Activate(usize),
    Escape,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayRow {
    pub icon: String,
    pub title: String,
    pub subtitle: String,
}

impl From<&SearchResult> for OverlayRow {
    fn from(value: &SearchResult) -> Self {
        Self {
            icon: value.kind.icon_hint().to_string(),
            title: value.title.clone(),
            subtitle: value.subtitle.clone(),
        }
    }
}

pub fn parse_event(line: &str) -> OverlayEvent {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return OverlayEvent::Submit;
    }

    let Some(command) = line.strip_prefix(':') else {
        return OverlayEvent::QueryChanged(line.to_string());
    };

    match command.trim().to_ascii_lowercase().as_str() {
        "toggle" | "hotkey" => OverlayEvent::Toggle,
        "up" | "k" => OverlayEvent::MoveSelection(-1),
        "down" | "j" => OverlayEvent::MoveSelection(1),
        "esc" | "escape" => OverlayEvent::Escape,
        "q" | "quit" => OverlayEvent::Quit,
        "clear" => OverlayEvent::QueryChanged(String::new()),
        other => match other.parse::<usize>() {
            Ok(row) if row > 0 => OverlayEvent::Activate(row - 1),
            // Unknown commands are searched for literally.
            _ => OverlayEvent::QueryChanged(line.to_string()),
        },
    }
}

pub struct ConsoleShell<R, W> {
    input: R,
    output: W,
    visible: bool,
}

impl<R: BufRead, W: Write> ConsoleShell<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            visible: false,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// `None` once input is exhausted.
    pub fn next_event(&mut self) -> std::io::Result<Option<OverlayEvent>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(parse_event(&line)))
    }

    pub fn show_and_focus(&mut self, hotkey_hint: &str) -> std::io::Result<()> {
        self.visible = true;
        writeln!(self.output, "--- anilauncher ({hotkey_hint} to toggle) ---")?;
        self.output.flush()
    }

    pub fn hide(&mut self) -> std::io::Result<()> {
        self.visible = false;
        writeln!(self.output, "--- hidden ---")?;
        self.output.flush()
    }

    pub fn set_results(&mut self, rows: &[OverlayRow], selected_index: usize) -> std::io::Result<()> {
        for (index, row) in rows.iter().enumerate() {
            let marker = if index == selected_index { '>' } else { ' ' };
            writeln!(
                self.output,
                "{marker} {:>2}. [{}] {}  ({})",
                index + 1,
                row.icon,
                row.title,
                row.subtitle
            )?;
        }
        self.output.flush()
    }

    pub fn set_status_text(&mut self, message: &str) -> std::io::Result<()> {
        if message.is_empty() {
            return Ok(());
        }
        writeln!(self.output, "  {message}")?;
        self.output.flush()
    }
}
