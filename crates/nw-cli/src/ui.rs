//! UI utilities for the CLI

use colored::*;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, size, Clear, ClearType},
};
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use nw_agent::AgentOutcome;
use nw_core::{DocumentUnit, Error, Result};
use nw_rag::QAResponse;

pub const PROMPT: &str = "notes>";
const FILES_PROMPT: &str = "files>";

/// Display startup banner
pub fn display_banner() {
    let terminal_width = size().map(|(w, _)| w as usize).unwrap_or(80);
    let banner_width = std::cmp::min(67, terminal_width.saturating_sub(4)).max(40);

    let top_border = format!("┌{}┐", "─".repeat(banner_width - 2));
    let bottom_border = format!("└{}┘", "─".repeat(banner_width - 2));
    let empty_line = format!("│{}│", " ".repeat(banner_width - 2));

    println!();
    println!("{}", top_border.blue());
    println!("{}", empty_line.blue());

    let title = "NotesWise - ask your lecture notes";
    let title_line = format!(
        "│  {}{}│",
        title.blue().bold(),
        " ".repeat(banner_width.saturating_sub(title.chars().count() + 4))
    );
    println!("{}", title_line);

    println!("{}", empty_line.blue());

    let feature_lines = [
        "Answers come from your notes first, the web second.",
        "",
        "Features:",
        "• PDF, text and Markdown notes",
        "• Cited pages for every answer",
        "• A tutor agent that can also search the web",
        "",
        concat!("v", env!("CARGO_PKG_VERSION")),
    ];

    for line in feature_lines {
        if line.is_empty() {
            println!("{}", empty_line.blue());
            continue;
        }
        let padding = " ".repeat(banner_width.saturating_sub(line.chars().count() + 4));
        let content = if line.starts_with('v') {
            format!("│  {}{}│", line.dimmed(), padding)
        } else {
            format!("│  {}{}│", line, padding)
        };
        println!("{}", content.blue());
    }

    println!("{}", empty_line.blue());
    println!("{}", bottom_border.blue());
    println!();
    println!(
        "{}",
        "💡 Tip: Ask a question about your notes, or 'help' for commands".dimmed()
    );
    println!();
}

/// Display help message
pub fn print_help() {
    println!("{}", "Available commands:".bold());
    println!("  {} - Ask anything about the loaded notes", "question".green());
    println!("  {} - Show this help message", "help".green());
    println!("  {} - Exit the application", "exit/quit".green());
    println!();
    println!("{}", "Examples:".bold());
    println!("  What is small-step operational semantics?");
    println!("  How does a store differ from an environment?");
}

/// Read one line after `label`, with line editing when attached to a terminal.
///
/// Returns `None` once input is exhausted (end of a pipe, Ctrl-D, Ctrl-C).
pub fn read_line(label: &str, history: &mut Vec<String>) -> Result<Option<String>> {
    if !io::stdin().is_terminal() {
        print!("{} ", label.green().bold());
        io::stdout().flush()?;
        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Ok(None);
        }
        let input = input.trim().to_string();
        if !input.is_empty() {
            history.push(input.clone());
        }
        return Ok(Some(input));
    }

    enable_raw_mode()?;
    let result = edit_line(label, history);
    disable_raw_mode()?;
    println!();

    let input = result?;
    if let Some(line) = &input {
        if !line.is_empty() {
            history.push(line.clone());
        }
    }
    Ok(input)
}

/// Raw-mode line editor with history navigation (↑/↓)
fn edit_line(label: &str, history: &[String]) -> Result<Option<String>> {
    let mut input = String::new();
    let mut history_index: Option<usize> = None;

    let redraw = |input: &str| -> io::Result<()> {
        let mut stdout = io::stdout();
        write!(stdout, "\r{} {}", label.green().bold(), input)?;
        execute!(stdout, Clear(ClearType::UntilNewLine))
    };

    redraw(&input)?;

    loop {
        let Event::Key(key_event) = event::read()? else {
            continue;
        };
        if key_event.kind != KeyEventKind::Press {
            continue;
        }
        match key_event.code {
            KeyCode::Enter => return Ok(Some(input.trim().to_string())),
            KeyCode::Char('c') | KeyCode::Char('d')
                if key_event.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                return Ok(None);
            }
            KeyCode::Char(c) => {
                input.push(c);
                redraw(&input)?;
            }
            KeyCode::Backspace => {
                input.pop();
                redraw(&input)?;
            }
            KeyCode::Up if !history.is_empty() => {
                let new_index = match history_index {
                    None => history.len() - 1,
                    Some(idx) => idx.saturating_sub(1),
                };
                history_index = Some(new_index);
                input = history[new_index].clone();
                redraw(&input)?;
            }
            KeyCode::Down => {
                if let Some(idx) = history_index {
                    if idx + 1 < history.len() {
                        history_index = Some(idx + 1);
                        input = history[idx + 1].clone();
                    } else {
                        history_index = None;
                        input.clear();
                    }
                    redraw(&input)?;
                }
            }
            KeyCode::Esc => {
                input.clear();
                history_index = None;
                redraw(&input)?;
            }
            _ => {}
        }
    }
}

/// Split a comma-separated list of paths, dropping blanks and surrounding quotes
pub fn parse_paths(input: &str) -> Vec<PathBuf> {
    input
        .split(',')
        .map(|p| p.trim().trim_matches(|c| c == '"' || c == '\''))
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Return `initial` if it names any file, otherwise keep asking until some are given
pub fn wait_for_files(initial: Vec<PathBuf>) -> Result<Vec<PathBuf>> {
    if !initial.is_empty() {
        return Ok(initial);
    }

    println!(
        "{} Enter the paths of your lecture notes (PDF, .txt or .md), separated by commas",
        "📄".cyan()
    );
    let mut history = Vec::new();
    loop {
        match read_line(FILES_PROMPT, &mut history)? {
            Some(line) => {
                let paths = parse_paths(&line);
                if !paths.is_empty() {
                    return Ok(paths);
                }
                println!("{}", "At least one file is needed to continue.".yellow());
            }
            None => {
                return Err(Error::Configuration(
                    "no lecture notes were given".to_string(),
                ));
            }
        }
    }
}

/// Citation lines for the consulted units, in retrieval order
pub fn format_sources(units: &[DocumentUnit]) -> Vec<String> {
    units.iter().map(DocumentUnit::citation).collect()
}

pub fn print_answer(response: &QAResponse) {
    println!();
    println!("{}", response.answer);
    println!();
    println!("{}", "Source information consulted:".bold());
    for line in format_sources(&response.sources) {
        println!("  {} {}", "•".blue(), line);
    }
    println!();
}

pub fn print_agent_answer(outcome: &AgentOutcome) {
    println!("{} {}", "🧑‍🏫".cyan(), "Tutor says:".cyan().bold());
    println!("{}", outcome.answer);
    if !outcome.steps.is_empty() {
        let tools: Vec<&str> = outcome.steps.iter().map(|s| s.action.tool.as_str()).collect();
        println!("{}", format!("(consulted: {})", tools.join(" → ")).as_str().dimmed());
    }
    println!();
}

pub fn print_error(context: &str, error: &Error) {
    eprintln!("{} {}: {}", "❌".red(), context, error);
}
