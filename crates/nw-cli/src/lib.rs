//! Terminal front end for NotesWise

mod session;
mod ui;


pub use session::{handle_question, NotesSession};
pub use ui::{
    display_banner, format_sources, parse_paths, print_agent_answer, print_answer, print_error,
    print_help, read_line, wait_for_files, PROMPT,
};

// Re-export core types
pub use nw_core::{Error, Result};
