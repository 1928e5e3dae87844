//! Web search backend for the NotesWise agent's `Search` tool.

mod client;
mod config;

pub use client::{extract_answer, SerpApiClient, NO_RESULT};
pub use config::{SerpApiConfig, DEFAULT_BASE_URL};
