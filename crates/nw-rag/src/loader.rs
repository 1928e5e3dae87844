//! Document loaders
//!
//! A loader turns one file into its pages of plain text. PDFs are read with
//! `lopdf`, one entry per PDF page. Plain text and Markdown files use form
//! feeds (`\x0c`) as page breaks, so a file without them is a single page.

use std::fs;
use std::path::Path;

use pulldown_cmark::{Event, Parser, TagEnd};
use tracing::debug;

use nw_core::{Error, Result};

const PAGE_BREAK: char = '\x0c';

/// One page of extracted text
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedPage {
    pub source: String,
    /// 0-indexed
    pub page: u32,
    pub text: String,
}

/// Document formats the indexer can read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Text,
    Markdown,
}

impl DocumentKind {
    /// Pick a format from the file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "txt" | "text" => Some(DocumentKind::Text),
            "md" | "markdown" => Some(DocumentKind::Markdown),
            _ => None,
        }
    }
}

/// Load every page of the document at `path`
pub fn load_document(path: &Path) -> Result<Vec<LoadedPage>> {
    let source = path.display().to_string();
    let kind = DocumentKind::from_path(path).ok_or_else(|| {
        Error::document_load(&source, "unsupported file type (expected .pdf, .txt or .md)")
    })?;

    let pages = match kind {
        DocumentKind::Pdf => load_pdf(path, &source)?,
        DocumentKind::Text => split_pages(&read_text(path, &source)?)
            .map(str::to_string)
            .collect(),
        DocumentKind::Markdown => split_pages(&read_text(path, &source)?)
            .map(markdown_to_text)
            .collect(),
    };

    debug!(%source, pages = pages.len(), ?kind, "document loaded");

    Ok(pages
        .into_iter()
        .enumerate()
        .map(|(page, text)| LoadedPage {
            source: source.clone(),
            page: page as u32,
            text,
        })
        .collect())
}

fn read_text(path: &Path, source: &str) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::document_load(source, e.to_string()))
}

fn split_pages(text: &str) -> impl Iterator<Item = &str> {
    text.split(PAGE_BREAK)
}

fn load_pdf(path: &Path, source: &str) -> Result<Vec<String>> {
    let doc = lopdf::Document::load(path)
        .map_err(|e| Error::document_load(source, format!("not a readable PDF: {}", e)))?;

    // get_pages is keyed by 1-based page number, in document order
    doc.get_pages()
        .keys()
        .map(|&number| {
            doc.extract_text(&[number]).map_err(|e| {
                Error::document_load(
                    source,
                    format!("failed to extract text from page {}: {}", number, e),
                )
            })
        })
        .collect()
}

/// Flatten Markdown into plain text, one blank line between blocks
fn markdown_to_text(markdown: &str) -> String {
    let mut out = String::new();
    for event in Parser::new(markdown) {
        match event {
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::SoftBreak | Event::HardBreak => out.push('\n'),
            Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item | TagEnd::CodeBlock) => {
                out.push_str("\n\n")
            }
            _ => {}
        }
    }
    out.trim_end().to_string()
}
