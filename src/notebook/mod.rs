//! Notebook document model.
//!
//! Canonical in-memory shape of a notebook: an ordered sequence of [`Cell`]s,
//! each carrying source text, a kind, an optional execution order, and
//! rendered outputs. Cells have no persistent identity across reconciliation
//! passes - identity is purely positional.
//!
//! # Modules
//!
//! - `parse` - `.ipynb` bytes to canonical cell sequence

pub mod parse;

pub use parse::{ParseError, parse_notebook};

/// Language tag for code cells when the document declares no kernel language.
pub const FALLBACK_LANGUAGE: &str = "python";

/// Fixed language tag for markup cells.
pub const MARKUP_LANGUAGE: &str = "markdown";

/// What kind of cell this is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Code,
    Markup,
}

impl CellKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Markup => "markup",
        }
    }
}

/// Kind of execution result an output record represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Stream,
    Result,
    DisplayData,
    Error,
}

/// A single rendered artifact: a MIME tag plus a text or binary payload.
///
/// No independent identity; always owned by an [`Output`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputItem {
    Text { mime: String, text: String },
    Binary { mime: String, data: Vec<u8> },
}

impl OutputItem {
    pub fn mime(&self) -> &str {
        match self {
            Self::Text { mime, .. } | Self::Binary { mime, .. } => mime,
        }
    }
}

/// One execution result: a kind tag and its rendered items.
///
/// Owned exclusively by a [`Cell`]; recreated wholesale on every
/// reconciliation, never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub kind: OutputKind,
    pub items: Vec<OutputItem>,
}

/// One unit of a notebook document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub kind: CellKind,
    /// Verbatim source text (fragments joined with no separator).
    pub source: String,
    /// Declared kernel language for code cells, `"markdown"` for markup.
    pub language: String,
    /// Non-negative execution order, when the cell has been executed.
    pub execution_order: Option<u32>,
    pub outputs: Vec<Output>,
}
