//! Proposal templates — named prose sections with `{placeholder}` tokens.
//!
//! A template is pure data: sections (ordered), the declared variable list,
//! and a tone label. Rendering and placeholder validation live in `render`;
//! the mapping from job/profile/plan to placeholder values lives in
//! `variables`.

pub mod builtin;
pub mod handlers;
pub mod render;
pub mod variables;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Tone label carried by a template. Uninterpreted by rendering; the writer
/// agent uses it to calibrate prose style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Professional,
    Casual,
    Technical,
    Creative,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Casual => "casual",
            Tone::Technical => "technical",
            Tone::Creative => "creative",
        }
    }
}

/// Proposal template structure.
///
/// `sections` keeps declaration order (serde_json `preserve_order`); rendering
/// concatenates sections in that order. Every `{token}` used inside a section
/// must appear in `variables` — enforced when a template is saved, not when
/// one is merely loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalTemplate {
    pub name: String,
    /// section name → template string containing zero or more `{var}` tokens
    pub sections: Map<String, Value>,
    pub variables: Vec<String>,
    pub tone: Tone,
}
