//! Template rendering and placeholder validation.
//!
//! Rendering substitutes `{variable}` tokens from a value map and joins
//! sections, in declaration order, with blank lines. Rendering never fails on
//! a missing variable: unresolved tokens become `[VARIABLE_NOT_PROVIDED]` so
//! a half-filled proposal is visible instead of silently wrong.

use std::collections::HashMap;

use thiserror::Error;

use super::ProposalTemplate;

/// Marker substituted for tokens with no value. Loud on purpose.
pub const MISSING_VARIABLE_MARKER: &str = "[VARIABLE_NOT_PROVIDED]";

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("section '{section}' must be a string")]
    SectionNotString { section: String },

    #[error("section '{section}' uses token '{{{token}}}' not declared in variables")]
    UndeclaredToken { section: String, token: String },
}

/// Extracts every `{token}` from a template string, in order of appearance.
/// A token is a non-empty brace-delimited name with no inner braces; `{}` and
/// unterminated `{` are left alone.
pub fn placeholder_tokens(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find('{') {
        let after_open = &rest[open + 1..];
        match after_open.find(['{', '}']) {
            // Well-formed token: next brace is a closer and the name is non-empty
            Some(close) if after_open.as_bytes()[close] == b'}' && close > 0 => {
                tokens.push(after_open[..close].to_string());
                rest = &after_open[close + 1..];
            }
            // `{}` or `{...{` — skip past this opener and keep scanning
            Some(next_brace) => {
                rest = &after_open[next_brace..];
            }
            None => break,
        }
    }

    tokens
}

/// Checks the token/variable convention: every token used in any section must
/// be declared in `variables`. Returns the declared-but-unused variable names
/// (allowed, surfaced as warnings to the caller).
pub fn validate_template(template: &ProposalTemplate) -> Result<Vec<String>, TemplateError> {
    let mut used: Vec<String> = Vec::new();

    for (section, value) in &template.sections {
        let text = value.as_str().ok_or_else(|| TemplateError::SectionNotString {
            section: section.clone(),
        })?;

        for token in placeholder_tokens(text) {
            if !template.variables.contains(&token) {
                return Err(TemplateError::UndeclaredToken {
                    section: section.clone(),
                    token,
                });
            }
            if !used.contains(&token) {
                used.push(token);
            }
        }
    }

    let unused = template
        .variables
        .iter()
        .filter(|v| !used.contains(v))
        .cloned()
        .collect();

    Ok(unused)
}

/// Renders the template with the provided variable values: every section in
/// declaration order, tokens substituted, joined by blank lines.
pub fn render(
    template: &ProposalTemplate,
    variables: &HashMap<String, String>,
) -> Result<String, TemplateError> {
    let mut rendered_sections = Vec::with_capacity(template.sections.len());

    for (section, value) in &template.sections {
        let text = value.as_str().ok_or_else(|| TemplateError::SectionNotString {
            section: section.clone(),
        })?;
        rendered_sections.push(substitute(text, variables));
    }

    Ok(rendered_sections.join("\n\n"))
}

fn substitute(text: &str, variables: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];
        match after_open.find(['{', '}']) {
            Some(close) if after_open.as_bytes()[close] == b'}' && close > 0 => {
                let token = &after_open[..close];
                match variables.get(token) {
                    Some(value) => out.push_str(value),
                    None => out.push_str(MISSING_VARIABLE_MARKER),
                }
                rest = &after_open[close + 1..];
            }
            Some(next_brace) => {
                // Not a token — emit the opener (and any name fragment) verbatim
                out.push('{');
                out.push_str(&after_open[..next_brace]);
                rest = &after_open[next_brace..];
            }
            None => {
                out.push('{');
                rest = after_open;
                break;
            }
        }
    }

    out.push_str(rest);
    out
}
