use archive_core::{ArchiveError, Result};
use serde::{Deserialize, Serialize};

pub const MAX_QUERY_LEN: usize = 1000;
const MAX_PHRASE_LEN: usize = 500;

/// The parsed form of a user query string: semantic terms to embed, plus
/// the structural filters extracted from field-scoped and quoted clauses.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ParsedQuery {
    pub semantic_terms: Vec<String>,
    pub exact_phrases: Vec<String>,
    pub title_phrases: Vec<String>,
    pub author_filter: Option<String>,
}

impl ParsedQuery {
    /// Text handed to the embedding backend: the semantic terms joined by
    /// whitespace, or the original query if nothing but phrases/fields
    /// remain (a quote-only query must still embed to something).
    pub fn embedding_input(&self, original_query: &str) -> String {
        if self.semantic_terms.is_empty() {
            original_query.to_string()
        } else {
            self.semantic_terms.join(" ")
        }
    }
}

/// Parses a query string into semantic terms, exact phrases, title-scoped
/// phrases, and an author filter. Total and allocation-bounded: no regex,
/// only literal scanning.
pub fn parse_query(input: &str) -> Result<ParsedQuery> {
    if input.chars().count() > MAX_QUERY_LEN {
        return Err(ArchiveError::query_too_long(input.chars().count(), MAX_QUERY_LEN));
    }

    let cleaned: String = input.chars().filter(|&c| c != '\0').collect();

    let mut parsed = ParsedQuery::default();
    let chars: Vec<char> = cleaned.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        if chars[i].is_whitespace() {
            i += 1;
            continue;
        }

        if let Some((field, phrase, consumed)) = try_field_phrase(&chars, i) {
            i += consumed;
            if let Some(phrase) = normalize_phrase(&phrase) {
                match field.as_str() {
                    "title" => parsed.title_phrases.push(phrase),
                    "author" => parsed.author_filter = Some(phrase),
                    _ => unreachable!("whitelist checked in try_field_phrase"),
                }
            }
            continue;
        }

        if chars[i] == '"' {
            if let Some((phrase, consumed)) = try_bare_phrase(&chars, i) {
                i += consumed;
                if let Some(phrase) = normalize_phrase(&phrase) {
                    parsed.exact_phrases.push(phrase);
                }
                continue;
            }
        }

        let (word, consumed) = read_word(&chars, i);
        i += consumed;
        if !word.is_empty() {
            parsed.semantic_terms.push(word);
        }
    }

    Ok(parsed)
}

/// Matches `field:"phrase"` where `field` is in the whitelist. Returns
/// `(field, phrase_body, chars_consumed)`. Anything not matching the exact
/// shape is left for `read_word` to consume as a literal word.
fn try_field_phrase(chars: &[char], start: usize) -> Option<(String, String, usize)> {
    let colon = chars[start..].iter().position(|&c| c == ':')?;
    let field: String = chars[start..start + colon].iter().collect();
    let field_lower = field.to_ascii_lowercase();
    if field_lower != "title" && field_lower != "author" {
        return None;
    }
    if field.chars().any(|c| c.is_whitespace() || c == '"') {
        return None;
    }

    let quote_start = start + colon + 1;
    if chars.get(quote_start) != Some(&'"') {
        return None;
    }

    let (phrase, phrase_len) = read_phrase_body(chars, quote_start + 1)?;
    let consumed = (quote_start + 1 + phrase_len + 1) - start;
    Some((field_lower, phrase, consumed))
}

fn try_bare_phrase(chars: &[char], start: usize) -> Option<(String, usize)> {
    let (phrase, phrase_len) = read_phrase_body(chars, start + 1)?;
    Some((phrase, phrase_len + 2))
}

/// Reads characters until the closing `"`. Returns `None` on an
/// unterminated quote, per the grammar's rule that those are ignored
/// (left for the caller to re-scan as literal words).
fn read_phrase_body(chars: &[char], start: usize) -> Option<(String, usize)> {
    let end = chars[start..].iter().position(|&c| c == '"')?;
    if end > MAX_PHRASE_LEN {
        return None;
    }
    let body: String = chars[start..start + end].iter().collect();
    Some((body, end))
}

fn normalize_phrase(phrase: &str) -> Option<String> {
    let trimmed = phrase.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn read_word(chars: &[char], start: usize) -> (String, usize) {
    let end = chars[start..]
        .iter()
        .position(|c| c.is_whitespace() || *c == '"')
        .map(|p| start + p)
        .unwrap_or(chars.len());
    let word: String = chars[start..end].iter().collect();
    (word, (end - start).max(1))
}
