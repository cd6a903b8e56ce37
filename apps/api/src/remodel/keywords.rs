//! Keyword Extractor — derives weighted, typed keywords from the qualification
//! sections of a posting.
//!
//! Pluggable via the `KeywordSource` trait (the same seam pattern as any other
//! swappable backend in this service): an optional model-assisted primary and a
//! deterministic vocabulary fallback, composed by `FallbackKeywordSource`. The
//! decorator is the single place the mandatory-fallback invariant lives — the
//! orchestrator never needs to know which path produced the keywords.

use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::llm_client::{LlmClient, LlmError};
use crate::remodel::prompts::{KEYWORD_EXTRACT_PROMPT_TEMPLATE, KEYWORD_EXTRACT_SYSTEM};
use crate::remodel::sections::ExtractedSections;
use crate::remodel::vocab;

pub const MIN_WEIGHT: f64 = 0.2;
pub const MAX_WEIGHT: f64 = 1.0;

/// Bound on how many tokens the vocabulary-independent pass may promote.
const TOKEN_PASS_LIMIT: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum KeywordKind {
    Tech,
    Role,
    Etc,
}

/// A weighted, typed term derived from a posting. Terms are deduplicated
/// case-insensitively; `term` keeps its display casing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub term: String,
    pub weight: f64,
    pub kind: KeywordKind,
}

impl Keyword {
    pub fn new(term: impl Into<String>, weight: f64, kind: KeywordKind) -> Self {
        Self {
            term: term.into(),
            weight: weight.clamp(MIN_WEIGHT, MAX_WEIGHT),
            kind,
        }
    }
}

#[derive(Debug, Error)]
pub enum KeywordError {
    #[error("model call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("model returned no usable keywords")]
    Empty,
}

/// A strategy for turning qualification sections into weighted keywords.
/// Carried in `AppState` as `Arc<dyn KeywordSource>`.
#[async_trait]
pub trait KeywordSource: Send + Sync {
    async fn extract(&self, sections: &ExtractedSections) -> Result<Vec<Keyword>, KeywordError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Model-assisted primary
// ────────────────────────────────────────────────────────────────────────────

/// Structured keyword extraction through the LLM. Any failure — transport,
/// non-2xx, unparseable JSON, empty result — surfaces as `KeywordError` and is
/// absorbed by `FallbackKeywordSource`.
pub struct LlmKeywordSource {
    llm: LlmClient,
}

impl LlmKeywordSource {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[derive(Debug, Deserialize)]
struct KeywordPayload {
    #[serde(default)]
    keywords: Vec<RawKeyword>,
}

#[derive(Debug, Deserialize)]
struct RawKeyword {
    #[serde(default)]
    term: String,
    weight: Option<f64>,
    kind: Option<String>,
}

#[async_trait]
impl KeywordSource for LlmKeywordSource {
    async fn extract(&self, sections: &ExtractedSections) -> Result<Vec<Keyword>, KeywordError> {
        let prompt = KEYWORD_EXTRACT_PROMPT_TEMPLATE
            .replace("{required}", &bulleted(&sections.required))
            .replace("{preferred}", &bulleted(&sections.preferred));

        let payload: KeywordPayload = self.llm.call_json(&prompt, KEYWORD_EXTRACT_SYSTEM).await?;

        let keywords = merge_keywords(payload.keywords.into_iter().filter_map(|raw| {
            let term = raw.term.trim();
            if term.is_empty() {
                return None;
            }
            let kind = match raw.kind.as_deref().map(str::to_uppercase).as_deref() {
                Some("ROLE") => KeywordKind::Role,
                Some("ETC") => KeywordKind::Etc,
                _ => KeywordKind::Tech,
            };
            Some(Keyword::new(term, raw.weight.unwrap_or(0.6), kind))
        }));

        if keywords.is_empty() {
            return Err(KeywordError::Empty);
        }
        debug!("model extracted {} keywords", keywords.len());
        Ok(keywords)
    }
}

fn bulleted(lines: &[String]) -> String {
    lines
        .iter()
        .map(|l| format!("- {l}"))
        .collect::<Vec<_>>()
        .join("\n")
}

// ────────────────────────────────────────────────────────────────────────────
// Deterministic vocabulary fallback
// ────────────────────────────────────────────────────────────────────────────

/// Weights assigned by the fallback passes. Empirically chosen; kept as
/// configuration rather than burned-in constants.
#[derive(Debug, Clone)]
pub struct VocabularyWeights {
    /// Vocabulary term found in the preferred section.
    pub preferred: f64,
    /// Vocabulary term found only in the required section.
    pub required: f64,
    /// Technology-like free token found in the preferred section.
    pub token_preferred: f64,
    /// Technology-like free token found only in the required section.
    pub token_required: f64,
}

impl Default for VocabularyWeights {
    fn default() -> Self {
        Self {
            preferred: 0.9,
            required: 0.7,
            token_preferred: 0.6,
            token_required: 0.4,
        }
    }
}

/// The deterministic fallback: curated vocabulary matching plus a secondary
/// token-frequency pass. Pure and infallible — the guarantee the whole
/// pipeline leans on when the model path is disabled or broken.
#[derive(Default)]
pub struct VocabularyKeywordSource {
    weights: VocabularyWeights,
}

impl VocabularyKeywordSource {
    pub fn new(weights: VocabularyWeights) -> Self {
        Self { weights }
    }
}

#[async_trait]
impl KeywordSource for VocabularyKeywordSource {
    async fn extract(&self, sections: &ExtractedSections) -> Result<Vec<Keyword>, KeywordError> {
        Ok(extract_vocabulary_keywords(sections, &self.weights))
    }
}

static WORD_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z0-9가-힣]{2,}").unwrap());

/// Runs the vocabulary pass, the role pass, and the token pass, then merges
/// case-insensitively keeping the maximum weight per term.
pub fn extract_vocabulary_keywords(
    sections: &ExtractedSections,
    weights: &VocabularyWeights,
) -> Vec<Keyword> {
    let required_lower = sections.required_text().to_lowercase();
    let preferred_lower = sections.preferred_text().to_lowercase();

    let vocab_hits = vocab::TECH_TERMS
        .iter()
        .map(|&term| (term, KeywordKind::Tech))
        .chain(vocab::ROLE_TERMS.iter().map(|&term| (term, KeywordKind::Role)))
        .filter_map(|(term, kind)| {
            let needle = term.to_lowercase();
            let weight = if preferred_lower.contains(&needle) {
                weights.preferred
            } else if required_lower.contains(&needle) {
                weights.required
            } else {
                return None;
            };
            Some(Keyword::new(term, weight, kind))
        });

    let token_hits = token_pass(sections, &preferred_lower, weights);

    merge_keywords(vocab_hits.chain(token_hits))
}

/// Vocabulary-independent pass: tokenizes the combined section text, counts
/// term frequency, and promotes technology-looking tokens at a low weight.
fn token_pass(
    sections: &ExtractedSections,
    preferred_lower: &str,
    weights: &VocabularyWeights,
) -> Vec<Keyword> {
    let combined = format!("{}\n{}", sections.required_text(), sections.preferred_text());

    // lowercase token -> (display casing of first occurrence, frequency)
    let mut counts: IndexMap<String, (String, u32)> = IndexMap::new();
    for token in WORD_TOKEN.find_iter(&combined) {
        let token = token.as_str();
        if token.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        let lower = token.to_lowercase();
        if !looks_technical(&lower) {
            continue;
        }
        counts
            .entry(lower)
            .and_modify(|e| e.1 += 1)
            .or_insert_with(|| (token.to_string(), 1));
    }

    // Stable sort: highest frequency first, first-seen order on ties.
    let mut ranked: Vec<_> = counts.into_iter().collect();
    ranked.sort_by_key(|(_, (_, freq))| std::cmp::Reverse(*freq));

    ranked
        .into_iter()
        .take(TOKEN_PASS_LIMIT)
        .map(|(lower, (display, _))| {
            let weight = if preferred_lower.contains(&lower) {
                weights.token_preferred
            } else {
                weights.token_required
            };
            Keyword::new(display, weight, KeywordKind::Tech)
        })
        .collect()
}

fn looks_technical(token: &str) -> bool {
    vocab::TECH_HINT_FRAGMENTS.iter().any(|f| token.contains(f))
}

/// Deduplicates by lowercase term. On a collision the strictly heavier keyword
/// wins outright (weight, kind, and display casing).
fn merge_keywords(keywords: impl IntoIterator<Item = Keyword>) -> Vec<Keyword> {
    let mut merged: IndexMap<String, Keyword> = IndexMap::new();
    for keyword in keywords {
        let key = keyword.term.to_lowercase();
        match merged.entry(key) {
            indexmap::map::Entry::Occupied(mut entry) => {
                if keyword.weight > entry.get().weight {
                    entry.insert(keyword);
                }
            }
            indexmap::map::Entry::Vacant(entry) => {
                entry.insert(keyword);
            }
        }
    }
    merged.into_values().collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Fallback decorator
// ────────────────────────────────────────────────────────────────────────────

/// Tries the optional primary source; on any failure or empty result, logs and
/// delegates to the fallback. The fallback itself never fails.
pub struct FallbackKeywordSource {
    primary: Option<Arc<dyn KeywordSource>>,
    fallback: Arc<dyn KeywordSource>,
}

impl FallbackKeywordSource {
    pub fn new(primary: Option<Arc<dyn KeywordSource>>, fallback: Arc<dyn KeywordSource>) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl KeywordSource for FallbackKeywordSource {
    async fn extract(&self, sections: &ExtractedSections) -> Result<Vec<Keyword>, KeywordError> {
        if let Some(primary) = &self.primary {
            match primary.extract(sections).await {
                Ok(keywords) if !keywords.is_empty() => return Ok(keywords),
                Ok(_) => warn!("primary keyword source returned nothing, using fallback"),
                Err(e) => warn!("primary keyword source failed, using fallback: {e}"),
            }
        }
        self.fallback.extract(sections).await
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
