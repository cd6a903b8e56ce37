//! Scoring Engine — token-level relevance of portfolio entries against the
//! derived keyword set, with field-specific multipliers.

use crate::models::portfolio::ProjectItem;
use crate::remodel::keywords::{Keyword, KeywordKind};

/// Field multipliers applied during scoring. Empirically chosen defaults;
/// tunable configuration, not physical constants.
#[derive(Debug, Clone)]
pub struct ScoringWeights {
    pub skill_tech: f64,
    pub skill_role: f64,
    pub project_role: f64,
    pub project_title: f64,
    pub project_summary: f64,
    pub project_stack: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skill_tech: 1.0,
            skill_role: 0.6,
            project_role: 1.2,
            project_title: 0.6,
            project_summary: 0.8,
            project_stack: 1.0,
        }
    }
}

/// Tolerant keyword-to-field comparison: lowercases both sides, maps anything
/// outside `[a-z0-9+#.-]` to spaces, then accepts exact equality, containment
/// in either direction, or every term token appearing as a substring of some
/// field token. "spring boot", "Spring-Boot", and "springboot" all match.
///
/// Terms that normalize to nothing (pure-Korean role terms like "백엔드") are
/// compared by raw lowercase containment instead.
pub fn token_matches(field: &str, term: &str) -> bool {
    let normalized_field = normalize_match_text(field);
    let normalized_term = normalize_match_text(term);

    if normalized_term.is_empty() || normalized_field.is_empty() {
        let term_raw = term.trim().to_lowercase();
        return !term_raw.is_empty() && field.to_lowercase().contains(&term_raw);
    }

    if normalized_field == normalized_term
        || normalized_field.contains(&normalized_term)
        || normalized_term.contains(&normalized_field)
    {
        return true;
    }

    normalized_term
        .split(' ')
        .all(|t| normalized_field.split(' ').any(|f| f.contains(t)))
}

fn normalize_match_text(s: &str) -> String {
    let mapped: String = s
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '+' | '#' | '.' | '-') {
                c
            } else {
                ' '
            }
        })
        .collect();
    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Relevance of a plain skill string: TECH keywords add their full weight,
/// ROLE keywords a reduced share, ETC keywords nothing.
pub fn score_skill(skill: &str, keywords: &[Keyword], weights: &ScoringWeights) -> f64 {
    keywords
        .iter()
        .filter(|k| token_matches(skill, &k.term))
        .map(|k| match k.kind {
            KeywordKind::Tech => weights.skill_tech * k.weight,
            KeywordKind::Role => weights.skill_role * k.weight,
            KeywordKind::Etc => 0.0,
        })
        .sum()
}

/// Relevance of a project: ROLE keywords against the role field, TECH keywords
/// against title, summary, and each tech-stack entry independently.
pub fn score_project(project: &ProjectItem, keywords: &[Keyword], weights: &ScoringWeights) -> f64 {
    let mut score = 0.0;
    for keyword in keywords {
        match keyword.kind {
            KeywordKind::Role => {
                if token_matches(&project.role, &keyword.term) {
                    score += weights.project_role * keyword.weight;
                }
            }
            KeywordKind::Tech => {
                if token_matches(&project.title, &keyword.term) {
                    score += weights.project_title * keyword.weight;
                }
                if token_matches(&project.summary, &keyword.term) {
                    score += weights.project_summary * keyword.weight;
                }
                for entry in &project.tech_stack {
                    if token_matches(entry, &keyword.term) {
                        score += weights.project_stack * keyword.weight;
                    }
                }
            }
            KeywordKind::Etc => {}
        }
    }
    score
}
