//! Reordering Orchestrator — sequences the pipeline (resolve → normalize →
//! extract → keywords → score → stable reorder) and owns its failure policy.
//!
//! Empty-extraction policy: a posting with no recognizable qualification
//! sections is a hard `EmptyExtraction` failure telling the caller to resubmit
//! those sections as plain text.

use std::cmp::Ordering;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::portfolio::{PortfolioSnapshot, ProjectItem};
use crate::remodel::keywords::{Keyword, KeywordSource};
use crate::remodel::scoring::{score_project, score_skill, ScoringWeights};
use crate::remodel::sections::{self, ExtractedSections};
use crate::remodel::text;

const FETCH_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const FETCH_READ_TIMEOUT: Duration = Duration::from_secs(30);
const FETCH_USER_AGENT: &str = "Mozilla/5.0 (compatible; RemodelBot/1.0)";

/// The posting reference supplied by the caller.
#[derive(Debug, Clone)]
pub struct JobPostingInput {
    /// "url" or "text"; validated before any processing.
    pub source_type: String,
    pub value: String,
}

#[derive(Debug, Error)]
pub enum RemodelError {
    #[error("sourceType must be 'url' or 'text', got '{0}'")]
    InvalidSourceType(String),

    #[error("could not read the job posting")]
    UnreadablePosting,

    #[error("no required/preferred qualification sections found — resubmit those sections as text")]
    EmptyExtraction,
}

/// Fetches raw posting text for `sourceType = url`.
/// Carried in `AppState` as `Arc<dyn PostingFetcher>`.
#[async_trait]
pub trait PostingFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> anyhow::Result<String>;
}

/// Default fetcher: a reqwest client with bounded connect/read timeouts so a
/// stalled posting host cannot hang a request.
pub struct HttpPostingFetcher {
    client: reqwest::Client,
}

impl HttpPostingFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .connect_timeout(FETCH_CONNECT_TIMEOUT)
                .timeout(FETCH_READ_TIMEOUT)
                .user_agent(FETCH_USER_AGENT)
                .build()
                .expect("Failed to build HTTP client"),
        }
    }
}

impl Default for HttpPostingFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostingFetcher for HttpPostingFetcher {
    async fn fetch(&self, url: &str) -> anyhow::Result<String> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml,*/*")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("posting fetch returned {status}");
        }
        Ok(response.text().await?)
    }
}

/// The reordered snapshot plus the keywords that drove the ordering.
#[derive(Debug, Clone)]
pub struct RebuildOutcome {
    pub data: PortfolioSnapshot,
    pub keywords: Vec<Keyword>,
}

/// Resolves, normalizes, and section-extracts a posting, then derives keywords.
/// Shared by the rebuild pipeline and the preview endpoint.
pub async fn extract_posting(
    posting: &JobPostingInput,
    fetcher: &dyn PostingFetcher,
    keyword_source: &dyn KeywordSource,
) -> Result<(ExtractedSections, Vec<Keyword>), RemodelError> {
    let raw = resolve_posting_text(posting, fetcher).await?;
    if raw.trim().is_empty() {
        return Err(RemodelError::UnreadablePosting);
    }

    let clean = text::normalize(&raw);
    let sections = sections::extract(&clean);
    if sections.is_empty() {
        return Err(RemodelError::EmptyExtraction);
    }

    // Keyword derivation never fails the request: a broken source degrades to
    // an empty set and the portfolio keeps its original order.
    let keywords = match keyword_source.extract(&sections).await {
        Ok(keywords) => keywords,
        Err(e) => {
            warn!("keyword extraction failed, continuing with empty set: {e}");
            Vec::new()
        }
    };

    Ok((sections, keywords))
}

/// Full pipeline: same snapshot content back, skills and projects stably
/// reordered by descending relevance, ties keeping their input order.
pub async fn rebuild_portfolio(
    posting: &JobPostingInput,
    base: PortfolioSnapshot,
    fetcher: &dyn PostingFetcher,
    keyword_source: &dyn KeywordSource,
    weights: &ScoringWeights,
) -> Result<RebuildOutcome, RemodelError> {
    let (sections, keywords) = extract_posting(posting, fetcher, keyword_source).await?;

    info!(
        required = sections.required.len(),
        preferred = sections.preferred.len(),
        keywords = keywords.len(),
        "rebuilding portfolio order"
    );

    let skills = reorder_by_score(base.skills, |s| score_skill(s, &keywords, weights));
    let projects: Vec<ProjectItem> =
        reorder_by_score(base.projects, |p| score_project(p, &keywords, weights));

    Ok(RebuildOutcome {
        data: PortfolioSnapshot {
            name: base.name,
            role: base.role,
            introduction: base.introduction,
            skills,
            projects,
        },
        keywords,
    })
}

async fn resolve_posting_text(
    posting: &JobPostingInput,
    fetcher: &dyn PostingFetcher,
) -> Result<String, RemodelError> {
    match posting.source_type.as_str() {
        "url" => Ok(fetcher.fetch(&posting.value).await.unwrap_or_else(|e| {
            warn!("posting fetch failed: {e}");
            String::new()
        })),
        "text" => Ok(posting.value.clone()),
        other => Err(RemodelError::InvalidSourceType(other.to_string())),
    }
}

struct ScoredEntry<T> {
    item: T,
    score: f64,
    original_index: usize,
}

/// Descending stable sort: equal scores keep their input order.
fn reorder_by_score<T>(items: Vec<T>, mut score: impl FnMut(&T) -> f64) -> Vec<T> {
    let mut scored: Vec<ScoredEntry<T>> = items
        .into_iter()
        .enumerate()
        .map(|(original_index, item)| ScoredEntry {
            score: score(&item),
            original_index,
            item,
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then(a.original_index.cmp(&b.original_index))
    });

    scored.into_iter().map(|entry| entry.item).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remodel::keywords::{KeywordError, KeywordKind, VocabularyKeywordSource};

    const SAMPLE_POSTING: &str = "\
자격요건\n\
- Spring Boot 3년 이상 경험\n\
우대사항\n\
- AWS 우대";

    struct TextOnlyFetcher;

    #[async_trait]
    impl PostingFetcher for TextOnlyFetcher {
        async fn fetch(&self, _url: &str) -> anyhow::Result<String> {
            anyhow::bail!("no network in tests")
        }
    }

    struct FixedFetcher(&'static str);

    #[async_trait]
    impl PostingFetcher for FixedFetcher {
        async fn fetch(&self, _url: &str) -> anyhow::Result<String> {
            Ok(self.0.to_string())
        }
    }

    fn text_input(value: &str) -> JobPostingInput {
        JobPostingInput {
            source_type: "text".to_string(),
            value: value.to_string(),
        }
    }

    fn base_portfolio() -> PortfolioSnapshot {
        PortfolioSnapshot {
            name: "전소원".to_string(),
            role: "Backend Developer".to_string(),
            introduction: "Spring 기반 백엔드 개발자입니다.".to_string(),
            skills: vec![
                "Photoshop".to_string(),
                "Java".to_string(),
                "AWS".to_string(),
            ],
            projects: vec![
                ProjectItem {
                    title: "디자인 시스템".to_string(),
                    summary: "사내 디자인 가이드".to_string(),
                    role: "Design".to_string(),
                    period: "2023.01~2023.06".to_string(),
                    link: String::new(),
                    tech_stack: vec!["Figma".to_string()],
                },
                ProjectItem {
                    title: "주문/결제 백엔드".to_string(),
                    summary: "Spring Boot 기반 결제 이중화".to_string(),
                    role: "Backend".to_string(),
                    period: "2024.01~2024.08".to_string(),
                    link: String::new(),
                    tech_stack: vec!["Spring Boot".to_string(), "AWS".to_string()],
                },
            ],
        }
    }

    async fn rebuild_with_vocab(
        posting: JobPostingInput,
        base: PortfolioSnapshot,
    ) -> Result<RebuildOutcome, RemodelError> {
        rebuild_portfolio(
            &posting,
            base,
            &TextOnlyFetcher,
            &VocabularyKeywordSource::default(),
            &ScoringWeights::default(),
        )
        .await
    }

    #[tokio::test]
    async fn test_invalid_source_type_rejected() {
        let posting = JobPostingInput {
            source_type: "file".to_string(),
            value: "whatever".to_string(),
        };
        let err = rebuild_with_vocab(posting, base_portfolio()).await.unwrap_err();
        assert!(matches!(err, RemodelError::InvalidSourceType(_)));
    }

    #[tokio::test]
    async fn test_empty_text_is_unreadable() {
        let err = rebuild_with_vocab(text_input("   "), base_portfolio())
            .await
            .unwrap_err();
        assert!(matches!(err, RemodelError::UnreadablePosting));
    }

    #[tokio::test]
    async fn test_fetch_failure_surfaces_as_unreadable() {
        let posting = JobPostingInput {
            source_type: "url".to_string(),
            value: "https://example.com/job/1".to_string(),
        };
        let err = rebuild_portfolio(
            &posting,
            base_portfolio(),
            &TextOnlyFetcher,
            &VocabularyKeywordSource::default(),
            &ScoringWeights::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RemodelError::UnreadablePosting));
    }

    #[tokio::test]
    async fn test_posting_without_sections_is_empty_extraction() {
        let err = rebuild_with_vocab(
            text_input("저희는 좋은 회사입니다\n함께 성장해요"),
            base_portfolio(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RemodelError::EmptyExtraction));
    }

    #[tokio::test]
    async fn test_url_posting_fetched_and_rebuilt() {
        let posting = JobPostingInput {
            source_type: "url".to_string(),
            value: "https://example.com/job/1".to_string(),
        };
        let outcome = rebuild_portfolio(
            &posting,
            base_portfolio(),
            &FixedFetcher(SAMPLE_POSTING),
            &VocabularyKeywordSource::default(),
            &ScoringWeights::default(),
        )
        .await
        .unwrap();
        assert_eq!(outcome.data.skills[0], "AWS");
    }

    #[tokio::test]
    async fn test_skills_reordered_by_relevance() {
        let outcome = rebuild_with_vocab(text_input(SAMPLE_POSTING), base_portfolio())
            .await
            .unwrap();

        // AWS matched the preferred section (highest weight) so it comes first;
        // Photoshop and Java both score zero and keep their input order.
        assert_eq!(outcome.data.skills, vec!["AWS", "Photoshop", "Java"]);
    }

    #[tokio::test]
    async fn test_keywords_reported_with_expected_weights() {
        let outcome = rebuild_with_vocab(text_input(SAMPLE_POSTING), base_portfolio())
            .await
            .unwrap();

        let spring = outcome
            .keywords
            .iter()
            .find(|k| k.term == "Spring Boot")
            .expect("Spring Boot keyword");
        assert_eq!(spring.kind, KeywordKind::Tech);
        assert!((spring.weight - 0.7).abs() < f64::EPSILON);

        let aws = outcome.keywords.iter().find(|k| k.term == "AWS").unwrap();
        assert!((aws.weight - 0.9).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_matching_project_moves_first() {
        let outcome = rebuild_with_vocab(text_input(SAMPLE_POSTING), base_portfolio())
            .await
            .unwrap();
        assert_eq!(outcome.data.projects[0].title, "주문/결제 백엔드");
        assert_eq!(outcome.data.projects[1].title, "디자인 시스템");
    }

    #[tokio::test]
    async fn test_output_is_permutation_of_input() {
        let base = base_portfolio();
        let mut expected_skills = base.skills.clone();
        let expected_titles: Vec<String> =
            base.projects.iter().map(|p| p.title.clone()).collect();

        let outcome = rebuild_with_vocab(text_input(SAMPLE_POSTING), base).await.unwrap();

        let mut actual_skills = outcome.data.skills.clone();
        actual_skills.sort();
        expected_skills.sort();
        assert_eq!(actual_skills, expected_skills);

        let mut actual_titles: Vec<String> =
            outcome.data.projects.iter().map(|p| p.title.clone()).collect();
        let mut expected_titles = expected_titles;
        actual_titles.sort();
        expected_titles.sort();
        assert_eq!(actual_titles, expected_titles);
    }

    #[tokio::test]
    async fn test_untouched_fields_pass_through() {
        let base = base_portfolio();
        let outcome = rebuild_with_vocab(text_input(SAMPLE_POSTING), base.clone())
            .await
            .unwrap();
        assert_eq!(outcome.data.name, base.name);
        assert_eq!(outcome.data.role, base.role);
        assert_eq!(outcome.data.introduction, base.introduction);
    }

    #[tokio::test]
    async fn test_determinism_across_runs() {
        let a = rebuild_with_vocab(text_input(SAMPLE_POSTING), base_portfolio())
            .await
            .unwrap();
        let b = rebuild_with_vocab(text_input(SAMPLE_POSTING), base_portfolio())
            .await
            .unwrap();
        assert_eq!(a.data, b.data);
        assert_eq!(a.keywords, b.keywords);
    }

    #[tokio::test]
    async fn test_broken_keyword_source_keeps_original_order() {
        struct BrokenSource;

        #[async_trait]
        impl KeywordSource for BrokenSource {
            async fn extract(
                &self,
                _: &ExtractedSections,
            ) -> Result<Vec<Keyword>, KeywordError> {
                Err(KeywordError::Empty)
            }
        }

        let base = base_portfolio();
        let original_skills = base.skills.clone();
        let outcome = rebuild_portfolio(
            &text_input(SAMPLE_POSTING),
            base,
            &TextOnlyFetcher,
            &BrokenSource,
            &ScoringWeights::default(),
        )
        .await
        .unwrap();

        // Zero keywords → all scores tie → input order preserved.
        assert_eq!(outcome.data.skills, original_skills);
        assert!(outcome.keywords.is_empty());
    }

    #[test]
    fn test_reorder_is_stable_for_equal_scores() {
        let items = vec!["a", "b", "c", "d"];
        let reordered = reorder_by_score(items, |_| 1.0);
        assert_eq!(reordered, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_reorder_descending() {
        let items = vec![1, 3, 2];
        let reordered = reorder_by_score(items, |n| *n as f64);
        assert_eq!(reordered, vec![3, 2, 1]);
    }
}
