use std::sync::Arc;

use crate::config::Config;
use crate::remodel::keywords::KeywordSource;
use crate::remodel::rebuild::PostingFetcher;
use crate::remodel::scoring::ScoringWeights;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup, so concurrent rebuilds need no
/// coordination.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Posting fetcher for `sourceType = url` requests.
    pub fetcher: Arc<dyn PostingFetcher>,
    /// Pluggable keyword source. Always a `FallbackKeywordSource`; the
    /// model-assisted primary is present only when enabled via config.
    pub keywords: Arc<dyn KeywordSource>,
    /// Scoring field multipliers.
    pub weights: ScoringWeights,
}
