// Portfolio remodel pipeline: normalize → section extraction → keyword
// derivation (model-assisted with deterministic fallback) → scoring → stable
// reorder. All model calls go through llm_client — no direct API calls here.

pub mod handlers;
pub mod keywords;
pub mod prompts;
pub mod rebuild;
pub mod scoring;
pub mod sections;
pub mod text;
pub mod vocab;
