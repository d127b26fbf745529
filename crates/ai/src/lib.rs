//! Clients for the two AI feedback sources and the pipeline that combines them.
//!
//! - [`vision`]: cloud vision detections behind the [`ImageAnnotator`] trait.
//! - [`gemini`]: generative-language calls behind the [`ContentGenerator`] trait.
//! - [`normalizer`] / [`synthesizer`]: fail-soft wrappers that turn those
//!   calls into [`FeedbackItem`](designsight_core::feedback::FeedbackItem)s.
//! - [`analysis`]: the sequential normalize-then-synthesize pass run on upload.

pub mod analysis;
pub mod config;
pub mod error;
pub mod gemini;
pub mod normalizer;
pub mod synthesizer;
pub mod vision;

pub use analysis::{ScreenAnalysis, ScreenAnalyzer};
pub use error::AiError;
pub use gemini::{ContentGenerator, GeminiClient, InlineImage};
pub use vision::{ImageAnnotator, VisionClient};
