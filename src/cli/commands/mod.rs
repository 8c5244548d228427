//! Command implementations.

/// Sentiment classification session.
pub mod classify;
