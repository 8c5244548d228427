//! # sentiment - Schema-checked sentiment classification
//!
//! `sentiment` sends each line of text to an OpenAI-compatible chat
//! completion endpoint, asks for a JSON object matching a fixed schema,
//! validates the reply (repairing it once if needed) and prints the label.
//!
//! ## Quick Start
//!
//! ```bash
//! # Classify one line and exit
//! sentiment "I love this!"
//!
//! # Interactive session
//! sentiment
//!
//! # One request per line
//! sentiment --file reviews.txt
//! cat reviews.txt | sentiment
//! ```
//!
//! ## Configuration
//!
//! `OPENAI_API_KEY`, `OPENAI_MODEL` and `OPENAI_ENDPOINT` are enough for the
//! built-in `openai` provider. Other providers live in
//! `~/.config/sentiment/config.toml`:
//!
//! ```toml
//! [sentiment]
//! provider = "ollama"
//! model = "gemma3:12b"
//!
//! [providers.ollama]
//! endpoint = "http://localhost:11434"
//! models = ["gemma3:12b"]
//! ```

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and provider settings.
pub mod config;

/// Request line sources.
pub mod input;

/// Diagnostic logging setup.
pub mod logging;

/// Global output configuration (quiet mode, colors, stderr/stdout routing).
pub mod output;

/// XDG-style path utilities for configuration.
pub mod paths;

/// The request loop and its console framing.
pub mod session;

/// Schema-constrained translation of text into typed values.
pub mod translation;

/// Terminal UI components (spinner, colors).
pub mod ui;
