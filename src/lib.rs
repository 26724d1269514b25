//! # GE Detective
//!
//! Gender-bias analysis for narrative text. Text is sent to Gemini with a
//! fixed instruction and a strict JSON response schema; the structured reply
//! (statistics, narrative commentary, improvement suggestions) is rendered
//! in the terminal and kept in a local history.
//!
//! ## Architecture
//!
//! ```text
//! Shell / CLI → App (controller) → Analyzer → Gemini (HTTP)
//!                    ↓
//!              HistoryStore → SQLite slot
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use ge_detective::{App, Config};
//! use ge_detective::analysis::GeminiAnalyzer;
//! use ge_detective::history::HistoryStore;
//! use ge_detective::storage::SqliteStorage;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let storage = Arc::new(SqliteStorage::new(&config.database).await?);
//!     let history = HistoryStore::load(storage).await;
//!     let analyzer = Arc::new(GeminiAnalyzer::from_config(&config)?);
//!     let mut app = App::new(analyzer, history);
//!     app.set_input("张三是经理，李四在家做饭。");
//!     app.submit().await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

/// Result schema and the analyzer seam.
pub mod analysis;
/// Application controller: state machine and named actions.
pub mod app;
/// Configuration management.
pub mod config;
/// Error types and result aliases for the application.
pub mod error;
/// Gemini API client and wire types.
pub mod gemini;
/// Persisted analysis history.
pub mod history;
/// Fixed prompt text for the analysis request.
pub mod prompts;
/// Interactive terminal shell.
pub mod shell;
/// Durable slot storage.
pub mod storage;
/// Stateless text renderers.
pub mod views;

pub use app::{App, Sample, Status, Tab};
pub use config::Config;
pub use error::{AppError, AppResult};
