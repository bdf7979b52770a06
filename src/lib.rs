//! # mock-test
//!
//! Terminal client for a multiple-choice mock test backed by an HTTP quiz
//! API. Test takers answer the question set and get a scored result;
//! administrators manage the question bank.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mock_test::{Config, Start};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), mock_test::AppError> {
//!     let config = Config::from_env();
//!     mock_test::run(&config, Start::Home).await
//! }
//! ```

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod flows;
pub mod logging;
pub mod models;
pub mod runtime;
pub mod storage;
pub mod terminal;
mod ui;

pub use api::ApiClient;
pub use app::{App, Request, Response, Start};
pub use config::Config;
pub use error::{AppError, MissingResultError, RequestError, StorageError, ValidationError};
pub use models::{Question, QuestionDraft, QuestionUpdate, QuestionWithAnswer, TestResult};
pub use storage::{FileSlot, MemorySlot, ResultSlot};

/// Opens the terminal UI on `start` and runs it until the user quits.
pub async fn run(config: &Config, start: Start) -> Result<(), AppError> {
    let api = ApiClient::new(config.api_url.as_str())?;
    tracing::info!(api = api.base_url(), ?start, "starting mock test client");

    let slot = FileSlot::new(&config.state_dir);
    let mut app = App::new(Box::new(slot));
    let initial = app.start(start);

    runtime::run(&mut app, api, initial).await
}
