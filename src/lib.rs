//! Draft analyzer core: sends a draft article to a sentiment prediction
//! service and a trends/headline/related-articles backend in parallel, waits
//! for every call to settle, and derives chart-ready view state.

pub mod api_types;
pub mod backend;
pub mod charts;
pub mod config;
pub mod error;
pub mod interpret;
pub mod models;
pub mod orchestrator;
pub mod session;
pub mod view;

pub use backend::{AnalysisBackend, HttpBackend};
pub use config::Settings;
pub use error::{CallError, ConfigError, ValidationError};
pub use interpret::{HttpInterpreter, SentimentInterpreter};
pub use models::{AnalysisRequest, Category};
pub use orchestrator::{run, Outcome, OutcomeSet};
pub use session::{AnalyzerSession, RunReport, SessionState};
pub use view::{derive, ViewState};
