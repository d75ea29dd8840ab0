use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::backend::AnalysisBackend;
use crate::error::ValidationError;
use crate::interpret::SentimentInterpreter;
use crate::models::AnalysisRequest;
use crate::orchestrator;
use crate::view::{derive, ViewState};

/// What the host renders from. Replaced whole, never patched field by field.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionState {
    /// Id of the most recently started run; 0 before the first one.
    pub generation: u64,
    pub loading: bool,
    pub request: Option<AnalysisRequest>,
    pub view: ViewState,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub generation: u64,
    /// A newer run started before this one settled; its view was dropped.
    pub superseded: bool,
    /// `slot: error` for every failed call.
    pub failures: Vec<String>,
    pub view: ViewState,
}

pub struct AnalyzerSession {
    interpreter: Arc<dyn SentimentInterpreter>,
    backend: Arc<dyn AnalysisBackend>,
    state: RwLock<SessionState>,
}

impl AnalyzerSession {
    pub fn new(
        interpreter: Arc<dyn SentimentInterpreter>,
        backend: Arc<dyn AnalysisBackend>,
    ) -> Self {
        Self {
            interpreter,
            backend,
            state: RwLock::new(SessionState::default()),
        }
    }

    pub async fn snapshot(&self) -> SessionState {
        self.state.read().await.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    /// Runs one analysis. The view is cleared before any call goes out, and a
    /// run only commits if no newer run has started meanwhile.
    pub async fn analyze(&self, request: AnalysisRequest) -> Result<RunReport, ValidationError> {
        request.validate()?;

        let generation = {
            let mut state = self.state.write().await;
            let generation = state.generation + 1;
            *state = SessionState {
                generation,
                loading: true,
                request: Some(request.clone()),
                view: ViewState::default(),
                completed_at: None,
            };
            generation
        };
        debug!("Run {} started", generation);

        let outcomes =
            orchestrator::run(&request, self.interpreter.as_ref(), self.backend.as_ref()).await;
        let failures = outcomes
            .failures()
            .into_iter()
            .map(|(slot, err)| format!("{}: {}", slot, err))
            .collect();
        let view = derive(&outcomes);

        let mut state = self.state.write().await;
        let superseded = state.generation != generation;
        if superseded {
            info!(
                "Run {} superseded by run {} - discarding its results",
                generation, state.generation
            );
        } else {
            *state = SessionState {
                generation,
                loading: false,
                request: Some(request),
                view: view.clone(),
                completed_at: Some(Utc::now()),
            };
            debug!("Run {} committed", generation);
        }

        Ok(RunReport {
            generation,
            superseded,
            failures,
            view,
        })
    }
}
