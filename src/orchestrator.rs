use tracing::{debug, info, warn};

use crate::api_types::{
    ApiHeadlineScores, ApiRelatedArticle, ApiTrends, HeadlineRequest, TextCategoryRequest,
    TextInterpretation,
};
use crate::backend::AnalysisBackend;
use crate::error::CallError;
use crate::interpret::SentimentInterpreter;
use crate::models::AnalysisRequest;

pub type Outcome<T> = Result<T, CallError>;

/// Terminal result of every call of one run, one slot per call.
#[derive(Debug)]
pub struct OutcomeSet {
    pub sentiment: Outcome<TextInterpretation>,
    pub trend: Outcome<ApiTrends>,
    pub headline: Outcome<ApiHeadlineScores>,
    pub related: Outcome<Vec<ApiRelatedArticle>>,
}

impl OutcomeSet {
    pub fn failures(&self) -> Vec<(&'static str, &CallError)> {
        let slots: [(&'static str, Option<&CallError>); 4] = [
            ("sentiment", self.sentiment.as_ref().err()),
            ("trend", self.trend.as_ref().err()),
            ("headline", self.headline.as_ref().err()),
            ("related", self.related.as_ref().err()),
        ];
        slots
            .into_iter()
            .filter_map(|(name, err)| err.map(|e| (name, e)))
            .collect()
    }

    pub fn success_count(&self) -> usize {
        4 - self.failures().len()
    }
}

/// Fires all four calls at once and waits for every one of them to settle.
/// Does not validate `request`; a failing call never affects the others.
pub async fn run(
    request: &AnalysisRequest,
    interpreter: &dyn SentimentInterpreter,
    backend: &dyn AnalysisBackend,
) -> OutcomeSet {
    let start = std::time::Instant::now();
    debug!(
        "Dispatching analysis - category={:?}, text_length={}, heading_length={}",
        request.category.as_str(),
        request.text.len(),
        request.heading.len()
    );

    let text_req = TextCategoryRequest {
        text: request.text.clone(),
        category: request.category,
    };
    let headline_req = HeadlineRequest {
        headline: request.heading.clone(),
    };

    let (sentiment, trend, headline, related) = futures::join!(
        interpreter.interpret(&request.text),
        backend.trends(&text_req),
        backend.headline(&headline_req),
        backend.related(&text_req),
    );

    let outcomes = OutcomeSet {
        sentiment,
        trend,
        headline,
        related,
    };

    for (slot, err) in outcomes.failures() {
        warn!("Analysis call failed - slot={}, error={}", slot, err);
    }

    info!(
        "Analysis calls settled - duration={:.2}s, succeeded={}/4",
        start.elapsed().as_secs_f32(),
        outcomes.success_count()
    );

    outcomes
}
