// Wire shapes of the analysis backend and the prediction service.
use serde::{Deserialize, Serialize};

use crate::models::Category;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextCategoryRequest {
    pub text: String,
    pub category: Category,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeadlineRequest {
    pub headline: String,
}

/// `/trends` body. Older backend builds wrap it in `{"data": ...}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ApiTrendsBody {
    Wrapped { data: ApiTrends },
    Bare(ApiTrends),
}

impl ApiTrendsBody {
    pub fn into_inner(self) -> ApiTrends {
        match self {
            ApiTrendsBody::Wrapped { data } => data,
            ApiTrendsBody::Bare(trends) => trends,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ApiTrends {
    #[serde(default)]
    pub default: Option<ApiTrendsDefault>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ApiTrendsDefault {
    #[serde(rename = "timelineData", default)]
    pub timeline_data: Option<Vec<ApiTimelinePoint>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiTimelinePoint {
    #[serde(rename = "formattedTime", default)]
    pub formatted_time: String,
    #[serde(default)]
    pub value: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiHeadlineScores {
    pub power: ApiHeadlineCategory,
    pub emotional: ApiHeadlineCategory,
    pub common: ApiHeadlineCategory,
    pub uncommon: ApiHeadlineCategory,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiHeadlineCategory {
    pub percentage: f64,
    #[serde(default)]
    pub words: Vec<String>,
    #[serde(default)]
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiRelatedArticle {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Urls")]
    pub urls: String,
}

/* Prediction service */

#[derive(Debug, Clone, Serialize)]
pub struct InterpretRequest<'a> {
    pub text: InterpretText<'a>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InterpretText<'a> {
    pub source: InterpretSource<'a>,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct InterpretSource<'a> {
    pub text: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InterpretResponse {
    /// Absent when the service answers 2xx without a result.
    #[serde(rename = "textInterpretation", default)]
    pub text_interpretation: Option<TextInterpretation>,
}

/// Subset of the prediction result this crate consumes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextInterpretation {
    pub sentiment: RawSentiment,
}

/// Raw sentiment fractions in [0, 1].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RawSentiment {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
    pub mixed: f64,
}
