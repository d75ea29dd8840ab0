use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Technology,
    Politics,
    Marketing,
    Economy,
    Philosophy,
    #[default]
    #[serde(rename = "")]
    Unset,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Technology,
        Category::Politics,
        Category::Marketing,
        Category::Economy,
        Category::Philosophy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Technology => "technology",
            Category::Politics => "politics",
            Category::Marketing => "marketing",
            Category::Economy => "economy",
            Category::Philosophy => "philosophy",
            Category::Unset => "",
        }
    }

    pub fn is_set(self) -> bool {
        self != Category::Unset
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        if s.is_empty() {
            return Ok(Category::Unset);
        }
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "unknown category {:?} (expected one of: {})",
                    s,
                    Category::ALL.map(|c| c.as_str()).join(", ")
                )
            })
    }
}

/// One analysis submission. Not modified once a run starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub text: String,
    pub heading: String,
    pub category: Category,
}

impl AnalysisRequest {
    pub fn new(text: impl Into<String>, heading: impl Into<String>, category: Category) -> Self {
        Self {
            text: text.into(),
            heading: heading.into(),
            category,
        }
    }

    /// Mirrors the gate on the analyze action: text, heading and category must
    /// all be present.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.text.is_empty() {
            return Err(ValidationError::EmptyText);
        }
        if self.heading.is_empty() {
            return Err(ValidationError::EmptyHeading);
        }
        if !self.category.is_set() {
            return Err(ValidationError::MissingCategory);
        }
        Ok(())
    }
}

/// Sentiment as percentages rounded to two decimals. Not renormalized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
    pub mixed: f64,
}

impl SentimentResult {
    pub fn as_array(&self) -> [f64; 4] {
        [self.positive, self.negative, self.neutral, self.mixed]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    pub time: Vec<String>,
    pub line1: Vec<Option<f64>>,
    pub line2: Vec<Option<f64>>,
    pub line3: Vec<Option<f64>>,
    pub line4: Vec<Option<f64>>,
    pub top4: Vec<String>,
}

impl TrendSeries {
    pub fn lines(&self) -> [&[Option<f64>]; 4] {
        [&self.line1, &self.line2, &self.line3, &self.line4]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadlineFacet {
    pub percentage: f64,
    pub count: u32,
    pub words: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadlineScore {
    pub power: HeadlineFacet,
    pub emotional: HeadlineFacet,
    pub common: HeadlineFacet,
    pub uncommon: HeadlineFacet,
}

impl HeadlineScore {
    /// Facets in chart order.
    pub fn facets(&self) -> [(&'static str, &HeadlineFacet); 4] {
        [
            ("Power", &self.power),
            ("Emotional", &self.emotional),
            ("Common", &self.common),
            ("Uncommon", &self.uncommon),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedArticle {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

impl Metric {
    fn new(label: &str, value: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
        }
    }
}

/// "Viral trends" benchmark panel. Fixed placeholder figures, not computed
/// from any call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Benchmarks {
    pub left: Vec<Metric>,
    pub right: Vec<Metric>,
}

impl Benchmarks {
    pub fn placeholder() -> Self {
        Self {
            left: vec![
                Metric::new("Avg. number of characters in title", "8"),
                Metric::new("Avg. Image count", "4"),
            ],
            right: vec![
                Metric::new("Avg. Read time", "6 min"),
                Metric::new("Avg. external links", "7"),
            ],
        }
    }
}
