use serde::{Deserialize, Serialize};

use crate::api_types::{
    ApiHeadlineCategory, ApiHeadlineScores, ApiRelatedArticle, ApiTrends, RawSentiment,
};
use crate::models::{
    Benchmarks, HeadlineFacet, HeadlineScore, RelatedArticle, SentimentResult, TrendSeries,
};
use crate::orchestrator::OutcomeSet;

/// Render-ready projection of one run. `None` means "do not render".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub sentiment: Option<SentimentResult>,
    pub trend: Option<TrendSeries>,
    pub headline: Option<HeadlineScore>,
    pub related: Option<Vec<RelatedArticle>>,
    pub benchmarks: Option<Benchmarks>,
}

impl ViewState {
    /// False when nothing the results pane shows has arrived yet.
    pub fn has_results(&self) -> bool {
        self.sentiment.is_some() || self.trend.is_some() || self.related.is_some()
    }

    /// The related-articles list, only when there is something to list.
    pub fn related_section(&self) -> Option<&[RelatedArticle]> {
        self.related.as_deref().filter(|items| !items.is_empty())
    }
}

/// Pure: the same outcomes always give the same view. Failed slots stay
/// unset; benchmarks are filled regardless.
pub fn derive(outcomes: &OutcomeSet) -> ViewState {
    let mut view = ViewState::default();

    if let Ok(interpretation) = &outcomes.sentiment {
        view.sentiment = Some(sentiment_percentages(&interpretation.sentiment));
    }
    if let Ok(trends) = &outcomes.trend {
        view.trend = project_trends(trends);
    }
    if let Ok(scores) = &outcomes.headline {
        view.headline = Some(headline_score(scores));
    }
    if let Ok(articles) = &outcomes.related {
        view.related = Some(related_articles(articles));
    }

    view.benchmarks = Some(Benchmarks::placeholder());
    view
}

pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

pub fn sentiment_percentages(raw: &RawSentiment) -> SentimentResult {
    SentimentResult {
        positive: round2(raw.positive * 100.0),
        negative: round2(raw.negative * 100.0),
        neutral: round2(raw.neutral * 100.0),
        mixed: round2(raw.mixed * 100.0),
    }
}

/// `default.timelineData` → four parallel lines plus time labels. A point
/// with fewer than four values leaves gaps in the missing lines.
pub fn project_trends(trends: &ApiTrends) -> Option<TrendSeries> {
    let timeline = trends.default.as_ref()?.timeline_data.as_ref()?;

    let mut series = TrendSeries::default();
    for point in timeline {
        series.time.push(point.formatted_time.clone());
        series.line1.push(point.value.first().copied());
        series.line2.push(point.value.get(1).copied());
        series.line3.push(point.value.get(2).copied());
        series.line4.push(point.value.get(3).copied());
    }
    series.top4 = trends.keywords.clone().unwrap_or_default();
    Some(series)
}

fn facet(c: &ApiHeadlineCategory) -> HeadlineFacet {
    HeadlineFacet {
        percentage: c.percentage,
        count: c.count,
        words: c.words.clone(),
    }
}

pub fn headline_score(scores: &ApiHeadlineScores) -> HeadlineScore {
    HeadlineScore {
        power: facet(&scores.power),
        emotional: facet(&scores.emotional),
        common: facet(&scores.common),
        uncommon: facet(&scores.uncommon),
    }
}

pub fn related_articles(items: &[ApiRelatedArticle]) -> Vec<RelatedArticle> {
    items
        .iter()
        .map(|a| RelatedArticle {
            title: a.title.clone(),
            url: a.urls.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_types::{ApiTimelinePoint, ApiTrendsDefault};
    use crate::error::CallError;
    use crate::orchestrator::fakes::*;

    fn failed() -> CallError {
        CallError::Prediction("boom".into())
    }

    fn all_ok() -> OutcomeSet {
        OutcomeSet {
            sentiment: Ok(sentiment_payload()),
            trend: Ok(trends_payload()),
            headline: Ok(headline_payload()),
            related: Ok(related_payload()),
        }
    }

    #[test]
    fn all_failed_leaves_data_unset_but_fills_benchmarks() {
        let out = OutcomeSet {
            sentiment: Err(failed()),
            trend: Err(failed()),
            headline: Err(failed()),
            related: Err(failed()),
        };
        let view = derive(&out);
        assert!(view.sentiment.is_none());
        assert!(view.trend.is_none());
        assert!(view.headline.is_none());
        assert!(view.related.is_none());
        assert_eq!(view.benchmarks, Some(Benchmarks::placeholder()));
        assert!(!view.has_results());
    }

    #[test]
    fn all_succeeded_fills_every_field() {
        let view = derive(&all_ok());
        assert!(view.sentiment.is_some());
        assert!(view.trend.is_some());
        assert!(view.headline.is_some());
        assert_eq!(view.related.as_ref().map(Vec::len), Some(2));
        assert!(view.benchmarks.is_some());
        assert!(view.has_results());
    }

    #[test]
    fn derive_is_deterministic() {
        let out = all_ok();
        assert_eq!(derive(&out), derive(&out));
    }

    #[test]
    fn sentiment_is_rounded_percentage() {
        let s = sentiment_percentages(&sentiment_payload().sentiment);
        assert_eq!(s.as_array(), [40.31, 10.0, 30.0, 17.69]);
    }

    #[test]
    fn sentiment_is_not_renormalized() {
        let s = sentiment_percentages(&RawSentiment {
            positive: 0.5,
            negative: 0.5,
            neutral: 0.5,
            mixed: 0.0,
        });
        assert_eq!(s.as_array().iter().sum::<f64>(), 150.0);
    }

    #[test]
    fn trends_project_into_parallel_lines() {
        let series = project_trends(&trends_payload()).expect("series");
        assert_eq!(series.time, vec!["t1", "t2"]);
        assert_eq!(series.line1, vec![Some(1.0), Some(5.0)]);
        assert_eq!(series.line2, vec![Some(2.0), Some(6.0)]);
        assert_eq!(series.line3, vec![Some(3.0), Some(7.0)]);
        assert_eq!(series.line4, vec![Some(4.0), Some(8.0)]);
        assert_eq!(series.top4, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn trends_without_timeline_stay_unset() {
        assert_eq!(project_trends(&ApiTrends::default()), None);

        let no_timeline = ApiTrends {
            default: Some(ApiTrendsDefault {
                timeline_data: None,
            }),
            keywords: Some(vec!["a".into()]),
        };
        let view = derive(&OutcomeSet {
            trend: Ok(no_timeline),
            ..all_ok()
        });
        assert!(view.trend.is_none());
    }

    #[test]
    fn trends_without_keywords_get_empty_labels() {
        let trends = ApiTrends {
            keywords: None,
            ..trends_payload()
        };
        let series = project_trends(&trends).unwrap();
        assert!(series.top4.is_empty());
        assert_eq!(series.time.len(), 2);
    }

    #[test]
    fn short_value_rows_leave_gaps() {
        let trends = ApiTrends {
            default: Some(ApiTrendsDefault {
                timeline_data: Some(vec![ApiTimelinePoint {
                    formatted_time: "t1".into(),
                    value: vec![9.0, 8.0],
                }]),
            }),
            keywords: None,
        };
        let series = project_trends(&trends).unwrap();
        assert_eq!(series.line2, vec![Some(8.0)]);
        assert_eq!(series.line3, vec![None]);
        assert_eq!(series.line4, vec![None]);
    }

    #[test]
    fn empty_related_is_present_but_not_rendered() {
        let view = derive(&OutcomeSet {
            related: Ok(Vec::new()),
            ..all_ok()
        });
        assert_eq!(view.related, Some(Vec::new()));
        assert!(view.related_section().is_none());

        let unset = derive(&OutcomeSet {
            related: Err(failed()),
            ..all_ok()
        });
        assert!(unset.related.is_none());
        assert!(unset.related_section().is_none());
    }

    #[test]
    fn related_keeps_source_order() {
        let view = derive(&all_ok());
        let titles: Vec<_> = view
            .related_section()
            .unwrap()
            .iter()
            .map(|a| a.title.as_str())
            .collect();
        assert_eq!(titles, vec!["First", "Second"]);
        assert_eq!(view.related.unwrap()[1].url, "https://news.example/2");
    }

    #[test]
    fn headline_keeps_words_and_counts() {
        let view = derive(&all_ok());
        let h = view.headline.unwrap();
        assert_eq!(h.common.words, vec!["the", "of"]);
        assert_eq!(h.common.count, 2);
        assert_eq!(h.power.percentage, 20.0);
    }
}
