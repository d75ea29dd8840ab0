// src/charts.rs
use anyhow::{Context, Result};
use serde::Serialize;
use std::{fs, path::Path};

use crate::models::{HeadlineScore, SentimentResult, TrendSeries};
use crate::view::ViewState;

/* -------------------------------------------------------------------------- */
/* Entry point                                                                */
/* -------------------------------------------------------------------------- */

/// Chart.js-shaped datasets for every chart the results pane can show.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBundle {
    pub sentiment: Option<DoughnutChart>,
    pub headline: Option<DoughnutChart>,
    pub trends: Option<LineChart>,
}

impl ChartBundle {
    pub fn from_view(view: &ViewState) -> Self {
        Self {
            sentiment: view.sentiment.as_ref().map(sentiment_chart),
            headline: view.headline.as_ref().map(headline_chart),
            trends: view.trend.as_ref().map(trend_chart),
        }
    }

    /// Writes one `chart.<name>.json` per present chart into `dir`.
    pub fn write_all(&self, dir: &Path) -> Result<Vec<String>> {
        fs::create_dir_all(dir).with_context(|| format!("create {:?}", dir))?;
        let mut written = Vec::new();

        if let Some(c) = &self.sentiment {
            written.push(write_json(dir, "chart.sentiment.json", c)?);
        }
        if let Some(c) = &self.headline {
            written.push(write_json(dir, "chart.headline.json", c)?);
        }
        if let Some(c) = &self.trends {
            written.push(write_json(dir, "chart.trends.json", c)?);
        }
        Ok(written)
    }
}

fn write_json<T: ?Sized + Serialize>(dir: &Path, name: &str, value: &T) -> Result<String> {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("write {:?}", path))?;
    Ok(name.to_string())
}

/* -------------------------------------------------------------------------- */
/* Doughnuts                                                                  */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoughnutChart {
    pub title: String,
    pub labels: Vec<String>,
    pub datasets: Vec<DoughnutDataset>,
    /// Inner radius as a percentage of the outer one.
    #[serde(rename = "cutoutPercentage")]
    pub cutout_percentage: u8,
    /// Draws a half circle when true.
    #[serde(rename = "halfCircle")]
    pub half_circle: bool,
    /// Per-slice tooltip text, parallel to `labels`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tooltips: Vec<SliceTooltip>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoughnutDataset {
    pub label: String,
    #[serde(rename = "backgroundColor")]
    pub background_color: Vec<String>,
    #[serde(rename = "hoverBackgroundColor")]
    pub hover_background_color: Vec<String>,
    #[serde(rename = "borderWidth")]
    pub border_width: u8,
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliceTooltip {
    pub title: String,
    pub label: String,
    pub footer: String,
}

fn strings(xs: [&str; 4]) -> Vec<String> {
    xs.iter().map(|c| c.to_string()).collect()
}

pub fn sentiment_chart(s: &SentimentResult) -> DoughnutChart {
    DoughnutChart {
        title: "Semantic Analysis".into(),
        labels: strings(["Positive", "Negative", "Neutral", "Mixed"]),
        datasets: vec![DoughnutDataset {
            label: "semantics".into(),
            background_color: strings(["#2FDE00", "#B21F00", "#C9DE00", "#00A6B4"]),
            hover_background_color: strings(["#175000", "#501800", "#4B5000", "#003350"]),
            border_width: 0,
            data: s.as_array().to_vec(),
        }],
        cutout_percentage: 75,
        half_circle: true,
        tooltips: Vec::new(),
    }
}

pub fn headline_chart(h: &HeadlineScore) -> DoughnutChart {
    let facets = h.facets();
    DoughnutChart {
        title: "Headline Analysis".into(),
        labels: facets.iter().map(|(name, _)| name.to_string()).collect(),
        datasets: vec![DoughnutDataset {
            label: "Headline Analysis".into(),
            background_color: strings(["#f74d4d", "#fffc33", "#33e4ff", "#d633ff"]),
            hover_background_color: strings(["#9c341a", "#919c1a", "#187887", "#711887"]),
            border_width: 0,
            data: facets.iter().map(|(_, f)| f.percentage).collect(),
        }],
        cutout_percentage: 0,
        half_circle: false,
        tooltips: facets
            .iter()
            .map(|(name, f)| SliceTooltip {
                title: name.to_string(),
                label: f.words.join(", "),
                footer: format!("Number of words: {}", f.count),
            })
            .collect(),
    }
}

/* -------------------------------------------------------------------------- */
/* Trends line chart                                                          */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub title: String,
    pub labels: Vec<String>,
    pub datasets: Vec<LineDataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineDataset {
    /// Keyword for this line; absent when the backend sent fewer keywords.
    pub label: Option<String>,
    pub fill: bool,
    #[serde(rename = "lineTension")]
    pub line_tension: f32,
    #[serde(rename = "backgroundColor")]
    pub background_color: String,
    #[serde(rename = "borderColor")]
    pub border_color: String,
    #[serde(rename = "borderWidth")]
    pub border_width: u8,
    /// `null` entries are gaps.
    pub data: Vec<Option<f64>>,
}

const LINE_STYLES: [(&str, u8); 4] = [
    ("rgba(0, 0, 0, 1)", 2),
    ("rgba(55, 0, 55, 1)", 1),
    ("rgba(125, 200, 0, 1)", 2),
    ("rgba(0, 243, 0, 1)", 1),
];

pub fn trend_chart(t: &TrendSeries) -> LineChart {
    let datasets = t
        .lines()
        .into_iter()
        .zip(LINE_STYLES)
        .enumerate()
        .map(|(i, (data, (border, width)))| LineDataset {
            label: t.top4.get(i).cloned(),
            fill: false,
            line_tension: 0.5,
            background_color: "rgba(255, 255, 255, 1)".into(),
            border_color: border.into(),
            border_width: width,
            data: data.to_vec(),
        })
        .collect();

    LineChart {
        title: "Google Trends".into(),
        labels: t.time.clone(),
        datasets,
    }
}
