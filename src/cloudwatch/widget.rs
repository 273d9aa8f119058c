//! Dashboard widgets

use super::metric::MetricSource;
use serde::{Deserialize, Serialize};

/// Total width of one dashboard row in grid units
pub const GRID_WIDTH: u32 = 24;

pub const DEFAULT_WIDTH: u32 = 6;
pub const DEFAULT_HEIGHT: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextBackground {
    #[default]
    Solid,
    Transparent,
}

/// Markdown text widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextWidget {
    pub markdown: String,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub background: TextBackground,
}

impl TextWidget {
    /// Full-width, single-line header
    pub fn header(markdown: String) -> Self {
        Self {
            markdown,
            width: GRID_WIDTH,
            height: 1,
            background: TextBackground::Solid,
        }
    }

    pub fn transparent(mut self) -> Self {
        self.background = TextBackground::Transparent;
        self
    }
}

/// Fixed bounds for a graph axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Time-series graph with a left and an optional right axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphWidget {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub left: Vec<MetricSource>,
    #[serde(default)]
    pub right: Vec<MetricSource>,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub stacked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_secs: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_y_axis: Option<AxisRange>,
}

impl GraphWidget {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            region: None,
            left: Vec::new(),
            right: Vec::new(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            stacked: false,
            period_secs: None,
            left_y_axis: None,
        }
    }

    pub fn region(mut self, region: &str) -> Self {
        self.region = Some(region.to_string());
        self
    }

    pub fn left<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<MetricSource>,
    {
        self.left = sources.into_iter().map(Into::into).collect();
        self
    }

    pub fn right<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<MetricSource>,
    {
        self.right = sources.into_iter().map(Into::into).collect();
        self
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    pub fn stacked(mut self) -> Self {
        self.stacked = true;
        self
    }

    pub fn period(mut self, secs: u32) -> Self {
        self.period_secs = Some(secs);
        self
    }

    pub fn left_y_axis(mut self, min: f64, max: f64) -> Self {
        self.left_y_axis = Some(AxisRange {
            min: Some(min),
            max: Some(max),
        });
        self
    }

    /// Number of metric entries across both axes
    pub fn metric_count(&self) -> usize {
        self.left.len() + self.right.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Widget {
    Text(TextWidget),
    Graph(GraphWidget),
}

impl Widget {
    pub fn width(&self) -> u32 {
        match self {
            Self::Text(t) => t.width,
            Self::Graph(g) => g.width,
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            Self::Text(t) => t.height,
            Self::Graph(g) => g.height,
        }
    }

    pub fn as_graph(&self) -> Option<&GraphWidget> {
        match self {
            Self::Graph(g) => Some(g),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextWidget> {
        match self {
            Self::Text(t) => Some(t),
            Self::Graph(_) => None,
        }
    }
}

impl From<TextWidget> for Widget {
    fn from(widget: TextWidget) -> Self {
        Self::Text(widget)
    }
}

impl From<GraphWidget> for Widget {
    fn from(widget: GraphWidget) -> Self {
        Self::Graph(widget)
    }
}
