use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    EquityCurve,
    WinLoss,
    PnlDistribution,
    MarketBreakdown,
    RiskRewardScatter,
    MonthlyPnl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesColor {
    Blue,
    Green,
    Red,
    Orange,
    Purple,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub color: SeriesColor,
}

/// One histogram bucket covering `[lower, upper)`; the last bucket also
/// includes its upper edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub win: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartData {
    Line { points: Vec<(f64, f64)>, color: SeriesColor },
    Bars { bars: Vec<Bar> },
    Histogram { bins: Vec<HistogramBin>, color: SeriesColor },
    Scatter { points: Vec<ScatterPoint> },
}

/// A chart described as data, independent of any rendering backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartFigure {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub data: ChartData,
}

impl ChartFigure {
    pub(crate) fn new(kind: ChartKind, title: &str, x_label: &str, y_label: &str, data: ChartData) -> Self {
        Self {
            kind,
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            data,
        }
    }

    /// Bar values, for bar charts.
    pub fn bars(&self) -> Option<&[Bar]> {
        match &self.data {
            ChartData::Bars { bars } => Some(bars),
            _ => None,
        }
    }
}
