use crate::error::ConfigError;
use serde::Deserialize;

/// The root configuration structure for the application.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub analysis: AnalysisSettings,
    pub report: ReportSettings,
    pub database: DatabaseSettings,
    pub logging: LoggingSettings,
}

/// Parameters for the metrics run and the best/worst tables.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// How many trades to list in each of the best and worst tables.
    pub top_n: usize,
    /// Number of bins in the PnL distribution histogram.
    pub histogram_bins: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            top_n: 5,
            histogram_bins: 30,
        }
    }
}

/// Parameters for the generated PDF.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub title: String,
    /// Where the PDF is written unless overridden on the command line.
    pub output: String,
    /// Chart bitmap size in pixels.
    pub chart_width: u32,
    pub chart_height: u32,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            title: "TradeTrack - Performance Report".to_string(),
            output: "trade_report.pdf".to_string(),
            chart_width: 900,
            chart_height: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "sqlite://trades.db".to_string(),
            max_connections: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive; `RUST_LOG` takes precedence when set.
    pub level: String,
    /// When set, logs are also written to a daily rolling file here.
    pub directory: Option<String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.analysis.top_n == 0 {
            return Err(ConfigError::ValidationError(
                "analysis.top_n must be greater than zero".to_string(),
            ));
        }
        if self.analysis.histogram_bins == 0 {
            return Err(ConfigError::ValidationError(
                "analysis.histogram_bins must be greater than zero".to_string(),
            ));
        }
        if self.report.chart_width == 0 || self.report.chart_height == 0 {
            return Err(ConfigError::ValidationError(format!(
                "report chart size must be non-zero, got {}x{}",
                self.report.chart_width, self.report.chart_height
            )));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::ValidationError(
                "database.max_connections must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn chart_size(&self) -> (u32, u32) {
        (self.report.chart_width, self.report.chart_height)
    }
}
