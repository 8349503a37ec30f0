use crate::application::format::DateFormat;
use crate::domain::chart::{ChartStyle, LegendPosition};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    #[serde(default)]
    pub server: ServerSettings,
    pub snapshot: SnapshotSettings,
    #[serde(default)]
    pub display: DisplaySettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SnapshotSettings {
    /// Filesystem path or http(s) URL of the snapshot JSON
    pub source: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DisplaySettings {
    pub title: String,
    pub date_format: String,
    pub legend_position: LegendPosition,
    pub font_size: u32,
    pub legend_box_width: u32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        let style = ChartStyle::default();
        Self {
            title: "Attendance Dashboard".to_string(),
            date_format: "%-m/%-d/%Y".to_string(),
            legend_position: style.legend_position,
            font_size: style.font_size,
            legend_box_width: style.legend_box_width,
        }
    }
}

impl DisplaySettings {
    pub fn chart_style(&self) -> ChartStyle {
        ChartStyle {
            legend_position: self.legend_position,
            font_size: self.font_size,
            legend_box_width: self.legend_box_width,
        }
    }

    pub fn date_format(&self) -> anyhow::Result<DateFormat> {
        DateFormat::new(self.date_format.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotLocation {
    File(PathBuf),
    Http(String),
}

impl SnapshotLocation {
    pub fn parse(source: &str) -> Self {
        let source = source.trim();
        if source.starts_with("http://") || source.starts_with("https://") {
            SnapshotLocation::Http(source.to_string())
        } else {
            SnapshotLocation::File(PathBuf::from(source))
        }
    }
}

pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
