//! 绘图模块
//!
//! 把一条按带宽排好序的指标序列交给渲染器输出成文件。渲染器是可替换的：
//! 图片（PNG/SVG）或 JSON 数据。

mod chart;
mod json;

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::aggregate::Series;
use crate::metric::MetricKind;

pub use chart::ChartRenderer;
pub use json::{JsonRenderer, PlotDump, PointDump};

pub const X_LABEL: &str = "Bottleneck Capacity (Mbps)";

/// 一张图的坐标轴、图例与标题
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub legend: String,
    /// 固定的 y 轴范围；样本超出时会自动放宽
    pub y_range: Option<(f64, f64)>,
}

impl PlotSpec {
    pub fn for_metric(metric: MetricKind, title: &str, scheme: &str) -> Self {
        Self {
            title: title.to_string(),
            x_label: X_LABEL.to_string(),
            y_label: metric.y_label().to_string(),
            legend: format!("{scheme} {}", metric.legend_suffix()),
            y_range: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot encode series: {0}")]
    Json(#[from] serde_json::Error),
    #[error("drawing {} failed: {message}", path.display())]
    Backend { path: PathBuf, message: String },
}

/// 渲染器抽象
pub trait Renderer: fmt::Debug {
    /// 输出文件扩展名
    fn extension(&self) -> &'static str;

    fn render(&self, series: &Series, spec: &PlotSpec, out: &Path) -> Result<(), RenderError>;
}

/// 输出格式，也是命令行 `--format` 的取值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
    Json,
}

impl OutputFormat {
    pub fn renderer(self) -> Box<dyn Renderer> {
        match self {
            OutputFormat::Png => Box::new(ChartRenderer::png()),
            OutputFormat::Svg => Box::new(ChartRenderer::svg()),
            OutputFormat::Json => Box::new(JsonRenderer),
        }
    }
}

/// 输出文件名前缀：实验根路径的 basename，`-` 换成 `_`
pub fn output_prefix(root: &Path) -> String {
    root.file_name()
        .map(|name| name.to_string_lossy().replace('-', "_"))
        .unwrap_or_else(|| "sweep".to_string())
}

/// `<out_dir>/<prefix>_<metric>_reproduction.<ext>`
pub fn output_path(out_dir: &Path, prefix: &str, metric: MetricKind, extension: &str) -> PathBuf {
    out_dir.join(format!(
        "{prefix}_{}_reproduction.{extension}",
        metric.file_stem()
    ))
}
