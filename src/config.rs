//! 后处理配置
//!
//! 与仿真的 workload.json 一样用 JSON 描述；所有字段都有默认值，对应仿真的默认设置
//! （120s 运行，前 1/5 为预热，trace 文件名 bytesSent.tr / q.tr / drops.tr）。

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::discover::{CapacityLabel, CapacityMatcher, RunLayout, TraceNames};
use crate::metric::{MeasurementWindow, MetricKind};
use crate::plot::PlotSpec;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// 仿真时长（秒）
    pub sim_duration_secs: f64,
    /// 预热占比；字节计数在 `sim_duration_secs * warmup_fraction` 处取早期快照
    pub warmup_fraction: f64,
    /// 直接指定测量窗口（秒），优先于其它所有窗口设置
    pub measurement_window_secs: Option<f64>,
    /// 用字节计数 trace 自身的时间戳计算窗口；指定了 `measurement_window_secs` 时不生效
    pub window_from_timestamps: bool,
    pub traces: TraceNames,
    pub capacity_label: CapacityLabel,
    pub layout: RunLayout,
    /// 图例中的方案名
    pub scheme: String,
    pub utilization_y_range: Option<(f64, f64)>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            sim_duration_secs: 120.0,
            warmup_fraction: 0.2,
            measurement_window_secs: None,
            window_from_timestamps: false,
            traces: TraceNames::default(),
            capacity_label: CapacityLabel::default(),
            layout: RunLayout::default(),
            scheme: "VCP".to_string(),
            utilization_y_range: Some((0.6, 1.1)),
        }
    }
}

impl SweepConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let cfg: SweepConfig = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// 固定窗口长度（秒）
    pub fn window_secs(&self) -> f64 {
        self.measurement_window_secs
            .unwrap_or(self.sim_duration_secs * (1.0 - self.warmup_fraction))
    }

    pub fn measurement_window(&self) -> MeasurementWindow {
        if self.window_from_timestamps && self.measurement_window_secs.is_none() {
            MeasurementWindow::FromTimestamps
        } else {
            MeasurementWindow::Fixed(self.window_secs())
        }
    }

    pub fn capacity_matcher(&self) -> Result<CapacityMatcher, ConfigError> {
        CapacityMatcher::new(&self.capacity_label).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    pub fn plot_spec(&self, metric: MetricKind, title: &str) -> PlotSpec {
        let mut spec = PlotSpec::for_metric(metric, title, &self.scheme);
        if metric == MetricKind::Utilization {
            spec.y_range = self.utilization_y_range;
        }
        spec
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let MeasurementWindow::Fixed(window) = self.measurement_window() {
            if !(window.is_finite() && window > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "measurement window must be positive, got {window}s"
                )));
            }
        }
        if !(0.0..1.0).contains(&self.warmup_fraction) {
            return Err(ConfigError::Invalid(format!(
                "warmup_fraction must be in [0, 1), got {}",
                self.warmup_fraction
            )));
        }
        for name in [
            &self.traces.byte_counter,
            &self.traces.queue_sample,
            &self.traces.drop_counter,
        ] {
            if name.is_empty() {
                return Err(ConfigError::Invalid("trace file names must not be empty".into()));
            }
        }
        match &self.capacity_label {
            CapacityLabel::Token { prefix } if prefix.is_empty() => {
                return Err(ConfigError::Invalid("capacity token prefix must not be empty".into()));
            }
            CapacityLabel::Field { delimiter, .. } if delimiter.is_empty() => {
                return Err(ConfigError::Invalid("capacity field delimiter must not be empty".into()));
            }
            _ => {}
        }
        if let Some((lo, hi)) = self.utilization_y_range {
            if !(lo < hi) {
                return Err(ConfigError::Invalid(format!(
                    "utilization_y_range must be increasing, got [{lo}, {hi}]"
                )));
            }
        }
        Ok(())
    }
}
