use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::aggregate::Series;

use super::{PlotSpec, RenderError, Renderer};

/// 一个数据点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointDump {
    pub capacity_mbps: f64,
    pub value: f64,
    pub run: String,
}

/// 一张图对应的 JSON 数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotDump {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub legend: String,
    pub points: Vec<PointDump>,
}

impl PlotDump {
    pub fn new(series: &Series, spec: &PlotSpec) -> Self {
        Self {
            title: spec.title.clone(),
            x_label: spec.x_label.clone(),
            y_label: spec.y_label.clone(),
            legend: spec.legend.clone(),
            points: series
                .points()
                .iter()
                .map(|s| PointDump {
                    capacity_mbps: s.capacity_mbps(),
                    value: s.value,
                    run: s.run.to_string(),
                })
                .collect(),
        }
    }
}

/// 把序列写成 JSON，供下游工具使用
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn render(&self, series: &Series, spec: &PlotSpec, out: &Path) -> Result<(), RenderError> {
        let json = serde_json::to_string_pretty(&PlotDump::new(series, spec))?;
        fs::write(out, json).map_err(|source| RenderError::Io {
            path: out.to_path_buf(),
            source,
        })
    }
}
