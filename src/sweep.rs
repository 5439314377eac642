//! 完整流程：发现 -> 提取 -> 聚合 -> 渲染

use std::fs;
use std::path::{Path, PathBuf};

use crate::aggregate::{Aggregator, SweepReport};
use crate::config::{ConfigError, SweepConfig};
use crate::discover::{DiscoveryError, discover_runs};
use crate::metric::MetricKind;
use crate::plot::{RenderError, Renderer, output_path, output_prefix};

/// 终止整个流程的错误
#[derive(Debug, thiserror::Error)]
pub enum SweepError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

#[derive(Debug)]
pub struct SweepOutput {
    pub report: SweepReport,
    /// 按 utilization / queue / drop 顺序写出的文件
    pub written: Vec<PathBuf>,
}

/// 只做发现与聚合，不产生任何文件
pub fn collect_sweep(root: &Path, cfg: &SweepConfig) -> Result<SweepReport, SweepError> {
    cfg.validate()?;
    let matcher = cfg.capacity_matcher()?;
    let discovery = discover_runs(root, cfg.layout, &matcher, &cfg.traces)?;
    tracing::info!(
        root = %root.display(),
        runs = discovery.runs.len(),
        "discovered runs"
    );
    Ok(Aggregator::new(cfg.measurement_window()).aggregate(&discovery))
}

/// 聚合后把三条序列交给渲染器写到 `out_dir`
pub fn run_sweep(
    root: &Path,
    cfg: &SweepConfig,
    renderer: &dyn Renderer,
    out_dir: &Path,
) -> Result<SweepOutput, SweepError> {
    let report = collect_sweep(root, cfg)?;

    fs::create_dir_all(out_dir).map_err(|source| RenderError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let prefix = output_prefix(root);
    let mut written = Vec::with_capacity(MetricKind::ALL.len());
    for metric in MetricKind::ALL {
        let series = report.series(metric);
        let spec = cfg.plot_spec(metric, &prefix);
        let out = output_path(out_dir, &prefix, metric, renderer.extension());
        renderer.render(series, &spec, &out)?;
        tracing::debug!(%metric, points = series.len(), out = %out.display(), "rendered");
        written.push(out);
    }

    Ok(SweepOutput { report, written })
}
