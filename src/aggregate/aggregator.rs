use crate::discover::{Discovery, RunId};
use crate::metric::{
    DropRate, MeasurementWindow, MetricExtractor, MetricKind, QueueOccupancy, Utilization,
};
use crate::trace::TraceError;

use super::{Series, SeriesBuilder};

/// 某个 run 在某个指标上被剔除的原因
#[derive(Debug)]
pub struct Exclusion {
    pub run: RunId,
    pub error: TraceError,
}

/// 单个指标的聚合结果
#[derive(Debug)]
pub struct MetricOutcome {
    pub series: Series,
    /// trace 存在但解析/计算失败的 run
    pub excluded: Vec<Exclusion>,
    /// 没有该类 trace 文件的 run
    pub missing: Vec<RunId>,
}

/// 三个指标互相独立的聚合结果
#[derive(Debug)]
pub struct SweepReport {
    pub utilization: MetricOutcome,
    pub queue: MetricOutcome,
    pub drops: MetricOutcome,
}

impl SweepReport {
    pub fn outcome(&self, metric: MetricKind) -> &MetricOutcome {
        match metric {
            MetricKind::Utilization => &self.utilization,
            MetricKind::QueueOccupancy => &self.queue,
            MetricKind::DropRate => &self.drops,
        }
    }

    pub fn series(&self, metric: MetricKind) -> &Series {
        &self.outcome(metric).series
    }
}

/// 驱动三个提取器遍历所有 run
#[derive(Debug, Default)]
pub struct Aggregator {
    utilization: Utilization,
    queue: QueueOccupancy,
    drops: DropRate,
}

impl Aggregator {
    pub fn new(window: MeasurementWindow) -> Self {
        Self {
            utilization: Utilization::new(window),
            ..Self::default()
        }
    }

    pub fn aggregate(&self, discovery: &Discovery) -> SweepReport {
        if !discovery.unmatched.is_empty() {
            tracing::info!(
                count = discovery.unmatched.len(),
                "ignored directories without a capacity label"
            );
        }
        let report = SweepReport {
            utilization: collect(&self.utilization, discovery),
            queue: collect(&self.queue, discovery),
            drops: collect(&self.drops, discovery),
        };
        tracing::info!(
            utilization = report.utilization.series.len(),
            queue = report.queue.series.len(),
            drops = report.drops.series.len(),
            "samples per series"
        );
        report
    }
}

fn collect<E: MetricExtractor>(extractor: &E, discovery: &Discovery) -> MetricOutcome {
    let metric = extractor.metric();
    let kind = metric.trace_kind();

    let mut builder = SeriesBuilder::new(metric);
    let mut excluded = Vec::new();
    for (run, capacity_kbps, path) in discovery.by_kind(kind) {
        match extractor.sample(&run, capacity_kbps, &path) {
            Ok(sample) => {
                tracing::debug!(%metric, %run, capacity_kbps, value = sample.value, "sample");
                builder.push(sample);
            }
            Err(error) => {
                tracing::warn!(%metric, %run, %error, "excluding run from series");
                excluded.push(Exclusion { run, error });
            }
        }
    }

    let missing: Vec<RunId> = discovery.missing(kind).map(|run| run.id.clone()).collect();
    let series = builder.finish();
    if !excluded.is_empty() || !missing.is_empty() {
        tracing::info!(
            %metric,
            samples = series.len(),
            excluded = excluded.len(),
            missing = missing.len(),
            "runs left out of series"
        );
    }

    MetricOutcome {
        series,
        excluded,
        missing,
    }
}
