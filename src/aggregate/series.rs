use std::collections::BTreeMap;

use crate::metric::{MetricKind, MetricSample};

/// 按带宽严格递增、每个带宽只有一个样本的指标序列
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    metric: MetricKind,
    points: Vec<MetricSample>,
}

impl Series {
    pub fn metric(&self) -> MetricKind {
        self.metric
    }

    pub fn points(&self) -> &[MetricSample] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// 由任意顺序的样本构建序列（等价于逐个 `push`）
    pub fn from_samples(metric: MetricKind, samples: impl IntoIterator<Item = MetricSample>) -> Self {
        let mut builder = SeriesBuilder::new(metric);
        for sample in samples {
            builder.push(sample);
        }
        builder.finish()
    }

    /// (Mbit/s, 指标值)
    pub fn xy(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .map(|s| (s.capacity_mbps(), s.value))
            .collect()
    }
}

/// 以带宽（kbit/s）为键收集样本；同一带宽后到的样本覆盖先到的
#[derive(Debug)]
pub struct SeriesBuilder {
    metric: MetricKind,
    by_capacity: BTreeMap<u64, MetricSample>,
}

impl SeriesBuilder {
    pub fn new(metric: MetricKind) -> Self {
        Self {
            metric,
            by_capacity: BTreeMap::new(),
        }
    }

    /// 插入样本，返回被替换掉的旧样本
    pub fn push(&mut self, sample: MetricSample) -> Option<MetricSample> {
        let replaced = self.by_capacity.insert(sample.capacity_kbps, sample);
        if let Some(old) = &replaced {
            let kept = &self.by_capacity[&old.capacity_kbps];
            tracing::warn!(
                metric = %self.metric,
                capacity_kbps = old.capacity_kbps,
                dropped = %old.run,
                kept = %kept.run,
                "duplicate capacity, keeping the later run"
            );
        }
        replaced
    }

    pub fn finish(self) -> Series {
        Series {
            metric: self.metric,
            points: self.by_capacity.into_values().collect(),
        }
    }
}
