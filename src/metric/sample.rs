use crate::discover::RunId;

/// 一个 run 在某个指标上的样本
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    pub run: RunId,
    pub capacity_kbps: u64,
    pub value: f64,
}

impl MetricSample {
    /// 绘图用横坐标（Mbit/s）
    pub fn capacity_mbps(&self) -> f64 {
        self.capacity_kbps as f64 / 1000.0
    }
}
