//! 指标提取模块
//!
//! 从单个 run 的 trace 计算一个标量：瓶颈利用率、平均队列占用、丢包率。

mod drop_rate;
mod kind;
mod queue;
mod sample;
mod utilization;

use std::fmt;
use std::path::Path;

use crate::discover::RunId;
use crate::trace::{TraceError, TraceFile};

pub use drop_rate::DropRate;
pub use kind::MetricKind;
pub use queue::QueueOccupancy;
pub use sample::MetricSample;
pub use utilization::{DEFAULT_MEASUREMENT_WINDOW_SECS, MeasurementWindow, Utilization};

/// 指标提取器抽象：每种指标消费一种 trace
pub trait MetricExtractor: fmt::Debug {
    type Trace: TraceFile;

    fn metric(&self) -> MetricKind;

    /// 由 trace 与瓶颈带宽（kbit/s）算出指标值
    fn extract(&self, trace: &Self::Trace, capacity_kbps: u64) -> Result<f64, TraceError>;

    /// 读取 trace 文件并生成一个样本
    fn sample(&self, run: &RunId, capacity_kbps: u64, path: &Path) -> Result<MetricSample, TraceError> {
        let trace = <Self::Trace as TraceFile>::read(path)?;
        let value = self.extract(&trace, capacity_kbps)?;
        Ok(MetricSample {
            run: run.clone(),
            capacity_kbps,
            value,
        })
    }
}
