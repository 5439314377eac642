use crate::trace::{QueueSampleTrace, TraceError};

use super::{MetricExtractor, MetricKind};

/// 平均队列占用（占缓冲区的百分比）
#[derive(Debug, Clone, Default)]
pub struct QueueOccupancy;

impl MetricExtractor for QueueOccupancy {
    type Trace = QueueSampleTrace;

    fn metric(&self) -> MetricKind {
        MetricKind::QueueOccupancy
    }

    fn extract(&self, trace: &QueueSampleTrace, _capacity_kbps: u64) -> Result<f64, TraceError> {
        if trace.samples.is_empty() {
            return Err(TraceError::EmptyQueueTrace {
                path: trace.path.clone(),
            });
        }
        let mean = trace.samples.iter().sum::<f64>() / trace.samples.len() as f64;
        Ok(mean * 100.0)
    }
}
