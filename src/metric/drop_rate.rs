use crate::trace::{DropCounterTrace, TraceError};

use super::{MetricExtractor, MetricKind};

/// 丢包率（占发送包数的百分比）
#[derive(Debug, Clone, Default)]
pub struct DropRate;

impl MetricExtractor for DropRate {
    type Trace = DropCounterTrace;

    fn metric(&self) -> MetricKind {
        MetricKind::DropRate
    }

    fn extract(&self, trace: &DropCounterTrace, _capacity_kbps: u64) -> Result<f64, TraceError> {
        if trace.sent == 0 {
            return Err(TraceError::ZeroPacketsSent {
                path: trace.path.clone(),
            });
        }
        Ok(trace.dropped as f64 / trace.sent as f64 * 100.0)
    }
}
