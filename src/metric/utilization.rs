//! 瓶颈利用率
//!
//! 仿真在 `time/5` 与 `time` 两个时刻记录累计发送字节，测量窗口为两者之差。

use crate::trace::{ByteCounterTrace, TraceError};

use super::{MetricExtractor, MetricKind};

/// 默认测量窗口：0.8 × 120s
pub const DEFAULT_MEASUREMENT_WINDOW_SECS: f64 = 96.0;

/// 吞吐归一化所用的时间窗口
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeasurementWindow {
    /// 所有 run 使用同一个固定窗口（秒）
    Fixed(f64),
    /// 用 trace 两行的时间戳之差
    FromTimestamps,
}

impl Default for MeasurementWindow {
    fn default() -> Self {
        MeasurementWindow::Fixed(DEFAULT_MEASUREMENT_WINDOW_SECS)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Utilization {
    pub window: MeasurementWindow,
}

impl Utilization {
    pub fn new(window: MeasurementWindow) -> Self {
        Self { window }
    }

    fn window_secs(&self, trace: &ByteCounterTrace) -> Result<f64, TraceError> {
        let secs = match self.window {
            MeasurementWindow::Fixed(secs) => secs,
            MeasurementWindow::FromTimestamps => trace.late.t_secs - trace.early.t_secs,
        };
        if !(secs.is_finite() && secs > 0.0) {
            return Err(TraceError::BadWindow(secs));
        }
        Ok(secs)
    }
}

impl MetricExtractor for Utilization {
    type Trace = ByteCounterTrace;

    fn metric(&self) -> MetricKind {
        MetricKind::Utilization
    }

    fn extract(&self, trace: &ByteCounterTrace, capacity_kbps: u64) -> Result<f64, TraceError> {
        if capacity_kbps == 0 {
            return Err(TraceError::ZeroCapacity);
        }
        let Some(late_bytes) = trace.late.value.checked_sub(trace.early.value) else {
            return Err(TraceError::CounterRegressed {
                path: trace.path.clone(),
                early: trace.early.value,
                late: trace.late.value,
            });
        };
        let window = self.window_secs(trace)?;
        let bits_per_sec = late_bytes as f64 * 8.0 / window;
        // 大于 1 表示突发超过标称带宽，是合法值
        Ok(bits_per_sec / (capacity_kbps as f64 * 1000.0))
    }
}
