use std::fmt;

use serde::{Deserialize, Serialize};

use crate::trace::TraceKind;

/// 三种瓶颈指标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Utilization,
    QueueOccupancy,
    DropRate,
}

impl MetricKind {
    pub const ALL: [MetricKind; 3] = [
        MetricKind::Utilization,
        MetricKind::QueueOccupancy,
        MetricKind::DropRate,
    ];

    pub fn trace_kind(self) -> TraceKind {
        match self {
            MetricKind::Utilization => TraceKind::ByteCounter,
            MetricKind::QueueOccupancy => TraceKind::QueueSample,
            MetricKind::DropRate => TraceKind::DropCounter,
        }
    }

    pub fn y_label(self) -> &'static str {
        match self {
            MetricKind::Utilization => "Bottleneck Utilization",
            MetricKind::QueueOccupancy => "Bottleneck Queue (% Buf)",
            MetricKind::DropRate => "Bottleneck Drops (% Pkt Sent)",
        }
    }

    /// 图例中方案名之后的部分
    pub fn legend_suffix(self) -> &'static str {
        match self {
            MetricKind::Utilization => "Utilization",
            MetricKind::QueueOccupancy => "Avg Queue",
            MetricKind::DropRate => "Drop Rate",
        }
    }

    /// 输出文件名中的指标段
    pub fn file_stem(self) -> &'static str {
        match self {
            MetricKind::Utilization => "util",
            MetricKind::QueueOccupancy => "q_avg",
            MetricKind::DropRate => "drop",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricKind::Utilization => write!(f, "utilization"),
            MetricKind::QueueOccupancy => write!(f, "queue-occupancy"),
            MetricKind::DropRate => write!(f, "drop-rate"),
        }
    }
}
