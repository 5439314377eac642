use std::fmt;

use serde::{Deserialize, Serialize};

/// trace 文件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceKind {
    /// 两个累计发送字节快照（早 -> 晚）
    ByteCounter,
    /// 周期性队列占用率采样
    QueueSample,
    /// 累计丢包数 + 累计发送包数
    DropCounter,
}

impl TraceKind {
    pub const ALL: [TraceKind; 3] = [
        TraceKind::ByteCounter,
        TraceKind::QueueSample,
        TraceKind::DropCounter,
    ];

    /// 该类 trace 至少需要的数据行数
    pub fn min_lines(self) -> usize {
        match self {
            TraceKind::ByteCounter | TraceKind::DropCounter => 2,
            TraceKind::QueueSample => 1,
        }
    }
}

impl fmt::Display for TraceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceKind::ByteCounter => write!(f, "byte-counter"),
            TraceKind::QueueSample => write!(f, "queue-sample"),
            TraceKind::DropCounter => write!(f, "drop-counter"),
        }
    }
}
