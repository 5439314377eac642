use std::io;
use std::path::PathBuf;

use super::TraceKind;

/// 单个 (run, metric) 的解析/计算失败。
///
/// 只会把该 run 从对应 metric 的序列中剔除，不会中断整个流程。
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{}: {kind} trace needs at least {need} lines, found {found}", path.display())]
    TooFewLines {
        path: PathBuf,
        kind: TraceKind,
        need: usize,
        found: usize,
    },
    #[error("{}:{line}: expected `<timestamp> <value>`", path.display())]
    MissingField { path: PathBuf, line: usize },
    #[error("{}:{line}: `{token}` is not a number", path.display())]
    BadNumber {
        path: PathBuf,
        line: usize,
        token: String,
    },
    #[error("{}: queue trace has no samples", path.display())]
    EmptyQueueTrace { path: PathBuf },
    #[error("{}: byte counter went backwards ({early} -> {late})", path.display())]
    CounterRegressed { path: PathBuf, early: u64, late: u64 },
    #[error("{}: no packets sent", path.display())]
    ZeroPacketsSent { path: PathBuf },
    #[error("bottleneck capacity must be positive")]
    ZeroCapacity,
    #[error("measurement window must be positive, got {0}s")]
    BadWindow(f64),
}
