//! Run 发现模块
//!
//! 枚举实验目录下的各个 run，从目录名中解析瓶颈带宽，并找到每个 run 现有的 trace 文件。

mod discovery;
mod error;
mod run_id;

pub use discovery::{Discovery, Run, RunLayout, TraceNames, discover_runs};
pub use error::DiscoveryError;
pub use run_id::{CapacityLabel, CapacityMatcher, RunId};
