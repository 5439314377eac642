//! Trace 读取模块
//!
//! 解析仿真输出的三类 trace 文件：字节计数（bytesSent）、队列采样（q）、丢包计数（drops）。
//! 每行格式为 `<timestamp> <value> [tag]`，空行跳过，多余的 token 忽略。

mod error;
mod kind;
mod reader;

pub use error::TraceError;
pub use kind::TraceKind;
pub use reader::{ByteCounterTrace, CounterSnapshot, DropCounterTrace, QueueSampleTrace, TraceFile};
