use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::{TraceError, TraceKind};

/// 累计计数器的一次快照
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CounterSnapshot {
    pub t_secs: f64,
    pub value: u64,
}

/// 瓶颈链路累计发送字节：第一行为早期快照，第二行为结束时快照
#[derive(Debug, Clone, PartialEq)]
pub struct ByteCounterTrace {
    pub path: PathBuf,
    pub early: CounterSnapshot,
    pub late: CounterSnapshot,
}

/// 队列占用率采样（只保留占用率，丢弃时间戳）
#[derive(Debug, Clone, PartialEq)]
pub struct QueueSampleTrace {
    pub path: PathBuf,
    pub samples: Vec<f64>,
}

/// 丢包计数：第一行为累计丢包数，第二行为累计发送包数
#[derive(Debug, Clone, PartialEq)]
pub struct DropCounterTrace {
    pub path: PathBuf,
    pub dropped: u64,
    pub sent: u64,
}

/// 可从文本解析的 trace 文件
pub trait TraceFile: Sized {
    const KIND: TraceKind;

    /// 解析 trace 文本；`path` 只用于错误信息
    fn parse(path: &Path, text: &str) -> Result<Self, TraceError>;

    fn read(path: &Path) -> Result<Self, TraceError> {
        let text = fs::read_to_string(path).map_err(|source| TraceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &text)
    }
}

impl TraceFile for ByteCounterTrace {
    const KIND: TraceKind = TraceKind::ByteCounter;

    fn parse(path: &Path, text: &str) -> Result<Self, TraceError> {
        let [early, late] = counter_pair(path, text, Self::KIND)?;
        Ok(Self {
            path: path.to_path_buf(),
            early,
            late,
        })
    }
}

impl TraceFile for QueueSampleTrace {
    const KIND: TraceKind = TraceKind::QueueSample;

    fn parse(path: &Path, text: &str) -> Result<Self, TraceError> {
        let mut samples = Vec::new();
        for (line_no, line) in data_lines(text) {
            let (_, token) = split_line(path, line_no, line)?;
            samples.push(parse_f64(path, line_no, token)?);
        }
        if samples.len() < Self::KIND.min_lines() {
            return Err(TraceError::TooFewLines {
                path: path.to_path_buf(),
                kind: Self::KIND,
                need: Self::KIND.min_lines(),
                found: samples.len(),
            });
        }
        Ok(Self {
            path: path.to_path_buf(),
            samples,
        })
    }
}

impl TraceFile for DropCounterTrace {
    const KIND: TraceKind = TraceKind::DropCounter;

    fn parse(path: &Path, text: &str) -> Result<Self, TraceError> {
        let [dropped, sent] = counter_pair(path, text, Self::KIND)?;
        Ok(Self {
            path: path.to_path_buf(),
            dropped: dropped.value,
            sent: sent.value,
        })
    }
}

/// 非空行，行号从 1 开始
fn data_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}

/// 拆出时间戳与数值 token；第二个之后的 token（如 `drops`/`total` 标签）忽略
fn split_line<'a>(path: &Path, line_no: usize, line: &'a str) -> Result<(f64, &'a str), TraceError> {
    let mut tokens = line.split_whitespace();
    let (Some(ts), Some(value)) = (tokens.next(), tokens.next()) else {
        return Err(TraceError::MissingField {
            path: path.to_path_buf(),
            line: line_no,
        });
    };
    Ok((parse_f64(path, line_no, ts)?, value))
}

fn counter_pair(path: &Path, text: &str, kind: TraceKind) -> Result<[CounterSnapshot; 2], TraceError> {
    let lines: Vec<_> = data_lines(text).take(2).collect();
    if lines.len() < kind.min_lines() {
        return Err(TraceError::TooFewLines {
            path: path.to_path_buf(),
            kind,
            need: kind.min_lines(),
            found: lines.len(),
        });
    }

    let mut out = [CounterSnapshot::default(); 2];
    for (slot, (line_no, line)) in out.iter_mut().zip(lines) {
        let (t_secs, token) = split_line(path, line_no, line)?;
        *slot = CounterSnapshot {
            t_secs,
            value: parse_number(path, line_no, token)?,
        };
    }
    Ok(out)
}

fn parse_number<T: FromStr>(path: &Path, line: usize, token: &str) -> Result<T, TraceError> {
    token.parse().map_err(|_| TraceError::BadNumber {
        path: path.to_path_buf(),
        line,
        token: token.to_string(),
    })
}

fn parse_f64(path: &Path, line: usize, token: &str) -> Result<f64, TraceError> {
    let v: f64 = parse_number(path, line, token)?;
    if !v.is_finite() {
        return Err(TraceError::BadNumber {
            path: path.to_path_buf(),
            line,
            token: token.to_string(),
        });
    }
    Ok(v)
}
