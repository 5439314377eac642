use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// run 标识（目录名）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub String);

impl RunId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 瓶颈带宽（kbit/s）在 run 名字中的编码方式
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CapacityLabel {
    /// `<prefix><digits>`，例如 `bw5000`
    Token { prefix: String },
    /// 按分隔符切分后的第 `index` 段，例如 `fig3-5000-1`
    Field { delimiter: String, index: usize },
}

impl Default for CapacityLabel {
    fn default() -> Self {
        CapacityLabel::Token {
            prefix: "bw".to_string(),
        }
    }
}

/// 编译好的带宽解析器
#[derive(Debug, Clone)]
pub enum CapacityMatcher {
    Token(Regex),
    Field { delimiter: String, index: usize },
}

impl CapacityMatcher {
    pub fn new(label: &CapacityLabel) -> Result<Self, regex::Error> {
        Ok(match label {
            CapacityLabel::Token { prefix } => {
                CapacityMatcher::Token(Regex::new(&format!("{}([0-9]+)", regex::escape(prefix)))?)
            }
            CapacityLabel::Field { delimiter, index } => CapacityMatcher::Field {
                delimiter: delimiter.clone(),
                index: *index,
            },
        })
    }

    /// 解析 run 名字中的带宽。
    ///
    /// 没有匹配、出现多个不同的值、或值为 0 时返回 `None`，该 run 不参与统计。
    pub fn capacity_kbps(&self, name: &str) -> Option<u64> {
        match self {
            CapacityMatcher::Token(re) => {
                let mut found = None;
                for caps in re.captures_iter(name) {
                    let v: u64 = caps[1].parse().ok()?;
                    match found {
                        None => found = Some(v),
                        Some(prev) if prev == v => {}
                        Some(_) => return None,
                    }
                }
                found.filter(|&v| v > 0)
            }
            CapacityMatcher::Field { delimiter, index } => {
                let field = name.split(delimiter.as_str()).nth(*index)?;
                if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                field.parse().ok().filter(|&v: &u64| v > 0)
            }
        }
    }
}

impl Default for CapacityMatcher {
    fn default() -> Self {
        CapacityMatcher::Token(Regex::new("bw([0-9]+)").expect("static capacity pattern"))
    }
}
