use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::trace::TraceKind;

use super::{CapacityMatcher, DiscoveryError, RunId};

/// run 目录相对实验根路径的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunLayout {
    /// run 目录是根目录的子目录
    #[default]
    Nested,
    /// run 目录与根路径同级，名字以根路径的 basename 开头（`outputs/fig3` -> `outputs/fig3-bw5000-1`）
    Prefixed,
}

/// 每类 trace 在 run 目录中的文件名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceNames {
    pub byte_counter: String,
    pub queue_sample: String,
    pub drop_counter: String,
}

impl Default for TraceNames {
    fn default() -> Self {
        Self {
            byte_counter: "bytesSent.tr".to_string(),
            queue_sample: "q.tr".to_string(),
            drop_counter: "drops.tr".to_string(),
        }
    }
}

impl TraceNames {
    pub fn name(&self, kind: TraceKind) -> &str {
        match kind {
            TraceKind::ByteCounter => &self.byte_counter,
            TraceKind::QueueSample => &self.queue_sample,
            TraceKind::DropCounter => &self.drop_counter,
        }
    }
}

/// 一个带宽已知的 run 及其现有的 trace 文件
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub id: RunId,
    pub capacity_kbps: u64,
    pub dir: PathBuf,
    pub traces: BTreeMap<TraceKind, PathBuf>,
}

impl Run {
    pub fn trace(&self, kind: TraceKind) -> Option<&Path> {
        self.traces.get(&kind).map(PathBuf::as_path)
    }
}

/// 发现结果，run 按目录名的自然顺序排序（`-2` 在 `-10` 之前）
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    pub runs: Vec<Run>,
    /// 名字中解析不出带宽的目录
    pub unmatched: Vec<String>,
}

impl Discovery {
    /// 某类 trace 的 (run, 带宽, 文件) 列表
    pub fn by_kind(&self, kind: TraceKind) -> Vec<(RunId, u64, PathBuf)> {
        self.runs
            .iter()
            .filter_map(|run| {
                run.trace(kind)
                    .map(|path| (run.id.clone(), run.capacity_kbps, path.to_path_buf()))
            })
            .collect()
    }

    /// 缺少某类 trace 的 run
    pub fn missing(&self, kind: TraceKind) -> impl Iterator<Item = &Run> {
        self.runs.iter().filter(move |run| run.trace(kind).is_none())
    }
}

/// 枚举实验下的所有 run
pub fn discover_runs(
    root: &Path,
    layout: RunLayout,
    matcher: &CapacityMatcher,
    names: &TraceNames,
) -> Result<Discovery, DiscoveryError> {
    let (scan_dir, prefix) = match layout {
        RunLayout::Nested => {
            if !root.exists() {
                return Err(DiscoveryError::RootMissing {
                    path: root.to_path_buf(),
                });
            }
            if !root.is_dir() {
                return Err(DiscoveryError::NotADirectory {
                    path: root.to_path_buf(),
                });
            }
            (root.to_path_buf(), None)
        }
        RunLayout::Prefixed => {
            let Some(base) = root.file_name().and_then(|n| n.to_str()) else {
                return Err(DiscoveryError::NoBaseName {
                    path: root.to_path_buf(),
                });
            };
            let parent = match root.parent() {
                Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
                _ => PathBuf::from("."),
            };
            if !parent.is_dir() {
                return Err(DiscoveryError::RootMissing { path: parent });
            }
            (parent, Some(base.to_string()))
        }
    };

    let entries = fs::read_dir(&scan_dir).map_err(|source| DiscoveryError::ReadDir {
        path: scan_dir.clone(),
        source,
    })?;

    let mut candidates = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| DiscoveryError::ReadDir {
            path: scan_dir.clone(),
            source,
        })?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            tracing::debug!(path = %path.display(), "skipping non-utf8 directory name");
            continue;
        };
        if let Some(prefix) = &prefix {
            if !name.starts_with(prefix.as_str()) {
                continue;
            }
        }
        candidates.push((name, path));
    }
    // read_dir 顺序不确定；按名字排序保证去重时“最后发现”是确定的。
    // 数字段按数值比较，自然顺序相同的名字再按字节序
    candidates.sort_by(|a, b| human_sort::compare(&a.0, &b.0).then_with(|| a.0.cmp(&b.0)));

    let mut discovery = Discovery::default();
    for (name, dir) in candidates {
        let Some(capacity_kbps) = matcher.capacity_kbps(&name) else {
            tracing::debug!(run = %name, "no capacity label, skipping");
            discovery.unmatched.push(name);
            continue;
        };

        let traces: BTreeMap<_, _> = TraceKind::ALL
            .into_iter()
            .filter_map(|kind| {
                let path = dir.join(names.name(kind));
                path.is_file().then_some((kind, path))
            })
            .collect();

        tracing::debug!(run = %name, capacity_kbps, traces = traces.len(), "discovered run");
        discovery.runs.push(Run {
            id: RunId(name),
            capacity_kbps,
            dir,
            traces,
        });
    }

    Ok(discovery)
}
