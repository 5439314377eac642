use std::io;
use std::path::PathBuf;

/// 实验目录级别的失败，整个流程随之终止
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("experiment root {} does not exist", path.display())]
    RootMissing { path: PathBuf },
    #[error("experiment root {} is not a directory", path.display())]
    NotADirectory { path: PathBuf },
    #[error("experiment root {} has no usable base name", path.display())]
    NoBaseName { path: PathBuf },
    #[error("cannot list {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
