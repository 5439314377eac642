//! 聚合模块
//!
//! 对每种指标独立地收集各 run 的样本，按带宽排序并去重，得到可直接绘图的序列。

mod aggregator;
mod series;

pub use aggregator::{Aggregator, Exclusion, MetricOutcome, SweepReport};
pub use series::{Series, SeriesBuilder};
