use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use crate::aggregate::{Aggregator, Series};
use crate::config::SweepConfig;
use crate::discover::{CapacityMatcher, DiscoveryError, RunLayout, TraceNames, discover_runs};
use crate::metric::{MeasurementWindow, MetricKind};
use crate::plot::{PlotSpec, RenderError, Renderer};
use crate::sweep::{SweepError, collect_sweep, run_sweep};
use crate::trace::TraceError;

use super::{assert_close, make_run, unique_temp_dir};

/// 三个 run：bw1000 缺队列 trace 且丢包 trace 无发送，bw20000 字节 trace 损坏
fn build_sweep(root: &Path) {
    make_run(
        root,
        "exp-bw5000-1",
        &[
            ("bytesSent.tr", "0 1000\n96 577600\n"),
            ("q.tr", "0 0.1\n1 0.2\n2 0.3\n"),
            ("drops.tr", "96 50 drops\n96 1000 total\n"),
        ],
    );
    make_run(
        root,
        "exp-bw1000-1",
        &[
            ("bytesSent.tr", "24 0\n120 10800000\n"),
            ("drops.tr", "120 0 drops\n120 0 total\n"),
        ],
    );
    make_run(
        root,
        "exp-bw20000-1",
        &[
            ("bytesSent.tr", "24 lots\n120 10\n"),
            ("q.tr", "0 0.5\n"),
            ("drops.tr", "120 10 drops\n120 100 total\n"),
        ],
    );
}

fn capacities(series: &Series) -> Vec<u64> {
    series.points().iter().map(|s| s.capacity_kbps).collect()
}

#[test]
fn each_metric_is_built_independently() {
    let root = unique_temp_dir("agg-independent");
    build_sweep(&root);

    let discovery = discover_runs(
        &root,
        RunLayout::Nested,
        &CapacityMatcher::default(),
        &TraceNames::default(),
    )
    .expect("discover");
    let report = Aggregator::new(MeasurementWindow::Fixed(96.0)).aggregate(&discovery);

    let util = &report.utilization;
    assert_eq!(capacities(&util.series), vec![1000, 5000]);
    assert_close(util.series.points()[0].value, 0.9);
    assert_close(util.series.points()[1].value, 0.00961);
    assert_eq!(util.excluded.len(), 1);
    assert_eq!(util.excluded[0].run.as_str(), "exp-bw20000-1");
    assert!(matches!(util.excluded[0].error, TraceError::BadNumber { .. }));

    // 缺少 q.tr 的 run 只在队列序列中缺席
    let queue = &report.queue;
    assert_eq!(capacities(&queue.series), vec![5000, 20_000]);
    assert_close(queue.series.points()[0].value, 20.0);
    assert_close(queue.series.points()[1].value, 50.0);
    assert!(queue.excluded.is_empty());
    assert_eq!(queue.missing.len(), 1);
    assert_eq!(queue.missing[0].as_str(), "exp-bw1000-1");

    let drops = &report.drops;
    assert_eq!(capacities(&drops.series), vec![5000, 20_000]);
    assert_close(drops.series.points()[0].value, 5.0);
    assert_close(drops.series.points()[1].value, 10.0);
    assert_eq!(drops.excluded.len(), 1);
    assert!(matches!(
        drops.excluded[0].error,
        TraceError::ZeroPacketsSent { .. }
    ));

    assert_eq!(report.series(MetricKind::DropRate), &drops.series);
    let _ = fs::remove_dir_all(&root);
}

#[test]
fn replicate_runs_with_same_capacity_keep_the_last_by_name() {
    let root = unique_temp_dir("agg-dedup");
    make_run(&root, "exp-bw5000-2", &[("q.tr", "0 0.3\n")]);
    make_run(&root, "exp-bw5000-1", &[("q.tr", "0 0.1\n")]);
    make_run(&root, "exp-bw150-1", &[("q.tr", "0 0.2\n")]);

    let report = collect_sweep(&root, &SweepConfig::default()).expect("collect");
    let q = report.series(MetricKind::QueueOccupancy);
    assert_eq!(capacities(q), vec![150, 5000]);
    assert_eq!(q.points()[1].run.as_str(), "exp-bw5000-2");
    assert_close(q.points()[1].value, 30.0);

    assert!(report.series(MetricKind::Utilization).is_empty());
    assert_eq!(report.utilization.missing.len(), 3);
    let _ = fs::remove_dir_all(&root);
}

#[test]
fn replicate_numbers_are_ordered_numerically() {
    let root = unique_temp_dir("agg-natural");
    make_run(&root, "exp-bw5000-10", &[("q.tr", "0 0.4\n")]);
    make_run(&root, "exp-bw5000-2", &[("q.tr", "0 0.2\n")]);

    let d = discover_runs(
        &root,
        RunLayout::Nested,
        &CapacityMatcher::default(),
        &TraceNames::default(),
    )
    .expect("discover");
    let names: Vec<_> = d.runs.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(names, vec!["exp-bw5000-2", "exp-bw5000-10"]);

    let report = collect_sweep(&root, &SweepConfig::default()).expect("collect");
    let q = report.series(MetricKind::QueueOccupancy);
    assert_eq!(q.len(), 1);
    assert_eq!(q.points()[0].run.as_str(), "exp-bw5000-10");
    assert_close(q.points()[0].value, 40.0);
    let _ = fs::remove_dir_all(&root);
}

#[test]
fn window_override_changes_utilization_only() {
    let root = unique_temp_dir("agg-window");
    build_sweep(&root);

    let cfg = SweepConfig {
        measurement_window_secs: Some(48.0),
        ..SweepConfig::default()
    };
    let report = collect_sweep(&root, &cfg).expect("collect");
    assert_close(report.utilization.series.points()[0].value, 1.8);
    assert_close(report.queue.series.points()[0].value, 20.0);
    let _ = fs::remove_dir_all(&root);
}

#[derive(Debug, Default)]
struct RecordingRenderer {
    calls: RefCell<Vec<(MetricKind, PlotSpec, PathBuf, usize)>>,
}

impl Renderer for RecordingRenderer {
    fn extension(&self) -> &'static str {
        "rec"
    }

    fn render(&self, series: &Series, spec: &PlotSpec, out: &Path) -> Result<(), RenderError> {
        self.calls.borrow_mut().push((
            series.metric(),
            spec.clone(),
            out.to_path_buf(),
            series.len(),
        ));
        Ok(())
    }
}

#[test]
fn run_sweep_hands_every_series_to_the_renderer() {
    let parent = unique_temp_dir("agg-render");
    let root = parent.join("fig3-sweep");
    fs::create_dir_all(&root).expect("root");
    build_sweep(&root);
    let out_dir = parent.join("plots");

    let renderer = RecordingRenderer::default();
    let out = run_sweep(&root, &SweepConfig::default(), &renderer, &out_dir).expect("sweep");

    let calls = renderer.calls.borrow();
    let metrics: Vec<_> = calls.iter().map(|c| c.0).collect();
    assert_eq!(metrics, MetricKind::ALL.to_vec());
    assert!(calls.iter().all(|c| c.1.title == "fig3_sweep"));
    assert_eq!(calls.iter().map(|c| c.3).collect::<Vec<_>>(), vec![2, 2, 2]);

    assert_eq!(
        out.written,
        vec![
            out_dir.join("fig3_sweep_util_reproduction.rec"),
            out_dir.join("fig3_sweep_q_avg_reproduction.rec"),
            out_dir.join("fig3_sweep_drop_reproduction.rec"),
        ]
    );
    assert!(out_dir.is_dir());
    let _ = fs::remove_dir_all(&parent);
}

#[test]
fn missing_root_aborts_before_rendering() {
    let root = unique_temp_dir("agg-missing").join("gone");
    let renderer = RecordingRenderer::default();
    let err = run_sweep(&root, &SweepConfig::default(), &renderer, Path::new("."))
        .expect_err("missing root");
    assert!(matches!(
        err,
        SweepError::Discovery(DiscoveryError::RootMissing { .. })
    ));
    assert!(renderer.calls.borrow().is_empty());
}

#[test]
fn invalid_config_is_reported_as_config_error() {
    let root = unique_temp_dir("agg-config");
    let cfg = SweepConfig {
        measurement_window_secs: Some(-1.0),
        ..SweepConfig::default()
    };
    let err = collect_sweep(&root, &cfg).expect_err("bad config");
    assert!(matches!(err, SweepError::Config(_)));
    let _ = fs::remove_dir_all(&root);
}
