//! 瓶颈指标随带宽变化的图
//!
//! 读取一个实验下所有 run 的 trace，画出利用率、平均队列、丢包率三张图。

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use sweep_metrics::config::SweepConfig;
use sweep_metrics::plot::OutputFormat;
use sweep_metrics::sweep::run_sweep;

#[derive(Debug, Parser)]
#[command(
    name = "plot_sweep",
    about = "Plot bottleneck utilization, queue and drop rate across a capacity sweep"
)]
struct Args {
    /// Experiment root containing one directory per run
    root: PathBuf,

    /// Post-processing config (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the measurement window used to normalize throughput (seconds)
    #[arg(long)]
    window_secs: Option<f64>,

    /// Directory to write the plots to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Png)]
    format: OutputFormat,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(path) => match SweepConfig::load(path) {
            Ok(cfg) => cfg,
            Err(err) => return fail(err),
        },
        None => SweepConfig::default(),
    };
    if let Some(secs) = args.window_secs {
        cfg.measurement_window_secs = Some(secs);
    }

    let renderer = args.format.renderer();
    match run_sweep(&args.root, &cfg, renderer.as_ref(), &args.out_dir) {
        Ok(out) => {
            for path in out.written {
                println!("{}", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(err) => fail(err),
    }
}

fn fail(err: impl std::fmt::Display) -> ExitCode {
    tracing::error!("{err}");
    eprintln!("plot_sweep: {err}");
    ExitCode::FAILURE
}
