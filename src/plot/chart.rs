use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::aggregate::Series;

use super::{PlotSpec, RenderError, Renderer};

/// 10in × 4in @ 100dpi
const DEFAULT_SIZE: (u32, u32) = (1000, 400);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImageKind {
    Png,
    Svg,
}

/// 对数横轴的折线 + 菱形标记图
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    kind: ImageKind,
    size: (u32, u32),
}

impl ChartRenderer {
    pub fn png() -> Self {
        Self {
            kind: ImageKind::Png,
            size: DEFAULT_SIZE,
        }
    }

    pub fn svg() -> Self {
        Self {
            kind: ImageKind::Svg,
            size: DEFAULT_SIZE,
        }
    }
}

impl Renderer for ChartRenderer {
    fn extension(&self) -> &'static str {
        match self.kind {
            ImageKind::Png => "png",
            ImageKind::Svg => "svg",
        }
    }

    fn render(&self, series: &Series, spec: &PlotSpec, out: &Path) -> Result<(), RenderError> {
        let xy = series.xy();
        let result = match self.kind {
            ImageKind::Png => draw(&BitMapBackend::new(out, self.size).into_drawing_area(), &xy, spec),
            ImageKind::Svg => draw(&SVGBackend::new(out, self.size).into_drawing_area(), &xy, spec),
        };
        result.map_err(|message| RenderError::Backend {
            path: out.to_path_buf(),
            message,
        })
    }
}

fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    xy: &[(f64, f64)],
    spec: &PlotSpec,
) -> Result<(), String> {
    root.fill(&WHITE).map_err(to_message)?;

    let (x_lo, x_hi) = x_range(xy);
    let (y_lo, y_hi) = y_range(xy, spec.y_range);

    let mut chart = ChartBuilder::on(root)
        .caption(&spec.title, ("sans-serif", 24).into_font())
        .margin(10)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d((x_lo..x_hi).log_scale(), y_lo..y_hi)
        .map_err(to_message)?;

    chart
        .configure_mesh()
        .x_desc(spec.x_label.as_str())
        .y_desc(spec.y_label.as_str())
        .draw()
        .map_err(to_message)?;

    chart
        .draw_series(LineSeries::new(xy.iter().copied(), &BLACK))
        .map_err(to_message)?
        .label(spec.legend.as_str())
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLACK));

    // 菱形标记，像素坐标
    chart
        .draw_series(xy.iter().map(|&p| {
            EmptyElement::at(p)
                + Polygon::new(vec![(0, -5), (5, 0), (0, 5), (-5, 0)], BLACK.filled())
        }))
        .map_err(to_message)?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(to_message)?;

    root.present().map_err(to_message)?;
    Ok(())
}

fn to_message<E: std::error::Error>(err: E) -> String {
    err.to_string()
}

/// 横轴（Mbit/s，对数）范围，两端留白
fn x_range(xy: &[(f64, f64)]) -> (f64, f64) {
    let lo = xy.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
    let hi = xy.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
    if !(lo.is_finite() && hi.is_finite() && lo > 0.0) {
        return (0.1, 10.0);
    }
    (lo / 1.5, hi * 1.5)
}

/// 纵轴范围；给定固定范围时只在样本越界时放宽
fn y_range(xy: &[(f64, f64)], fixed: Option<(f64, f64)>) -> (f64, f64) {
    let lo = xy.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let hi = xy.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
    match fixed {
        Some((a, b)) if xy.is_empty() => (a, b),
        Some((a, b)) => (a.min(lo), b.max(hi)),
        None if xy.is_empty() => (0.0, 1.0),
        None => {
            let top = if hi > 0.0 { hi * 1.1 } else { 1.0 };
            (lo.min(0.0), top)
        }
    }
}
