//! SVG rendering backend: one file per chart window.

use std::collections::HashMap;
use std::ops::Range;
use std::path::{Path, PathBuf};

use lager_core::{LagerError, LineOptions, Result, Visualizer, WindowHandle};
use plotters::prelude::*;
use tracing::debug;
use uuid::Uuid;

const DEFAULT_SIZE: (u32, u32) = (640, 480);

/// A [`Visualizer`] that draws every window into its own SVG file.
#[derive(Debug)]
pub struct SvgVisualizer {
    dir: PathBuf,
    size: (u32, u32),
    windows: HashMap<WindowHandle, PathBuf>,
}

impl SvgVisualizer {
    /// Render into `dir`, creating it if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            size: DEFAULT_SIZE,
            windows: HashMap::new(),
        })
    }

    /// Image size in pixels (width, height).
    pub fn with_size(mut self, size: (u32, u32)) -> Self {
        self.size = size;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `window`, if this visualizer created it.
    pub fn path(&self, window: &WindowHandle) -> Option<&Path> {
        self.windows.get(window).map(PathBuf::as_path)
    }

    pub fn num_windows(&self) -> usize {
        self.windows.len()
    }

    fn render(&self, path: &Path, points: &[(f64, f64)], opts: &LineOptions) -> Result<()> {
        let root = SVGBackend::new(path, self.size).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err("backend"))?;

        {
            let mut chart = ChartBuilder::on(&root)
                .margin(10)
                .caption(&opts.title, ("sans-serif", 20.0))
                .x_label_area_size(if opts.xtick { 40 } else { 0 })
                .y_label_area_size(if opts.ytick { 60 } else { 0 })
                .build_cartesian_2d(
                    axis_range(points.iter().map(|p| p.0)),
                    axis_range(points.iter().map(|p| p.1)),
                )
                .map_err(draw_err("chart build"))?;

            let mut mesh = chart.configure_mesh();
            mesh.x_desc(opts.xlabel.as_str()).y_desc(opts.ylabel.as_str());
            if !opts.xtick {
                mesh.disable_x_axis();
            }
            if !opts.ytick {
                mesh.disable_y_axis();
            }
            mesh.draw().map_err(draw_err("mesh"))?;

            chart
                .draw_series(LineSeries::new(points.iter().copied(), &BLUE))
                .map_err(draw_err("draw"))?;
        }

        root.present().map_err(draw_err("render"))?;
        Ok(())
    }
}

impl Visualizer for SvgVisualizer {
    fn line(
        &mut self,
        x: &[f64],
        y: &[f64],
        window: Option<&WindowHandle>,
        opts: &LineOptions,
    ) -> Result<WindowHandle> {
        if x.len() != y.len() {
            return Err(LagerError::Visualizer(format!(
                "x has {} points but y has {}",
                x.len(),
                y.len()
            )));
        }

        let (handle, path) = match window {
            Some(handle) => {
                let path = self.windows.get(handle).cloned().ok_or_else(|| {
                    LagerError::Visualizer(format!("unknown window: {handle}"))
                })?;
                (handle.clone(), path)
            }
            None => {
                let handle = WindowHandle::new(format!("window_{}", Uuid::new_v4().simple()));
                let path = self.dir.join(format!("{handle}.svg"));
                (handle, path)
            }
        };

        // Non-finite samples have no place on a chart.
        let points: Vec<(f64, f64)> = x
            .iter()
            .copied()
            .zip(y.iter().copied())
            .filter(|(a, b)| a.is_finite() && b.is_finite())
            .collect();

        self.render(&path, &points, opts)?;
        debug!(
            window = %handle,
            path = %path.display(),
            points = points.len(),
            "Rendered SVG chart"
        );
        self.windows.insert(handle.clone(), path);
        Ok(handle)
    }
}

/// Bounds of `values`, widened so the range is never empty.
fn axis_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if lo > hi {
        return 0.0..1.0;
    }
    if lo == hi {
        let pad = if lo == 0.0 { 1.0 } else { lo.abs() * 0.1 };
        return (lo - pad)..(hi + pad);
    }
    lo..hi
}

fn draw_err<E: std::fmt::Display>(stage: &'static str) -> impl Fn(E) -> LagerError {
    move |e| LagerError::Visualizer(format!("{stage} error: {e}"))
}

#[cfg(test)]
mod tests {
    use super::axis_range;

    #[test]
    fn axis_range_handles_degenerate_input() {
        assert_eq!(axis_range(std::iter::empty()), 0.0..1.0);
        assert_eq!(axis_range([0.0].into_iter()), -1.0..1.0);
        assert_eq!(axis_range([10.0, 10.0].into_iter()), 9.0..11.0);
        assert_eq!(axis_range([3.0, -1.0, 2.0].into_iter()), -1.0..3.0);
    }
}
