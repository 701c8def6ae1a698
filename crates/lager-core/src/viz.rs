//! Visualization backends: the interface the buffer plots through, plus an
//! in-memory implementation for headless runs.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{LagerError, Result};

/// Opaque reference to a chart window owned by a [`Visualizer`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowHandle(String);

impl WindowHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display options for one line chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineOptions {
    pub title: String,
    pub xtick: bool,
    pub ytick: bool,
    pub xlabel: String,
    pub ylabel: String,
}

impl LineOptions {
    /// Chart for a single label: titled after it, x axis in steps.
    pub fn for_label(label: &str) -> Self {
        Self {
            title: label.to_string(),
            xtick: true,
            ytick: true,
            xlabel: "step".to_string(),
            ylabel: label.to_string(),
        }
    }
}

/// A backend able to upsert line charts.
pub trait Visualizer {
    /// Draw `y` against `x`. With `window == None` a new window is created;
    /// otherwise the existing window is redrawn in place. Returns the handle
    /// of the window that now shows the series.
    fn line(
        &mut self,
        x: &[f64],
        y: &[f64],
        window: Option<&WindowHandle>,
        opts: &LineOptions,
    ) -> Result<WindowHandle>;
}

/// Latest contents of a [`MemoryVisualizer`] window.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub opts: LineOptions,
    pub revision: usize,
}

/// Keeps every window in memory. Useful when no display is available.
#[derive(Debug, Default)]
pub struct MemoryVisualizer {
    windows: HashMap<WindowHandle, Chart>,
    next_id: usize,
    created: usize,
    updated: usize,
}

impl MemoryVisualizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chart(&self, window: &WindowHandle) -> Option<&Chart> {
        self.windows.get(window)
    }

    pub fn num_windows(&self) -> usize {
        self.windows.len()
    }

    /// Number of `line` calls that opened a new window.
    pub fn created(&self) -> usize {
        self.created
    }

    /// Number of `line` calls that redrew an existing window.
    pub fn updated(&self) -> usize {
        self.updated
    }
}

impl Visualizer for MemoryVisualizer {
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

        match window {
            Some(handle) => {
                let chart = self.windows.get_mut(handle).ok_or_else(|| {
                    LagerError::Visualizer(format!("unknown window: {handle}"))
                })?;
                chart.x = x.to_vec();
                chart.y = y.to_vec();
                chart.opts = opts.clone();
                chart.revision += 1;
                self.updated += 1;
                Ok(handle.clone())
            }
            None => {
                let handle = WindowHandle::new(format!("window_{}", self.next_id));
                self.next_id += 1;
                self.windows.insert(
                    handle.clone(),
                    Chart {
                        x: x.to_vec(),
                        y: y.to_vec(),
                        opts: opts.clone(),
                        revision: 0,
                    },
                );
                self.created += 1;
                Ok(handle)
            }
        }
    }
}
