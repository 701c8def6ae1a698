//! The series buffer: a growable 2-D array of sub-sampled scalar metrics.
//!
//! `record()` is called once per training step, but only every
//! `record_interval`-th step is stored. Rows are appended to a zero-filled
//! buffer that grows one `buffer_capacity` block at a time.

use std::collections::{HashMap, HashSet};
use std::io::{self, Write};
use std::path::Path;

use ndarray::{s, Array2, ArrayView1};
use tracing::{debug, info};

use crate::config::LoggerConfig;
use crate::error::{LagerError, Result};
use crate::query::Query;
use crate::storage;
use crate::viz::{LineOptions, Visualizer, WindowHandle};

/// Rows shown by `peek` when the caller has no preference.
pub const DEFAULT_PEEK_ROWS: usize = 10;

/// Fixed-schema metric buffer with periodic sub-sampling.
///
/// Not thread-safe by itself: wrap it in a `Mutex` if several threads record.
#[derive(Debug, Clone)]
pub struct SeriesBuffer {
    labels: Vec<String>,
    config: LoggerConfig,
    /// Rows `..cursor` are samples; everything after is zeroed headroom.
    entries: Array2<f64>,
    /// Number of stored samples.
    cursor: usize,
    /// Number of `record()` calls, stored or skipped.
    step: usize,
    /// Survives `clear()` so charts keep updating in place.
    windows: HashMap<String, WindowHandle>,
}

impl SeriesBuffer {
    /// Create a buffer for `labels`, in column order.
    ///
    /// Fails if the label set is empty or has duplicates, or if any config
    /// field is zero.
    pub fn new<I, L>(labels: I, config: LoggerConfig) -> Result<Self>
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        config.validate()?;

        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(LagerError::InvalidLabels("at least one label is required".into()));
        }
        let mut seen = HashSet::new();
        for label in &labels {
            if !seen.insert(label.as_str()) {
                return Err(LagerError::InvalidLabels(format!("duplicate label: {label}")));
            }
        }

        let entries = Array2::zeros((config.buffer_capacity, labels.len()));
        Ok(Self {
            labels,
            config,
            entries,
            cursor: 0,
            step: 0,
            windows: HashMap::new(),
        })
    }

    /// Create a buffer for `labels` with [`LoggerConfig::default`].
    pub fn with_defaults<I, L>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Self::new(labels, LoggerConfig::default())
    }

    // ─── Recording ───────────────────────────────────────────────────────────

    /// Count one step and, on every `record_interval`-th step (starting at
    /// step 0), store `values` as a new row.
    ///
    /// The arity check only runs on steps that store: values passed on
    /// skipped steps are discarded unexamined.
    pub fn record(&mut self, values: &[f64]) -> Result<()> {
        if self.step % self.config.record_interval == 0 {
            if values.len() != self.num_labels() {
                return Err(LagerError::Arity {
                    expected: self.num_labels(),
                    got: values.len(),
                });
            }
            if self.cursor == self.capacity() {
                self.grow();
            }
            self.entries
                .row_mut(self.cursor)
                .assign(&ArrayView1::from(values));
            self.cursor += 1;
        }
        self.step += 1;
        Ok(())
    }

    /// Append one more block of `buffer_capacity` zero rows.
    fn grow(&mut self) {
        let old = self.capacity();
        let new = old + self.config.buffer_capacity;
        let mut grown = Array2::<f64>::zeros((new, self.num_labels()));
        grown.slice_mut(s![..old, ..]).assign(&self.entries);
        self.entries = grown;
        debug!(old_capacity = old, new_capacity = new, "Grew series buffer");
    }

    // ─── Output ──────────────────────────────────────────────────────────────

    /// Push every label's series to `viz`, one chart per label, on every
    /// `plot_interval`-th step.
    ///
    /// The step counter is the one advanced by `record()`, so call this after
    /// recording the current step. The first call for a label opens a window;
    /// later calls redraw it.
    pub fn plot<V: Visualizer + ?Sized>(&mut self, viz: &mut V) -> Result<()> {
        if self.step % self.config.plot_interval != 0 {
            return Ok(());
        }

        let x: Vec<f64> = (0..self.cursor)
            .map(|k| (k * self.config.record_interval) as f64)
            .collect();

        for (col, label) in self.labels.iter().enumerate() {
            let y = self.entries.slice(s![..self.cursor, col]).to_vec();
            let existing = self.windows.get(label);
            let created = existing.is_none();
            let handle = viz.line(&x, &y, existing, &LineOptions::for_label(label))?;
            debug!(label = %label, window = %handle, created, points = y.len(), "Plotted series");
            self.windows.insert(label.clone(), handle);
        }
        Ok(())
    }

    /// Print the header and the first `top` samples to stdout
    /// (see [`DEFAULT_PEEK_ROWS`]).
    pub fn peek(&self, top: usize) -> io::Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.write_peek(&mut out, top)
    }

    /// Write the header and the first `top` samples, `", "`-separated.
    pub fn write_peek<W: Write>(&self, out: &mut W, top: usize) -> io::Result<()> {
        writeln!(out, "{}", self.labels.join(", "))?;
        for row in self.entries.outer_iter().take(top.min(self.cursor)) {
            writeln!(out, "{}", storage::format_row(row, ", "))?;
        }
        Ok(())
    }

    /// Write the header and every sample to `path` as comma-separated text,
    /// replacing any existing file.
    pub fn export(&self, path: &Path) -> Result<()> {
        let rows = storage::write_csv(
            path,
            self.labels.as_slice(),
            self.entries.outer_iter().take(self.cursor),
        )?;
        info!(path = %path.display(), rows, "Exported series buffer");
        Ok(())
    }

    /// Drop every sample and reset both counters. The buffer shrinks back to
    /// its initial capacity. Chart windows are kept.
    pub fn clear(&mut self) {
        self.entries = Array2::zeros((self.config.buffer_capacity, self.num_labels()));
        self.cursor = 0;
        self.step = 0;
        debug!(capacity = self.config.buffer_capacity, "Cleared series buffer");
    }

    // ─── Access ──────────────────────────────────────────────────────────────

    /// Resolve `query` to a row of the buffer or a label's stored samples.
    pub fn get(&self, query: impl Into<Query>) -> Result<ArrayView1<'_, f64>> {
        match query.into() {
            Query::Row(index) => self.row(index),
            Query::Label(label) => self.column(&label),
        }
    }

    /// Row `index` of the whole buffer, including unwritten rows, which read
    /// as zeros. Negative indexes count back from the end of the capacity.
    pub fn row(&self, index: isize) -> Result<ArrayView1<'_, f64>> {
        let capacity = self.capacity();
        let resolved = if index < 0 {
            capacity.checked_sub(index.unsigned_abs())
        } else if (index as usize) < capacity {
            Some(index as usize)
        } else {
            None
        };
        match resolved {
            Some(r) => Ok(self.entries.row(r)),
            None => Err(LagerError::IndexOutOfRange { index, capacity }),
        }
    }

    /// Every stored sample of `label`, oldest first.
    pub fn column(&self, label: &str) -> Result<ArrayView1<'_, f64>> {
        let col = self
            .labels
            .iter()
            .position(|l| l == label)
            .ok_or_else(|| LagerError::LabelNotFound(label.to_string()))?;
        Ok(self.entries.slice(s![..self.cursor, col]))
    }

    /// Stored samples, oldest first.
    pub fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, f64>> {
        self.entries.outer_iter().take(self.cursor)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn num_labels(&self) -> usize {
        self.labels.len()
    }

    /// Number of stored samples.
    pub fn len(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }

    /// Number of `record()` calls since construction or the last `clear()`.
    pub fn step(&self) -> usize {
        self.step
    }

    /// Rows currently allocated.
    pub fn capacity(&self) -> usize {
        self.entries.nrows()
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Chart window last used for `label`, if it has been plotted.
    pub fn window(&self, label: &str) -> Option<&WindowHandle> {
        self.windows.get(label)
    }
}
