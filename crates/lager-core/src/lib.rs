//! lager-core: sub-sampled metric buffer for training loops.
//!
//! A [`SeriesBuffer`] holds one column per label and stores a row every
//! `record_interval` steps. Stored series can be charted through any
//! [`Visualizer`], inspected column- or row-wise, and exported as
//! comma-separated text.

pub mod buffer;
pub mod config;
pub mod error;
pub mod query;
pub mod storage;
pub mod viz;

pub use buffer::{SeriesBuffer, DEFAULT_PEEK_ROWS};
pub use config::LoggerConfig;
pub use error::{LagerError, Result};
pub use query::Query;
pub use viz::{Chart, LineOptions, MemoryVisualizer, Visualizer, WindowHandle};
