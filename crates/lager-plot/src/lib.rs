//! lager-plot: renders lager chart windows to SVG files.
//!
//! Each window is one file, `<dir>/<handle>.svg`. Redrawing a window
//! rewrites its file in place, so an image viewer with auto-reload shows
//! the series growing during training.

mod svg;

pub use svg::SvgVisualizer;
