//! Point-file I/O for scatterplots
//!
//! This crate reads the delimited text files that feed a scatterplot, writes
//! files in the same layout, and can run a load on a background thread.

pub mod background;
pub mod delimited;

pub use background::{spawn_load, PendingLoad};
pub use delimited::{
    default_axis_names, Delimiter, DiagnosticKind, LoadDiagnostic, PointFileOptions,
    PointFileReader, PointFileWriter, PointTable, DEFAULT_AXIS_NAMES,
};

