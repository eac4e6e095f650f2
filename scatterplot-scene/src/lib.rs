//! # Scatterplot Scene
//!
//! Ties the workspace together into one hand-manipulated scatterplot: read a
//! point file, batch the points into mesh chunks inside a container, place the
//! axis labels and let the controllers move and scale the result.
//!
//! ```rust,no_run
//! use scatterplot_interaction::InputSnapshot;
//! use scatterplot_scene::{Scatterplot, ScatterplotConfig};
//!
//! # fn main() -> scatterplot_core::Result<()> {
//! let mut plot = Scatterplot::new(ScatterplotConfig::new("ScatterplotData/points.csv"))?;
//! plot.start()?;
//! plot.tick(1.0 / 90.0, &InputSnapshot::default());
//! # Ok(())
//! # }
//! ```

pub mod axis_labels;
pub mod config;
pub mod session;

pub use axis_labels::*;
pub use config::*;
pub use session::Scatterplot;
