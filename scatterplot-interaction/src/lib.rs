//! # Scatterplot Interaction
//!
//! Dual-hand manipulation of a scatterplot container. Holding one trigger
//! drags the plot with that controller; holding both scales it by the change
//! in distance between the controllers.
//!
//! ```rust
//! use scatterplot_core::{Point3f, Vector3f};
//! use scatterplot_interaction::{Container, HandSample, InputSnapshot, ManipulationController};
//!
//! let mut container = Container::new();
//! let mut controller = ManipulationController::default();
//!
//! let grab = InputSnapshot::new(
//!     HandSample::at(Point3f::new(-0.25, 0.0, 0.0)).pressed(),
//!     HandSample::at(Point3f::new(0.25, 0.0, 0.0)).pressed(),
//! );
//! controller.tick(&mut container, 0.011, &grab);
//!
//! let stretch = InputSnapshot::new(
//!     HandSample::at(Point3f::new(-0.5, 0.0, 0.0)),
//!     HandSample::at(Point3f::new(0.5, 0.0, 0.0)),
//! );
//! controller.tick(&mut container, 0.011, &stretch);
//! assert!((container.scale - Vector3f::repeat(2.0)).norm() < 1e-5);
//! ```

pub mod container;
pub mod controller;
pub mod hands;
pub mod state;
pub mod visuals;

pub use container::Container;
pub use controller::ManipulationController;
pub use hands::*;
pub use state::*;
pub use visuals::*;
