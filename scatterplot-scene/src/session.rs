//! A running scatterplot: loaded points, their meshes and the hand controls

use crate::axis_labels::{layout_axis_labels, AxisLabel};
use crate::config::ScatterplotConfig;
use scatterplot_core::{Drawable, Point3f, Result, Vector3f};
use scatterplot_interaction::{Container, InputSnapshot, ManipulationController, ManipulationEffect};
use scatterplot_io::{
    default_axis_names, spawn_load, LoadDiagnostic, PendingLoad, PointFileReader, PointTable,
};
use scatterplot_mesh::MeshBatcher;
use tracing::{debug, info};

/// Owns the container, its chunks and the controller that moves it
pub struct Scatterplot {
    config: ScatterplotConfig,
    batcher: MeshBatcher,
    container: Container,
    controller: ManipulationController,
    axis_names: [String; 3],
    labels: Vec<AxisLabel>,
    diagnostics: Vec<LoadDiagnostic>,
    pending: Option<PendingLoad>,
}

impl Scatterplot {
    /// Fails with a configuration error before anything is loaded or drawn
    pub fn new(config: ScatterplotConfig) -> Result<Self> {
        config.validate()?;
        let batcher = config.batcher();
        let controller = ManipulationController::new(config.manipulation.clone());
        let axis_names = config.axis_names.clone().unwrap_or_else(default_axis_names);
        Ok(Self {
            config,
            batcher,
            container: Container::new(),
            controller,
            axis_names,
            labels: Vec::new(),
            diagnostics: Vec::new(),
            pending: None,
        })
    }

    pub fn config(&self) -> &ScatterplotConfig {
        &self.config
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    /// For hosts that place the plot before the first tick
    pub fn container_mut(&mut self) -> &mut Container {
        &mut self.container
    }

    pub fn controller(&self) -> &ManipulationController {
        &self.controller
    }

    pub fn axis_names(&self) -> &[String; 3] {
        &self.axis_names
    }

    pub fn labels(&self) -> &[AxisLabel] {
        &self.labels
    }

    /// Problems recovered from during the last load
    pub fn diagnostics(&self) -> &[LoadDiagnostic] {
        &self.diagnostics
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Read the configured point file
    pub fn load(&self) -> Result<PointTable> {
        PointFileReader::read(&self.config.points_path, &self.config.file_options())
    }

    /// Load the configured file and draw it
    pub fn start(&mut self) -> Result<()> {
        let table = self.load()?;
        self.populate(&table)
    }

    /// Start reading the configured file on a background thread
    pub fn begin_load(&mut self) -> Result<()> {
        self.pending = Some(spawn_load(
            self.config.points_path.clone(),
            self.config.file_options(),
        )?);
        Ok(())
    }

    /// Draw the background load once it has finished. Returns true on the
    /// call that populated the plot.
    pub fn poll_load(&mut self) -> Result<bool> {
        let Some(pending) = self.pending.as_mut() else {
            return Ok(false);
        };
        let Some(result) = pending.poll() else {
            return Ok(false);
        };
        self.pending = None;
        self.populate(&result?)?;
        Ok(true)
    }

    /// Replace whatever is drawn with the points of `table`
    pub fn populate(&mut self, table: &PointTable) -> Result<()> {
        self.axis_names = match &self.config.axis_names {
            Some(names) => names.clone(),
            None => table.axis_names.clone(),
        };
        self.diagnostics = table.diagnostics.clone();

        let (min, max) = table.cloud.bounding_box();
        debug!(?min, ?max, "point bounds");

        self.populate_points(table.cloud.as_slice())
    }

    /// Replace whatever is drawn with `points`, keeping the current axis names
    pub fn populate_points(&mut self, points: &[Point3f]) -> Result<()> {
        let chunks = self.batcher.batch(points)?;
        info!(
            points = points.len(),
            chunks = chunks.len(),
            "scatterplot populated"
        );
        self.container.set_chunks(chunks);

        self.labels = if self.config.show_axis_labels {
            layout_axis_labels(&self.axis_names, &self.label_half_extents())
        } else {
            Vec::new()
        };
        Ok(())
    }

    /// Advance the hand controls by one frame
    pub fn tick(&mut self, dt: f32, input: &InputSnapshot) -> &[ManipulationEffect] {
        self.controller.tick(&mut self.container, dt, input)
    }

    /// Drop the drawn chunks and labels and any gesture or load in progress
    pub fn teardown(&mut self) {
        self.container.clear_chunks();
        self.labels.clear();
        self.diagnostics.clear();
        self.controller.reset();
        self.pending = None;
        debug!("scatterplot torn down");
    }

    // The plot box is the unit cube in container space, seen at its current scale
    fn label_half_extents(&self) -> Vector3f {
        self.container.scale.abs() * 0.5
    }
}
