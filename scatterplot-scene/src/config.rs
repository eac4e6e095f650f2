//! Scatterplot configuration

use scatterplot_core::{Error, Result, Vector3f};
use scatterplot_interaction::ManipulationConfig;
use scatterplot_io::{Delimiter, PointFileOptions};
use scatterplot_mesh::{default_center_offset, Material, MeshBatcher, StampGeometry, VERTEX_BUDGET};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Edge length of the default cube drawn for each point
pub const DEFAULT_STAMP_SIZE: f32 = 0.005;

/// Everything needed to build and drive one scatterplot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterplotConfig {
    /// Delimited point file to visualise
    pub points_path: PathBuf,
    /// The first line of the file names the axes
    pub has_header: bool,
    pub separator: Delimiter,
    /// Axis names that take precedence over the file header
    pub axis_names: Option<[String; 3]>,
    pub show_axis_labels: bool,
    pub stamp_size: f32,
    /// Subtracted from every point before placement
    pub center_offset: Vector3f,
    /// Maximum vertices per mesh chunk
    pub vertex_budget: usize,
    pub material: Material,
    pub manipulation: ManipulationConfig,
}

impl Default for ScatterplotConfig {
    fn default() -> Self {
        Self {
            points_path: PathBuf::from("ScatterplotData/points.csv"),
            has_header: false,
            separator: Delimiter::Space,
            axis_names: None,
            show_axis_labels: true,
            stamp_size: DEFAULT_STAMP_SIZE,
            center_offset: default_center_offset(),
            vertex_budget: VERTEX_BUDGET,
            material: Material::default(),
            manipulation: ManipulationConfig::default(),
        }
    }
}

impl ScatterplotConfig {
    pub fn new(points_path: impl Into<PathBuf>) -> Self {
        Self {
            points_path: points_path.into(),
            ..Self::default()
        }
    }

    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    pub fn with_separator(mut self, separator: impl Into<Delimiter>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_axis_names(mut self, names: [String; 3]) -> Self {
        self.axis_names = Some(names);
        self
    }

    pub fn with_vertex_budget(mut self, budget: usize) -> Self {
        self.vertex_budget = budget;
        self
    }

    /// Reject settings that would make loading or batching fail later
    pub fn validate(&self) -> Result<()> {
        if !(self.stamp_size.is_finite() && self.stamp_size > 0.0) {
            return Err(Error::Configuration(format!(
                "stamp size must be positive, got {}",
                self.stamp_size
            )));
        }
        if !self.manipulation.min_grab_distance.is_finite()
            || self.manipulation.min_grab_distance < 0.0
        {
            return Err(Error::Configuration(
                "minimum grab distance must be a non-negative number".to_string(),
            ));
        }
        self.batcher().validate()
    }

    pub fn file_options(&self) -> PointFileOptions {
        PointFileOptions::new(self.separator, self.has_header)
    }

    pub fn stamp(&self) -> StampGeometry {
        StampGeometry::cube(self.stamp_size)
    }

    pub fn batcher(&self) -> MeshBatcher {
        MeshBatcher::new(self.stamp())
            .with_budget(self.vertex_budget)
            .with_material(Arc::new(self.material.clone()))
            .with_center_offset(self.center_offset)
    }
}
