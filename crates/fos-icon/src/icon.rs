//! Icon - ordered paths in a viewBox, drawn in painter's order

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::drawer::draw_path;
use crate::error::{PathFailure, Result};
use crate::path::{IconPath, LinearGradient};
use crate::surface::Surface;
use crate::transform::{Transform2D, ViewBox, target_transform};

/// A parsed vector icon
///
/// Built once by a front-end and read-mostly afterwards. Only `transform`
/// changes after construction, through `set_viewport` and `apply_transform`.
/// Clone the icon to render it from several threads with different
/// stored transforms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Icon {
    pub view_box: ViewBox,
    /// Drawn in order; later paths cover earlier ones
    pub paths: Vec<IconPath>,
    transform: Transform2D,
    pub titles: Vec<String>,
    pub descriptions: Vec<String>,
    pub gradients: HashMap<String, LinearGradient>,
    /// Reusable path groups; not drawn on their own
    pub definitions: HashMap<String, Vec<IconPath>>,
}

impl Icon {
    /// Create an empty icon with an identity transform
    pub fn new(view_box: ViewBox) -> Self {
        Self {
            view_box,
            paths: Vec::new(),
            transform: Transform2D::identity(),
            titles: Vec::new(),
            descriptions: Vec::new(),
            gradients: HashMap::new(),
            definitions: HashMap::new(),
        }
    }

    pub fn with_path(mut self, path: IconPath) -> Self {
        self.paths.push(path);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.titles.push(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.descriptions.push(description.into());
        self
    }

    pub fn with_gradient(mut self, id: impl Into<String>, gradient: LinearGradient) -> Self {
        self.gradients.insert(id.into(), gradient);
        self
    }

    pub fn with_definition(mut self, id: impl Into<String>, paths: Vec<IconPath>) -> Self {
        self.definitions.insert(id.into(), paths);
        self
    }

    /// Current viewBox-to-pixel transform
    pub fn transform(&self) -> Transform2D {
        self.transform
    }

    /// Map the viewBox onto the pixel rectangle (x, y, w, h).
    ///
    /// Replaces the stored transform; anything set earlier through
    /// `apply_transform` is discarded. On error the transform is unchanged.
    pub fn set_viewport(&mut self, x: f32, y: f32, w: f32, h: f32) -> Result<()> {
        self.transform = target_transform(&self.view_box, x, y, w, h)?;
        Ok(())
    }

    /// Compose `matrix` on top of the stored transform (`matrix * transform`).
    ///
    /// A result that is not finite or not invertible is rejected and the
    /// stored transform is left as it was.
    pub fn apply_transform(&mut self, matrix: Transform2D) -> Result<()> {
        self.transform = matrix.multiply(&self.transform).checked()?;
        Ok(())
    }

    /// Draw all paths with the stored transform
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, opacity: f32) -> Vec<PathFailure> {
        self.draw_with(surface, &self.transform, opacity)
    }

    /// Draw all paths with an explicit transform.
    ///
    /// A path that fails to rasterize is skipped and reported; the remaining
    /// paths are still drawn.
    pub fn draw_with<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        transform: &Transform2D,
        opacity: f32,
    ) -> Vec<PathFailure> {
        let (width, height) = surface.size();
        tracing::debug!(paths = self.paths.len(), width, height, opacity, "drawing icon");

        self.paths
            .iter()
            .enumerate()
            .filter_map(|(index, path)| {
                draw_path(&mut *surface, path, transform, opacity, &self.gradients)
                    .err()
                    .map(|reason| PathFailure { index, reason })
            })
            .inspect(|failure| tracing::warn!("skipped {}", failure))
            .collect()
    }
}
