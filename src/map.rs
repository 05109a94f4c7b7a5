//! Map configuration: the navigable region samplers draw viewpoints from.
use glam::DVec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Describes the navigable region of a scene.
///
/// Viewpoints live inside a disc of `radius` around `center`; the bounding
/// box (`width` × `height`, origin at (0, 0)) bounds grid enumeration.
/// `cell` is the orthogonal-grid spacing and `line_width` the clearance
/// samplers keep from unfilled obstacle segments.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MapConfig {
    pub width: f64,
    pub height: f64,
    pub center: DVec2,
    pub radius: f64,
    pub cell: f64,
    pub line_width: f64,
}

impl MapConfig {
    /// Surfaces malformed configurations before a sampler runs on them.
    pub fn validate(&self) -> Result<()> {
        if !(self.width > 0.0) || !(self.height > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "bounding box must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.radius > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "navigable disc radius must be positive, got {}",
                self.radius
            )));
        }
        if !(self.cell > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "grid cell size must be positive, got {}",
                self.cell
            )));
        }
        if self.line_width < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "line width must be non-negative, got {}",
                self.line_width
            )));
        }
        Ok(())
    }
}

impl Default for MapConfig {
    /// The 600×600 reference scene: a navigable disc of radius 300 centered
    /// at (300, 300), 30-unit grid cells, 3-unit obstacle clearance.
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 600.0,
            center: DVec2::new(300.0, 300.0),
            radius: 300.0,
            cell: 30.0,
            line_width: 3.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(MapConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_cell() {
        let config = MapConfig {
            cell: 0.0,
            ..MapConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_nan_radius() {
        let config = MapConfig {
            radius: f64::NAN,
            ..MapConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
