//! Layout object
//!
//! A layout ties together three records: this LAYOUT object, a block
//! (`*Model_Space`, `*Paper_Space` or `*Paper_SpaceN`) and the block record
//! owning the layout's entities. The block record handle is the layout key;
//! every entity of the layout carries it as owner.

use super::plot_settings::PlotSettings;
use crate::types::{Handle, Vector2, Vector3};

/// Name of the model space layout
pub const MODEL_LAYOUT_NAME: &str = "Model";

/// A layout object (model space or one paper-space sheet)
#[derive(Debug, Clone)]
pub struct Layout {
    /// Handle of this layout object
    pub handle: Handle,
    /// Layout name shown in the UI tab
    pub name: String,
    /// Tab order; model space is 0
    pub taborder: i32,
    /// Handle of the block record owning the layout's entities (layout key)
    pub block_record: Handle,
    /// Plot settings
    pub plot: PlotSettings,
    /// Lower-left drawing limit in paper space units
    pub limmin: Vector2,
    /// Upper-right drawing limit in paper space units
    pub limmax: Vector2,
    /// Minimum drawing extents
    pub extmin: Vector3,
    /// Maximum drawing extents
    pub extmax: Vector3,
    /// Handle of the main viewport (id 1), if created
    pub main_viewport: Handle,
}

impl Layout {
    /// Create a layout linked to a block record
    pub fn new(name: impl Into<String>, block_record: Handle) -> Self {
        Layout {
            handle: Handle::NULL,
            name: name.into(),
            taborder: 1,
            block_record,
            plot: PlotSettings::new(),
            limmin: Vector2::ZERO,
            limmax: Vector2::new(297.0, 210.0),
            extmin: Vector3::new(1e20, 1e20, 1e20),
            extmax: Vector3::new(-1e20, -1e20, -1e20),
            main_viewport: Handle::NULL,
        }
    }

    /// The layout key: owner handle of all entities of this layout
    pub fn layout_key(&self) -> Handle {
        self.block_record
    }

    /// Check if this is the model space layout
    pub fn is_model(&self) -> bool {
        self.name == MODEL_LAYOUT_NAME
    }

    /// Reset drawing limits to the paper size and extents to the AutoCAD
    /// "empty" defaults
    pub fn reset_limits(&mut self, paper_width: f64, paper_height: f64) {
        self.limmin = Vector2::ZERO;
        self.limmax = Vector2::new(paper_width, paper_height);
        self.extmin = Vector3::new(1e20, 1e20, 1e20);
        self.extmax = Vector3::new(-1e20, -1e20, -1e20);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_key() {
        let record = Handle::new(0x1F);
        let layout = Layout::new("Sheet1", record);
        assert_eq!(layout.layout_key(), record);
        assert!(!layout.is_model());
    }

    #[test]
    fn test_reset_limits() {
        let mut layout = Layout::new("Sheet1", Handle::new(1));
        layout.extmin = Vector3::ZERO;
        layout.extmax = Vector3::new(10.0, 10.0, 0.0);
        layout.reset_limits(420.0, 297.0);
        assert_eq!(layout.limmax, Vector2::new(420.0, 297.0));
        // extents reset to the inverted "empty" markers
        assert!(layout.extmin.x > layout.extmax.x);
    }
}
