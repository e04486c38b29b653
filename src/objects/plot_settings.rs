//! Plot configuration settings of a paper-space layout

use bitflags::bitflags;

/// Plot paper units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotPaperUnits {
    /// Inches
    Inches = 0,
    /// Millimeters
    #[default]
    Millimeters = 1,
}

impl PlotPaperUnits {
    /// Create from DXF code
    pub fn from_code(code: i16) -> Self {
        match code {
            0 => PlotPaperUnits::Inches,
            _ => PlotPaperUnits::Millimeters,
        }
    }

    /// Conversion factor from this unit to millimeters
    pub fn unit_factor(self) -> f64 {
        match self {
            PlotPaperUnits::Inches => 25.4,
            PlotPaperUnits::Millimeters => 1.0,
        }
    }
}

/// Plot rotation angle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotRotation {
    /// No rotation
    #[default]
    None = 0,
    /// 90 degrees counter-clockwise
    Degrees90 = 1,
    /// Upside down
    Degrees180 = 2,
    /// 90 degrees clockwise
    Degrees270 = 3,
}

impl PlotRotation {
    /// Create from DXF code; `None` for values outside 0-3
    pub fn try_from_code(code: i16) -> Option<Self> {
        match code {
            0 => Some(PlotRotation::None),
            1 => Some(PlotRotation::Degrees90),
            2 => Some(PlotRotation::Degrees180),
            3 => Some(PlotRotation::Degrees270),
            _ => None,
        }
    }
}

bitflags! {
    /// Plot layout flags (group code 70 of PLOTSETTINGS)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PlotLayoutFlags: i32 {
        const PLOT_VIEWPORT_BORDERS = 1;
        const SHOW_PLOT_STYLES = 2;
        const PLOT_CENTERED = 4;
        const PLOT_HIDDEN = 8;
        const USE_STANDARD_SCALE = 16;
        const PLOT_PLOT_STYLES = 32;
        const SCALE_LINEWEIGHTS = 64;
        const PRINT_LINEWEIGHTS = 128;
        const DRAW_VIEWPORTS_FIRST = 512;
        const MODEL_TYPE = 1024;
        const UPDATE_PAPER = 2048;
        const ZOOM_TO_PAPER_ON_UPDATE = 4096;
        const INITIALIZING = 8192;
        const PREV_PLOT_INIT = 16384;
    }
}

/// Standard plot scale as (numerator, denominator)
///
/// Index 16 is 1:1; unknown indices fall back to 1:1 like the reference
/// table lookup does.
pub fn standard_scale(index: i16) -> (f64, f64) {
    match index {
        1 => (1.0 / 128.0, 12.0),
        2 => (1.0 / 64.0, 12.0),
        3 => (1.0 / 32.0, 12.0),
        4 => (1.0 / 16.0, 12.0),
        5 => (3.0 / 32.0, 12.0),
        6 => (1.0 / 8.0, 12.0),
        7 => (3.0 / 16.0, 12.0),
        8 => (1.0 / 4.0, 12.0),
        9 => (3.0 / 8.0, 12.0),
        10 => (1.0 / 2.0, 12.0),
        11 => (3.0 / 4.0, 12.0),
        12 => (1.0, 12.0),
        13 => (3.0, 12.0),
        14 => (6.0, 12.0),
        15 => (12.0, 12.0),
        16 => (1.0, 1.0),
        17 => (1.0, 2.0),
        18 => (1.0, 4.0),
        19 => (1.0, 8.0),
        20 => (1.0, 10.0),
        21 => (1.0, 16.0),
        22 => (1.0, 20.0),
        23 => (1.0, 30.0),
        24 => (1.0, 40.0),
        25 => (1.0, 50.0),
        26 => (1.0, 100.0),
        27 => (2.0, 1.0),
        28 => (4.0, 1.0),
        29 => (8.0, 1.0),
        30 => (10.0, 1.0),
        31 => (100.0, 1.0),
        32 => (1000.0, 1.0),
        _ => (1.0, 1.0),
    }
}

/// Plot settings embedded in every LAYOUT object
#[derive(Debug, Clone)]
pub struct PlotSettings {
    /// Page setup name
    pub page_setup_name: String,
    /// Plotter configuration file or system printer name
    pub plot_configuration_file: String,
    /// Paper size descriptor
    pub paper_size: String,
    /// Left margin in mm
    pub left_margin: f64,
    /// Bottom margin in mm
    pub bottom_margin: f64,
    /// Right margin in mm
    pub right_margin: f64,
    /// Top margin in mm
    pub top_margin: f64,
    /// Paper width in mm
    pub paper_width: f64,
    /// Paper height in mm
    pub paper_height: f64,
    /// Plot origin X offset
    pub plot_origin_x_offset: f64,
    /// Plot origin Y offset
    pub plot_origin_y_offset: f64,
    /// Custom scale numerator
    pub scale_numerator: f64,
    /// Custom scale denominator
    pub scale_denominator: f64,
    /// Paper units
    pub plot_paper_units: PlotPaperUnits,
    /// Plot rotation
    pub plot_rotation: PlotRotation,
    /// Standard scale table index
    pub standard_scale_type: i16,
    /// Plot layout flags
    pub plot_layout_flags: PlotLayoutFlags,
}

impl PlotSettings {
    /// Create plot settings with defaults (A4 landscape, 1:1)
    pub fn new() -> Self {
        PlotSettings {
            page_setup_name: String::new(),
            plot_configuration_file: "DWG to PDF.pc3".to_string(),
            paper_size: String::new(),
            left_margin: 7.5,
            bottom_margin: 20.0,
            right_margin: 7.5,
            top_margin: 20.0,
            paper_width: 297.0,
            paper_height: 210.0,
            plot_origin_x_offset: 0.0,
            plot_origin_y_offset: 0.0,
            scale_numerator: 1.0,
            scale_denominator: 1.0,
            plot_paper_units: PlotPaperUnits::Millimeters,
            plot_rotation: PlotRotation::None,
            standard_scale_type: 16,
            plot_layout_flags: PlotLayoutFlags::USE_STANDARD_SCALE
                | PlotLayoutFlags::PLOT_VIEWPORT_BORDERS
                | PlotLayoutFlags::PRINT_LINEWEIGHTS,
        }
    }

    /// Plot scale as denominator / numerator, 1.0 when the numerator is zero
    pub fn scale_factor(&self) -> f64 {
        if self.scale_numerator == 0.0 {
            1.0
        } else {
            self.scale_denominator / self.scale_numerator
        }
    }
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self::new()
    }
}
