//! Non-graphical objects

pub mod layout;
pub mod multileader_style;
pub mod plot_settings;

pub use layout::{Layout, MODEL_LAYOUT_NAME};
pub use multileader_style::MLeaderStyle;
pub use plot_settings::{
    standard_scale, PlotLayoutFlags, PlotPaperUnits, PlotRotation, PlotSettings,
};
