//! Line type table entry

use super::TableEntry;
use crate::types::Handle;

/// A line type table entry
#[derive(Debug, Clone)]
pub struct LineType {
    /// Unique handle
    pub handle: Handle,
    /// Line type name
    pub name: String,
    /// Description
    pub description: String,
    /// Pattern element lengths (positive = dash, negative = space, 0 = dot)
    pub elements: Vec<f64>,
    /// Total pattern length
    pub pattern_length: f64,
}

impl LineType {
    /// Create a new line type
    pub fn new(name: impl Into<String>) -> Self {
        LineType {
            handle: Handle::NULL,
            name: name.into(),
            description: String::new(),
            elements: Vec::new(),
            pattern_length: 0.0,
        }
    }

    /// Create the standard "Continuous" line type
    pub fn continuous() -> Self {
        LineType {
            description: "Solid line".to_string(),
            ..Self::new("Continuous")
        }
    }

    /// Create the standard "ByLayer" line type
    pub fn by_layer() -> Self {
        Self::new("ByLayer")
    }

    /// Create the standard "ByBlock" line type
    pub fn by_block() -> Self {
        Self::new("ByBlock")
    }
}

impl TableEntry for LineType {
    fn handle(&self) -> Handle {
        self.handle
    }

    fn set_handle(&mut self, handle: Handle) {
        self.handle = handle;
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}
