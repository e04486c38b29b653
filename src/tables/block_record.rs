//! Block record table entry
//!
//! Every drawing space (model space, each paper-space layout, every block
//! definition) owns its entities through a block record. The record stores
//! the handles of its entities; the entity data lives in the document's
//! entity database.

use super::TableEntry;
use crate::types::Handle;

/// Block name of model space
pub const MODEL_SPACE_BLOCK: &str = "*Model_Space";
/// Block name of the active paper-space layout
pub const PAPER_SPACE_BLOCK: &str = "*Paper_Space";
/// Transient block name used while swapping the active paper-space layout
pub const TMP_PAPER_SPACE_BLOCK: &str = "*Paper_Space999999";

/// A block record table entry
#[derive(Debug, Clone)]
pub struct BlockRecord {
    /// Unique handle for the block record table entry
    pub handle: Handle,
    /// Block name
    pub name: String,
    /// Handle of the layout object backed by this block, if any
    pub layout: Handle,
    /// Block is anonymous (generated name)
    pub anonymous: bool,
    /// Explodability flag
    pub explodable: bool,
    /// Handles of the entities owned by this block, in creation order
    pub entities: Vec<Handle>,
}

impl BlockRecord {
    /// Create a new block record
    pub fn new(name: impl Into<String>) -> Self {
        BlockRecord {
            handle: Handle::NULL,
            name: name.into(),
            layout: Handle::NULL,
            anonymous: false,
            explodable: true,
            entities: Vec::new(),
        }
    }

    /// Create the model space block record
    pub fn model_space() -> Self {
        BlockRecord::new(MODEL_SPACE_BLOCK)
    }

    /// Create the active paper space block record
    pub fn paper_space() -> Self {
        BlockRecord::new(PAPER_SPACE_BLOCK)
    }

    /// Check if this is the model space block
    pub fn is_model_space(&self) -> bool {
        self.name.eq_ignore_ascii_case(MODEL_SPACE_BLOCK)
    }

    /// Check if this is a paper space block (active or not)
    pub fn is_paper_space(&self) -> bool {
        let upper = self.name.to_uppercase();
        upper.starts_with(&PAPER_SPACE_BLOCK.to_uppercase())
    }

    /// Check if the name is one of the reserved layout block names
    pub fn is_reserved_name(name: &str) -> bool {
        name.eq_ignore_ascii_case(MODEL_SPACE_BLOCK)
            || name.eq_ignore_ascii_case(PAPER_SPACE_BLOCK)
            || name.eq_ignore_ascii_case(TMP_PAPER_SPACE_BLOCK)
    }

    /// Record ownership of an entity handle
    pub fn append_entity(&mut self, handle: Handle) {
        self.entities.push(handle);
    }

    /// Drop ownership of an entity handle; true if it was present
    pub fn remove_entity(&mut self, handle: Handle) -> bool {
        match self.entities.iter().position(|h| *h == handle) {
            Some(idx) => {
                self.entities.remove(idx);
                true
            }
            None => false,
        }
    }
}

impl TableEntry for BlockRecord {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_names() {
        assert!(BlockRecord::is_reserved_name("*Model_Space"));
        assert!(BlockRecord::is_reserved_name("*MODEL_SPACE"));
        assert!(BlockRecord::is_reserved_name("*paper_space"));
        assert!(BlockRecord::is_reserved_name("*Paper_Space999999"));
        assert!(!BlockRecord::is_reserved_name("*Paper_Space0"));
        assert!(!BlockRecord::is_reserved_name("MyBlock"));
    }

    #[test]
    fn test_space_predicates() {
        assert!(BlockRecord::model_space().is_model_space());
        assert!(BlockRecord::paper_space().is_paper_space());
        assert!(BlockRecord::new("*Paper_Space3").is_paper_space());
        assert!(!BlockRecord::new("Arrow").is_paper_space());
    }

    #[test]
    fn test_entity_ownership() {
        let mut record = BlockRecord::model_space();
        let h = Handle::new(0x20);
        record.append_entity(h);
        assert_eq!(record.entities, vec![h]);
        assert!(record.remove_entity(h));
        assert!(!record.remove_entity(h));
        assert!(record.entities.is_empty());
    }
}
