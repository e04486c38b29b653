//! Document model: entity database and document root

use crate::entities::EntityType;
use crate::error::{DxfError, Result};
use crate::io::TagWriter;
use crate::layouts::{Layouts, PaperSetup};
use crate::notification::NotificationCollection;
use crate::objects::{Layout, MLeaderStyle};
use crate::tables::{BlockRecord, LineType, Table, TableEntry, TextStyle};
use crate::types::Handle;
use indexmap::IndexMap;

/// First handle value issued by a fresh database
const FIRST_HANDLE: u64 = 0x10;

/// The entity database: all entities of a document keyed by handle
///
/// Also acts as the handle registry. Handles are issued monotonically and
/// never reused within a session, even after the entity they identified
/// has been removed.
#[derive(Debug, Clone)]
pub struct EntityDb {
    entities: IndexMap<Handle, EntityType>,
    next_handle: u64,
}

impl EntityDb {
    /// Create an empty database
    pub fn new() -> Self {
        EntityDb {
            entities: IndexMap::new(),
            next_handle: FIRST_HANDLE,
        }
    }

    /// Issue the next free handle
    pub fn allocate_handle(&mut self) -> Handle {
        let handle = Handle::new(self.next_handle);
        self.next_handle += 1;
        handle
    }

    /// Store an entity, assigning a handle if it has none
    pub fn insert(&mut self, mut entity: EntityType) -> Handle {
        let mut handle = entity.handle();
        if handle.is_null() {
            handle = self.allocate_handle();
            entity.as_entity_mut().set_handle(handle);
        } else if handle.value() >= self.next_handle {
            // keep the registry ahead of externally assigned handles
            self.next_handle = handle.value() + 1;
        }
        self.entities.insert(handle, entity);
        handle
    }

    /// Look up an entity
    pub fn get(&self, handle: Handle) -> Option<&EntityType> {
        self.entities.get(&handle)
    }

    /// Look up an entity mutably
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut EntityType> {
        self.entities.get_mut(&handle)
    }

    /// Remove an entity; its handle is never reused
    pub fn remove(&mut self, handle: Handle) -> Option<EntityType> {
        self.entities.shift_remove(&handle)
    }

    /// Check for an entity
    pub fn contains(&self, handle: Handle) -> bool {
        self.entities.contains_key(&handle)
    }

    /// Number of stored entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Check if the database is empty
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterate over all entities in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&Handle, &EntityType)> {
        self.entities.iter()
    }
}

impl Default for EntityDb {
    fn default() -> Self {
        Self::new()
    }
}

/// An in-memory CAD document
///
/// Owns the entity database, the symbol tables and the layout directory.
/// A new document is seeded with the standard table entries, the "Model"
/// layout and one active paper-space layout "Layout1".
#[derive(Debug, Clone)]
pub struct CadDocument {
    /// The entity database
    pub db: EntityDb,
    /// Block record table
    pub block_records: Table<BlockRecord>,
    /// Linetype table
    pub line_types: Table<LineType>,
    /// Text style table
    pub text_styles: Table<TextStyle>,
    /// Multileader style table
    pub mleader_styles: Table<MLeaderStyle>,
    /// The layout directory
    pub layouts: Layouts,
    /// Non-fatal diagnostics collected by operations on this document
    pub notifications: NotificationCollection,
}

impl CadDocument {
    /// Create a document with the mandatory seed content
    pub fn new() -> Self {
        let mut db = EntityDb::new();

        let mut line_types = Table::new();
        for mut linetype in [
            LineType::by_block(),
            LineType::by_layer(),
            LineType::continuous(),
        ] {
            linetype.set_handle(db.allocate_handle());
            // seeding cannot collide, the table is empty
            let _ = line_types.add(linetype);
        }

        let mut text_styles = Table::new();
        let mut standard_text = TextStyle::standard();
        standard_text.set_handle(db.allocate_handle());
        let _ = text_styles.add(standard_text);

        let mut mleader_styles = Table::new();
        let mut standard_mleader = MLeaderStyle::standard();
        standard_mleader.set_handle(db.allocate_handle());
        let _ = mleader_styles.add(standard_mleader);

        let mut block_records = Table::new();
        let layouts = Layouts::setup(&mut db, &mut block_records)
            .unwrap_or_else(|_| unreachable!("seeding an empty document cannot fail"));

        CadDocument {
            db,
            block_records,
            line_types,
            text_styles,
            mleader_styles,
            layouts,
            notifications: NotificationCollection::new(),
        }
    }

    /// The model space layout
    pub fn modelspace(&self) -> &Layout {
        self.layouts.modelspace()
    }

    /// The active paper-space layout
    pub fn active_layout(&self) -> Result<&Layout> {
        self.layouts.active_layout(&self.block_records)
    }

    /// Create a new inactive paper-space layout
    pub fn new_layout(&mut self, name: &str) -> Result<&Layout> {
        self.layouts
            .new_layout(name, &mut self.db, &mut self.block_records)
    }

    /// Make `name` the active paper-space layout
    pub fn set_active_layout(&mut self, name: &str) -> Result<()> {
        self.layouts.set_active(name, &mut self.block_records)
    }

    /// Delete a layout and all its entities
    pub fn delete_layout(&mut self, name: &str) -> Result<()> {
        self.layouts
            .delete(name, &mut self.db, &mut self.block_records)
    }

    /// Add an entity to a layout
    pub fn add_entity(&mut self, layout: &str, entity: impl Into<EntityType>) -> Result<Handle> {
        self.layouts
            .add_entity(layout, entity.into(), &mut self.db, &mut self.block_records)
    }

    /// Remove an entity from a layout
    pub fn delete_entity(&mut self, layout: &str, handle: Handle) -> Result<EntityType> {
        self.layouts
            .delete_entity(layout, handle, &mut self.db, &mut self.block_records)
    }

    /// Entity handles of a layout in creation order
    pub fn entity_handles(&self, layout: &str) -> Result<Vec<Handle>> {
        self.layouts
            .entity_handles(layout, &self.block_records)
            .map(|handles| handles.to_vec())
    }

    /// Configure plot settings of a paper-space layout
    pub fn paper_setup(&mut self, layout: &str, setup: &PaperSetup) -> Result<()> {
        self.layouts
            .paper_setup(layout, setup, &mut self.db, &mut self.block_records)
    }

    /// Write the ENTITIES section to a tag writer
    pub fn write_entities_section(&self, writer: &mut dyn TagWriter) -> Result<()> {
        self.layouts
            .write_entities_section(writer, &self.db, &self.block_records)
    }

    /// Register a block record by name, returning its handle
    ///
    /// Returns the existing record's handle when the name is taken.
    pub fn add_block_record(&mut self, name: &str) -> Result<Handle> {
        if let Some(existing) = self.block_records.get(name) {
            return Ok(existing.handle());
        }
        let mut record = BlockRecord::new(name);
        record.set_handle(self.db.allocate_handle());
        let handle = record.handle();
        self.block_records.add(record)?;
        Ok(handle)
    }

    /// Look up an entity, failing with `NotFound`
    pub fn entity(&self, handle: Handle) -> Result<&EntityType> {
        self.db
            .get(handle)
            .ok_or_else(|| DxfError::handle_not_found(handle))
    }
}

impl Default for CadDocument {
    fn default() -> Self {
        Self::new()
    }
}
