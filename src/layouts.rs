//! Layout directory
//!
//! Manages the named drawing spaces of a document: the mandatory "Model"
//! layout plus any number of paper-space layouts. Each layout is a triple
//! of a layout object, a block and a block record; the block NAME encodes
//! which paper-space layout is active (`*Paper_Space`), so activating a
//! layout is a block rename, not a flag update.
//!
//! Operations that touch entities or block records take those collaborators
//! as explicit arguments; [`CadDocument`](crate::document::CadDocument)
//! provides the convenience wrappers.

use crate::document::EntityDb;
use crate::entities::{Entity, EntityType, Viewport};
use crate::error::{DxfError, Result};
use crate::io::TagWriter;
use crate::objects::{standard_scale, Layout, PlotLayoutFlags, PlotRotation, MODEL_LAYOUT_NAME};
use crate::tables::block_record::{
    MODEL_SPACE_BLOCK, PAPER_SPACE_BLOCK, TMP_PAPER_SPACE_BLOCK,
};
use crate::tables::{BlockRecord, Table, TableEntry};
use crate::types::{Handle, Vector2, Vector3};
use indexmap::IndexMap;

/// Plot scale given to [`Layouts::paper_setup`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlotScale {
    /// Index into the standard scale table (0-32, 16 = 1:1)
    Standard(i16),
    /// Explicit (numerator, denominator), e.g. (1, 50) for 1:50
    Custom(f64, f64),
}

/// Parameters for [`Layouts::paper_setup`]
#[derive(Debug, Clone)]
pub struct PaperSetup {
    /// Paper size as (width, height)
    pub size: (f64, f64),
    /// Margins as (top, right, bottom, left), clockwise
    pub margins: (f64, f64, f64, f64),
    /// Paper units, "mm" or "inch"
    pub units: String,
    /// 0 = none, 1 = 90 deg ccw, 2 = upside down, 3 = 90 deg cw
    pub rotation: i16,
    /// Plot scale
    pub scale: PlotScale,
    /// Paper name prefix
    pub name: String,
    /// Plotter configuration file or system printer name
    pub device: String,
}

impl Default for PaperSetup {
    fn default() -> Self {
        PaperSetup {
            size: (297.0, 210.0),
            margins: (10.0, 15.0, 10.0, 15.0),
            units: "mm".to_string(),
            rotation: 0,
            scale: PlotScale::Standard(16),
            name: "sheet".to_string(),
            device: "DWG to PDF.pc3".to_string(),
        }
    }
}

/// The layout directory of a document
#[derive(Debug, Clone, Default)]
pub struct Layouts {
    layouts: IndexMap<String, Layout>,
}

impl Layouts {
    /// Create the directory with the mandatory "Model" layout and one
    /// active paper-space layout "Layout1"
    pub fn setup(db: &mut EntityDb, block_records: &mut Table<BlockRecord>) -> Result<Self> {
        let mut layouts = Layouts {
            layouts: IndexMap::new(),
        };

        let mut model_record = BlockRecord::model_space();
        model_record.set_handle(db.allocate_handle());
        let mut model = Layout::new(MODEL_LAYOUT_NAME, model_record.handle());
        model.handle = db.allocate_handle();
        model.taborder = 0;
        model_record.layout = model.handle;
        block_records.add(model_record)?;
        layouts.layouts.insert(model.name.clone(), model);

        let mut paper_record = BlockRecord::paper_space();
        paper_record.set_handle(db.allocate_handle());
        let mut layout1 = Layout::new("Layout1", paper_record.handle());
        layout1.handle = db.allocate_handle();
        layout1.taborder = 1;
        paper_record.layout = layout1.handle;
        block_records.add(paper_record)?;
        layouts.layouts.insert(layout1.name.clone(), layout1);

        Ok(layouts)
    }

    /// Number of layouts, model space included
    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    /// The directory is never empty in a valid document
    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    /// Check for a layout by name
    pub fn contains(&self, name: &str) -> bool {
        self.layouts.contains_key(name)
    }

    /// Layout names in creation order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.layouts.keys().map(String::as_str)
    }

    /// Layout names sorted by tab order; ties sort by name
    pub fn names_in_taborder(&self) -> Vec<&str> {
        let mut names: Vec<(&i32, &str)> = self
            .layouts
            .values()
            .map(|layout| (&layout.taborder, layout.name.as_str()))
            .collect();
        names.sort();
        names.into_iter().map(|(_, name)| name).collect()
    }

    /// Get a layout by name, or the first paper-space layout in tab order
    /// for `None`
    pub fn get(&self, name: Option<&str>) -> Result<&Layout> {
        match name {
            Some(name) => self
                .layouts
                .get(name)
                .ok_or_else(|| DxfError::NotFound(name.to_string())),
            None => {
                let first = self
                    .names_in_taborder()
                    .into_iter()
                    .find(|n| *n != MODEL_LAYOUT_NAME)
                    .map(str::to_string);
                match first {
                    Some(name) => Ok(&self.layouts[&name]),
                    None => Err(DxfError::NotFound("no paper space layout".to_string())),
                }
            }
        }
    }

    /// Get a mutable layout by name
    pub fn get_mut(&mut self, name: &str) -> Result<&mut Layout> {
        self.layouts
            .get_mut(name)
            .ok_or_else(|| DxfError::NotFound(name.to_string()))
    }

    /// The model space layout
    pub fn modelspace(&self) -> &Layout {
        &self.layouts[MODEL_LAYOUT_NAME]
    }

    /// The layout an entity belongs to, by its owner handle
    pub fn get_layout_for_entity(&self, entity: &EntityType) -> Result<&Layout> {
        self.get_layout_by_key(entity.as_entity().owner())
    }

    /// The layout whose block record handle equals `layout_key`
    pub fn get_layout_by_key(&self, layout_key: Handle) -> Result<&Layout> {
        self.layouts
            .values()
            .find(|layout| layout.layout_key() == layout_key)
            .ok_or_else(|| DxfError::NotFound(format!("layout with key {}", layout_key)))
    }

    /// Generate the next free `*Paper_SpaceN` block name
    fn next_paper_space_block_name(block_records: &Table<BlockRecord>) -> String {
        let mut n = 0u32;
        loop {
            let name = format!("{}{}", PAPER_SPACE_BLOCK, n);
            if !block_records.contains(&name) {
                return name;
            }
            n += 1;
        }
    }

    /// Create a new inactive paper-space layout
    ///
    /// The block record is created first and the directory entry last, so a
    /// failure never leaves a dangling directory entry.
    pub fn new_layout(
        &mut self,
        name: &str,
        db: &mut EntityDb,
        block_records: &mut Table<BlockRecord>,
    ) -> Result<&Layout> {
        if self.layouts.contains_key(name) {
            return Err(DxfError::AlreadyExists(name.to_string()));
        }
        if BlockRecord::is_reserved_name(name) {
            return Err(DxfError::InvalidArgument(format!(
                "'{}' is a reserved block name",
                name
            )));
        }

        let block_name = Self::next_paper_space_block_name(block_records);
        let mut record = BlockRecord::new(block_name);
        record.set_handle(db.allocate_handle());
        let record_handle = record.handle();

        let mut layout = Layout::new(name, record_handle);
        layout.handle = db.allocate_handle();
        layout.taborder = self.layouts.len() as i32;
        record.layout = layout.handle;

        block_records.add(record)?;
        let entry = self.layouts.entry(name.to_string()).or_insert(layout);
        Ok(entry)
    }

    /// Layout key of the active paper-space layout
    pub fn active_layout_key(&self, block_records: &Table<BlockRecord>) -> Result<Handle> {
        block_records
            .get(PAPER_SPACE_BLOCK)
            .map(|record| record.handle())
            .ok_or_else(|| {
                DxfError::Invariant("no active paper space block found".to_string())
            })
    }

    /// The active paper-space layout
    pub fn active_layout(&self, block_records: &Table<BlockRecord>) -> Result<&Layout> {
        let key = self.active_layout_key(block_records)?;
        self.get_layout_by_key(key)
    }

    /// Make `name` the active paper-space layout
    ///
    /// Implemented as a cyclic block rename: the current `*Paper_Space`
    /// block takes the target's generated name and the target's block
    /// becomes `*Paper_Space`. Entity owner handles stay valid because the
    /// block record handles never change.
    pub fn set_active(
        &mut self,
        name: &str,
        block_records: &mut Table<BlockRecord>,
    ) -> Result<()> {
        if name == MODEL_LAYOUT_NAME {
            return Err(DxfError::InvalidArgument(
                "cannot set model space as active layout".to_string(),
            ));
        }
        let new_active = self.get(Some(name))?;
        let new_key = new_active.layout_key();
        if self.active_layout_key(block_records)? == new_key {
            return Ok(());
        }

        let new_block_name = block_records
            .get_by_handle(new_key)
            .map(|record| record.name.clone())
            .ok_or_else(|| {
                DxfError::Invariant(format!("block record {} missing", new_key))
            })?;

        block_records.rename(PAPER_SPACE_BLOCK, TMP_PAPER_SPACE_BLOCK)?;
        block_records.rename(&new_block_name, PAPER_SPACE_BLOCK)?;
        block_records.rename(TMP_PAPER_SPACE_BLOCK, &new_block_name)?;
        Ok(())
    }

    /// Delete a layout and all its entities
    ///
    /// Deleting the active layout activates another paper-space layout
    /// first; deleting the last paper-space layout is an invariant
    /// violation and aborts before any mutation.
    pub fn delete(
        &mut self,
        name: &str,
        db: &mut EntityDb,
        block_records: &mut Table<BlockRecord>,
    ) -> Result<()> {
        if name == MODEL_LAYOUT_NAME {
            return Err(DxfError::InvalidArgument(
                "cannot delete model space layout".to_string(),
            ));
        }
        let layout_key = self.get(Some(name))?.layout_key();

        if self.active_layout_key(block_records)? == layout_key {
            let successor = self
                .layouts
                .keys()
                .find(|n| n.as_str() != name && n.as_str() != MODEL_LAYOUT_NAME)
                .cloned();
            match successor {
                Some(successor) => self.set_active(&successor, block_records)?,
                None => {
                    return Err(DxfError::Invariant(
                        "cannot delete the last paper space layout".to_string(),
                    ))
                }
            }
        }

        self.delete_all_entities(name, db, block_records)?;
        let block_name = block_records
            .get_by_handle(layout_key)
            .map(|record| record.name.clone())
            .ok_or_else(|| {
                DxfError::Invariant(format!("block record {} missing", layout_key))
            })?;
        block_records.remove(&block_name);
        self.layouts.shift_remove(name);
        Ok(())
    }

    /// Add an entity to a layout
    ///
    /// Assigns a handle if the entity has none and keeps the owner and
    /// paperspace tags consistent with the layout.
    pub fn add_entity(
        &self,
        name: &str,
        mut entity: EntityType,
        db: &mut EntityDb,
        block_records: &mut Table<BlockRecord>,
    ) -> Result<Handle> {
        let layout = self.get(Some(name))?;
        let layout_key = layout.layout_key();
        let record = block_records
            .get_by_handle_mut(layout_key)
            .ok_or_else(|| {
                DxfError::Invariant(format!("block record {} missing", layout_key))
            })?;
        {
            let common = entity.as_entity_mut().common_mut();
            common.owner = layout_key;
            common.paperspace = !layout.is_model();
        }
        let handle = db.insert(entity);
        record.append_entity(handle);
        Ok(handle)
    }

    /// Remove an entity from a layout and from the entity database
    pub fn delete_entity(
        &self,
        name: &str,
        handle: Handle,
        db: &mut EntityDb,
        block_records: &mut Table<BlockRecord>,
    ) -> Result<EntityType> {
        let layout_key = self.get(Some(name))?.layout_key();
        let record = block_records
            .get_by_handle_mut(layout_key)
            .ok_or_else(|| {
                DxfError::Invariant(format!("block record {} missing", layout_key))
            })?;
        if !record.remove_entity(handle) {
            return Err(DxfError::NotFound(format!(
                "entity {} in layout '{}'",
                handle, name
            )));
        }
        db.remove(handle)
            .ok_or_else(|| DxfError::handle_not_found(handle))
    }

    /// Remove all entities of a layout from the entity database
    pub fn delete_all_entities(
        &self,
        name: &str,
        db: &mut EntityDb,
        block_records: &mut Table<BlockRecord>,
    ) -> Result<()> {
        let layout_key = self.get(Some(name))?.layout_key();
        let record = block_records
            .get_by_handle_mut(layout_key)
            .ok_or_else(|| {
                DxfError::Invariant(format!("block record {} missing", layout_key))
            })?;
        for handle in record.entities.drain(..) {
            db.remove(handle);
        }
        Ok(())
    }

    /// Entity handles of a layout in creation order
    pub fn entity_handles<'a>(
        &self,
        name: &str,
        block_records: &'a Table<BlockRecord>,
    ) -> Result<&'a [Handle]> {
        let layout_key = self.get(Some(name))?.layout_key();
        block_records
            .get_by_handle(layout_key)
            .map(|record| record.entities.as_slice())
            .ok_or_else(|| {
                DxfError::Invariant(format!("block record {} missing", layout_key))
            })
    }

    /// Configure plot settings and paper size of a paper-space layout,
    /// then reset its viewports
    pub fn paper_setup(
        &mut self,
        name: &str,
        setup: &PaperSetup,
        db: &mut EntityDb,
        block_records: &mut Table<BlockRecord>,
    ) -> Result<()> {
        if name == MODEL_LAYOUT_NAME {
            return Err(DxfError::InvalidArgument(
                "no paper setup for model space".to_string(),
            ));
        }
        let rotation = PlotRotation::try_from_code(setup.rotation)
            .ok_or_else(|| DxfError::InvalidArgument("valid rotation values: 0-3".to_string()))?;

        let (standard_scale_type, scale_num, scale_den, use_std_scale) = match setup.scale {
            PlotScale::Custom(numerator, denominator) => (16, numerator, denominator, false),
            PlotScale::Standard(index) => {
                if !(0..=32).contains(&index) {
                    return Err(DxfError::InvalidArgument(format!(
                        "standard scale index out of range: {}",
                        index
                    )));
                }
                let (numerator, denominator) = standard_scale(index);
                (index, numerator, denominator, true)
            }
        };

        let units = setup.units.to_lowercase();
        let (units_label, plot_paper_units, unit_factor) = if units.starts_with("inch") {
            ("Inches", crate::objects::PlotPaperUnits::Inches, 25.4)
        } else if units == "mm" {
            ("MM", crate::objects::PlotPaperUnits::Millimeters, 1.0)
        } else {
            return Err(DxfError::InvalidArgument(format!(
                "units have to be \"mm\" or \"inch\", not supported: \"{}\"",
                setup.units
            )));
        };

        let (paper_width, paper_height) = setup.size;
        let (margin_top, margin_right, margin_bottom, margin_left) = setup.margins;

        {
            let layout = self.get_mut(name)?;
            let plot = &mut layout.plot;
            plot.page_setup_name = String::new();
            plot.plot_configuration_file = setup.device.clone();
            plot.paper_size = format!(
                "{}_({:.2}_x_{:.2}_{})",
                setup.name, paper_width, paper_height, units_label
            );
            plot.left_margin = margin_left * unit_factor;
            plot.bottom_margin = margin_bottom * unit_factor;
            plot.right_margin = margin_right * unit_factor;
            plot.top_margin = margin_top * unit_factor;
            plot.paper_width = paper_width * unit_factor;
            plot.paper_height = paper_height * unit_factor;
            plot.scale_numerator = scale_num;
            plot.scale_denominator = scale_den;
            plot.plot_paper_units = plot_paper_units;
            plot.plot_rotation = rotation;
            plot.plot_origin_x_offset = 0.0;
            plot.plot_origin_y_offset = 0.0;
            plot.standard_scale_type = standard_scale_type;
            plot.plot_layout_flags
                .set(PlotLayoutFlags::USE_STANDARD_SCALE, use_std_scale);
            layout.reset_limits(paper_width, paper_height);
        }
        self.reset_viewports(name, db, block_records)
    }

    /// Delete all viewports of a layout and create one "main" viewport
    /// sized to 120% of the paper extents
    pub fn reset_viewports(
        &mut self,
        name: &str,
        db: &mut EntityDb,
        block_records: &mut Table<BlockRecord>,
    ) -> Result<()> {
        let old_viewports: Vec<Handle> = self
            .entity_handles(name, block_records)?
            .iter()
            .copied()
            .filter(|handle| matches!(db.get(*handle), Some(EntityType::Viewport(_))))
            .collect();
        for handle in old_viewports {
            self.delete_entity(name, handle, db, block_records)?;
        }

        let (vp_width, vp_height) = {
            let layout = self.get(Some(name))?;
            let plot = &layout.plot;
            let unit_factor = plot.plot_paper_units.unit_factor();
            let scale_factor = plot.scale_factor();
            // paper parameters are stored in mm, viewport parameters in
            // paper space units
            let paper_units = |value: f64| value / unit_factor * scale_factor;
            (
                paper_units(plot.paper_width) * 1.2,
                paper_units(plot.paper_height) * 1.2,
            )
        };

        let mut viewport = Viewport::main_viewport(
            Vector3::new(vp_width / 2.0, vp_height / 2.0, 0.0),
            vp_width,
            vp_height,
        );
        viewport.view_center = Vector2::new(vp_width / 2.0, vp_height / 2.0);
        viewport.view_height = vp_height;
        let handle = self.add_entity(name, viewport.into(), db, block_records)?;
        self.get_mut(name)?.main_viewport = handle;
        Ok(())
    }

    /// Write the ENTITIES section: model space first, then the active
    /// paper-space layout
    ///
    /// Entities of inactive layouts are stored with their block
    /// definitions, not here.
    pub fn write_entities_section(
        &self,
        writer: &mut dyn TagWriter,
        db: &EntityDb,
        block_records: &Table<BlockRecord>,
    ) -> Result<()> {
        writer.write_tag(0, "SECTION")?;
        writer.write_tag(2, "ENTITIES")?;
        let active_name = self.active_layout(block_records)?.name.clone();
        for name in [MODEL_LAYOUT_NAME, active_name.as_str()] {
            for handle in self.entity_handles(name, block_records)? {
                let entity = db
                    .get(*handle)
                    .ok_or_else(|| DxfError::handle_not_found(*handle))?;
                entity.as_entity().write_tags(writer)?;
            }
        }
        writer.write_tag(0, "ENDSEC")?;
        Ok(())
    }
}
