//! MULTILEADER rendering
//!
//! Explodes a MULTILEADER into primitive entities: LINE or SPLINE leader
//! lines, INSERT arrow heads and the MTEXT or INSERT content. The geometry
//! in the annotation context is final (already scaled), so rendering is a
//! matter of resolving style overrides and assembling the vertices.
//!
//! The produced entities are virtual: they carry no handle and no owner
//! until the caller adds them to a layout.

use super::arrows::{self, CLOSED_FILLED};
use crate::document::CadDocument;
use crate::entities::{
    AttachmentPoint, BlockData, ContentType, Entity, EntityCommon, EntityType, FlowDirection,
    Insert, LeaderData, LeaderLine, LeaderType, Line, LineSpacingStyle, MText, MTextData,
    MultiLeader, PropertyOverrideFlags, Spline, BG_FILL_COLOR, BG_FILL_WINDOW,
};
use crate::error::{DxfError, Result};
use crate::math::{is_world_z, Ocs};
use crate::notification::{NotificationCollection, NotificationType};
use crate::objects::MLeaderStyle;
use crate::types::{
    decode_raw_color, raw_color_to_entity_color, Color, Handle, LineWeight, RawColorType, Vector3,
};

/// Scale factors below this render nothing
const MIN_SCALE: f64 = 1e-9;

/// Style attributes after applying the entity's override mask
///
/// Each attribute is taken from the entity when its bit is set in
/// `property_override_flags`, otherwise from the MLEADERSTYLE. The
/// overridden character height and landing gap live in the annotation
/// context, not on the entity itself.
#[derive(Debug, Clone)]
pub struct StyleOverride {
    pub leader_type: LeaderType,
    pub leader_line_color: i32,
    pub leader_linetype: String,
    pub leader_lineweight: i16,
    pub has_landing: bool,
    pub landing_gap: f64,
    pub has_dogleg: bool,
    pub dogleg_length: f64,
    pub arrow_head_block: String,
    pub arrow_head_size: f64,
    pub content_type: ContentType,
    pub text_style: String,
    pub text_color: i32,
    pub char_height: f64,
    pub has_text_frame: bool,
    pub block_record: String,
    pub block_color: i32,
    pub block_scale: Vector3,
    pub block_rotation: f64,
    pub scale: f64,
    /// Bit 18: take the MTEXT content from the context, not the style
    pub use_mtext_default_content: bool,
}

impl StyleOverride {
    /// Resolve every attribute from style and entity
    pub fn resolve(style: &MLeaderStyle, mleader: &MultiLeader) -> Self {
        use PropertyOverrideFlags as F;
        let flags = mleader.property_override_flags;
        let on = |flag: F| flags.contains(flag);
        StyleOverride {
            leader_type: if on(F::LEADER_TYPE) {
                mleader.leader_type
            } else {
                style.leader_type
            },
            leader_line_color: if on(F::LEADER_LINE_COLOR) {
                mleader.leader_line_color
            } else {
                style.leader_line_color
            },
            leader_linetype: if on(F::LEADER_LINETYPE) {
                mleader.leader_linetype.clone()
            } else {
                style.leader_linetype.clone()
            },
            leader_lineweight: if on(F::LEADER_LINEWEIGHT) {
                mleader.leader_lineweight
            } else {
                style.leader_lineweight
            },
            has_landing: if on(F::HAS_LANDING) {
                mleader.has_landing
            } else {
                style.has_landing
            },
            landing_gap: if on(F::LANDING_GAP) {
                mleader.context.landing_gap
            } else {
                style.landing_gap
            },
            has_dogleg: if on(F::HAS_DOGLEG) {
                mleader.has_dogleg
            } else {
                style.has_dogleg
            },
            dogleg_length: if on(F::DOGLEG_LENGTH) {
                mleader.dogleg_length
            } else {
                style.dogleg_length
            },
            arrow_head_block: if on(F::ARROW_HEAD_BLOCK) {
                mleader.arrow_head_block.clone()
            } else {
                style.arrow_head_block.clone()
            },
            arrow_head_size: if on(F::ARROW_HEAD_SIZE) {
                mleader.arrow_head_size
            } else {
                style.arrow_head_size
            },
            content_type: if on(F::CONTENT_TYPE) {
                mleader.content_type
            } else {
                style.content_type
            },
            text_style: if on(F::TEXT_STYLE) {
                mleader.text_style.clone()
            } else {
                style.text_style.clone()
            },
            text_color: if on(F::TEXT_COLOR) {
                mleader.text_color
            } else {
                style.text_color
            },
            char_height: if on(F::CHAR_HEIGHT) {
                mleader.context.char_height
            } else {
                style.char_height
            },
            has_text_frame: if on(F::HAS_TEXT_FRAME) {
                mleader.has_text_frame
            } else {
                style.has_text_frame
            },
            block_record: if on(F::BLOCK_RECORD) {
                mleader.block_record.clone()
            } else {
                style.block_record.clone()
            },
            block_color: if on(F::BLOCK_COLOR) {
                mleader.block_color
            } else {
                style.block_color
            },
            block_scale: if on(F::BLOCK_SCALE) {
                mleader.block_scale
            } else {
                style.block_scale
            },
            block_rotation: if on(F::BLOCK_ROTATION) {
                mleader.block_rotation
            } else {
                style.block_rotation
            },
            scale: if on(F::SCALE) {
                mleader.scale
            } else {
                style.scale
            },
            use_mtext_default_content: on(F::USE_MTEXT_DEFAULT_CONTENT),
        }
    }
}

/// Explode a MULTILEADER into primitive entities
///
/// Warnings encountered along the way (missing styles, linetypes or arrow
/// blocks) end up in the document's notification collection.
pub fn virtual_entities(doc: &mut CadDocument, handle: Handle) -> Result<Vec<EntityType>> {
    let mleader = match doc.entity(handle)? {
        EntityType::MultiLeader(mleader) => mleader.clone(),
        other => {
            return Err(DxfError::InvalidArgument(format!(
                "entity #{:X} is a {}, not a MULTILEADER",
                handle.value(),
                other.as_entity().entity_type()
            )))
        }
    };
    let engine = RenderEngine::new(doc, mleader)?;
    let (entities, mut notes) = engine.run()?;
    doc.notifications.absorb(&mut notes);
    Ok(entities)
}

/// Renders one MULTILEADER into primitives
pub struct RenderEngine<'a> {
    doc: &'a mut CadDocument,
    mleader: MultiLeader,
    style: StyleOverride,
    entities: Vec<EntityType>,
    notifications: NotificationCollection,
    scale: f64,
    layer: String,
    linetype: String,
    leader_color: Color,
    leader_true_color: Option<i32>,
    lineweight: i16,
    extrusion: Vector3,
    ocs: Option<Ocs>,
}

impl<'a> RenderEngine<'a> {
    /// Set up an engine for one entity, resolving its style
    ///
    /// Fails only when the mandatory "Standard" MLEADERSTYLE is missing.
    pub fn new(doc: &'a mut CadDocument, mleader: MultiLeader) -> Result<Self> {
        let mut notifications = NotificationCollection::new();

        let style_source = resolve_mleader_style(doc, &mleader.style, &mut notifications)?;
        let style = StyleOverride::resolve(&style_source, &mleader);

        let linetype = if doc.line_types.contains(&style.leader_linetype) {
            style.leader_linetype.clone()
        } else {
            notifications.notify(
                NotificationType::Warning,
                format!(
                    "linetype '{}' not found, using 'Continuous'",
                    style.leader_linetype
                ),
            );
            "Continuous".to_string()
        };

        let (leader_color, leader_true_color) = raw_color_to_entity_color(style.leader_line_color);
        let extrusion = mleader.context.extrusion();
        let ocs = if is_world_z(&extrusion) {
            None
        } else {
            Some(Ocs::new(extrusion))
        };

        Ok(RenderEngine {
            scale: mleader.context.scale,
            layer: mleader.common.layer.clone(),
            lineweight: style.leader_lineweight,
            doc,
            mleader,
            style,
            entities: Vec::new(),
            notifications,
            linetype,
            leader_color,
            leader_true_color,
            extrusion,
            ocs,
        })
    }

    /// Render and return the primitives with the collected warnings
    pub fn run(mut self) -> Result<(Vec<EntityType>, NotificationCollection)> {
        if self.scale.abs() > MIN_SCALE {
            self.add_content()?;
            self.add_leaders()?;
        }
        Ok((self.entities, self.notifications))
    }

    fn to_wcs(&self, point: Vector3) -> Vector3 {
        match &self.ocs {
            Some(ocs) => ocs.to_wcs(point),
            None => point,
        }
    }

    /// Common attributes of all leader primitives
    ///
    /// A leader line may carry its own raw color; by-block defers to the
    /// resolved style color.
    fn leader_line_attribs(&self, common: &mut EntityCommon, line_color: Option<i32>) {
        common.layer = self.layer.clone();
        common.linetype = self.linetype.clone();
        common.line_weight = LineWeight::from_value(self.lineweight);
        let overridden = line_color
            .filter(|raw| decode_raw_color(*raw).0 != RawColorType::ByBlock)
            .map(raw_color_to_entity_color);
        match overridden {
            Some((color, true_color)) => {
                common.color = color;
                common.true_color = true_color;
            }
            None => {
                common.color = self.leader_color;
                common.true_color = self.leader_true_color;
            }
        }
    }

    // ------------------------------------------------------------------
    // content
    // ------------------------------------------------------------------

    fn add_content(&mut self) -> Result<()> {
        // the context geometry decides; the resolved content type may
        // disagree with what is actually stored
        if let Some(mtext) = self.mleader.context.mtext.clone() {
            self.add_mtext_content(&mtext)?;
        } else if let Some(block) = self.mleader.context.block.clone() {
            self.add_block_content(&block);
        }
        Ok(())
    }

    fn add_mtext_content(&mut self, data: &MTextData) -> Result<()> {
        let mut mtext = MText::new();
        mtext.common.layer = self.layer.clone();
        // char height in the context is final, already scaled
        mtext.char_height = self.mleader.context.char_height;
        mtext.text = data.default_content.clone();
        let (color, true_color) = raw_color_to_entity_color(data.color);
        mtext.common.color = color;
        mtext.common.true_color = true_color;
        mtext.insert = data.insert;
        mtext.style = self.resolved_text_style(&data.style)?;
        if !is_world_z(&data.extrusion) {
            mtext.extrusion = data.extrusion;
        }
        // the stored rotation is redundant; text_direction wins
        mtext.text_direction = Some(data.text_direction);
        mtext.width = data.width * self.scale;
        mtext.line_spacing_factor = data.line_spacing_factor;
        mtext.line_spacing_style = LineSpacingStyle::from_value(data.line_spacing_style);
        mtext.flow_direction = FlowDirection::from_value(data.flow_direction);
        mtext.attachment_point = AttachmentPoint::from_value(data.alignment);
        if data.has_bg_fill {
            set_mtext_bg_fill(&mut mtext, data);
        }
        self.entities.push(mtext.into());
        Ok(())
    }

    fn resolved_text_style(&mut self, name: &str) -> Result<String> {
        if self.doc.text_styles.contains(name) {
            return Ok(name.to_string());
        }
        self.notifications.notify(
            NotificationType::Warning,
            format!("text style '{}' not found, using 'Standard'", name),
        );
        if self.doc.text_styles.contains("Standard") {
            Ok("Standard".to_string())
        } else {
            Err(DxfError::Invariant(
                "required text style 'Standard' does not exist".to_string(),
            ))
        }
    }

    fn add_block_content(&mut self, data: &BlockData) {
        let mut insert = Insert::at(&data.name, data.insert);
        insert.common.layer = self.layer.clone();
        let (color, true_color) = raw_color_to_entity_color(data.color);
        insert.common.color = color;
        insert.common.true_color = true_color;
        insert.scale = data.scale;
        insert.rotation = data.rotation.to_degrees();
        if !is_world_z(&data.extrusion) {
            insert.extrusion = data.extrusion;
        }
        self.entities.push(insert.into());
    }

    // ------------------------------------------------------------------
    // leaders
    // ------------------------------------------------------------------

    fn add_leaders(&mut self) -> Result<()> {
        if self.style.leader_type == LeaderType::None {
            return Ok(());
        }
        let leaders = self.mleader.context.leaders.clone();
        for leader in &leaders {
            if self.style.leader_type == LeaderType::Straight && self.style.has_dogleg {
                self.add_dogleg(leader);
            }
            for line in &leader.lines {
                self.add_leader_line(leader, line)?;
            }
        }
        Ok(())
    }

    /// Dogleg direction scaled to the leader's dogleg length
    fn dogleg_vector(&self, leader: &LeaderData) -> Vector3 {
        if leader.has_dogleg_vector {
            leader.dogleg_vector.normalize_to(leader.dogleg_length)
        } else {
            Vector3::UNIT_X * leader.dogleg_length
        }
    }

    fn add_dogleg(&mut self, leader: &LeaderData) {
        let start = leader.last_leader_point;
        let end = start + self.dogleg_vector(leader);
        self.add_line(start, end, None);
    }

    fn add_leader_line(&mut self, leader: &LeaderData, line: &LeaderLine) -> Result<()> {
        // splines are fitted through all vertices; a separate dogleg
        // segment would break tangency
        let has_dogleg = self.style.has_dogleg && self.style.leader_type != LeaderType::Spline;

        let mut vertices = line.vertices.clone();
        if has_dogleg {
            vertices.push(leader.last_leader_point);
        }
        vertices.push(leader.last_leader_point + self.dogleg_vector(leader));
        if vertices.len() < 2 {
            return Ok(());
        }

        let arrow_direction = (vertices[1] - vertices[0])
            .try_normalize()
            .unwrap_or(Vector3::UNIT_X);
        let block_name = self.arrow_block_name(line.index)?;
        let size = self.mleader.context.arrow_head_size;
        self.add_arrow(&block_name, vertices[0], arrow_direction, size, line.color);
        // shorten the first segment so it starts behind the arrow glyph
        vertices[0] = vertices[0] + arrow_direction * arrows::arrow_length(&block_name, size);

        match self.style.leader_type {
            LeaderType::Straight => {
                for pair in vertices.windows(2) {
                    self.add_line(pair[0], pair[1], Some(line.color));
                }
            }
            LeaderType::Spline => {
                let end_tangent = self.dogleg_vector(leader).normalize();
                self.add_spline(&vertices, arrow_direction, end_tangent, line.color);
            }
            LeaderType::None => {}
        }
        Ok(())
    }

    /// Arrow block for a leader line, registering it in the document
    fn arrow_block_name(&mut self, line_index: i32) -> Result<String> {
        let name = self
            .mleader
            .arrow_head(line_index)
            .map(str::to_string)
            .or_else(|| {
                if self.style.arrow_head_block.is_empty() {
                    None
                } else {
                    Some(self.style.arrow_head_block.clone())
                }
            })
            .unwrap_or_else(|| CLOSED_FILLED.to_string());

        if self.doc.block_records.contains(&name) || arrows::is_builtin_arrow(&name) {
            self.doc.add_block_record(&name)?;
            return Ok(name);
        }
        self.notifications.notify(
            NotificationType::Warning,
            format!("arrow block '{}' not found, using the default arrow", name),
        );
        self.doc.add_block_record(CLOSED_FILLED)?;
        Ok(CLOSED_FILLED.to_string())
    }

    fn add_arrow(
        &mut self,
        block_name: &str,
        location: Vector3,
        direction: Vector3,
        size: f64,
        line_color: i32,
    ) {
        let mut insert = Insert::at(block_name, location);
        self.leader_line_attribs(&mut insert.common, Some(line_color));
        // arrow blocks point in +X; flip to point back along the leader
        insert.rotation = direction.angle_deg() + 180.0;
        insert.set_uniform_scale(size);
        if self.ocs.is_some() {
            // insert point stays in OCS, the extrusion carries the plane
            insert.extrusion = self.extrusion;
        }
        self.entities.push(insert.into());
    }

    fn add_line(&mut self, start: Vector3, end: Vector3, line_color: Option<i32>) {
        let mut line = Line::from_points(self.to_wcs(start), self.to_wcs(end));
        self.leader_line_attribs(&mut line.common, line_color);
        self.entities.push(line.into());
    }

    fn add_spline(
        &mut self,
        vertices: &[Vector3],
        start_tangent: Vector3,
        end_tangent: Vector3,
        line_color: i32,
    ) {
        let fit_points: Vec<Vector3> = vertices.iter().map(|v| self.to_wcs(*v)).collect();
        let mut spline = Spline::from_fit_points(
            fit_points,
            Some(self.to_wcs(start_tangent)),
            Some(self.to_wcs(end_tangent)),
        );
        self.leader_line_attribs(&mut spline.common, Some(line_color));
        self.entities.push(spline.into());
    }
}

fn resolve_mleader_style(
    doc: &CadDocument,
    name: &str,
    notifications: &mut NotificationCollection,
) -> Result<MLeaderStyle> {
    if let Some(style) = doc.mleader_styles.get(name) {
        return Ok(style.clone());
    }
    notifications.notify(
        NotificationType::Warning,
        format!("MLEADERSTYLE '{}' not found, using 'Standard'", name),
    );
    doc.mleader_styles
        .get("Standard")
        .cloned()
        .ok_or_else(|| {
            DxfError::Invariant("required MLEADERSTYLE 'Standard' does not exist".to_string())
        })
}

/// Copy the background fill of MTEXT content data onto an MTEXT entity
fn set_mtext_bg_fill(mtext: &mut MText, data: &MTextData) {
    mtext.box_fill_scale = data.bg_scale_factor;
    mtext.bg_fill = BG_FILL_COLOR;
    mtext.bg_fill_transparency = data.bg_transparency;
    mtext.bg_fill_color = Color::ByBlock;
    match decode_raw_color(data.bg_color) {
        (RawColorType::Aci, aci) => mtext.bg_fill_color = Color::from_index(aci as i16),
        (RawColorType::ByLayer, _) => mtext.bg_fill_color = Color::ByLayer,
        (RawColorType::ByBlock, _) => mtext.bg_fill_color = Color::ByBlock,
        (RawColorType::Rgb, rgb) => mtext.bg_fill_true_color = Some(rgb),
        // keep the stored colors, the fill mode selects the window color
        (RawColorType::WindowBackground, _) => mtext.bg_fill = BG_FILL_WINDOW,
    }
    if data.use_window_bg_color {
        mtext.bg_fill = BG_FILL_WINDOW;
    }
}
