//! MULTILEADER rendering tests — exploding entities into primitives on a
//! full document, with style overrides, fallbacks and OCS handling.

use dxfcore::entities::{
    ArrowHeadData, AttachmentPoint, Entity, LeaderData, LeaderLine, LeaderType, MTextData,
    MultiLeader, PropertyOverrideFlags, BG_FILL_COLOR, BG_FILL_WINDOW,
};
use dxfcore::notification::NotificationType;
use dxfcore::render::virtual_entities;
use dxfcore::types::{encode_rgb_color, encode_window_bg_color, Vector3};
use dxfcore::{CadDocument, EntityType, MLeaderStyle};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// MTEXT content at (20, 0), one leader from the origin with a dogleg
/// ending at (12, 0)
fn note_mleader() -> MultiLeader {
    let mut mleader = MultiLeader::new();
    let mut mtext = MTextData::new("NOTE 1", Vector3::new(20.0, 0.0, 0.0));
    mtext.alignment = 4; // middle left
    mleader.context.mtext = Some(mtext);
    mleader.context.char_height = 2.5;
    mleader.context.arrow_head_size = 2.5;

    let mut leader = LeaderData::new(Vector3::new(12.0, 0.0, 0.0));
    leader.dogleg_length = 8.0;
    leader
        .lines
        .push(LeaderLine::new(vec![Vector3::new(0.0, -10.0, 0.0)]));
    mleader.context.leaders.push(leader);
    mleader
}

fn render(doc: &mut CadDocument, mleader: MultiLeader) -> Vec<EntityType> {
    let handle = doc.add_entity("Model", mleader).unwrap();
    virtual_entities(doc, handle).unwrap()
}

fn mtexts(entities: &[EntityType]) -> Vec<&dxfcore::MText> {
    entities
        .iter()
        .filter_map(|e| match e {
            EntityType::MText(m) => Some(m),
            _ => None,
        })
        .collect()
}

fn lines(entities: &[EntityType]) -> Vec<&dxfcore::Line> {
    entities
        .iter()
        .filter_map(|e| match e {
            EntityType::Line(l) => Some(l),
            _ => None,
        })
        .collect()
}

fn inserts(entities: &[EntityType]) -> Vec<&dxfcore::Insert> {
    entities
        .iter()
        .filter_map(|e| match e {
            EntityType::Insert(i) => Some(i),
            _ => None,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Leader assembly
// ---------------------------------------------------------------------------

#[test]
fn straight_leader_renders_all_parts() {
    let mut doc = CadDocument::new();
    let entities = render(&mut doc, note_mleader());

    // MTEXT + arrow INSERT + dogleg + 2 segments
    assert_eq!(mtexts(&entities).len(), 1);
    assert_eq!(inserts(&entities).len(), 1);
    assert_eq!(lines(&entities).len(), 3);

    // everything is virtual until placed in a layout
    for entity in &entities {
        assert!(entity.handle().is_null());
    }

    // the dogleg runs from the connection point towards the content
    let dogleg = lines(&entities)
        .into_iter()
        .find(|l| l.start.isclose(&Vector3::new(12.0, 0.0, 0.0), 1e-12))
        .expect("dogleg line");
    assert!(dogleg.end.isclose(&Vector3::new(20.0, 0.0, 0.0), 1e-12));
}

#[test]
fn arrow_insert_points_back_along_leader() {
    let mut doc = CadDocument::new();
    let entities = render(&mut doc, note_mleader());

    let arrow = inserts(&entities)[0];
    assert_eq!(arrow.name, "_CLOSED_FILLED");
    assert!(arrow.insert.isclose(&Vector3::new(0.0, -10.0, 0.0), 1e-12));
    assert_eq!(arrow.scale, Vector3::new(2.5, 2.5, 2.5));
    // first segment runs towards (12, 0); the arrow is rotated 180 deg
    // against that direction
    let direction = (Vector3::new(12.0, 0.0, 0.0) - Vector3::new(0.0, -10.0, 0.0)).normalize();
    let expected = direction.angle_deg() + 180.0;
    assert!((arrow.rotation - expected).abs() < 1e-9);

    // rendering registered the arrow block
    assert!(doc.block_records.contains("_CLOSED_FILLED"));
}

#[test]
fn no_dogleg_still_connects_to_content() {
    let mut doc = CadDocument::new();
    let mut mleader = note_mleader();
    mleader.has_dogleg = false;
    mleader
        .property_override_flags
        .insert(PropertyOverrideFlags::HAS_DOGLEG);
    // without the dogleg the line still gets the connection point appended,
    // so two vertices remain and one segment is drawn
    let entities = render(&mut doc, mleader);
    assert_eq!(lines(&entities).len(), 1);
}

#[test]
fn spline_leader_is_one_fitted_spline() {
    let mut doc = CadDocument::new();
    let mut mleader = note_mleader();
    mleader.leader_type = LeaderType::Spline;
    mleader
        .property_override_flags
        .insert(PropertyOverrideFlags::LEADER_TYPE);
    let entities = render(&mut doc, mleader);

    assert!(lines(&entities).is_empty());
    let spline = entities
        .iter()
        .find_map(|e| match e {
            EntityType::Spline(s) => Some(s),
            _ => None,
        })
        .expect("spline leader");
    // fit points: shortened arrow vertex + connection point + dogleg end
    assert_eq!(spline.fit_points.len(), 2);
    assert!(spline.start_tangent.is_some());
    assert!(spline.end_tangent.is_some());
}

#[test]
fn per_line_arrow_heads_override_the_style() {
    let mut doc = CadDocument::new();
    let mut mleader = note_mleader();
    mleader.arrow_heads.push(ArrowHeadData {
        index: 0,
        block_name: "_DOT".to_string(),
    });
    let entities = render(&mut doc, mleader);
    assert_eq!(inserts(&entities)[0].name, "_DOT");
    assert!(doc.block_records.contains("_DOT"));
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

#[test]
fn mtext_content_copies_attributes_but_not_rotation() {
    let mut doc = CadDocument::new();
    let mut mleader = note_mleader();
    {
        let mtext = mleader.context.mtext.as_mut().unwrap();
        mtext.rotation = 0.75;
        mtext.text_direction = Vector3::UNIT_Y;
        mtext.width = 40.0;
        mtext.line_spacing_factor = 1.25;
    }
    mleader.context.scale = 2.0;
    let entities = render(&mut doc, mleader);

    let mtext = mtexts(&entities)[0];
    assert_eq!(mtext.text, "NOTE 1");
    assert_eq!(mtext.attachment_point, AttachmentPoint::MiddleLeft);
    assert_eq!(mtext.line_spacing_factor, 1.25);
    // width is scaled, the stored rotation is dropped in favor of the
    // text direction
    assert_eq!(mtext.width, 80.0);
    assert_eq!(mtext.rotation, 0.0);
    assert_eq!(mtext.text_direction, Some(Vector3::UNIT_Y));
    // char height comes from the context (already scaled)
    assert_eq!(mtext.char_height, 2.5);
}

#[test]
fn mtext_bg_fill_explicit_color() {
    let mut doc = CadDocument::new();
    let mut mleader = note_mleader();
    {
        let mtext = mleader.context.mtext.as_mut().unwrap();
        mtext.has_bg_fill = true;
        mtext.bg_color = encode_rgb_color(10, 20, 30);
        mtext.bg_scale_factor = 2.0;
    }
    let entities = render(&mut doc, mleader);

    let mtext = mtexts(&entities)[0];
    assert_eq!(mtext.bg_fill, BG_FILL_COLOR);
    assert_eq!(mtext.bg_fill_true_color, Some(0x0A141E));
    assert_eq!(mtext.box_fill_scale, 2.0);
}

#[test]
fn mtext_bg_fill_window_color() {
    let mut doc = CadDocument::new();
    let mut mleader = note_mleader();
    {
        let mtext = mleader.context.mtext.as_mut().unwrap();
        mtext.has_bg_fill = true;
        mtext.bg_color = encode_window_bg_color();
    }
    let entities = render(&mut doc, mleader);
    assert_eq!(mtexts(&entities)[0].bg_fill, BG_FILL_WINDOW);
}

// ---------------------------------------------------------------------------
// Style resolution and fallbacks
// ---------------------------------------------------------------------------

#[test]
fn custom_style_attributes_are_used() {
    let mut doc = CadDocument::new();
    let mut style = MLeaderStyle::new("Wide");
    style.leader_lineweight = 50;
    style.arrow_head_block = "_DOT".to_string();
    doc.mleader_styles.add(style).unwrap();

    let mut mleader = note_mleader();
    mleader.style = "Wide".to_string();
    let entities = render(&mut doc, mleader);

    assert_eq!(inserts(&entities)[0].name, "_DOT");
    assert!(doc.notifications.is_empty());
}

#[test]
fn missing_style_warns_and_uses_standard() {
    let mut doc = CadDocument::new();
    let mut mleader = note_mleader();
    mleader.style = "DoesNotExist".to_string();
    let entities = render(&mut doc, mleader);

    assert!(!entities.is_empty());
    let warnings = doc.notifications.of_type(NotificationType::Warning);
    assert!(warnings
        .iter()
        .any(|n| n.message.contains("DoesNotExist")));
}

#[test]
fn missing_linetype_falls_back_to_continuous() {
    let mut doc = CadDocument::new();
    let mut style = MLeaderStyle::new("Dashed");
    style.leader_linetype = "DASHED2".to_string();
    doc.mleader_styles.add(style).unwrap();

    let mut mleader = note_mleader();
    mleader.style = "Dashed".to_string();
    let entities = render(&mut doc, mleader);

    assert_eq!(lines(&entities)[0].common.linetype, "Continuous");
    assert!(doc.notifications.has_type(NotificationType::Warning));
}

#[test]
fn entity_overrides_beat_the_style() {
    let mut doc = CadDocument::new();
    let mut mleader = note_mleader();
    mleader.leader_type = LeaderType::None;
    // without the flag the style's straight leader type still wins
    let entities = render(&mut doc, mleader.clone());
    assert!(!lines(&entities).is_empty());

    mleader
        .property_override_flags
        .insert(PropertyOverrideFlags::LEADER_TYPE);
    let entities = render(&mut doc, mleader);
    assert!(lines(&entities).is_empty());
    assert!(inserts(&entities).is_empty());
}

#[test]
fn leader_inherits_layer_of_the_mleader() {
    let mut doc = CadDocument::new();
    let mut mleader = note_mleader();
    mleader.common.layer = "ANNOT".to_string();
    let entities = render(&mut doc, mleader);
    for entity in &entities {
        assert_eq!(entity.as_entity().common().layer, "ANNOT");
    }
}

#[test]
fn zero_scale_produces_no_entities() {
    let mut doc = CadDocument::new();
    let mut mleader = note_mleader();
    mleader.context.scale = 0.0;
    assert!(render(&mut doc, mleader).is_empty());
}

// ---------------------------------------------------------------------------
// OCS
// ---------------------------------------------------------------------------

#[test]
fn tilted_extrusion_maps_lines_to_wcs() {
    let mut doc = CadDocument::new();
    let mut mleader = note_mleader();
    // flip the content plane; OCS X maps to WCS -X
    mleader.context.mtext.as_mut().unwrap().extrusion = Vector3::new(0.0, 0.0, -1.0);
    let entities = render(&mut doc, mleader);

    let dogleg = lines(&entities)
        .into_iter()
        .find(|l| l.start.isclose(&Vector3::new(-12.0, 0.0, 0.0), 1e-9))
        .expect("dogleg in WCS");
    assert!(dogleg.end.isclose(&Vector3::new(-20.0, 0.0, 0.0), 1e-9));

    // the arrow insert stays in OCS and carries the extrusion instead
    let arrow = inserts(&entities)[0];
    assert!(arrow.insert.isclose(&Vector3::new(0.0, -10.0, 0.0), 1e-9));
    assert!(arrow
        .extrusion
        .isclose(&Vector3::new(0.0, 0.0, -1.0), 1e-9));
}

#[test]
fn rendering_is_repeatable() {
    let mut doc = CadDocument::new();
    let handle = doc.add_entity("Model", note_mleader()).unwrap();
    let first = virtual_entities(&mut doc, handle).unwrap();
    let second = virtual_entities(&mut doc, handle).unwrap();
    assert_eq!(first.len(), second.len());
    // the source entity is untouched
    assert!(matches!(
        doc.entity(handle).unwrap(),
        EntityType::MultiLeader(_)
    ));
}
