//! Layout management tests — creating, activating and deleting paper-space
//! layouts on a full document, plus paper setup and ENTITIES section framing.

use dxfcore::entities::Entity;
use dxfcore::io::TextTagWriter;
use dxfcore::layouts::{PaperSetup, PlotScale};
use dxfcore::objects::PlotLayoutFlags;
use dxfcore::tables::TableEntry;
use dxfcore::types::Vector3;
use dxfcore::{CadDocument, DxfError, EntityType, Line};

// ---------------------------------------------------------------------------
// Layout directory
// ---------------------------------------------------------------------------

#[test]
fn fresh_document_has_model_and_layout1() {
    let doc = CadDocument::new();
    assert_eq!(
        doc.layouts.names_in_taborder(),
        vec!["Model", "Layout1"]
    );
    assert_eq!(doc.active_layout().unwrap().name, "Layout1");
    assert!(doc.block_records.contains("*Model_Space"));
    assert!(doc.block_records.contains("*Paper_Space"));
}

#[test]
fn create_activate_delete_cycle() {
    let mut doc = CadDocument::new();
    doc.new_layout("Sheet A").unwrap();
    doc.new_layout("Sheet B").unwrap();
    assert_eq!(doc.layouts.len(), 4);

    doc.set_active_layout("Sheet B").unwrap();
    assert_eq!(doc.active_layout().unwrap().name, "Sheet B");

    // deleting the active layout activates another paper layout
    doc.delete_layout("Sheet B").unwrap();
    assert!(!doc.layouts.contains("Sheet B"));
    let active = doc.active_layout().unwrap().name.clone();
    assert_ne!(active, "Model");
    assert_ne!(active, "Sheet B");
}

#[test]
fn duplicate_and_reserved_names_rejected() {
    let mut doc = CadDocument::new();
    assert!(matches!(
        doc.new_layout("Layout1"),
        Err(DxfError::AlreadyExists(_))
    ));
    assert!(matches!(
        doc.new_layout("*Model_Space"),
        Err(DxfError::InvalidArgument(_))
    ));
}

#[test]
fn model_space_is_protected() {
    let mut doc = CadDocument::new();
    assert!(doc.set_active_layout("Model").is_err());
    assert!(doc.delete_layout("Model").is_err());
}

#[test]
fn last_paper_layout_cannot_be_deleted() {
    let mut doc = CadDocument::new();
    let err = doc.delete_layout("Layout1").unwrap_err();
    assert!(matches!(err, DxfError::Invariant(_)));
    // the directory is untouched
    assert!(doc.layouts.contains("Layout1"));
    assert_eq!(doc.active_layout().unwrap().name, "Layout1");
}

#[test]
fn activation_survives_block_rename() {
    let mut doc = CadDocument::new();
    doc.new_layout("Details").unwrap();

    let details_key = doc.layouts.get(Some("Details")).unwrap().layout_key();
    doc.set_active_layout("Details").unwrap();

    // the layout key (block record handle) is stable across activation
    assert_eq!(
        doc.layouts.get(Some("Details")).unwrap().layout_key(),
        details_key
    );
    assert_eq!(
        doc.block_records.get("*Paper_Space").unwrap().handle(),
        details_key
    );
}

// ---------------------------------------------------------------------------
// Entity ownership
// ---------------------------------------------------------------------------

#[test]
fn entities_carry_owner_and_paperspace_tags() {
    let mut doc = CadDocument::new();
    let model_handle = doc
        .add_entity("Model", Line::from_points(Vector3::ZERO, Vector3::UNIT_X))
        .unwrap();
    let paper_handle = doc
        .add_entity("Layout1", Line::from_points(Vector3::ZERO, Vector3::UNIT_Y))
        .unwrap();

    let model_entity = doc.entity(model_handle).unwrap();
    assert!(!model_entity.as_entity().is_paperspace());
    assert_eq!(
        doc.layouts
            .get_layout_for_entity(model_entity)
            .unwrap()
            .name,
        "Model"
    );

    let paper_entity = doc.entity(paper_handle).unwrap();
    assert!(paper_entity.as_entity().is_paperspace());
}

#[test]
fn deleting_a_layout_removes_its_entities() {
    let mut doc = CadDocument::new();
    doc.new_layout("Scratch").unwrap();
    let handle = doc
        .add_entity("Scratch", Line::from_points(Vector3::ZERO, Vector3::UNIT_X))
        .unwrap();
    assert!(doc.db.contains(handle));

    doc.delete_layout("Scratch").unwrap();
    assert!(!doc.db.contains(handle));
}

// ---------------------------------------------------------------------------
// Paper setup and viewports
// ---------------------------------------------------------------------------

#[test]
fn paper_setup_standard_scale() {
    let mut doc = CadDocument::new();
    let setup = PaperSetup {
        size: (420.0, 297.0),
        margins: (10.0, 15.0, 10.0, 15.0),
        units: "mm".to_string(),
        rotation: 0,
        scale: PlotScale::Standard(25), // 1:50
        name: "A3".to_string(),
        device: "DWG to PDF.pc3".to_string(),
    };
    doc.paper_setup("Layout1", &setup).unwrap();

    let layout = doc.layouts.get(Some("Layout1")).unwrap();
    let plot = &layout.plot;
    assert_eq!(plot.paper_size, "A3_(420.00_x_297.00_MM)");
    assert_eq!(plot.standard_scale_type, 25);
    assert_eq!((plot.scale_numerator, plot.scale_denominator), (1.0, 50.0));
    assert!(plot
        .plot_layout_flags
        .contains(PlotLayoutFlags::USE_STANDARD_SCALE));
    // limits follow the paper, extents start empty
    assert_eq!(layout.limmax.x, 420.0);
    assert_eq!(layout.limmax.y, 297.0);
    assert!(layout.extmin.x > layout.extmax.x);
}

#[test]
fn paper_setup_custom_scale_clears_standard_flag() {
    let mut doc = CadDocument::new();
    let setup = PaperSetup {
        scale: PlotScale::Custom(1.0, 20.0),
        ..PaperSetup::default()
    };
    doc.paper_setup("Layout1", &setup).unwrap();

    let plot = &doc.layouts.get(Some("Layout1")).unwrap().plot;
    assert!(!plot
        .plot_layout_flags
        .contains(PlotLayoutFlags::USE_STANDARD_SCALE));
    assert_eq!(plot.standard_scale_type, 16);
    assert_eq!((plot.scale_numerator, plot.scale_denominator), (1.0, 20.0));
}

#[test]
fn paper_setup_inch_units_convert_margins() {
    let mut doc = CadDocument::new();
    let setup = PaperSetup {
        size: (11.0, 8.5),
        margins: (0.5, 0.5, 0.5, 0.5),
        units: "inch".to_string(),
        ..PaperSetup::default()
    };
    doc.paper_setup("Layout1", &setup).unwrap();

    let plot = &doc.layouts.get(Some("Layout1")).unwrap().plot;
    // stored in mm
    assert!((plot.paper_width - 279.4).abs() < 1e-9);
    assert!((plot.top_margin - 12.7).abs() < 1e-9);
}

#[test]
fn paper_setup_rejects_bad_input() {
    let mut doc = CadDocument::new();
    let bad_rotation = PaperSetup {
        rotation: 4,
        ..PaperSetup::default()
    };
    assert!(doc.paper_setup("Layout1", &bad_rotation).is_err());

    let bad_units = PaperSetup {
        units: "cubits".to_string(),
        ..PaperSetup::default()
    };
    assert!(doc.paper_setup("Layout1", &bad_units).is_err());

    assert!(doc.paper_setup("Model", &PaperSetup::default()).is_err());
}

#[test]
fn paper_setup_resets_viewports() {
    let mut doc = CadDocument::new();
    doc.paper_setup("Layout1", &PaperSetup::default()).unwrap();
    doc.paper_setup("Layout1", &PaperSetup::default()).unwrap();

    // repeated setup leaves exactly one main viewport
    let viewports: Vec<_> = doc
        .entity_handles("Layout1")
        .unwrap()
        .into_iter()
        .filter_map(|h| match doc.entity(h).unwrap() {
            EntityType::Viewport(vp) => Some(vp.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(viewports.len(), 1);

    let vp = &viewports[0];
    assert!(vp.is_main_viewport());
    // A4 landscape at 1:1, 120% coverage
    assert!((vp.width - 297.0 * 1.2).abs() < 1e-9);
    assert!((vp.height - 210.0 * 1.2).abs() < 1e-9);
    assert_eq!(
        doc.layouts.get(Some("Layout1")).unwrap().main_viewport,
        vp.common.handle
    );
}

#[test]
fn viewport_size_follows_plot_scale() {
    let mut doc = CadDocument::new();
    let setup = PaperSetup {
        scale: PlotScale::Standard(25), // 1:50
        ..PaperSetup::default()
    };
    doc.paper_setup("Layout1", &setup).unwrap();

    let vp = doc
        .entity_handles("Layout1")
        .unwrap()
        .into_iter()
        .find_map(|h| match doc.entity(h).unwrap() {
            EntityType::Viewport(vp) => Some(vp.clone()),
            _ => None,
        })
        .unwrap();
    // 297 mm paper at scale factor 50, 120% coverage
    assert!((vp.width - 297.0 * 50.0 * 1.2).abs() < 1e-6);
}

// ---------------------------------------------------------------------------
// ENTITIES section framing
// ---------------------------------------------------------------------------

#[test]
fn entities_section_writes_model_then_active_layout() {
    let mut doc = CadDocument::new();
    doc.new_layout("Inactive").unwrap();
    doc.add_entity("Model", Line::from_points(Vector3::ZERO, Vector3::UNIT_X))
        .unwrap();
    doc.add_entity("Layout1", Line::from_points(Vector3::ZERO, Vector3::UNIT_Y))
        .unwrap();
    doc.add_entity(
        "Inactive",
        Line::from_points(Vector3::ZERO, Vector3::UNIT_Z),
    )
    .unwrap();

    let mut writer = TextTagWriter::new(Vec::new());
    doc.write_entities_section(&mut writer).unwrap();
    let output = String::from_utf8(writer.into_inner()).unwrap();

    assert!(output.starts_with("0\nSECTION\n2\nENTITIES\n"));
    assert!(output.ends_with("0\nENDSEC\n"));
    // model + active layout lines only; the inactive layout is skipped
    assert_eq!(output.matches("0\nLINE\n").count(), 2);

    // the paper space entity carries the paperspace marker
    assert!(output.contains("67\n1\n"));
}
