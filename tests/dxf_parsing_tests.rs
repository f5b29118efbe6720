//! Integration tests for DXF parsing

mod common;

use cad2bim::entities::CadEntity;
use cad2bim::io::dxf::DxfParser;
use cad2bim::{CadUnits, Point3D};
use common::DxfBuilder;

fn parse(text: &str) -> cad2bim::CadModel {
    DxfParser::from_bytes(text.as_bytes().to_vec())
        .expect("ascii dxf")
        .parse()
        .expect("parse")
}

#[test]
fn test_full_document_round_trip_through_model() {
    let text = DxfBuilder::new()
        .version("AC1032")
        .units(4)
        .layer("A-WALL", 1, 0)
        .layer("A-DOOR", 2, 0)
        .block("DOOR_1", &common::door_block_body())
        .line("A-WALL", 0.0, 0.0, 5000.0, 0.0)
        .insert("A-DOOR", "DOOR_1", 1000.0, 0.0)
        .text("A-WALL", "Note", 1.0, 2.0, 2.5)
        .build();
    let model = parse(&text);

    assert_eq!(model.header.acad_version, "AC1032");
    assert_eq!(model.header.units, CadUnits::Millimeters);
    assert!(model.has_layer("A-WALL"));
    assert!(model.has_layer("a-door"));
    assert!(model.has_block("DOOR_1"));
    assert_eq!(model.entity_count(), 3);
    assert_eq!(model.block_references().count(), 1);
    assert_eq!(model.texts().count(), 1);
}

#[test]
fn test_layer_names_unique_case_insensitively() {
    // The drawing declares the same layer twice with different case; the
    // second record is dropped
    let text = "0\nSECTION\n2\nTABLES\n0\nTABLE\n2\nLAYER\n\
                0\nLAYER\n2\nA-Wall\n62\n1\n70\n0\n\
                0\nLAYER\n2\nA-WALL\n62\n2\n70\n0\n\
                0\nENDTAB\n0\nENDSEC\n0\nEOF\n";
    let model = parse(text);

    let mut names: Vec<String> = model.layers().map(|l| l.name.to_uppercase()).collect();
    let total = names.len();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), total, "duplicate case-folded layer names");

    // The first record wins
    assert_eq!(model.layer("a-wall").unwrap().color, 1);
}

#[test]
fn test_entities_preserve_file_order() {
    let text = DxfBuilder::new()
        .line("0", 0.0, 0.0, 1.0, 0.0)
        .circle("0", 5.0, 5.0, 2.0)
        .line("0", 0.0, 1.0, 1.0, 1.0)
        .build();
    let model = parse(&text);

    let kinds: Vec<&str> = model.entities.iter().map(|e| e.entity_type()).collect();
    assert_eq!(kinds, vec!["LINE", "CIRCLE", "LINE"]);
}

#[test]
fn test_partial_point_defaults_missing_components() {
    // Only the X component of the start point is present
    let text = "0\nSECTION\n2\nENTITIES\n0\nLINE\n10\n7.5\n11\n10.0\n21\n2.0\n0\nENDSEC\n0\nEOF\n";
    let model = parse(text);

    match &model.entities[0] {
        CadEntity::Line(line) => {
            assert_eq!(line.start, Some(Point3D::new(7.5, 0.0, 0.0)));
            assert_eq!(line.end, Some(Point3D::new(10.0, 2.0, 0.0)));
        }
        other => panic!("expected LINE, got {:?}", other),
    }
}

#[test]
fn test_malformed_entity_recovery() {
    // The circle's radius is unreadable; the entity is discarded and the
    // following line still parses
    let text = "0\nSECTION\n2\nENTITIES\n\
                0\nCIRCLE\n10\n1.0\n20\n1.0\n40\nbogus\n\
                0\nLINE\n10\n0.0\n20\n0.0\n11\n5.0\n21\n0.0\n\
                0\nENDSEC\n0\nEOF\n";
    let model = parse(text);
    assert_eq!(model.entity_count(), 1);
    assert!(matches!(model.entities[0], CadEntity::Line(_)));
}

#[test]
fn test_thumbnail_section_skipped() {
    let text = "0\nSECTION\n2\nTHUMBNAILIMAGE\n90\n100\n310\nDEADBEEF\n0\nENDSEC\n\
                0\nSECTION\n2\nENTITIES\n0\nPOINT\n10\n1.0\n20\n1.0\n0\nENDSEC\n0\nEOF\n";
    let model = parse(text);
    assert_eq!(model.entity_count(), 1);
}

#[test]
fn test_layer_defaulted_for_entity_without_code_8() {
    let text = "0\nSECTION\n2\nENTITIES\n0\nLINE\n10\n0.0\n20\n0.0\n11\n5.0\n21\n0.0\n0\nENDSEC\n0\nEOF\n";
    let model = parse(text);
    let layer = model.layer_of(&model.entities[0]).expect("layer 0 exists");
    assert_eq!(layer.name, "0");
}

#[test]
fn test_block_entities_attached_to_definition() {
    let text = DxfBuilder::new()
        .block(
            "WIN-1",
            "0\nLINE\n10\n0.0\n20\n0.0\n11\n900.0\n21\n0.0\n\
             0\nLINE\n10\n900.0\n20\n0.0\n11\n900.0\n21\n600.0\n",
        )
        .build();
    let model = parse(&text);

    let block = model.block("WIN-1").unwrap();
    assert_eq!(block.entities.len(), 2);
    // Block contents do not leak into model space
    assert_eq!(model.entity_count(), 0);
}
