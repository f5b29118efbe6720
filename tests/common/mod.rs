//! Shared test fixtures: a small DXF text builder and temp-file helpers

#![allow(dead_code)]

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};

/// Builds minimal ASCII DXF documents for the tests
///
/// Sections are emitted in the conventional order: HEADER, TABLES, BLOCKS,
/// ENTITIES.
#[derive(Debug, Default)]
pub struct DxfBuilder {
    header: String,
    layers: String,
    blocks: String,
    entities: String,
}

impl DxfBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `$INSUNITS`
    pub fn units(mut self, code: i32) -> Self {
        write!(self.header, "9\n$INSUNITS\n70\n{}\n", code).unwrap();
        self
    }

    /// Set `$ACADVER`
    pub fn version(mut self, version: &str) -> Self {
        write!(self.header, "9\n$ACADVER\n1\n{}\n", version).unwrap();
        self
    }

    /// Add a layer record; `flags` is the raw code-70 value (bit 0 frozen,
    /// bit 2 locked)
    pub fn layer(mut self, name: &str, color: i16, flags: i16) -> Self {
        write!(
            self.layers,
            "0\nLAYER\n2\n{}\n62\n{}\n6\nContinuous\n70\n{}\n",
            name, color, flags
        )
        .unwrap();
        self
    }

    /// Add a LINE entity
    pub fn line(mut self, layer: &str, x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        write!(
            self.entities,
            "0\nLINE\n8\n{}\n10\n{}\n20\n{}\n30\n0.0\n11\n{}\n21\n{}\n31\n0.0\n",
            layer, x1, y1, x2, y2
        )
        .unwrap();
        self
    }

    /// Add an LWPOLYLINE; vertices are `(x, y, bulge)` triples
    pub fn lwpolyline(mut self, layer: &str, closed: bool, vertices: &[(f64, f64, f64)]) -> Self {
        write!(
            self.entities,
            "0\nLWPOLYLINE\n8\n{}\n90\n{}\n70\n{}\n",
            layer,
            vertices.len(),
            if closed { 1 } else { 0 }
        )
        .unwrap();
        for (x, y, bulge) in vertices {
            write!(self.entities, "10\n{}\n20\n{}\n42\n{}\n", x, y, bulge).unwrap();
        }
        self
    }

    /// Add a CIRCLE entity
    pub fn circle(mut self, layer: &str, cx: f64, cy: f64, radius: f64) -> Self {
        write!(
            self.entities,
            "0\nCIRCLE\n8\n{}\n10\n{}\n20\n{}\n30\n0.0\n40\n{}\n",
            layer, cx, cy, radius
        )
        .unwrap();
        self
    }

    /// Add a TEXT entity
    pub fn text(mut self, layer: &str, content: &str, x: f64, y: f64, height: f64) -> Self {
        write!(
            self.entities,
            "0\nTEXT\n8\n{}\n1\n{}\n10\n{}\n20\n{}\n40\n{}\n",
            layer, content, x, y, height
        )
        .unwrap();
        self
    }

    /// Add a DIMENSION entity with a measured value
    pub fn dimension(mut self, layer: &str, text: &str, measurement: f64) -> Self {
        write!(
            self.entities,
            "0\nDIMENSION\n8\n{}\n1\n{}\n10\n0.0\n20\n0.0\n42\n{}\n70\n1\n",
            layer, text, measurement
        )
        .unwrap();
        self
    }

    /// Add an INSERT entity
    pub fn insert(mut self, layer: &str, block_name: &str, x: f64, y: f64) -> Self {
        write!(
            self.entities,
            "0\nINSERT\n8\n{}\n2\n{}\n10\n{}\n20\n{}\n30\n0.0\n",
            layer, block_name, x, y
        )
        .unwrap();
        self
    }

    /// Open a block definition and append raw entity text into it
    pub fn block(mut self, name: &str, raw_entities: &str) -> Self {
        write!(
            self.blocks,
            "0\nBLOCK\n2\n{}\n10\n0.0\n20\n0.0\n30\n0.0\n{}0\nENDBLK\n",
            name, raw_entities
        )
        .unwrap();
        self
    }

    /// Render the complete DXF text
    pub fn build(&self) -> String {
        let mut out = String::new();
        if !self.header.is_empty() {
            write!(out, "0\nSECTION\n2\nHEADER\n{}0\nENDSEC\n", self.header).unwrap();
        }
        if !self.layers.is_empty() {
            write!(
                out,
                "0\nSECTION\n2\nTABLES\n0\nTABLE\n2\nLAYER\n{}0\nENDTAB\n0\nENDSEC\n",
                self.layers
            )
            .unwrap();
        }
        if !self.blocks.is_empty() {
            write!(out, "0\nSECTION\n2\nBLOCKS\n{}0\nENDSEC\n", self.blocks).unwrap();
        }
        write!(
            out,
            "0\nSECTION\n2\nENTITIES\n{}0\nENDSEC\n0\nEOF\n",
            self.entities
        )
        .unwrap();
        out
    }

    /// Write the document to a unique temp file and return its path
    pub fn write_temp(&self, stem: &str) -> PathBuf {
        write_temp_file(stem, "dxf", self.build().as_bytes())
    }
}

/// A block body: one arc (a door swing) and one line, square footprint
pub fn door_block_body() -> String {
    "0\nARC\n10\n0.0\n20\n0.0\n30\n0.0\n40\n900.0\n50\n0.0\n51\n90.0\n\
     0\nLINE\n10\n0.0\n20\n0.0\n11\n0.0\n21\n900.0\n"
        .to_string()
}

static FILE_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Write bytes to a unique file in the system temp directory
pub fn write_temp_file(stem: &str, extension: &str, bytes: &[u8]) -> PathBuf {
    let unique = FILE_COUNTER.fetch_add(1, Ordering::Relaxed);
    let path = std::env::temp_dir().join(format!(
        "cad2bim_{}_{}_{}.{}",
        stem,
        std::process::id(),
        unique,
        extension
    ));
    fs::write(&path, bytes).expect("failed to write temp fixture");
    path
}
