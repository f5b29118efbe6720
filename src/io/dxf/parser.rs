//! DXF section and entity parsing
//!
//! The parser is a state machine over (group code, value) pairs keyed on
//! code-0 markers. Only the HEADER, TABLES (LAYER table), BLOCKS, and
//! ENTITIES sections are interpreted; everything else is skipped to the
//! matching `ENDSEC`.
//!
//! Error policy: an unparseable numeric value aborts the current entity
//! (it is discarded) and parsing resumes at the next code-0 marker; missing
//! required fields produce entities that the downstream stages filter out.
//! Only fundamentally unreadable input raises an error.

use super::stream::{DxfCodePair, DxfStreamReader, PointAccumulator};
use crate::document::CadModel;
use crate::entities::*;
use crate::error::{ImportError, Result};
use crate::pipeline::CancellationToken;
use crate::layer::{CadLayer, LayerFlags};
use crate::types::{CadUnits, Point3D};
use std::io::{Cursor, Read};

/// Sentinel prefix of binary DXF files
const BINARY_SENTINEL: &[u8] = b"AutoCAD Binary DXF";

/// Check whether a byte buffer is a binary DXF stream
pub fn is_binary_dxf(bytes: &[u8]) -> bool {
    bytes.len() >= BINARY_SENTINEL.len() && &bytes[..BINARY_SENTINEL.len()] == BINARY_SENTINEL
}

/// DXF file parser
pub struct DxfParser<R: Read> {
    reader: DxfStreamReader<R>,
}

impl DxfParser<Cursor<Vec<u8>>> {
    /// Create a parser over an in-memory buffer
    ///
    /// Binary DXF streams are rejected; only the ASCII tagged-pair format
    /// is supported.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        if is_binary_dxf(&bytes) {
            return Err(ImportError::InvalidFormat(
                "binary DXF is not supported; export as ASCII DXF".to_string(),
            ));
        }
        Ok(Self {
            reader: DxfStreamReader::new(Cursor::new(bytes)),
        })
    }
}

impl<R: Read> DxfParser<R> {
    /// Create a parser over any reader
    pub fn new(reader: R) -> Self {
        Self {
            reader: DxfStreamReader::new(reader),
        }
    }

    /// Parse the whole stream into a [`CadModel`]
    pub fn parse(self) -> Result<CadModel> {
        self.parse_with_cancel(&CancellationToken::new())
    }

    /// Parse the whole stream, observing a cancellation token between
    /// entities
    pub fn parse_with_cancel(mut self, cancel: &CancellationToken) -> Result<CadModel> {
        let mut model = CadModel::new();

        while let Some(pair) = self.reader.read_pair()? {
            if pair.is_marker("EOF") {
                break;
            }
            if !pair.is_marker("SECTION") {
                continue;
            }

            // The pair after SECTION names it (code 2)
            let Some(name_pair) = self.reader.read_pair()? else {
                break;
            };
            if name_pair.code != 2 {
                self.reader.push_back(name_pair);
                continue;
            }

            match name_pair.value.as_str() {
                "HEADER" => self.parse_header(&mut model)?,
                "TABLES" => self.parse_tables(&mut model)?,
                "BLOCKS" => self.parse_blocks(&mut model, cancel)?,
                "ENTITIES" => self.parse_entities(&mut model, cancel)?,
                other => {
                    log::debug!("skipping section {}", other);
                    self.skip_section()?;
                }
            }
        }

        if !model.has_layer("0") {
            // Entities without a resolvable layer fall back to "0"
            model.add_layer(CadLayer::layer_0());
        }

        Ok(model)
    }

    /// Skip forward to the end of the current section
    fn skip_section(&mut self) -> Result<()> {
        while let Some(pair) = self.reader.read_pair()? {
            if pair.is_marker("ENDSEC") {
                break;
            }
        }
        Ok(())
    }

    // ==================== HEADER ====================

    fn parse_header(&mut self, model: &mut CadModel) -> Result<()> {
        while let Some(pair) = self.reader.read_pair()? {
            if pair.is_marker("ENDSEC") {
                break;
            }
            if pair.code != 9 {
                continue;
            }

            match pair.value.as_str() {
                "$ACADVER" => {
                    if let Some(p) = self.reader.read_pair()? {
                        model.header.acad_version = p.value.clone();
                    }
                }
                "$INSUNITS" => {
                    if let Some(p) = self.reader.read_pair()? {
                        if let Some(code) = p.as_i32() {
                            model.header.units = CadUnits::from_code(code);
                        }
                    }
                }
                "$EXTMIN" => {
                    model.header.extents_min = self.read_header_point()?;
                }
                "$EXTMAX" => {
                    model.header.extents_max = self.read_header_point()?;
                }
                _ => self.skip_header_variable()?,
            }
        }
        Ok(())
    }

    /// Read a 10/20/30 point following a header variable name
    fn read_header_point(&mut self) -> Result<Option<Point3D>> {
        let mut acc = PointAccumulator::new();
        while let Some(pair) = self.reader.read_pair()? {
            match pair.code {
                10 | 20 | 30 => {
                    if let Some(v) = pair.as_f64() {
                        acc.set((pair.code / 10 - 1) as u8, v);
                    }
                }
                _ => {
                    self.reader.push_back(pair);
                    break;
                }
            }
        }
        Ok(acc.point())
    }

    /// Skip an unknown header variable's value pairs
    fn skip_header_variable(&mut self) -> Result<()> {
        while let Some(pair) = self.reader.read_pair()? {
            if pair.code == 9 || pair.code == 0 {
                self.reader.push_back(pair);
                break;
            }
        }
        Ok(())
    }

    // ==================== TABLES ====================

    fn parse_tables(&mut self, model: &mut CadModel) -> Result<()> {
        while let Some(pair) = self.reader.read_pair()? {
            if pair.is_marker("ENDSEC") {
                break;
            }

            if pair.is_marker("TABLE") {
                if let Some(name_pair) = self.reader.read_pair()? {
                    if name_pair.code == 2 && name_pair.value == "LAYER" {
                        self.parse_layer_table(model)?;
                    } else {
                        self.skip_to_endtab()?;
                    }
                }
            }
        }
        Ok(())
    }

    fn skip_to_endtab(&mut self) -> Result<()> {
        while let Some(pair) = self.reader.read_pair()? {
            if pair.is_marker("ENDTAB") {
                break;
            }
        }
        Ok(())
    }

    /// Parse LAYER records until `ENDTAB`, flushing the final open record
    fn parse_layer_table(&mut self, model: &mut CadModel) -> Result<()> {
        let mut current: Option<CadLayer> = None;

        let flush = |model: &mut CadModel, layer: Option<CadLayer>| {
            if let Some(layer) = layer {
                if layer.name.is_empty() {
                    return;
                }
                let name = layer.name.clone();
                if !model.add_layer(layer) {
                    log::warn!("duplicate layer '{}' dropped", name);
                }
            }
        };

        while let Some(pair) = self.reader.read_pair()? {
            if pair.code == 0 {
                if pair.value == "LAYER" {
                    flush(model, current.take());
                    current = Some(CadLayer::new(""));
                } else if pair.value == "ENDTAB" {
                    flush(model, current.take());
                    break;
                } else {
                    flush(model, current.take());
                    self.reader.push_back(pair);
                    break;
                }
                continue;
            }

            let Some(layer) = current.as_mut() else {
                continue;
            };
            match pair.code {
                2 => layer.name = pair.value.clone(),
                6 => layer.line_type = pair.value.clone(),
                62 => {
                    if let Some(color) = pair.as_i16() {
                        layer.set_color_index(color);
                    }
                }
                70 => {
                    if let Some(flags) = pair.as_i16() {
                        layer.flags = LayerFlags::from_bits_truncate(flags);
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    // ==================== BLOCKS ====================

    fn parse_blocks(&mut self, model: &mut CadModel, cancel: &CancellationToken) -> Result<()> {
        let mut open_block: Option<CadBlock> = None;

        let flush = |model: &mut CadModel, block: Option<CadBlock>| {
            if let Some(block) = block {
                if block.name.is_empty() {
                    return;
                }
                let name = block.name.clone();
                if !model.add_block(block) {
                    log::warn!("duplicate block '{}' dropped", name);
                }
            }
        };

        while let Some(pair) = self.reader.read_pair()? {
            cancel.check()?;

            if pair.is_marker("ENDSEC") {
                // A still-open block is flushed at section end
                flush(model, open_block.take());
                break;
            }

            if pair.code != 0 {
                continue;
            }

            match pair.value.as_str() {
                "BLOCK" => {
                    flush(model, open_block.take());
                    open_block = Some(self.read_block_header()?);
                }
                "ENDBLK" => {
                    self.reader.skip_to_marker()?;
                    flush(model, open_block.take());
                }
                entity_type => {
                    let parsed = self.parse_entity(entity_type)?;
                    if let (Some(entity), Some(block)) = (parsed, open_block.as_mut()) {
                        block.entities.push(entity);
                    }
                }
            }
        }
        Ok(())
    }

    /// Read the properties of a BLOCK record up to its first entity
    fn read_block_header(&mut self) -> Result<CadBlock> {
        let mut name = String::new();
        let mut base = PointAccumulator::new();

        while let Some(pair) = self.reader.read_pair()? {
            match pair.code {
                0 => {
                    self.reader.push_back(pair);
                    break;
                }
                2 => name = pair.value.clone(),
                3 => {
                    if name.is_empty() {
                        name = pair.value.clone();
                    }
                }
                10 | 20 | 30 => {
                    if let Some(v) = pair.as_f64() {
                        base.set((pair.code / 10 - 1) as u8, v);
                    }
                }
                _ => {}
            }
        }

        Ok(CadBlock::new(name, base.point().unwrap_or_default()))
    }

    // ==================== ENTITIES ====================

    fn parse_entities(&mut self, model: &mut CadModel, cancel: &CancellationToken) -> Result<()> {
        while let Some(pair) = self.reader.read_pair()? {
            cancel.check()?;

            if pair.is_marker("ENDSEC") {
                break;
            }

            if pair.code == 0 {
                if let Some(entity) = self.parse_entity(&pair.value)? {
                    model.add_entity(entity);
                }
            }
        }
        Ok(())
    }

    /// Dispatch one entity by its code-0 type name
    ///
    /// Returns `None` for unknown types (skipped to the next marker) and for
    /// entities aborted by unparseable numerics.
    fn parse_entity(&mut self, entity_type: &str) -> Result<Option<CadEntity>> {
        let entity = match entity_type {
            "LINE" => self.read_line()?.map(CadEntity::Line),
            "LWPOLYLINE" => self.read_lwpolyline()?.map(CadEntity::Polyline),
            "POLYLINE" => self.read_polyline()?.map(CadEntity::Polyline),
            "CIRCLE" => self.read_circle()?.map(CadEntity::Circle),
            "ARC" => self.read_arc()?.map(CadEntity::Arc),
            "ELLIPSE" => self.read_ellipse()?.map(CadEntity::Ellipse),
            "TEXT" | "MTEXT" => self.read_text()?.map(CadEntity::Text),
            "DIMENSION" => self.read_dimension()?.map(CadEntity::Dimension),
            "INSERT" => self.read_insert()?.map(CadEntity::BlockReference),
            "POINT" => self.read_point()?.map(CadEntity::Point),
            "SPLINE" => self.read_spline()?.map(CadEntity::Spline),
            "HATCH" => self.read_hatch()?.map(CadEntity::Hatch),
            "SOLID" | "TRACE" | "3DFACE" => self.read_solid()?.map(CadEntity::Solid),
            other => {
                log::debug!("skipping unknown entity type {}", other);
                self.reader.skip_to_marker()?;
                None
            }
        };
        Ok(entity)
    }

    fn read_line(&mut self) -> Result<Option<LineEntity>> {
        let mut line = LineEntity::new();
        let mut start = PointAccumulator::new();
        let mut end = PointAccumulator::new();
        let mut aborted = false;

        while let Some(pair) = self.reader.read_pair()? {
            if pair.code == 0 {
                self.reader.push_back(pair);
                break;
            }
            match pair.code {
                8 => line.common.layer = pair.value.clone(),
                6 => line.common.line_type = pair.value.clone(),
                62 => line.common.color = pair.as_i16().unwrap_or(256),
                10 | 20 | 30 => accumulate(&mut start, &pair, 10, &mut aborted),
                11 | 21 | 31 => accumulate(&mut end, &pair, 11, &mut aborted),
                _ => {}
            }
        }

        if aborted {
            log::warn!("LINE discarded: unparseable coordinate");
            return Ok(None);
        }
        line.start = start.point();
        line.end = end.point();
        Ok(Some(line))
    }

    fn read_circle(&mut self) -> Result<Option<CircleEntity>> {
        let mut circle = CircleEntity::new();
        let mut center = PointAccumulator::new();
        let mut aborted = false;

        while let Some(pair) = self.reader.read_pair()? {
            if pair.code == 0 {
                self.reader.push_back(pair);
                break;
            }
            match pair.code {
                8 => circle.common.layer = pair.value.clone(),
                6 => circle.common.line_type = pair.value.clone(),
                62 => circle.common.color = pair.as_i16().unwrap_or(256),
                10 | 20 | 30 => accumulate(&mut center, &pair, 10, &mut aborted),
                40 => match pair.as_f64() {
                    Some(r) => circle.radius = r,
                    None => aborted = true,
                },
                _ => {}
            }
        }

        if aborted {
            log::warn!("CIRCLE discarded: unparseable numeric");
            return Ok(None);
        }
        circle.center = center.point();
        Ok(Some(circle))
    }

    fn read_arc(&mut self) -> Result<Option<ArcEntity>> {
        let mut arc = ArcEntity::new();
        let mut center = PointAccumulator::new();
        let mut aborted = false;

        while let Some(pair) = self.reader.read_pair()? {
            if pair.code == 0 {
                self.reader.push_back(pair);
                break;
            }
            match pair.code {
                8 => arc.common.layer = pair.value.clone(),
                6 => arc.common.line_type = pair.value.clone(),
                62 => arc.common.color = pair.as_i16().unwrap_or(256),
                10 | 20 | 30 => accumulate(&mut center, &pair, 10, &mut aborted),
                40 => match pair.as_f64() {
                    Some(r) => arc.radius = r,
                    None => aborted = true,
                },
                50 => match pair.as_f64() {
                    Some(a) => arc.start_angle = a,
                    None => aborted = true,
                },
                51 => match pair.as_f64() {
                    Some(a) => arc.end_angle = a,
                    None => aborted = true,
                },
                _ => {}
            }
        }

        if aborted {
            log::warn!("ARC discarded: unparseable numeric");
            return Ok(None);
        }
        arc.center = center.point();
        Ok(Some(arc))
    }

    fn read_ellipse(&mut self) -> Result<Option<EllipseEntity>> {
        let mut ellipse = EllipseEntity::new();
        let mut center = PointAccumulator::new();
        let mut major = PointAccumulator::new();
        let mut aborted = false;

        while let Some(pair) = self.reader.read_pair()? {
            if pair.code == 0 {
                self.reader.push_back(pair);
                break;
            }
            match pair.code {
                8 => ellipse.common.layer = pair.value.clone(),
                6 => ellipse.common.line_type = pair.value.clone(),
                62 => ellipse.common.color = pair.as_i16().unwrap_or(256),
                10 | 20 | 30 => accumulate(&mut center, &pair, 10, &mut aborted),
                11 | 21 | 31 => accumulate(&mut major, &pair, 11, &mut aborted),
                40 => match pair.as_f64() {
                    Some(r) => ellipse.minor_axis_ratio = r,
                    None => aborted = true,
                },
                41 => match pair.as_f64() {
                    Some(a) => ellipse.start_angle = a,
                    None => aborted = true,
                },
                42 => match pair.as_f64() {
                    Some(a) => ellipse.end_angle = a,
                    None => aborted = true,
                },
                _ => {}
            }
        }

        if aborted {
            log::warn!("ELLIPSE discarded: unparseable numeric");
            return Ok(None);
        }
        ellipse.center = center.point();
        if let Some(p) = major.point() {
            ellipse.major_axis = p.to_vector();
        }
        Ok(Some(ellipse))
    }

    fn read_lwpolyline(&mut self) -> Result<Option<PolylineEntity>> {
        let mut poly = PolylineEntity::new();
        let mut elevation = 0.0;
        // (x, y, bulge) of the vertex currently being accumulated
        let mut current: Option<(f64, f64, f64)> = None;
        let mut aborted = false;

        while let Some(pair) = self.reader.read_pair()? {
            if pair.code == 0 {
                self.reader.push_back(pair);
                break;
            }
            match pair.code {
                8 => poly.common.layer = pair.value.clone(),
                6 => poly.common.line_type = pair.value.clone(),
                62 => poly.common.color = pair.as_i16().unwrap_or(256),
                70 => {
                    if let Some(flags) = pair.as_i16() {
                        poly.is_closed =
                            PolylineFlags::from_bits_truncate(flags).contains(PolylineFlags::CLOSED);
                    }
                }
                38 => elevation = pair.as_f64().unwrap_or(0.0),
                // Code 10 begins a new vertex
                10 => match pair.as_f64() {
                    Some(x) => {
                        if let Some((px, py, pb)) = current.take() {
                            poly.add_vertex_with_bulge(Point3D::new(px, py, 0.0), pb);
                        }
                        current = Some((x, 0.0, 0.0));
                    }
                    None => aborted = true,
                },
                20 => match (pair.as_f64(), current.as_mut()) {
                    (Some(y), Some(v)) => v.1 = y,
                    (None, _) => aborted = true,
                    _ => {}
                },
                42 => match (pair.as_f64(), current.as_mut()) {
                    (Some(b), Some(v)) => v.2 = b,
                    (None, _) => aborted = true,
                    _ => {}
                },
                _ => {}
            }
        }

        if aborted {
            log::warn!("LWPOLYLINE discarded: unparseable numeric");
            return Ok(None);
        }
        if let Some((px, py, pb)) = current.take() {
            poly.add_vertex_with_bulge(Point3D::new(px, py, 0.0), pb);
        }
        if elevation != 0.0 {
            for v in &mut poly.vertices {
                v.z = elevation;
            }
        }
        Ok(Some(poly))
    }

    /// Read a heavy POLYLINE: header codes, then VERTEX entities up to SEQEND
    fn read_polyline(&mut self) -> Result<Option<PolylineEntity>> {
        let mut poly = PolylineEntity::new();
        let mut aborted = false;

        // Polyline header
        while let Some(pair) = self.reader.read_pair()? {
            if pair.code == 0 {
                self.reader.push_back(pair);
                break;
            }
            match pair.code {
                8 => poly.common.layer = pair.value.clone(),
                6 => poly.common.line_type = pair.value.clone(),
                62 => poly.common.color = pair.as_i16().unwrap_or(256),
                70 => {
                    if let Some(flags) = pair.as_i16() {
                        poly.is_closed =
                            PolylineFlags::from_bits_truncate(flags).contains(PolylineFlags::CLOSED);
                    }
                }
                _ => {}
            }
        }

        // VERTEX sub-entities
        while let Some(pair) = self.reader.read_pair()? {
            if pair.code != 0 {
                continue;
            }
            if pair.value == "VERTEX" {
                let mut location = PointAccumulator::new();
                let mut bulge = 0.0;
                while let Some(vp) = self.reader.read_pair()? {
                    if vp.code == 0 {
                        self.reader.push_back(vp);
                        break;
                    }
                    match vp.code {
                        10 | 20 | 30 => accumulate(&mut location, &vp, 10, &mut aborted),
                        42 => bulge = vp.as_f64().unwrap_or(0.0),
                        _ => {}
                    }
                }
                if let Some(p) = location.point() {
                    poly.add_vertex_with_bulge(p, bulge);
                }
            } else if pair.value == "SEQEND" {
                self.reader.skip_to_marker()?;
                break;
            } else {
                self.reader.push_back(pair);
                break;
            }
        }

        if aborted {
            log::warn!("POLYLINE discarded: unparseable numeric");
            return Ok(None);
        }
        Ok(Some(poly))
    }

    fn read_text(&mut self) -> Result<Option<TextEntity>> {
        let mut text = TextEntity::new();
        let mut position = PointAccumulator::new();
        let mut aborted = false;

        while let Some(pair) = self.reader.read_pair()? {
            if pair.code == 0 {
                self.reader.push_back(pair);
                break;
            }
            match pair.code {
                8 => text.common.layer = pair.value.clone(),
                6 => text.common.line_type = pair.value.clone(),
                62 => text.common.color = pair.as_i16().unwrap_or(256),
                1 => text.content = pair.value.clone(),
                7 => text.style = pair.value.clone(),
                10 | 20 | 30 => accumulate(&mut position, &pair, 10, &mut aborted),
                40 => match pair.as_f64() {
                    Some(h) => text.height = h,
                    None => aborted = true,
                },
                50 => text.rotation = pair.as_f64().unwrap_or(0.0),
                _ => {}
            }
        }

        if aborted {
            log::warn!("TEXT discarded: unparseable numeric");
            return Ok(None);
        }
        text.position = position.point();
        Ok(Some(text))
    }

    fn read_dimension(&mut self) -> Result<Option<DimensionEntity>> {
        let mut dim = DimensionEntity::new();
        let mut definition = PointAccumulator::new();
        let mut midpoint = PointAccumulator::new();
        let mut ext1 = PointAccumulator::new();
        let mut ext2 = PointAccumulator::new();
        let mut aborted = false;

        while let Some(pair) = self.reader.read_pair()? {
            if pair.code == 0 {
                self.reader.push_back(pair);
                break;
            }
            match pair.code {
                8 => dim.common.layer = pair.value.clone(),
                6 => dim.common.line_type = pair.value.clone(),
                62 => dim.common.color = pair.as_i16().unwrap_or(256),
                1 => dim.text = pair.value.clone(),
                10 | 20 | 30 => accumulate(&mut definition, &pair, 10, &mut aborted),
                11 | 21 | 31 => accumulate(&mut midpoint, &pair, 11, &mut aborted),
                13 | 23 | 33 => accumulate(&mut ext1, &pair, 13, &mut aborted),
                14 | 24 | 34 => accumulate(&mut ext2, &pair, 14, &mut aborted),
                42 => match pair.as_f64() {
                    Some(m) => dim.measurement = m,
                    None => aborted = true,
                },
                70 => {
                    if let Some(flags) = pair.as_i16() {
                        dim.dimension_type = DimensionType::from_flags(flags);
                    }
                }
                _ => {}
            }
        }

        if aborted {
            log::warn!("DIMENSION discarded: unparseable numeric");
            return Ok(None);
        }
        dim.definition_point = definition.point();
        dim.text_midpoint = midpoint.point();
        dim.ext_line1_start = ext1.point();
        dim.ext_line2_start = ext2.point();
        Ok(Some(dim))
    }

    fn read_insert(&mut self) -> Result<Option<CadBlockReference>> {
        let mut insert = CadBlockReference::new("", Point3D::ORIGIN);
        let mut position = PointAccumulator::new();
        let mut aborted = false;

        while let Some(pair) = self.reader.read_pair()? {
            if pair.code == 0 {
                self.reader.push_back(pair);
                break;
            }
            match pair.code {
                8 => insert.common.layer = pair.value.clone(),
                6 => insert.common.line_type = pair.value.clone(),
                62 => insert.common.color = pair.as_i16().unwrap_or(256),
                2 => insert.block_name = pair.value.clone(),
                10 | 20 | 30 => accumulate(&mut position, &pair, 10, &mut aborted),
                41 => match pair.as_f64() {
                    Some(s) => insert.scale_x = s,
                    None => aborted = true,
                },
                42 => match pair.as_f64() {
                    Some(s) => insert.scale_y = s,
                    None => aborted = true,
                },
                43 => match pair.as_f64() {
                    Some(s) => insert.scale_z = s,
                    None => aborted = true,
                },
                50 => insert.rotation = pair.as_f64().unwrap_or(0.0),
                _ => {}
            }
        }

        if aborted {
            log::warn!("INSERT discarded: unparseable numeric");
            return Ok(None);
        }
        if let Some(p) = position.point() {
            insert.insertion_point = p;
        }
        Ok(Some(insert))
    }

    fn read_point(&mut self) -> Result<Option<PointEntity>> {
        let mut point = PointEntity::new();
        let mut location = PointAccumulator::new();
        let mut aborted = false;

        while let Some(pair) = self.reader.read_pair()? {
            if pair.code == 0 {
                self.reader.push_back(pair);
                break;
            }
            match pair.code {
                8 => point.common.layer = pair.value.clone(),
                62 => point.common.color = pair.as_i16().unwrap_or(256),
                10 | 20 | 30 => accumulate(&mut location, &pair, 10, &mut aborted),
                _ => {}
            }
        }

        if aborted {
            log::warn!("POINT discarded: unparseable coordinate");
            return Ok(None);
        }
        point.location = location.point();
        Ok(Some(point))
    }

    fn read_spline(&mut self) -> Result<Option<SplineEntity>> {
        let mut spline = SplineEntity::new();
        let mut current = PointAccumulator::new();

        while let Some(pair) = self.reader.read_pair()? {
            if pair.code == 0 {
                self.reader.push_back(pair);
                break;
            }
            match pair.code {
                8 => spline.common.layer = pair.value.clone(),
                62 => spline.common.color = pair.as_i16().unwrap_or(256),
                71 => spline.degree = pair.as_i16().unwrap_or(3),
                // Each code 10 begins a new control point
                10 => {
                    if let Some(p) = current.point() {
                        spline.control_points.push(p);
                    }
                    current = PointAccumulator::new();
                    if let Some(v) = pair.as_f64() {
                        current.set(0, v);
                    }
                }
                20 => {
                    if let Some(v) = pair.as_f64() {
                        current.set(1, v);
                    }
                }
                30 => {
                    if let Some(v) = pair.as_f64() {
                        current.set(2, v);
                    }
                }
                _ => {}
            }
        }

        if let Some(p) = current.point() {
            spline.control_points.push(p);
        }
        Ok(Some(spline))
    }

    fn read_hatch(&mut self) -> Result<Option<HatchEntity>> {
        let mut hatch = HatchEntity::new();

        while let Some(pair) = self.reader.read_pair()? {
            if pair.code == 0 {
                self.reader.push_back(pair);
                break;
            }
            match pair.code {
                8 => hatch.common.layer = pair.value.clone(),
                62 => hatch.common.color = pair.as_i16().unwrap_or(256),
                2 => hatch.pattern_name = pair.value.clone(),
                _ => {}
            }
        }
        Ok(Some(hatch))
    }

    fn read_solid(&mut self) -> Result<Option<SolidEntity>> {
        let mut solid = SolidEntity::new();
        let mut corners = [PointAccumulator::new(); 4];
        let mut aborted = false;

        while let Some(pair) = self.reader.read_pair()? {
            if pair.code == 0 {
                self.reader.push_back(pair);
                break;
            }
            match pair.code {
                8 => solid.common.layer = pair.value.clone(),
                6 => solid.common.line_type = pair.value.clone(),
                62 => solid.common.color = pair.as_i16().unwrap_or(256),
                10..=13 | 20..=23 | 30..=33 => {
                    let corner = (pair.code % 10) as usize;
                    let axis = (pair.code / 10 - 1) as u8;
                    match pair.as_f64() {
                        Some(v) => corners[corner].set(axis, v),
                        None => aborted = true,
                    }
                }
                _ => {}
            }
        }

        if aborted {
            log::warn!("SOLID discarded: unparseable coordinate");
            return Ok(None);
        }
        solid.vertices = corners.iter().filter_map(|c| c.point()).collect();
        Ok(Some(solid))
    }
}

/// Feed one coordinate pair into an accumulator.
/// `base` is the X-axis group code (10, 11, 13, ...); Y and Z arrive at
/// base+10 and base+20.
fn accumulate(acc: &mut PointAccumulator, pair: &DxfCodePair, base: i32, aborted: &mut bool) {
    let axis = ((pair.code - base) / 10) as u8;
    match pair.as_f64() {
        Some(v) => acc.set(axis, v),
        None => *aborted = true,
    }
}
