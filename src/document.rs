//! CAD model structure

use crate::entities::{CadBlock, CadBlockReference, CadEntity, DimensionEntity, TextEntity};
use crate::layer::CadLayer;
use crate::types::{CadUnits, Point3D};
use indexmap::IndexMap;

/// Header values retained from the drawing's HEADER section
#[derive(Debug, Clone, Default)]
pub struct ModelHeader {
    /// `$ACADVER` version string (e.g. "AC1027"); empty when absent
    pub acad_version: String,
    /// `$INSUNITS` drawing units
    pub units: CadUnits,
    /// `$EXTMIN` model space extents minimum, when present
    pub extents_min: Option<Point3D>,
    /// `$EXTMAX` model space extents maximum, when present
    pub extents_max: Option<Point3D>,
}

/// A parsed CAD drawing
///
/// Built by the parser and read-only afterwards. Owns all layers, block
/// definitions, and entities. Layer and block names are unique after case
/// folding and looked up case-insensitively; both collections keep their
/// file order. Text, dimension, and block-reference entities are
/// additionally indexed in dedicated lists so the downstream stages can
/// scan them without walking the whole entity list.
#[derive(Debug, Clone, Default)]
pub struct CadModel {
    /// Header values
    pub header: ModelHeader,
    /// Layers keyed by case-folded name
    layers: IndexMap<String, CadLayer>,
    /// Block definitions keyed by case-folded name
    blocks: IndexMap<String, CadBlock>,
    /// All model-space entities in file order
    pub entities: Vec<CadEntity>,
    /// Indices into `entities` of all text entities
    pub text_indices: Vec<usize>,
    /// Indices into `entities` of all dimension entities
    pub dimension_indices: Vec<usize>,
    /// Indices into `entities` of all block references
    pub insert_indices: Vec<usize>,
}

impl CadModel {
    /// Create a new empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a parsed layer
    ///
    /// Returns `false` and leaves the model unchanged when a layer with the
    /// same case-folded name already exists; the first record wins.
    pub fn add_layer(&mut self, layer: CadLayer) -> bool {
        let key = layer.name.to_uppercase();
        if self.layers.contains_key(&key) {
            return false;
        }
        self.layers.insert(key, layer);
        true
    }

    /// Look up a layer by name (case-insensitive)
    pub fn layer(&self, name: &str) -> Option<&CadLayer> {
        self.layers.get(&name.to_uppercase())
    }

    /// Does a layer with this name exist (case-insensitive)?
    pub fn has_layer(&self, name: &str) -> bool {
        self.layers.contains_key(&name.to_uppercase())
    }

    /// Iterate over all layers in file order
    pub fn layers(&self) -> impl Iterator<Item = &CadLayer> {
        self.layers.values()
    }

    /// Number of layers
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Register a parsed block definition
    ///
    /// Returns `false` and leaves the model unchanged when a block with the
    /// same case-folded name already exists; the first definition wins.
    pub fn add_block(&mut self, block: CadBlock) -> bool {
        let key = block.name.to_uppercase();
        if self.blocks.contains_key(&key) {
            return false;
        }
        self.blocks.insert(key, block);
        true
    }

    /// Look up a block definition by name (case-insensitive)
    pub fn block(&self, name: &str) -> Option<&CadBlock> {
        self.blocks.get(&name.to_uppercase())
    }

    /// Does a block definition with this name exist (case-insensitive)?
    pub fn has_block(&self, name: &str) -> bool {
        self.blocks.contains_key(&name.to_uppercase())
    }

    /// Number of block definitions
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Add an entity, maintaining the fan-out index lists
    pub fn add_entity(&mut self, entity: CadEntity) {
        let index = self.entities.len();
        match &entity {
            CadEntity::Text(_) => self.text_indices.push(index),
            CadEntity::Dimension(_) => self.dimension_indices.push(index),
            CadEntity::BlockReference(_) => self.insert_indices.push(index),
            _ => {}
        }
        self.entities.push(entity);
    }

    /// Number of model-space entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Iterate over all text entities with their entity indices
    pub fn texts(&self) -> impl Iterator<Item = (usize, &TextEntity)> {
        self.text_indices.iter().filter_map(|&i| match &self.entities[i] {
            CadEntity::Text(t) => Some((i, t)),
            _ => None,
        })
    }

    /// Iterate over all dimension entities with their entity indices
    pub fn dimensions(&self) -> impl Iterator<Item = (usize, &DimensionEntity)> {
        self.dimension_indices
            .iter()
            .filter_map(|&i| match &self.entities[i] {
                CadEntity::Dimension(d) => Some((i, d)),
                _ => None,
            })
    }

    /// Iterate over all block references with their entity indices
    pub fn block_references(&self) -> impl Iterator<Item = (usize, &CadBlockReference)> {
        self.insert_indices
            .iter()
            .filter_map(|&i| match &self.entities[i] {
                CadEntity::BlockReference(r) => Some((i, r)),
                _ => None,
            })
    }

    /// Look up the layer of an entity, falling back to layer "0"
    pub fn layer_of(&self, entity: &CadEntity) -> Option<&CadLayer> {
        let name = entity.layer();
        if name.is_empty() {
            self.layer("0")
        } else {
            self.layer(name).or_else(|| self.layer("0"))
        }
    }
}
