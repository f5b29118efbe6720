//! The import orchestrator
//!
//! Drives the stages sequentially: validate, parse, classify layers,
//! process geometry, recognize blocks, extract text, convert, post-process.
//! Progress is reported at stage boundaries; the cancellation token is
//! observed before each stage and inside the per-entity loops.

use super::cancel::CancellationToken;
use super::options::{ImportOptions, ImportSettings};
use super::progress::{NoProgress, ProgressReporter};
use super::result::{ImportResult, ImportStatistics};
use crate::blocks::BlockRecognizer;
use crate::classify::LayerClassifier;
use crate::convert::{ConvertedElement, ElementConverter};
use crate::document::CadModel;
use crate::error::{ImportError, Result};
use crate::geometry::GeometryProcessor;
use crate::io::dxf::DxfParser;
use crate::io::dwg::DwgParser;
use crate::io::{validate_source, FileType};
use crate::postprocess::PostProcessor;
use crate::text_extract::TextExtractor;
use chrono::Utc;
use std::fs;
use std::path::Path;

/// Imports CAD files into converted building elements
#[derive(Debug, Clone, Default)]
pub struct CadImporter {
    /// Per-import behavior switches
    pub options: ImportOptions,
    /// Engine-wide tolerances
    pub settings: ImportSettings,
}

impl CadImporter {
    /// Create an importer with the given options and default settings
    pub fn new(options: ImportOptions) -> Self {
        Self {
            options,
            settings: ImportSettings::default(),
        }
    }

    /// Create an importer with explicit options and settings
    pub fn with_settings(options: ImportOptions, settings: ImportSettings) -> Self {
        Self { options, settings }
    }

    /// Import a file, discarding progress and without cancellation
    pub fn import_file(&self, path: impl AsRef<Path>) -> ImportResult {
        self.import_file_with(path, &NoProgress, &CancellationToken::new())
    }

    /// Import a file with progress reporting and cancellation
    ///
    /// Never panics and never returns `Err`: every failure is recorded in
    /// the result's error list with `success == false`.
    pub fn import_file_with(
        &self,
        path: impl AsRef<Path>,
        progress: &dyn ProgressReporter,
        cancel: &CancellationToken,
    ) -> ImportResult {
        let path = path.as_ref();
        let start_time = Utc::now();

        let mut result = match self.run_pipeline(path, progress, cancel) {
            Ok(result) => result,
            Err(error) => {
                let file_type = FileType::from_path(path)
                    .map(|t| t.label().to_string())
                    .unwrap_or_default();
                let mut failed = ImportResult::new(path.to_path_buf(), file_type);
                match &error {
                    ImportError::Cancelled => {
                        log::info!("import of {} cancelled", path.display());
                    }
                    other => log::error!("import of {} failed: {}", path.display(), other),
                }
                failed.errors.push(error.to_string());
                failed
            }
        };

        result.import_start_time = start_time;
        result.import_end_time = Utc::now();
        result.success = result.errors.is_empty();
        result
    }

    fn run_pipeline(
        &self,
        path: &Path,
        progress: &dyn ProgressReporter,
        cancel: &CancellationToken,
    ) -> Result<ImportResult> {
        // ---- Validation ----
        progress.report(0, "Validating file");
        cancel.check()?;
        let file_type = validate_source(path, self.settings.max_file_size_bytes)?;
        let mut result = ImportResult::new(path.to_path_buf(), file_type.label());

        // ---- Parse ----
        progress.report(10, "Parsing file");
        cancel.check()?;
        let model = self.parse_file(path, file_type, cancel)?;
        let mut statistics = ImportStatistics {
            total_entities: model.entity_count(),
            ..Default::default()
        };
        for entity in &model.entities {
            *statistics
                .entities_by_layer
                .entry(entity.layer().to_string())
                .or_insert(0) += 1;
        }
        log::debug!(
            "parsed {}: {} entities, {} layers, {} blocks",
            path.display(),
            model.entity_count(),
            model.layer_count(),
            model.block_count()
        );

        // ---- Classify layers ----
        progress.report(25, "Classifying layers");
        cancel.check()?;
        let classifier = self.build_classifier()?;
        let mappings = classifier.classify_model(&model);
        statistics.layers_mapped = mappings.len();

        // ---- Geometry ----
        progress.report(40, "Processing geometry");
        cancel.check()?;
        let processor = GeometryProcessor::new(
            self.settings.unit_conversion_factor,
            self.settings.min_line_length,
            self.settings.min_radius,
        );
        let processed = processor.process_model(&model, &mappings, cancel)?;
        statistics.geometry_processed = processed.len();

        // ---- Blocks ----
        progress.report(55, "Recognizing blocks");
        cancel.check()?;
        let recognizer = BlockRecognizer::new(self.settings.unit_conversion_factor);
        let recognized = recognizer.recognize_model(&model, &mappings, cancel)?;
        statistics.blocks_recognized = recognized.len();

        // ---- Text ----
        progress.report(65, "Extracting text");
        cancel.check()?;
        let extractor = TextExtractor::new(self.settings.unit_conversion_factor);
        let texts = if self.options.import_text {
            extractor.extract_texts(&model, &mappings, cancel)?
        } else {
            Vec::new()
        };
        let dimensions = if self.options.import_dimensions {
            extractor.extract_dimensions(&model, &mappings, cancel)?
        } else {
            Vec::new()
        };
        statistics.texts_extracted = texts.len();
        statistics.dimensions_extracted = dimensions.len();

        // ---- Convert ----
        progress.report(75, "Converting elements");
        cancel.check()?;
        let mut converter = ElementConverter::new(self.options.default_wall_height);
        let mut elements: Vec<ConvertedElement> = Vec::new();
        for item in &processed {
            cancel.check()?;
            elements.push(converter.convert_geometry(item));
        }
        for block in &recognized {
            cancel.check()?;
            elements.push(converter.convert_block(block));
        }
        for text in &texts {
            cancel.check()?;
            elements.push(converter.convert_text(text));
        }
        for dimension in &dimensions {
            cancel.check()?;
            elements.push(converter.convert_dimension(dimension));
        }

        // ---- Post-process ----
        progress.report(90, "Post-processing");
        cancel.check()?;
        let post = PostProcessor::new(
            self.settings.join_tolerance,
            self.settings.opening_host_tolerance,
            self.settings.min_element_volume,
        );
        if self.options.remove_duplicates {
            statistics.duplicates_removed = post.remove_duplicates(&mut elements);
        }
        if self.options.join_walls {
            statistics.walls_joined = post.join_walls(&mut elements);
        }
        if self.options.insert_openings_into_walls {
            statistics.openings_hosted = post.insert_openings(&mut elements);
        }
        if self.options.validate_geometry {
            result.warnings.extend(post.validate_geometry(&elements));
        }
        result
            .warnings
            .extend(post.generate_warnings(&elements, &mappings));

        statistics.tally_categories(&elements);
        log::info!(
            "imported {}: {} elements from {} entities",
            path.display(),
            elements.len(),
            statistics.total_entities
        );

        progress.report(100, "Complete");
        result.layer_mappings = mappings;
        result.converted_elements = elements;
        result.statistics = statistics;
        Ok(result)
    }

    fn parse_file(
        &self,
        path: &Path,
        file_type: FileType,
        cancel: &CancellationToken,
    ) -> Result<CadModel> {
        let bytes = fs::read(path)?;
        match file_type {
            FileType::Dxf => DxfParser::from_bytes(bytes)?.parse_with_cancel(cancel),
            FileType::Dwg => DwgParser::parse(&bytes),
        }
    }

    fn build_classifier(&self) -> Result<LayerClassifier> {
        let mut classifier = LayerClassifier::new();
        classifier.set_explicit_mappings(self.options.explicit_layer_mappings.clone());
        classifier.set_import_invisible(self.options.import_invisible_layers);
        classifier.set_category_filter(self.options.category_filter.iter().copied());
        classifier.set_name_filters(
            &self.options.layer_name_filter,
            &self.options.exclude_layer_patterns,
        )?;
        Ok(classifier)
    }
}
