//! Export Pipeline - Single Entry Point
//!
//! CRITICAL: export MUST validate the size table first. No bypass.
//!
//! The master is rendered once at the largest pixel size in the table and
//! every output is resized from it. Files are written in table order, so when
//! two specs share a filename the later one's write is the one left on disk.

use chrono::{DateTime, Utc};
use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbaImage};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::catalog::{IconSetConfig, SizeSpec, SizeTable, MAX_PIXEL_SIZE};
use crate::hashing::{file_sha256, sha256_hex};
use crate::manifest::{Contents, ManifestInfo, MANIFEST_FILENAME};
use crate::render::render_icon;
use crate::style::IconStyle;
use crate::validation::{ValidationResult, ValidationViolation, Validator};
use crate::{ENGINE_VERSION, MIN_ENGINE_VERSION};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Config requires engine >= {0}, current is {1}")]
    EngineVersionMismatch(String, String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedFile {
    pub filename: String,
    pub size: [u32; 2],
    /// Digest of the file as left on disk at the end of the run.
    pub hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportReport {
    pub engine_version: String,
    pub created_at: DateTime<Utc>,
    pub output_dir: PathBuf,
    pub master_size: u32,
    /// One entry per spec, in table order.
    pub files: Vec<ExportedFile>,
    pub manifest_hash: String,
    pub warnings: Vec<ValidationViolation>,
}

/// The export pipeline - single entry point for icon-set generation
pub struct ExportPipeline {
    table: SizeTable,
    style: IconStyle,
    info: ManifestInfo,
    engine_min_version: String,
    validator: Validator,
}

impl ExportPipeline {
    pub fn new(table: SizeTable, style: IconStyle) -> Self {
        Self {
            table,
            style,
            info: ManifestInfo::default(),
            engine_min_version: MIN_ENGINE_VERSION.to_string(),
            validator: Validator::new(),
        }
    }

    pub fn with_config(config: IconSetConfig) -> Self {
        Self {
            table: config.sizes,
            style: config.style,
            info: ManifestInfo {
                author: config.author,
                version: config.version,
            },
            engine_min_version: config.engine_min_version,
            validator: Validator::new(),
        }
    }

    pub fn table(&self) -> &SizeTable {
        &self.table
    }

    /// Validate the size table
    ///
    /// This is the ONLY validation entry point.
    pub fn validate(&self) -> Result<ValidationResult, PipelineError> {
        self.check_engine_version()?;
        Ok(self.validator.validate(&self.table))
    }

    /// Render, resize and write every spec plus `Contents.json` into `out_dir`.
    ///
    /// `on_created` is called with each filename right after it is written.
    /// The directory is not created; a missing or unwritable one fails on the
    /// first write.
    pub fn export(
        &self,
        out_dir: &Path,
        mut on_created: impl FnMut(&str),
    ) -> Result<ExportReport, PipelineError> {
        // MANDATORY: Validation is always called.
        let validation = self.validate()?;
        if !validation.valid {
            let messages: Vec<_> = validation
                .errors()
                .map(|v| format!("{}: {}", v.rule, v.message))
                .collect();
            return Err(PipelineError::ValidationFailed(messages.join("; ")));
        }
        for warning in validation.warnings() {
            log::warn!("{}: {}", warning.rule, warning.message);
        }

        let master_size = self
            .table
            .max_pixel_size()
            .ok_or_else(|| PipelineError::ValidationFailed("size table is empty".into()))?;
        log::info!("rendering {}px master", master_size);
        let master = render_icon(master_size, &self.style);

        // The master is only read here, so resizes are independent.
        let resized: Vec<RgbaImage> = self
            .table
            .specs()
            .par_iter()
            .map(|spec| resize_master(&master, spec))
            .collect();

        for (spec, icon) in self.table.specs().iter().zip(&resized) {
            let filename = spec.filename();
            icon.save_with_format(out_dir.join(&filename), ImageFormat::Png)?;
            on_created(&filename);
        }

        let json = Contents::for_table(&self.table, self.info.clone()).to_pretty_json()?;
        fs::write(out_dir.join(MANIFEST_FILENAME), &json)?;
        on_created(MANIFEST_FILENAME);

        let files = self
            .table
            .specs()
            .iter()
            .map(|spec| {
                let filename = spec.filename();
                let px = spec.pixel_size();
                Ok(ExportedFile {
                    hash: file_sha256(&out_dir.join(&filename))?,
                    filename,
                    size: [px, px],
                })
            })
            .collect::<Result<Vec<_>, std::io::Error>>()?;

        Ok(ExportReport {
            engine_version: ENGINE_VERSION.to_string(),
            created_at: Utc::now(),
            output_dir: out_dir.to_path_buf(),
            master_size,
            files,
            manifest_hash: sha256_hex(json.as_bytes()),
            warnings: validation.warnings().cloned().collect(),
        })
    }

    /// Write a single unscaled render of the icon.
    pub fn render_master(&self, path: &Path, size: u32) -> Result<(), PipelineError> {
        if size == 0 || size > MAX_PIXEL_SIZE {
            return Err(PipelineError::InvalidConfig(format!(
                "render size must be between 1 and {}, got {}",
                MAX_PIXEL_SIZE, size
            )));
        }
        render_icon(size, &self.style).save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }

    fn check_engine_version(&self) -> Result<(), PipelineError> {
        let engine_ver = semver::Version::parse(ENGINE_VERSION)
            .map_err(|_| PipelineError::InvalidConfig("Invalid engine version".into()))?;
        let min_ver = semver::Version::parse(&self.engine_min_version).map_err(|e| {
            PipelineError::InvalidConfig(format!(
                "engineMinVersion {:?}: {}",
                self.engine_min_version, e
            ))
        })?;

        if engine_ver < min_ver {
            return Err(PipelineError::EngineVersionMismatch(
                self.engine_min_version.clone(),
                ENGINE_VERSION.to_string(),
            ));
        }

        Ok(())
    }
}

/// Lanczos3 downscale; the master itself is passed through untouched.
fn resize_master(master: &RgbaImage, spec: &SizeSpec) -> RgbaImage {
    let px = spec.pixel_size();
    if master.dimensions() == (px, px) {
        return master.clone();
    }
    log::debug!("resizing to {}x{} for {}@{}", px, px, spec.size, spec.scale_label());
    imageops::resize(master, px, px, FilterType::Lanczos3)
}

impl Default for ExportPipeline {
    fn default() -> Self {
        Self::with_config(IconSetConfig::default())
    }
}
