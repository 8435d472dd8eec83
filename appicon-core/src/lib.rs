//! AppIcon Core - Icon Renderer and Asset Catalog Exporter
//!
//! # Guarantees
//! 1. One master render per export, at the table's largest pixel size
//! 2. Every output is a Lanczos3 resize of that master
//! 3. The size table is validated before anything is written
//! 4. `Contents.json` has one entry per size spec, in table order
//! 5. Same config, same bytes

pub mod style;
pub mod canvas;
pub mod render;
pub mod catalog;
pub mod validation;
pub mod manifest;
pub mod hashing;
pub mod logging;
pub mod pipeline;

pub use style::{Color, IconStyle};
pub use render::{render_icon, IconGeometry};
pub use catalog::{Idiom, IconSetConfig, SizeSpec, SizeTable};
pub use validation::{ValidationResult, ValidationRule, ValidationViolation, ViolationSeverity};
pub use manifest::{Contents, ImageEntry, ManifestInfo, MANIFEST_FILENAME};
pub use hashing::sha256_hex;
pub use pipeline::{ExportPipeline, ExportReport, ExportedFile, PipelineError};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const MIN_ENGINE_VERSION: &str = "1.0.0";
