//! Size Catalog - What Gets Exported
//!
//! The ordered table of (logical size, scale) pairs an asset catalog needs,
//! the idiom each one belongs to, and the JSON config that can replace the
//! built-in iOS table.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::style::IconStyle;

/// Logical sizes that belong to the phone family.
const PHONE_SIZES: [f64; 4] = [20.0, 29.0, 40.0, 60.0];
/// Logical size of the store listing icon.
const MARKETING_SIZE: f64 = 1024.0;
/// Largest side length the renderer accepts (8x the store icon).
pub const MAX_PIXEL_SIZE: u32 = 8192;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Idiom {
    Iphone,
    Ipad,
    IosMarketing,
}

impl Idiom {
    /// The store-listing size wins over every other rule.
    pub fn classify(size: f64) -> Self {
        if size == MARKETING_SIZE {
            Idiom::IosMarketing
        } else if PHONE_SIZES.contains(&size) {
            Idiom::Iphone
        } else {
            Idiom::Ipad
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Idiom::Iphone => "iphone",
            Idiom::Ipad => "ipad",
            Idiom::IosMarketing => "ios-marketing",
        }
    }
}

/// One required output image: `size` points at `scale`x.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeSpec {
    pub size: f64,
    pub scale: u32,
}

impl SizeSpec {
    pub const fn new(size: f64, scale: u32) -> Self {
        Self { size, scale }
    }

    /// Side length in pixels, `round(size * scale)`.
    pub fn pixel_size(&self) -> u32 {
        let px = (self.size * self.scale as f64).round();
        if px.is_finite() && px > 0.0 {
            px.min(u32::MAX as f64) as u32
        } else {
            0
        }
    }

    pub fn idiom(&self) -> Idiom {
        Idiom::classify(self.size)
    }

    pub fn filename(&self) -> String {
        let px = self.pixel_size();
        format!("icon_{}x{}.png", px, px)
    }

    /// `"83.5x83.5"`; whole sizes print without a fraction (`"20x20"`).
    pub fn size_label(&self) -> String {
        format!("{}x{}", self.size, self.size)
    }

    pub fn scale_label(&self) -> String {
        format!("{}x", self.scale)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SizeTable {
    specs: Vec<SizeSpec>,
}

impl SizeTable {
    pub fn new(specs: Vec<SizeSpec>) -> Self {
        Self { specs }
    }

    /// iPhone, iPad and App Store sizes for an `AppIcon.appiconset`.
    pub fn ios() -> Self {
        Self::new(vec![
            SizeSpec::new(20.0, 1),
            SizeSpec::new(20.0, 2),
            SizeSpec::new(20.0, 3),
            SizeSpec::new(29.0, 1),
            SizeSpec::new(29.0, 2),
            SizeSpec::new(29.0, 3),
            SizeSpec::new(40.0, 1),
            SizeSpec::new(40.0, 2),
            SizeSpec::new(40.0, 3),
            SizeSpec::new(60.0, 2),
            SizeSpec::new(60.0, 3),
            SizeSpec::new(76.0, 1),
            SizeSpec::new(76.0, 2),
            SizeSpec::new(83.5, 2),
            SizeSpec::new(1024.0, 1),
        ])
    }

    pub fn specs(&self) -> &[SizeSpec] {
        &self.specs
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Largest pixel size in the table; the master is rendered at this size.
    pub fn max_pixel_size(&self) -> Option<u32> {
        self.specs.iter().map(SizeSpec::pixel_size).max()
    }

    /// Table indices grouped by shared pixel size, only where more than one
    /// spec lands on the same file.
    pub fn collisions(&self) -> Vec<(u32, Vec<usize>)> {
        let mut by_pixels: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
        for (i, spec) in self.specs.iter().enumerate() {
            by_pixels.entry(spec.pixel_size()).or_default().push(i);
        }
        by_pixels.into_iter().filter(|(_, idx)| idx.len() > 1).collect()
    }
}

/// On-disk icon-set description, read with `--config`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconSetConfig {
    #[serde(default = "default_engine_min_version")]
    pub engine_min_version: String,
    #[serde(default = "SizeTable::ios")]
    pub sizes: SizeTable,
    #[serde(default)]
    pub style: IconStyle,
    #[serde(default = "default_author")]
    pub author: String,
    #[serde(default = "default_version")]
    pub version: u32,
}

fn default_engine_min_version() -> String { crate::MIN_ENGINE_VERSION.to_string() }
fn default_author() -> String { "xcode".to_string() }
fn default_version() -> u32 { 1 }

impl IconSetConfig {
    pub fn load(path: &Path) -> Result<Self, crate::PipelineError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl Default for IconSetConfig {
    fn default() -> Self {
        Self {
            engine_min_version: default_engine_min_version(),
            sizes: SizeTable::ios(),
            style: IconStyle::default(),
            author: default_author(),
            version: default_version(),
        }
    }
}
