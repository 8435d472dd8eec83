//! Asset Catalog Manifest (`Contents.json`)

use serde::{Deserialize, Serialize};

use crate::catalog::{SizeSpec, SizeTable};

pub const MANIFEST_FILENAME: &str = "Contents.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEntry {
    pub filename: String,
    pub idiom: String,
    pub scale: String,
    pub size: String,
}

impl From<&SizeSpec> for ImageEntry {
    fn from(spec: &SizeSpec) -> Self {
        Self {
            filename: spec.filename(),
            idiom: spec.idiom().as_str().to_string(),
            scale: spec.scale_label(),
            size: spec.size_label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestInfo {
    pub author: String,
    pub version: u32,
}

impl Default for ManifestInfo {
    fn default() -> Self {
        Self {
            author: "xcode".to_string(),
            version: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contents {
    pub images: Vec<ImageEntry>,
    pub info: ManifestInfo,
}

impl Contents {
    /// One entry per spec, in table order.
    pub fn for_table(table: &SizeTable, info: ManifestInfo) -> Self {
        Self {
            images: table.specs().iter().map(ImageEntry::from).collect(),
            info,
        }
    }

    /// Two-space indented JSON.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_from_spec() {
        let entry = ImageEntry::from(&SizeSpec::new(20.0, 2));
        assert_eq!(
            entry,
            ImageEntry {
                filename: "icon_40x40.png".to_string(),
                idiom: "iphone".to_string(),
                scale: "2x".to_string(),
                size: "20x20".to_string(),
            }
        );
    }

    #[test]
    fn test_manifest_layout() {
        let table = SizeTable::new(vec![SizeSpec::new(1024.0, 1)]);
        let contents = Contents::for_table(&table, ManifestInfo::default());
        let json = contents.to_pretty_json().unwrap();
        let expected = r#"{
  "images": [
    {
      "filename": "icon_1024x1024.png",
      "idiom": "ios-marketing",
      "scale": "1x",
      "size": "1024x1024"
    }
  ],
  "info": {
    "author": "xcode",
    "version": 1
  }
}"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_for_table_keeps_order() {
        let contents = Contents::for_table(&SizeTable::ios(), ManifestInfo::default());
        assert_eq!(contents.images.len(), 15);
        assert_eq!(contents.images[0].filename, "icon_20x20.png");
        assert_eq!(contents.images[13].size, "83.5x83.5");
        assert_eq!(contents.images[13].idiom, "ipad");
        assert_eq!(contents.images[14].idiom, "ios-marketing");
    }
}
