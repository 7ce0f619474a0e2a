//! Named color catalog.
//! Loaded once at startup from a JSON array, read-only afterwards.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::{fs, path::Path};
use thiserror::Error;
use tracing::{info, warn};

/// 8-bit RGB channels. Alpha is never stored; swatches are always opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// One catalog entry, in the same JSON shape as the source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRecord {
    pub name: String,
    #[serde(rename = "hex")]
    pub hex_code: String,
    #[serde(rename = "RGB", alias = "rgb")]
    pub rgb: Rgb,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("read color catalog {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parse color catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("color catalog is empty")]
    Empty,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    colors: Vec<ColorRecord>,
}

impl Catalog {
    /// Wraps records as-is. Unlike the loaders this accepts an empty list.
    pub fn new(colors: Vec<ColorRecord>) -> Self {
        Self { colors }
    }

    /// Reads and parses the catalog file. An empty document is rejected so
    /// that `pick_random` cannot fail in a running server.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json_str(&data)?;
        info!(path = %path.display(), count = catalog.len(), "all colors loaded");
        Ok(catalog)
    }

    pub fn from_json_str(data: &str) -> Result<Self, CatalogError> {
        let colors: Vec<ColorRecord> = serde_json::from_str(data)?;
        if colors.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::with_capacity(colors.len());
        for c in &colors {
            if !seen.insert(c.name.as_str()) {
                warn!(name = %c.name, "duplicate color name; first entry wins on lookup");
            }
        }
        Ok(Self { colors })
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColorRecord> {
        self.colors.iter()
    }

    /// First record whose name matches exactly (case-sensitive).
    pub fn find_by_name(&self, name: &str) -> Option<&ColorRecord> {
        self.colors.iter().find(|c| c.name == name)
    }

    pub fn pick_random(&self) -> Result<&ColorRecord, CatalogError> {
        self.pick_random_with(&mut rand::thread_rng())
    }

    pub fn pick_random_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&ColorRecord, CatalogError> {
        self.colors.choose(rng).ok_or(CatalogError::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn record(name: &str, hex: &str, r: u8, g: u8, b: u8) -> ColorRecord {
        ColorRecord {
            name: name.into(),
            hex_code: hex.into(),
            rgb: Rgb::new(r, g, b),
        }
    }

    fn sample() -> Catalog {
        Catalog::new(vec![
            record("red", "#FF0000", 255, 0, 0),
            record("green", "#00FF00", 0, 255, 0),
            record("blue", "#0000FF", 0, 0, 255),
        ])
    }

    #[test]
    fn find_exact_match() {
        let cat = sample();
        for name in ["red", "green", "blue"] {
            assert_eq!(cat.find_by_name(name).map(|c| c.name.as_str()), Some(name));
        }
    }

    #[test]
    fn find_is_case_sensitive() {
        let cat = sample();
        assert!(cat.find_by_name("Red").is_none());
        assert!(cat.find_by_name("").is_none());
    }

    #[test]
    fn duplicate_names_first_wins() {
        let cat = Catalog::new(vec![
            record("teal", "#008080", 0, 128, 128),
            record("teal", "#00FFFF", 0, 255, 255),
        ]);
        assert_eq!(cat.find_by_name("teal").unwrap().hex_code, "#008080");
    }

    #[test]
    fn empty_name_record_is_findable() {
        // An explicit Option means a blank name is a real entry, not "missing".
        let cat = Catalog::new(vec![record("", "#000000", 0, 0, 0)]);
        assert!(cat.find_by_name("").is_some());
    }

    #[test]
    fn random_pick_is_member() {
        let cat = sample();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let picked = cat.pick_random_with(&mut rng).unwrap();
            assert!(cat.iter().any(|c| c == picked));
        }
    }

    #[test]
    fn random_pick_on_empty_is_error() {
        let cat = Catalog::default();
        assert!(matches!(cat.pick_random(), Err(CatalogError::Empty)));
    }

    #[test]
    fn parse_source_shape() {
        let json = r##"[{"name":"red","hex":"#FF0000","RGB":{"r":255,"g":0,"b":0}}]"##;
        let cat = Catalog::from_json_str(json).unwrap();
        assert_eq!(cat.len(), 1);
        assert_eq!(cat.find_by_name("red").unwrap().rgb, Rgb::new(255, 0, 0));
    }

    #[test]
    fn parse_lowercase_rgb_alias() {
        let json = r##"[{"name":"navy","hex":"#000080","rgb":{"r":0,"g":0,"b":128}}]"##;
        let cat = Catalog::from_json_str(json).unwrap();
        assert_eq!(cat.find_by_name("navy").unwrap().rgb.b, 128);
    }

    #[test]
    fn parse_rejects_out_of_range_channel() {
        let json = r##"[{"name":"bad","hex":"#000000","RGB":{"r":256,"g":0,"b":0}}]"##;
        assert!(matches!(Catalog::from_json_str(json), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn parse_rejects_empty_document() {
        assert!(matches!(Catalog::from_json_str("[]"), Err(CatalogError::Empty)));
    }

    #[test]
    fn serialize_matches_source_shape() {
        let v = serde_json::to_value(record("red", "#FF0000", 255, 0, 0)).unwrap();
        assert_eq!(
            v,
            serde_json::json!({"name":"red","hex":"#FF0000","RGB":{"r":255,"g":0,"b":0}})
        );
    }
}
