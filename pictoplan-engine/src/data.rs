//! Picto catalog data structures and loading
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;
use thiserror::Error;

const DEFAULT_PICTOS_DATA: &str = include_str!("../assets/pictos.json");

/// A single picto available to the build.
///
/// Field names mirror the community data set so user-pasted JSON exported
/// from the companion spreadsheet parses unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Picto {
    /// Unique name within a catalog.
    #[serde(rename = "Pictos Name")]
    pub name: String,
    /// Comma-space-separated attribute tags, e.g. "Health, Speed".
    #[serde(rename = "Affected Attributes")]
    pub attributes: String,
    /// Free-form effect description; may contain several matchable sub-effects.
    #[serde(rename = "Luminas Effect")]
    pub effect: String,
    /// Luminas cost to equip.
    #[serde(rename = "Cost")]
    pub cost: u32,
}

impl Picto {
    /// Iterate the attribute tags in source order, trimmed.
    pub fn attribute_tags(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
    }
}

/// Errors raised while loading a catalog. The active catalog is left
/// untouched whenever one of these is returned.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("JSON parsing error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate picto name: {0}")]
    DuplicateName(String),
}

/// An immutable set of pictos, unique by name.
///
/// Catalogs are replaced wholesale on load and never merged in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Catalog {
    pictos: Vec<Picto>,
}

impl Catalog {
    /// Parse a catalog from a JSON array of picto records.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into valid picto
    /// records or if two records share a name.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let pictos: Vec<Picto> = serde_json::from_str(json)?;
        let mut seen = HashSet::new();
        for picto in &pictos {
            if !seen.insert(picto.name.as_str()) {
                return Err(CatalogError::DuplicateName(picto.name.clone()));
            }
        }
        Ok(Self { pictos })
    }

    /// Create a catalog from pre-parsed pictos.
    #[must_use]
    pub fn from_pictos(pictos: Vec<Picto>) -> Self {
        Self { pictos }
    }

    /// Parse `raw` as catalog JSON, or return the built-in default set when
    /// `raw` is empty or whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if non-empty input fails to parse or validate.
    pub fn load(raw: &str) -> Result<Self, CatalogError> {
        if raw.trim().is_empty() {
            Ok(Self::default_catalog().clone())
        } else {
            Self::from_json(raw)
        }
    }

    #[must_use]
    pub fn load_from_static() -> Self {
        serde_json::from_str(DEFAULT_PICTOS_DATA)
            .map(|pictos| Self { pictos })
            .unwrap_or_default()
    }

    /// The built-in default catalog embedded in the crate.
    #[must_use]
    pub fn default_catalog() -> &'static Self {
        static CATALOG: OnceLock<Catalog> = OnceLock::new();
        CATALOG.get_or_init(Self::load_from_static)
    }

    #[must_use]
    pub fn pictos(&self) -> &[Picto] {
        &self.pictos
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pictos.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pictos.is_empty()
    }

    /// Find a picto by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Picto> {
        self.pictos.iter().find(|picto| picto.name == name)
    }

    /// The sorted, deduplicated universe of attribute tags across the
    /// catalog, for populating the filter UI.
    #[must_use]
    pub fn all_attributes(&self) -> Vec<String> {
        let mut attrs: Vec<String> = self
            .pictos
            .iter()
            .flat_map(Picto::attribute_tags)
            .map(str::to_string)
            .collect();
        attrs.sort();
        attrs.dedup();
        attrs
    }
}
