//! Pure view composition over a catalog and selection
use serde::{Deserialize, Serialize};

use crate::data::{Catalog, Picto};

/// Ordering applied to the composed picto list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Lexicographic ascending by picto name.
    #[default]
    Name,
    /// Selected pictos first, name as tiebreak.
    Selected,
    /// Ascending by cost, stable for ties.
    Cost,
}

impl SortMode {
    /// Stable string form used for persistence.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Selected => "selected",
            Self::Cost => "cost",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "name" => Some(Self::Name),
            "selected" => Some(Self::Selected),
            "cost" => Some(Self::Cost),
            _ => None,
        }
    }
}

/// One row of the composed view, annotated for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewEntry {
    pub picto: Picto,
    pub is_selected: bool,
    /// Unselected and too expensive for the remaining luminas.
    pub is_disabled: bool,
}

fn passes_filter(picto: &Picto, lowered_terms: &[String]) -> bool {
    if lowered_terms.is_empty() {
        return true;
    }
    picto.attribute_tags().any(|tag| {
        let tag = tag.to_lowercase();
        lowered_terms.iter().any(|term| tag.contains(term.as_str()))
    })
}

/// Compose the display list: filter the catalog by attribute, re-append
/// selected pictos the filter (or a catalog reload) would otherwise hide,
/// then sort. Deterministic given its inputs; no hidden state.
///
/// The orphan re-append is intentional. A selected picto must stay visible
/// even when the filter no longer matches it or the catalog was replaced
/// underneath it.
#[must_use]
pub fn compose_view(
    catalog: &Catalog,
    selection: &[Picto],
    attribute_filter: &[String],
    sort_mode: SortMode,
    max_luminas: u32,
) -> Vec<ViewEntry> {
    let lowered_terms: Vec<String> = attribute_filter
        .iter()
        .map(|term| term.to_lowercase())
        .filter(|term| !term.is_empty())
        .collect();

    let mut working: Vec<&Picto> = catalog
        .pictos()
        .iter()
        .filter(|picto| passes_filter(picto, &lowered_terms))
        .collect();

    let orphaned: Vec<&Picto> = selection
        .iter()
        .filter(|chosen| !working.iter().any(|picto| picto.name == chosen.name))
        .collect();
    working.extend(orphaned);

    let is_selected = |picto: &Picto| selection.iter().any(|chosen| chosen.name == picto.name);

    match sort_mode {
        SortMode::Name => working.sort_by(|a, b| a.name.cmp(&b.name)),
        SortMode::Selected => working.sort_by(|a, b| {
            is_selected(*b)
                .cmp(&is_selected(*a))
                .then_with(|| a.name.cmp(&b.name))
        }),
        SortMode::Cost => working.sort_by_key(|picto| picto.cost),
    }

    let spent: u32 = selection.iter().map(|picto| picto.cost).sum();
    let remaining = max_luminas.saturating_sub(spent);

    working
        .into_iter()
        .map(|picto| {
            let selected = is_selected(picto);
            ViewEntry {
                picto: picto.clone(),
                is_selected: selected,
                is_disabled: !selected && picto.cost > remaining,
            }
        })
        .collect()
}
