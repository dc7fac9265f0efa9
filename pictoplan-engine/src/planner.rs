//! Consolidated planner facade tying catalog, selection, and derived views
//! together behind a single read/write surface for the presentation layer.
use serde::{Deserialize, Serialize};

use crate::data::{Catalog, CatalogError, Picto};
use crate::effects::{EffectSummary, summarize};
use crate::store::{BuildState, StatePort, ToggleOutcome};
use crate::view::{SortMode, ViewEntry, compose_view};

/// Everything the presentation layer needs for one render, in one read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerSnapshot {
    /// Filtered, sorted catalog with the selection pinned in.
    pub items: Vec<ViewEntry>,
    /// The selection in insertion order.
    pub selected: Vec<Picto>,
    /// Effect texts of the selection, in insertion order.
    pub selected_effects: Vec<String>,
    /// Attribute tag universe of the current catalog, sorted.
    pub attributes: Vec<String>,
    pub summary: EffectSummary,
    pub total_cost: u32,
    pub max_luminas: u32,
    pub weapon_damage: u32,
    pub attribute_filter: Vec<String>,
    pub sort_mode: SortMode,
}

/// The in-process build planning engine.
///
/// Owns the active catalog and the persistent build state; every method
/// runs to completion on the calling thread. Derived data (view, effect
/// summary) is recomputed from current state on each [`Self::snapshot`]
/// call rather than cached, so it can never drift.
#[derive(Debug)]
pub struct BuildPlanner<P: StatePort> {
    catalog: Catalog,
    state: BuildState<P>,
}

impl<P: StatePort> BuildPlanner<P> {
    /// Create a planner over the built-in default catalog, restoring any
    /// previously persisted selection, filter, and sort mode from `port`.
    pub fn new(port: P) -> Self {
        Self {
            catalog: Catalog::default_catalog().clone(),
            state: BuildState::restore(port),
        }
    }

    /// Replace the active catalog from raw JSON (or the default set when
    /// `raw` is empty) and return how many pictos were loaded.
    ///
    /// The current selection is kept as-is; pictos missing from the new
    /// catalog stay visible through the view's orphan handling.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on malformed input. The active catalog is
    /// left untouched in that case.
    pub fn load_catalog(&mut self, raw: &str) -> Result<usize, CatalogError> {
        match Catalog::load(raw) {
            Ok(catalog) => {
                let count = catalog.len();
                self.catalog = catalog;
                log::info!("loaded catalog with {count} pictos");
                Ok(count)
            }
            Err(err) => {
                log::warn!("catalog load rejected: {err}");
                Err(err)
            }
        }
    }

    /// Toggle a picto in or out of the selection. See [`BuildState::toggle`].
    pub fn toggle(&mut self, picto: &Picto) -> ToggleOutcome {
        self.state.toggle(picto)
    }

    /// Toggle by catalog name; `None` when the name is not in the catalog.
    pub fn toggle_by_name(&mut self, name: &str) -> Option<ToggleOutcome> {
        let picto = self.catalog.find(name)?.clone();
        Some(self.state.toggle(&picto))
    }

    pub fn clear_selection(&mut self) {
        self.state.clear();
    }

    pub fn set_max_luminas(&mut self, max_luminas: u32) {
        self.state.set_max_luminas(max_luminas);
    }

    pub fn set_weapon_damage(&mut self, weapon_damage: u32) {
        self.state.set_weapon_damage(weapon_damage);
    }

    pub fn set_attribute_filter(&mut self, terms: Vec<String>) {
        self.state.set_attribute_filter(terms);
    }

    pub fn set_sort_mode(&mut self, sort_mode: SortMode) {
        self.state.set_sort_mode(sort_mode);
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn selected(&self) -> &[Picto] {
        self.state.selected()
    }

    #[must_use]
    pub fn total_cost(&self) -> u32 {
        self.state.total_cost()
    }

    /// Current effect totals and damage estimate for the selection.
    #[must_use]
    pub fn summary(&self) -> EffectSummary {
        summarize(self.state.selected(), self.state.weapon_damage())
    }

    /// The consolidated read consumed by the presentation layer.
    #[must_use]
    pub fn snapshot(&self) -> PlannerSnapshot {
        let selected = self.state.selected().to_vec();
        PlannerSnapshot {
            items: compose_view(
                &self.catalog,
                &selected,
                self.state.attribute_filter(),
                self.state.sort_mode(),
                self.state.max_luminas(),
            ),
            selected_effects: selected.iter().map(|p| p.effect.clone()).collect(),
            attributes: self.catalog.all_attributes(),
            summary: self.summary(),
            total_cost: self.state.total_cost(),
            max_luminas: self.state.max_luminas(),
            weapon_damage: self.state.weapon_damage(),
            attribute_filter: self.state.attribute_filter().to_vec(),
            sort_mode: self.state.sort_mode(),
            selected,
        }
    }
}
