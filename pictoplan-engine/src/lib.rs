//! Pictoplan Engine
//!
//! Platform-agnostic core logic for the picto build planner. This crate
//! holds the catalog, selection, view, and effect-aggregation rules
//! without any UI or platform-specific dependencies; a presentation layer
//! supplies the item catalog and renders the derived view data.

pub mod data;
pub mod effects;
pub mod planner;
pub mod store;
pub mod view;

// Re-export commonly used types
pub use data::{Catalog, CatalogError, Picto};
pub use effects::{EffectSummary, summarize};
pub use planner::{BuildPlanner, PlannerSnapshot};
pub use store::{
    ATTRIBUTE_FILTER_KEY, BuildState, DEFAULT_MAX_LUMINAS, DEFAULT_WEAPON_DAMAGE, MemoryStore,
    SELECTED_PICTOS_KEY, SORT_MODE_KEY, StatePort, ToggleOutcome, WEAPON_DAMAGE_MAX,
    WEAPON_DAMAGE_MIN,
};
pub use view::{SortMode, ViewEntry, compose_view};
