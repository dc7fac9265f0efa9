//! Build selection state, budget enforcement, and persistence
use std::collections::HashMap;

use crate::data::Picto;
use crate::view::SortMode;

/// Storage key for the serialized selection snapshot.
pub const SELECTED_PICTOS_KEY: &str = "selectedPictos";
/// Storage key for the attribute filter string.
pub const ATTRIBUTE_FILTER_KEY: &str = "selectedAttribute";
/// Storage key for the sort mode string.
pub const SORT_MODE_KEY: &str = "sortOption";

pub const DEFAULT_MAX_LUMINAS: u32 = 250;
pub const DEFAULT_WEAPON_DAMAGE: u32 = 7000;
pub const WEAPON_DAMAGE_MIN: u32 = 1;
pub const WEAPON_DAMAGE_MAX: u32 = 15_000;

/// Key-value persistence port.
///
/// The engine writes through this on every mutating change and reads it
/// back at startup. Writes are best-effort: implementations swallow their
/// own failures, and a failed write is never surfaced as a user-facing
/// error. Platform layers back this with browser local storage or a file;
/// tests inject [`MemoryStore`].
pub trait StatePort {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory port for tests and headless use.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a stored value, e.g. to simulate a previous session.
    pub fn seed(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

impl StatePort for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// Result of a toggle request. `BudgetExceeded` is a non-fatal signal for
/// the caller to surface, not an error: the selection is simply unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    BudgetExceeded,
}

/// The mutable planning state: the ordered selection plus configuration.
///
/// The budget invariant (selection cost never exceeds `max_luminas`) is
/// enforced at the point of addition only. Shrinking the budget afterwards
/// leaves an over-budget selection in place so the user can see and prune
/// it themselves.
#[derive(Debug)]
pub struct BuildState<P: StatePort> {
    selected: Vec<Picto>,
    attribute_filter: Vec<String>,
    sort_mode: SortMode,
    max_luminas: u32,
    weapon_damage: u32,
    port: P,
}

impl<P: StatePort> BuildState<P> {
    /// Restore state from the port, falling back to documented defaults for
    /// anything missing or unreadable. A corrupt stored selection is
    /// discarded and logged, never fatal.
    pub fn restore(port: P) -> Self {
        let selected = match port.get(SELECTED_PICTOS_KEY) {
            Some(raw) => match serde_json::from_str::<Vec<Picto>>(&raw) {
                Ok(selected) => selected,
                Err(err) => {
                    log::warn!("discarding corrupt stored selection: {err}");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        let attribute_filter = port
            .get(ATTRIBUTE_FILTER_KEY)
            .map(|raw| parse_filter(&raw))
            .unwrap_or_default();
        let sort_mode = match port.get(SORT_MODE_KEY) {
            Some(raw) => SortMode::from_key(&raw).unwrap_or_else(|| {
                log::warn!("unknown stored sort mode {raw:?}, using default");
                SortMode::default()
            }),
            None => SortMode::default(),
        };
        Self {
            selected,
            attribute_filter,
            sort_mode,
            max_luminas: DEFAULT_MAX_LUMINAS,
            weapon_damage: DEFAULT_WEAPON_DAMAGE,
            port,
        }
    }

    /// Add `picto` to the selection, or remove it if already selected.
    ///
    /// Removal is unconditional. Addition is rejected with
    /// [`ToggleOutcome::BudgetExceeded`] when it would push the total cost
    /// past the luminas budget, leaving the selection unchanged.
    pub fn toggle(&mut self, picto: &Picto) -> ToggleOutcome {
        let outcome = if self.is_selected(&picto.name) {
            self.selected.retain(|chosen| chosen.name != picto.name);
            ToggleOutcome::Removed
        } else if self.total_cost().saturating_add(picto.cost) <= self.max_luminas {
            self.selected.push(picto.clone());
            ToggleOutcome::Added
        } else {
            return ToggleOutcome::BudgetExceeded;
        };
        self.persist_selection();
        outcome
    }

    /// Empty the selection unconditionally.
    pub fn clear(&mut self) {
        self.selected.clear();
        self.persist_selection();
    }

    pub fn set_max_luminas(&mut self, max_luminas: u32) {
        // Does not evict an already over-budget selection.
        self.max_luminas = max_luminas;
    }

    pub fn set_weapon_damage(&mut self, weapon_damage: u32) {
        self.weapon_damage = weapon_damage.clamp(WEAPON_DAMAGE_MIN, WEAPON_DAMAGE_MAX);
    }

    pub fn set_attribute_filter(&mut self, terms: Vec<String>) {
        self.attribute_filter = terms;
        let joined = self.attribute_filter.join(", ");
        self.port.set(ATTRIBUTE_FILTER_KEY, &joined);
    }

    pub fn set_sort_mode(&mut self, sort_mode: SortMode) {
        self.sort_mode = sort_mode;
        self.port.set(SORT_MODE_KEY, sort_mode.key());
    }

    fn persist_selection(&mut self) {
        match serde_json::to_string(&self.selected) {
            Ok(json) => self.port.set(SELECTED_PICTOS_KEY, &json),
            Err(err) => log::warn!("failed to serialize selection: {err}"),
        }
    }

    #[must_use]
    pub fn selected(&self) -> &[Picto] {
        &self.selected
    }

    #[must_use]
    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.iter().any(|chosen| chosen.name == name)
    }

    /// Sum of luminas costs across the selection.
    #[must_use]
    pub fn total_cost(&self) -> u32 {
        self.selected.iter().map(|picto| picto.cost).sum()
    }

    #[must_use]
    pub fn max_luminas(&self) -> u32 {
        self.max_luminas
    }

    #[must_use]
    pub fn weapon_damage(&self) -> u32 {
        self.weapon_damage
    }

    #[must_use]
    pub fn attribute_filter(&self) -> &[String] {
        &self.attribute_filter
    }

    #[must_use]
    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }
}

fn parse_filter(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string)
        .collect()
}
