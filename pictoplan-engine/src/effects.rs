//! Effect text aggregation
//!
//! Each selected picto carries a free-form effect description. A fixed,
//! ordered table of text patterns turns those descriptions into numeric
//! totals per effect category plus an estimated-damage figure. The table
//! is data, not inline conditionals, so new categories are a one-line
//! addition.
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::data::Picto;

/// Literal phrase marking the chance-based damage modifier.
const ROULETTE_PHRASE: &str = "50% chance to deal either 50% or 200%";

/// Accumulator slot a pattern feeds into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    IncreasedDamage,
    ApGain,
    ShieldGain,
    /// Percentage heals; first match wins per picto and suppresses `HealFlat`.
    HealPercent,
    /// Flat heals; only counted when no percentage heal matched.
    HealFlat,
    BreakDamage,
    GradientCharge,
}

struct EffectPattern {
    regex: Regex,
    /// Literal that must not directly follow the match. The source data
    /// distinguishes "increased damage" from "increased Break damage" this
    /// way.
    not_followed_by: Option<&'static str>,
    slot: Slot,
}

impl EffectPattern {
    fn compile(pattern: &str, not_followed_by: Option<&'static str>, slot: Slot) -> Option<Self> {
        Regex::new(pattern).ok().map(|regex| Self {
            regex,
            not_followed_by,
            slot,
        })
    }

    /// First captured number whose match site passes the guard, base-10.
    /// Malformed captures are treated as absent.
    fn first_value(&self, text: &str) -> Option<u32> {
        for caps in self.regex.captures_iter(text) {
            let whole = caps.get(0)?;
            if let Some(literal) = self.not_followed_by {
                if text[whole.end()..].starts_with(literal) {
                    continue;
                }
            }
            return caps.get(1).and_then(|m| m.as_str().parse().ok());
        }
        None
    }
}

fn pattern_table() -> &'static [EffectPattern] {
    static TABLE: OnceLock<Vec<EffectPattern>> = OnceLock::new();
    TABLE.get_or_init(|| {
        [
            (r"(\d+)% increased damage", Some(" Break"), Slot::IncreasedDamage),
            (r"(?:\+|\bGain |\bGive )(\d+) AP", None, Slot::ApGain),
            (r"\+(\d+) Shield", None, Slot::ShieldGain),
            (r"Recover (\d+)% Health", None, Slot::HealPercent),
            (r"Heal (\d+)% HP", None, Slot::HealPercent),
            (r"Recover (\d+) Health", None, Slot::HealFlat),
            (r"(\d+)% increased Break damage", None, Slot::BreakDamage),
            (r"(\d+)% of a Gradient Charge", None, Slot::GradientCharge),
        ]
        .into_iter()
        .filter_map(|(pattern, guard, slot)| EffectPattern::compile(pattern, guard, slot))
        .collect()
    })
}

/// Aggregated effect totals over a selection, plus the derived damage
/// estimate. Purely a function of the selection and the reference weapon
/// damage; recomputed on every read.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EffectSummary {
    pub increased_damage: u32,
    pub total_ap_gain: u32,
    pub total_shield_gain: u32,
    /// Percentage-based heals.
    pub total_heal: u32,
    /// Flat health recovery.
    pub total_health_gain: u32,
    pub total_break_damage_increase: u32,
    pub total_gradient_charge: u32,
    pub has_roulette: bool,
    pub estimated_damage: f64,
    /// Roulette floor; zero unless `has_roulette`.
    pub min_damage: f64,
    /// Roulette ceiling; zero unless `has_roulette`.
    pub max_damage: f64,
}

impl EffectSummary {
    fn accumulate(&mut self, picto: &Picto) {
        let mut percent_heal_matched = false;
        for pattern in pattern_table() {
            match pattern.slot {
                Slot::HealPercent if percent_heal_matched => continue,
                Slot::HealFlat if percent_heal_matched => continue,
                _ => {}
            }
            let Some(value) = pattern.first_value(&picto.effect) else {
                continue;
            };
            match pattern.slot {
                Slot::IncreasedDamage => self.increased_damage += value,
                Slot::ApGain => self.total_ap_gain += value,
                Slot::ShieldGain => self.total_shield_gain += value,
                Slot::HealPercent => {
                    self.total_heal += value;
                    percent_heal_matched = true;
                }
                Slot::HealFlat => self.total_health_gain += value,
                Slot::BreakDamage => self.total_break_damage_increase += value,
                Slot::GradientCharge => self.total_gradient_charge += value,
            }
        }
        if picto.effect.contains(ROULETTE_PHRASE) {
            self.has_roulette = true;
        }
    }

    fn finalize(&mut self, weapon_damage: u32) {
        self.estimated_damage =
            f64::from(weapon_damage) * (1.0 + f64::from(self.increased_damage) / 100.0);
        if self.has_roulette {
            self.min_damage = self.estimated_damage * 0.5;
            self.max_damage = self.estimated_damage * 2.0;
        }
    }
}

/// Summarize the combat effects of `selection` against a reference weapon
/// damage. Patterns are non-exclusive within and across pictos except for
/// the documented heal rule; a picto matching nothing contributes zero to
/// every accumulator.
#[must_use]
pub fn summarize(selection: &[Picto], weapon_damage: u32) -> EffectSummary {
    let mut summary = EffectSummary::default();
    for picto in selection {
        summary.accumulate(picto);
    }
    summary.finalize(weapon_damage);
    summary
}
