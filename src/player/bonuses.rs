//! Effective combat stats from base constants, constellation and upgrades.

use super::logic::apply_ultimate_buff;
use super::types::{PlayerStats, UpgradeKind};
use crate::constellation::Constellation;
use crate::core::constants::*;

/// Recompute max health, damage, speed, nova multiplier, drones and
/// abilities, in fixed order: base, constellation, permanent upgrades.
///
/// Idempotent. A running ultimate is re-applied on top of the fresh
/// values, which become its new revert point. Current health is clamped to
/// the new max.
pub fn apply_bonuses(player: &mut PlayerStats, constellation: &Constellation) {
    let totals = constellation.effect_totals();

    let strength = player.upgrade_level(UpgradeKind::Strength);
    let agility = player.upgrade_level(UpgradeKind::Agility);
    let vitality = player.upgrade_level(UpgradeKind::Vitality);

    player.max_health = BASE_MAX_HEALTH
        + totals.max_health.round() as u32
        + vitality * VITALITY_HEALTH_PER_LEVEL;
    player.attack_damage =
        BASE_ATTACK_DAMAGE + totals.damage.round() as u32 + strength * STRENGTH_DAMAGE_PER_LEVEL;
    player.speed = BASE_SPEED + totals.speed + agility as f64 * AGILITY_SPEED_PER_LEVEL;
    player.nova_multiplier = BASE_NOVA_MULTIPLIER + totals.nova;

    player.active_drones = player.owned_drones.union(&totals.drones).copied().collect();
    player.abilities = totals.abilities;

    if player.ultimate_active() {
        apply_ultimate_buff(player);
    }
    player.health = player.health.min(player.max_health);
}
