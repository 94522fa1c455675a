//! Player mutators: damage, XP, charge meters, ultimate, temperature, shop.

use super::types::{DroneKind, HeroClass, PlayerStats, UpgradeKind, WeaponKind};
use crate::core::constants::*;
use crate::economy::{Ledger, ResourceKind};

/// XP needed to go from `level` to `level + 1`.
pub fn xp_for_next_level(level: u32) -> u64 {
    (XP_CURVE_BASE * f64::powf(level as f64, XP_CURVE_EXPONENT)) as u64
}

/// Add XP and process level-ups. Returns the number of levels gained.
pub fn gain_xp(player: &mut PlayerStats, amount: u64) -> u32 {
    player.xp = player.xp.saturating_add(amount);
    let mut levelups = 0;
    loop {
        let needed = xp_for_next_level(player.level);
        if player.xp < needed {
            break;
        }
        player.xp -= needed;
        player.level += 1;
        levelups += 1;
    }
    levelups
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageOutcome {
    pub dealt: u32,
    /// Health reached zero with this hit.
    pub fatal: bool,
}

/// Subtract health, floored at zero.
///
/// `fatal` is set only by the hit that takes health from positive to zero.
pub fn damage_player(player: &mut PlayerStats, amount: u32) -> DamageOutcome {
    if player.health == 0 {
        return DamageOutcome {
            dealt: 0,
            fatal: false,
        };
    }
    let dealt = amount.min(player.health);
    player.health -= dealt;
    DamageOutcome {
        dealt,
        fatal: player.health == 0,
    }
}

pub fn heal_player(player: &mut PlayerStats, amount: u32) {
    player.health = player.health.saturating_add(amount).min(player.max_health);
}

/// Add nova charge, capped.
pub fn add_nova_charge(player: &mut PlayerStats, amount: f64) {
    let gained = amount.max(0.0).round() as u32;
    player.nova_charge = player.nova_charge.saturating_add(gained).min(CHARGE_CAP);
}

pub fn add_ultimate_charge(player: &mut PlayerStats, amount: u32) {
    player.ultimate_charge = player.ultimate_charge.saturating_add(amount).min(CHARGE_CAP);
}

/// Spend a full nova meter. Returns the blast damage.
pub fn trigger_nova(player: &mut PlayerStats) -> Option<u32> {
    if player.nova_charge < CHARGE_CAP {
        return None;
    }
    player.nova_charge = 0;
    Some((player.attack_damage as f64 * player.nova_multiplier * NOVA_BLAST_FACTOR).round() as u32)
}

/// Activate the class ultimate on a full meter.
///
/// Stats are multiplied on top of whatever bonuses are active now; the
/// previous values are kept for [`expire_ultimate`].
pub fn trigger_ultimate(player: &mut PlayerStats) -> bool {
    if player.ultimate_charge < CHARGE_CAP || player.ultimate_active() {
        return false;
    }
    player.ultimate_charge = 0;
    apply_ultimate_buff(player);
    true
}

/// Snapshot the current stats and multiply the class buff on top.
///
/// Also used by `apply_bonuses` to rebase a running ultimate onto freshly
/// recomputed stats.
pub(crate) fn apply_ultimate_buff(player: &mut PlayerStats) {
    let snapshot = player.snapshot();
    let buff = player.hero_class.ultimate_buff();

    player.max_health = (snapshot.max_health as f64 * buff.max_health).round() as u32;
    player.attack_damage = (snapshot.attack_damage as f64 * buff.damage).round() as u32;
    player.speed = snapshot.speed * buff.speed;
    player.ultimate_snapshot = Some(snapshot);
}

/// Restore pre-ultimate stats. No-op when no ultimate is running.
pub fn expire_ultimate(player: &mut PlayerStats) -> bool {
    let Some(snapshot) = player.ultimate_snapshot.take() else {
        return false;
    };
    player.max_health = snapshot.max_health;
    player.attack_damage = snapshot.attack_damage;
    player.speed = snapshot.speed;
    player.health = player.health.min(player.max_health);
    true
}

/// Pick the hero class for the next run. Refused while a run is underway.
pub fn select_class(player: &mut PlayerStats, class: HeroClass) -> bool {
    if player.class_locked {
        return false;
    }
    player.hero_class = class;
    true
}

/// Move temperature one tick. Returns freeze damage owed this tick.
pub fn tick_temperature(player: &mut PlayerStats, night: bool, blizzard: bool) -> u32 {
    if night {
        let drop = if blizzard {
            TEMPERATURE_BLIZZARD_DROP
        } else {
            TEMPERATURE_NIGHT_DROP
        };
        player.temperature = player.temperature.saturating_sub(drop);
    } else {
        player.temperature = (player.temperature + TEMPERATURE_DAY_RECOVERY).min(TEMPERATURE_MAX);
    }
    if player.temperature == 0 {
        FREEZE_DAMAGE
    } else {
        0
    }
}

/// Burn wood at the campfire.
pub fn warm_up(player: &mut PlayerStats, ledger: &mut Ledger) -> bool {
    if player.temperature >= TEMPERATURE_MAX {
        return false;
    }
    if !ledger.consume(ResourceKind::Wood, WARM_UP_WOOD_COST) {
        return false;
    }
    player.temperature = (player.temperature + WARM_UP_AMOUNT).min(TEMPERATURE_MAX);
    true
}

pub fn upgrade_cost(player: &PlayerStats, kind: UpgradeKind) -> u64 {
    UPGRADE_COST_PER_LEVEL * (player.upgrade_level(kind) as u64 + 1)
}

/// Buy one permanent upgrade level with light shards. Returns the new level.
///
/// The caller re-runs `apply_bonuses` afterwards.
pub fn purchase_upgrade(player: &mut PlayerStats, kind: UpgradeKind, ledger: &mut Ledger) -> Option<u32> {
    let cost = upgrade_cost(player, kind);
    if !ledger.consume(ResourceKind::LightShards, cost) {
        return None;
    }
    let level = player.upgrades.entry(kind).or_insert(0);
    *level += 1;
    Some(*level)
}

/// Wood and stone needed for the next weapon level, `None` when maxed.
pub fn weapon_upgrade_cost(player: &PlayerStats, weapon: WeaponKind) -> Option<(u64, u64)> {
    let level = player.weapon_level(weapon);
    if level >= MAX_WEAPON_LEVEL {
        return None;
    }
    let next = level as u64 + 1;
    Some((
        WEAPON_WOOD_COST_PER_LEVEL * next,
        WEAPON_STONE_COST_PER_LEVEL * next,
    ))
}

/// Buy or improve a weapon. Both materials are checked before either is spent.
pub fn upgrade_weapon(player: &mut PlayerStats, weapon: WeaponKind, ledger: &mut Ledger) -> Option<u8> {
    let (wood, stone) = weapon_upgrade_cost(player, weapon)?;
    if !ledger.has(ResourceKind::Wood, wood) || !ledger.has(ResourceKind::Stone, stone) {
        return None;
    }
    ledger.consume(ResourceKind::Wood, wood);
    ledger.consume(ResourceKind::Stone, stone);
    let level = player.weapons.entry(weapon).or_insert(0);
    *level += 1;
    Some(*level)
}

pub fn equip_weapon(player: &mut PlayerStats, weapon: WeaponKind) -> bool {
    if player.weapon_level(weapon) == 0 {
        return false;
    }
    player.equipped_weapon = weapon;
    true
}

/// Buy a drone with titan cores. The caller re-runs `apply_bonuses`.
pub fn buy_drone(player: &mut PlayerStats, drone: DroneKind, ledger: &mut Ledger) -> bool {
    if player.owned_drones.contains(&drone) {
        return false;
    }
    if !ledger.consume(ResourceKind::TitanCores, DRONE_TITAN_CORE_COST) {
        return false;
    }
    player.owned_drones.insert(drone);
    true
}

pub fn buy_skin(player: &mut PlayerStats, skin: &str, ledger: &mut Ledger) -> bool {
    if skin.is_empty() || player.owned_skins.contains(skin) {
        return false;
    }
    if !ledger.consume(ResourceKind::LightShards, SKIN_SHARD_COST) {
        return false;
    }
    player.owned_skins.insert(skin.to_string());
    true
}

pub fn equip_skin(player: &mut PlayerStats, skin: &str) -> bool {
    if !player.owned_skins.contains(skin) {
        return false;
    }
    player.skin = skin.to_string();
    true
}
