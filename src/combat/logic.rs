//! Kill bookkeeping: bestiary, XP, score and charge payouts.

use super::types::{EnemyKind, KillReport};
use crate::core::constants::*;
use crate::player::types::{MissionTask, PlayerStats};
use crate::player::{add_nova_charge, add_ultimate_charge, gain_xp, update_mission_progress};

/// Record a kill on the player: bestiary, XP, nova and ultimate charge,
/// kill missions.
///
/// Score and shard payouts are returned for the caller to credit to the
/// session and ledger.
pub fn record_kill(player: &mut PlayerStats, enemy: EnemyKind) -> KillReport {
    let tier = enemy.tier();
    let is_boss = enemy.is_boss();

    let entry = player.bestiary.entry(enemy).or_default();
    let first_sighting = !entry.discovered;
    entry.discovered = true;
    entry.kills += 1;

    let nova_before = player.nova_charge;
    let nova = if is_boss {
        NOVA_CHARGE_BOSS
    } else {
        NOVA_CHARGE_TRASH
    };
    add_nova_charge(player, nova * player.nova_multiplier);

    let ultimate_before = player.ultimate_charge;
    add_ultimate_charge(
        player,
        if is_boss {
            ULTIMATE_CHARGE_BOSS
        } else {
            ULTIMATE_CHARGE_TRASH
        },
    );

    let xp = if is_boss { XP_BOSS } else { XP_TRASH };
    let levelups = gain_xp(player, xp);

    let mut missions_completed = update_mission_progress(player, MissionTask::Kill, 1);
    if is_boss {
        missions_completed.extend(update_mission_progress(player, MissionTask::KillBoss, 1));
    }

    KillReport {
        enemy,
        score: tier.score(),
        shards: tier.shards(),
        xp,
        levelups,
        nova_gained: player.nova_charge - nova_before,
        ultimate_gained: player.ultimate_charge - ultimate_before,
        first_sighting,
        missions_completed,
    }
}
