//! Mission progress and reward claiming.

use super::types::{MissionReward, MissionTask, PlayerStats};
use crate::economy::Ledger;

/// Advance every open mission of `task` by `amount`, clamped to its goal.
///
/// Returns the indices of missions completed by this call, so each
/// completion is announced exactly once.
pub fn update_mission_progress(player: &mut PlayerStats, task: MissionTask, amount: u64) -> Vec<usize> {
    let mut completed = Vec::new();
    for (index, mission) in player.missions.iter_mut().enumerate() {
        if mission.task != task || mission.completed {
            continue;
        }
        mission.progress = mission.progress.saturating_add(amount).min(mission.goal);
        if mission.progress >= mission.goal {
            mission.completed = true;
            completed.push(index);
        }
    }
    completed
}

/// Credit the reward of a completed, unclaimed mission.
///
/// A second claim of the same mission is a no-op returning `None`.
pub fn claim_mission(player: &mut PlayerStats, index: usize, ledger: &mut Ledger) -> Option<MissionReward> {
    let mission = player.missions.get_mut(index)?;
    if !mission.completed || mission.claimed {
        return None;
    }
    mission.claimed = true;
    ledger.add(mission.reward.kind, mission.reward.amount);
    Some(mission.reward)
}
