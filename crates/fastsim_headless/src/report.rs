//! Outcome reports serialized to JSON.

use serde::{Deserialize, Serialize};

use fastsim_core::prelude::*;
use fastsim_core::simulator::FrameState;

/// A surviving unit, as reported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurvivorReport {
    /// Unit id.
    pub id: u32,
    /// Unit kind.
    pub kind: UnitKind,
    /// Remaining life in whole hit points.
    pub health: i32,
    /// Remaining shields in whole hit points.
    pub shields: i32,
}

/// One side's outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SideReport {
    /// Units still standing.
    pub survivors: usize,
    /// Sum of remaining life across survivors, in whole hit points.
    pub total_health: i32,
    /// Sum of remaining shields across survivors, in whole hit points.
    pub total_shields: i32,
    /// Per-unit detail.
    pub units: Vec<SurvivorReport>,
}

impl SideReport {
    fn from_roster(roster: &[CombatUnit<()>]) -> Self {
        SideReport {
            survivors: roster.len(),
            total_health: roster.iter().map(CombatUnit::health_hp).sum(),
            total_shields: roster.iter().map(CombatUnit::shields_hp).sum(),
            units: roster
                .iter()
                .map(|unit| SurvivorReport {
                    id: unit.id,
                    kind: unit.kind,
                    health: unit.health_hp(),
                    shields: unit.shields_hp(),
                })
                .collect(),
        }
    }
}

/// Full engagement outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementReport {
    /// Scenario name.
    pub scenario: String,
    /// Frames actually simulated.
    pub frames_simulated: i32,
    /// Whether the fight resolved or went quiet.
    pub resolved: bool,
    /// Deterministic digest of the final state.
    pub state_hash: u64,
    /// Attacker outcome.
    pub attackers: SideReport,
    /// Defender outcome.
    pub defenders: SideReport,
}

impl EngagementReport {
    /// Summarizes a finished simulation.
    #[must_use]
    pub fn from_simulator(scenario: &str, sim: &Simulator, frames_simulated: i32) -> Self {
        let (attackers, defenders) = sim.rosters();
        EngagementReport {
            scenario: scenario.to_string(),
            frames_simulated,
            resolved: attackers.is_empty()
                || defenders.is_empty()
                || sim.frame_state() == FrameState::Idle,
            state_hash: sim.state_hash(),
            attackers: SideReport::from_roster(attackers),
            defenders: SideReport::from_roster(defenders),
        }
    }
}
