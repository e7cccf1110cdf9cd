// per-window brightness assignment
//
// Uniform per-window noise reads as static; sampling conditioned on a
// per-building policy produces the "most lights on, some off" clusters
// that make a skyline believable.

use rand::Rng;
use rand::rngs::StdRng;

use crate::config::*;

/// The discrete emissive palette, dimmest first. Windows only ever carry
/// one of these, so every batch of a given level can share one material.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LightLevel {
    Dark,
    Dim,
    Low,
    Medium,
    Bright,
}

impl LightLevel {
    pub const ALL: [LightLevel; 5] = [
        LightLevel::Dark,
        LightLevel::Dim,
        LightLevel::Low,
        LightLevel::Medium,
        LightLevel::Bright,
    ];

    /// Emissive strength for the window material of this level.
    pub fn intensity(self) -> f32 {
        match self {
            LightLevel::Dark => 0.0,
            LightLevel::Dim => 0.1,
            LightLevel::Low => 0.3,
            LightLevel::Medium => 0.8,
            LightLevel::Bright => 1.2,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Steps toward Dark, saturating at the dimmest level.
    pub fn darker(self, steps: u32) -> LightLevel {
        LightLevel::ALL[self.index().saturating_sub(steps as usize)]
    }
}

/// Building-wide lighting stance: the level most windows sit at and how
/// strictly they stick to it.
#[derive(Clone, Copy, Debug)]
pub struct LightingPolicy {
    pub base: LightLevel,
    pub conformity: f32,
}

impl LightingPolicy {
    /// Modern towers run dimmer and more uniform than older ones.
    pub fn for_building(modern: bool) -> Self {
        if modern {
            Self { base: LightLevel::Low, conformity: MODERN_CONFORMITY }
        } else {
            Self { base: LightLevel::Medium, conformity: OLDER_CONFORMITY }
        }
    }
}

/// The conformity stage: the base level with probability `conformity`,
/// otherwise darkened by 1 or 2 steps. Deviation never brightens.
pub fn policy_level(policy: &LightingPolicy, rng: &mut StdRng) -> LightLevel {
    if rng.random::<f32>() < policy.conformity {
        policy.base
    } else {
        policy.base.darker(rng.random_range(1..=2))
    }
}

/// Full per-window draw: the conformity stage plus an independent chance
/// of the room simply being vacant, regardless of policy.
pub fn window_level(policy: &LightingPolicy, vacancy: f32, rng: &mut StdRng) -> LightLevel {
    let level = policy_level(policy, rng);
    if rng.random::<f32>() < vacancy {
        LightLevel::Dark
    } else {
        level
    }
}
