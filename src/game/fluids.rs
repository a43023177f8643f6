use serde::{Deserialize, Serialize};

use super::items::{IconParams, IconShape};

/// Continuous quantities piped between machines rather than carried on belts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FluidId {
    Flux,
    Potential,
    Resonance,
}

impl FluidId {
    pub fn all() -> &'static [FluidId] {
        &[FluidId::Flux, FluidId::Potential, FluidId::Resonance]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Flux => "Flux",
            Self::Potential => "Potential",
            Self::Resonance => "Resonance",
        }
    }

    pub fn namespace(&self) -> &'static str {
        "octofact"
    }

    pub fn icon_params(&self) -> IconParams {
        let primary = match self {
            Self::Flux => [1.0, 0.55, 0.15],
            Self::Potential => [0.35, 0.45, 1.0],
            Self::Resonance => [0.2, 0.9, 0.8],
        };
        IconParams {
            shape: IconShape::Circle,
            primary_color: primary,
            secondary_color: primary.map(|c| c * 0.5),
        }
    }
}

/// A fluid + amount in units. The fluid ingredient domain of the recipe viewer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FluidStack {
    pub fluid: FluidId,
    pub amount: u32,
}

impl FluidStack {
    pub fn new(fluid: FluidId, amount: u32) -> Self {
        Self { fluid, amount }
    }
}
