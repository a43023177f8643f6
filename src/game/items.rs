use serde::{Deserialize, Serialize};

use super::fluids::FluidId;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemId {
    #[default]
    NullSet,
    Point,
    Preimage,
    Wavelet,
    LineSegment,
    ExactSequence,
    Identity,
    Square,
    Cube,
    StandingWave,
    Function,
    NeckerCube,
    Image,
    Belt,
    AxiomaticScience,
    Composer,
    Inverter,
    Embedder,
    Quotient,
    Transformer,
    KnowledgeSheaf,
    Quadrupole,
    Dynamo,
    RootOfUnity,
    Kernel,
    Quantum,
    Splitter,
    SourceMachine,
}

impl ItemId {
    pub fn all() -> &'static [ItemId] {
        use ItemId::*;
        &[
            NullSet, Point, Preimage, Wavelet, LineSegment, ExactSequence,
            Identity, Square, Cube, StandingWave, Function, NeckerCube,
            Image, Belt, AxiomaticScience, Composer, Inverter, Embedder,
            Quotient, Transformer, KnowledgeSheaf, Quadrupole, Dynamo,
            RootOfUnity, Kernel, Quantum, Splitter, SourceMachine,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::NullSet => "Null Set",
            Self::Point => "Point",
            Self::Preimage => "Preimage",
            Self::Wavelet => "Wavelet",
            Self::LineSegment => "Line Segment",
            Self::ExactSequence => "Exact Sequence",
            Self::Identity => "Identity",
            Self::Square => "Square",
            Self::Cube => "Cube",
            Self::StandingWave => "Standing Wave",
            Self::Function => "Function",
            Self::NeckerCube => "Necker Cube",
            Self::Image => "Image",
            Self::Belt => "Belt",
            Self::AxiomaticScience => "Axiomatic Science",
            Self::Composer => "Composer",
            Self::Inverter => "Inverter",
            Self::Embedder => "Embedder",
            Self::Quotient => "Quotient",
            Self::Transformer => "Transformer",
            Self::KnowledgeSheaf => "Knowledge Sheaf",
            Self::Quadrupole => "Quadrupole",
            Self::Dynamo => "Dynamo",
            Self::RootOfUnity => "Root of Unity",
            Self::Kernel => "Kernel",
            Self::Quantum => "Quantum",
            Self::Splitter => "Splitter",
            Self::SourceMachine => "Source",
        }
    }

    /// Registry namespace the item was registered under.
    pub fn namespace(&self) -> &'static str {
        match self {
            Self::SourceMachine => "octofact_debug",
            _ => "octofact",
        }
    }

    pub fn category(&self) -> ItemCategory {
        match self {
            Self::NullSet | Self::Point | Self::Preimage | Self::Wavelet => {
                ItemCategory::RawResource
            }
            Self::LineSegment | Self::ExactSequence | Self::Identity
            | Self::Square | Self::Cube | Self::StandingWave
            | Self::Function | Self::NeckerCube | Self::Image
            | Self::AxiomaticScience => ItemCategory::Intermediate,
            Self::Belt | Self::Quadrupole | Self::Dynamo | Self::Splitter => ItemCategory::Infrastructure,
            Self::Composer | Self::Inverter | Self::Embedder
            | Self::Quotient | Self::Transformer | Self::KnowledgeSheaf
            | Self::SourceMachine => {
                ItemCategory::Machine
            }
            Self::RootOfUnity | Self::Kernel | Self::Quantum => ItemCategory::Advanced,
        }
    }

    pub fn tier(&self) -> u32 {
        match self {
            Self::NullSet | Self::Point | Self::Preimage | Self::Wavelet => 0,
            Self::RootOfUnity | Self::Kernel | Self::Quantum
            | Self::Embedder | Self::Quotient | Self::Transformer => 2,
            Self::SourceMachine | Self::Splitter => 0,
            _ => 1,
        }
    }

    /// Icon shape follows the category; the colour is per item.
    pub fn icon_params(&self) -> IconParams {
        let shape = match self.category() {
            ItemCategory::RawResource => IconShape::Circle,
            ItemCategory::Intermediate => match self {
                Self::Cube | Self::NeckerCube | Self::AxiomaticScience => IconShape::Hexagon,
                Self::LineSegment | Self::Identity | Self::Square => IconShape::Square,
                _ => IconShape::Triangle,
            },
            ItemCategory::Infrastructure => IconShape::Octagon,
            ItemCategory::Machine => IconShape::Diamond,
            ItemCategory::Advanced => IconShape::Star,
        };
        let primary = self.base_color();
        IconParams {
            shape,
            primary_color: primary,
            secondary_color: primary.map(|c| c * 0.7),
        }
    }

    fn base_color(&self) -> [f32; 3] {
        match self {
            Self::NullSet => [1.0, 0.9, 0.2],
            Self::Point => [0.9, 0.9, 1.0],
            Self::Preimage => [0.5, 0.3, 0.8],
            Self::Wavelet => [0.2, 0.8, 0.9],
            Self::LineSegment => [0.8, 0.8, 0.9],
            Self::ExactSequence => [0.6, 0.4, 0.9],
            Self::Identity => [1.0, 0.95, 0.5],
            Self::Square => [0.7, 0.7, 0.85],
            Self::Cube => [0.55, 0.55, 0.8],
            Self::StandingWave => [0.1, 0.7, 0.8],
            Self::Function => [0.7, 0.4, 1.0],
            Self::NeckerCube => [0.8, 0.5, 0.9],
            Self::Image => [0.9, 0.6, 1.0],
            Self::Belt => [0.6, 0.6, 0.6],
            Self::AxiomaticScience => [0.3, 0.9, 0.5],
            Self::Composer => [0.4, 0.5, 1.0],
            Self::Inverter => [1.0, 0.5, 0.4],
            Self::Embedder => [0.9, 0.3, 0.7],
            Self::Quotient => [0.5, 0.9, 0.3],
            Self::Transformer => [0.9, 0.7, 0.3],
            Self::KnowledgeSheaf => [0.3, 1.0, 0.7],
            Self::Quadrupole => [1.0, 0.8, 0.2],
            Self::Dynamo => [1.0, 0.6, 0.1],
            Self::RootOfUnity => [0.9, 0.4, 0.6],
            Self::Kernel => [0.4, 0.9, 0.9],
            Self::Quantum => [0.3, 0.6, 1.0],
            Self::Splitter => [0.7, 0.7, 0.5],
            Self::SourceMachine => [0.2, 1.0, 0.2],
        }
    }
}

/// An item type + count. The item-stack ingredient domain of the recipe viewer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ItemStack {
    pub item: ItemId,
    pub count: u32,
}

impl ItemStack {
    pub fn new(item: ItemId, count: u32) -> Self {
        Self { item, count }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    RawResource,
    Intermediate,
    Infrastructure,
    Machine,
    Advanced,
}

impl ItemCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::RawResource => "Raw Resources",
            Self::Intermediate => "Intermediates",
            Self::Infrastructure => "Infrastructure",
            Self::Machine => "Machines",
            Self::Advanced => "Advanced",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct IconParams {
    pub shape: IconShape,
    pub primary_color: [f32; 3],
    pub secondary_color: [f32; 3],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IconShape {
    Circle,
    Triangle,
    Square,
    Hexagon,
    Diamond,
    Octagon,
    Star,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MachineType {
    Composer,
    Inverter,
    Embedder,
    Quotient,
    Transformer,
    Source,
}

impl MachineType {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Composer => "Composer",
            Self::Inverter => "Inverter",
            Self::Embedder => "Embedder",
            Self::Quotient => "Quotient",
            Self::Transformer => "Transformer",
            Self::Source => "Source",
        }
    }
}

/// One item input of a recipe: a fixed item, or any member of a tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecipeInput {
    Item(ItemId, u32),
    Tag(&'static str, u32),
}

impl RecipeInput {
    pub fn count(&self) -> u32 {
        match *self {
            Self::Item(_, count) | Self::Tag(_, count) => count,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Recipe {
    pub machine: MachineType,
    pub inputs: Vec<RecipeInput>,
    pub fluid_inputs: Vec<(FluidId, u32)>,
    pub output: ItemId,
    pub output_count: u32,
}

impl Recipe {
    fn new(machine: MachineType, inputs: Vec<RecipeInput>, output: ItemId) -> Self {
        Self { machine, inputs, fluid_inputs: Vec::new(), output, output_count: 1 }
    }

    fn with_fluid(mut self, fluid: FluidId, amount: u32) -> Self {
        self.fluid_inputs.push((fluid, amount));
        self
    }
}

pub fn all_recipes() -> Vec<Recipe> {
    use ItemId::*;
    use RecipeInput::{Item, Tag};
    let c = MachineType::Composer;
    let i = MachineType::Inverter;
    let e = MachineType::Embedder;
    let mut recipes = vec![
        // T1 Composition
        Recipe::new(c, vec![Item(Point, 2)], LineSegment),
        Recipe::new(c, vec![Item(Preimage, 3)], ExactSequence),
        Recipe::new(c, vec![Item(NullSet, 1)], Identity),
        Recipe::new(c, vec![Item(LineSegment, 4)], Square),
        Recipe::new(c, vec![Item(Square, 6)], Cube),
        Recipe::new(c, vec![Item(Wavelet, 2)], StandingWave),
        // T1 Inversion
        Recipe::new(i, vec![Item(Preimage, 1)], Function),
        Recipe::new(i, vec![Item(Cube, 1)], NeckerCube),
        Recipe::new(i, vec![Item(Preimage, 1)], Image),
        // Self-bootstrapping
        Recipe::new(c, vec![Item(LineSegment, 1)], Belt),
        Recipe::new(c, vec![Tag("octofact:polytopes", 1)], AxiomaticScience),
        Recipe::new(c, vec![Tag("octofact:morphisms", 2)], Composer),
        Recipe::new(i, vec![Item(Composer, 1)], Inverter),
        Recipe::new(c, vec![Item(AxiomaticScience, 12)], KnowledgeSheaf)
            .with_fluid(FluidId::Potential, 100),
        // Power chain
        Recipe::new(c, vec![Item(Identity, 4)], Quadrupole),
        Recipe::new(c, vec![Item(Quadrupole, 2)], Dynamo).with_fluid(FluidId::Flux, 500),
        // T2 Embedding
        Recipe::new(e, vec![Item(Preimage, 1), Item(Identity, 1)], RootOfUnity),
        Recipe::new(e, vec![Item(Identity, 1), Item(Preimage, 1)], Kernel),
        Recipe::new(e, vec![Tag("octofact:waves", 1), Item(Cube, 1)], Quantum)
            .with_fluid(FluidId::Resonance, 250),
        Recipe::new(e, vec![Tag("octofact:primitives", 2), Item(Function, 1)], Splitter),
        // T2 Quotients and transforms
        Recipe::new(MachineType::Quotient, vec![Item(Kernel, 1), Tag("octofact:morphisms", 1)], Identity)
            .with_fluid(FluidId::Potential, 50),
        Recipe::new(MachineType::Transformer, vec![Item(StandingWave, 2), Item(RootOfUnity, 1)], Quantum)
            .with_fluid(FluidId::Resonance, 100)
            .with_fluid(FluidId::Flux, 200),
    ];
    // Source machine: one recipe per raw or intermediate item, no inputs
    recipes.extend(
        ItemId::all()
            .iter()
            .filter(|id| {
                matches!(
                    id.category(),
                    ItemCategory::RawResource | ItemCategory::Intermediate | ItemCategory::Advanced
                )
            })
            .map(|&id| Recipe::new(MachineType::Source, vec![], id)),
    );
    recipes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_items_have_display_names() {
        for item in ItemId::all() {
            assert!(!item.display_name().is_empty(), "{:?} has empty display name", item);
        }
    }

    #[test]
    fn test_all_items_have_icon_params() {
        for item in ItemId::all() {
            let params = item.icon_params();
            for &c in params.primary_color.iter().chain(&params.secondary_color) {
                assert!((0.0..=1.0).contains(&c), "{:?} colour out of range", item);
            }
        }
    }

    #[test]
    fn test_all_items_count() {
        assert_eq!(ItemId::all().len(), 28);
    }

    #[test]
    fn test_all_recipes_have_positive_counts() {
        for recipe in all_recipes() {
            for input in &recipe.inputs {
                assert!(input.count() > 0, "Recipe for {:?} has zero count input", recipe.output);
            }
            for (fluid, amount) in &recipe.fluid_inputs {
                assert!(*amount > 0, "Recipe for {:?} has no {:?}", recipe.output, fluid);
            }
            assert!(recipe.output_count > 0);
        }
    }

    #[test]
    fn test_source_recipes_have_no_inputs() {
        let sources: Vec<_> = all_recipes()
            .into_iter()
            .filter(|r| r.machine == MachineType::Source)
            .collect();
        assert!(!sources.is_empty());
        assert!(sources.iter().all(|r| r.inputs.is_empty() && r.fluid_inputs.is_empty()));
    }
}
