//! Food items and the L2 kinds they represent

use rand::seq::SliceRandom;
use rand::Rng;

use super::state::Position;

/// Kind of a food item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoodKind {
    /// Plain food, no side effect
    Normal,
    /// Freezes movement for a short while
    Shield,
    /// Fatal unless verified by passing next to it first
    Fraud,
    /// Reverses directional input for a short while
    Jam,
    /// Shortens the snake from the tail
    Drain,
}

impl FoodKind {
    pub const ALL: [FoodKind; 5] = [
        FoodKind::Normal,
        FoodKind::Shield,
        FoodKind::Fraud,
        FoodKind::Jam,
        FoodKind::Drain,
    ];

    /// Score awarded for eating this kind
    pub fn points(&self) -> u32 {
        match self {
            FoodKind::Normal => 3,
            FoodKind::Shield => 8,
            FoodKind::Fraud => 10,
            FoodKind::Jam => 8,
            FoodKind::Drain => 6,
        }
    }

    /// Everything except `Normal` counts towards a security collapse
    pub fn is_powered(&self) -> bool {
        !matches!(self, FoodKind::Normal)
    }

    /// Flavor labels a spawned item of this kind can carry
    pub fn identities(&self) -> &'static [&'static str] {
        match self {
            FoodKind::Normal => &["Ethereum", "Gnosis", "Polygon PoS"],
            FoodKind::Shield => &["zkSync", "Starknet", "Scroll", "Linea"],
            FoodKind::Fraud => &["Arbitrum", "Optimism", "Base"],
            FoodKind::Jam => &["Blast", "Mantle", "Mode"],
            FoodKind::Drain => &["Manta", "Metis", "Boba"],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FoodKind::Normal => "normal",
            FoodKind::Shield => "shield",
            FoodKind::Fraud => "fraud",
            FoodKind::Jam => "jam",
            FoodKind::Drain => "drain",
        }
    }
}

/// A food item on the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Food {
    pub position: Position,
    pub kind: FoodKind,
    /// Decorative label reported when eaten
    pub identity: String,
    /// Only meaningful for `Fraud`; set by proximity
    pub verified: bool,
}

impl Food {
    /// Create an unverified item at a position
    pub fn new(position: Position, kind: FoodKind, identity: impl Into<String>) -> Self {
        Self {
            position,
            kind,
            identity: identity.into(),
            verified: false,
        }
    }

    /// Create an item with an identity drawn from its kind's pool
    pub fn random_identity<R: Rng + ?Sized>(position: Position, kind: FoodKind, rng: &mut R) -> Self {
        let identity = kind
            .identities()
            .choose(rng)
            .copied()
            .unwrap_or(kind.label());
        Self::new(position, kind, identity)
    }

    /// Whether eating this item ends the run
    pub fn is_lethal(&self) -> bool {
        self.kind == FoodKind::Fraud && !self.verified
    }
}
