use serde::{Deserialize, Serialize};

/// Host item identity of a disc. Zero is reserved for "no disc".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscId(pub u32);

impl DiscId {
    /// Interpret a raw host value (varp or slot state). Zero and negatives mean empty.
    pub fn from_raw(raw: i32) -> Option<Self> {
        if raw > 0 {
            Some(DiscId(raw as u32))
        } else {
            None
        }
    }
}

impl std::fmt::Display for DiscId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Disc shape. The shape multiplier is one factor of the disc weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Circle,
    Triangle,
    Square,
    Pentagon,
}

impl Shape {
    pub fn multiplier(&self) -> u8 {
        match self {
            Shape::Circle => 1,
            Shape::Triangle => 3,
            Shape::Square => 4,
            Shape::Pentagon => 5,
        }
    }

    pub fn all() -> &'static [Shape] {
        &[Shape::Circle, Shape::Triangle, Shape::Square, Shape::Pentagon]
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Shape::Circle => write!(f, "circle"),
            Shape::Triangle => write!(f, "triangle"),
            Shape::Square => write!(f, "square"),
            Shape::Pentagon => write!(f, "pentagon"),
        }
    }
}

/// Disc colour, red (1) through violet (7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colour {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Indigo,
    Violet,
}

impl Colour {
    pub fn multiplier(&self) -> u8 {
        match self {
            Colour::Red => 1,
            Colour::Orange => 2,
            Colour::Yellow => 3,
            Colour::Green => 4,
            Colour::Blue => 5,
            Colour::Indigo => 6,
            Colour::Violet => 7,
        }
    }

    pub fn all() -> &'static [Colour] {
        &[
            Colour::Red,
            Colour::Orange,
            Colour::Yellow,
            Colour::Green,
            Colour::Blue,
            Colour::Indigo,
            Colour::Violet,
        ]
    }
}

impl std::fmt::Display for Colour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Colour::Red => write!(f, "red"),
            Colour::Orange => write!(f, "orange"),
            Colour::Yellow => write!(f, "yellow"),
            Colour::Green => write!(f, "green"),
            Colour::Blue => write!(f, "blue"),
            Colour::Indigo => write!(f, "indigo"),
            Colour::Violet => write!(f, "violet"),
        }
    }
}

/// A disc the player can carry and insert into the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Disc {
    pub id: DiscId,
    pub shape: Shape,
    pub colour: Colour,
}

impl Disc {
    pub fn new(id: DiscId, shape: Shape, colour: Colour) -> Self {
        Self { id, shape, colour }
    }

    /// Weight contributed towards a target sum (1..=35).
    pub fn weight(&self) -> u8 {
        self.shape.multiplier() * self.colour.multiplier()
    }
}

impl std::fmt::Display for Disc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.colour, self.shape)
    }
}

/// Which disc satisfies a slot.
///
/// Ambiguous weights carry both alternatives; the choice between them is only
/// made against a concrete inventory, never when the requirement is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiscRequirement {
    Single(DiscId),
    EitherOf(DiscId, DiscId),
}

impl DiscRequirement {
    /// Acceptable discs, in preference order.
    pub fn alternatives(&self) -> Vec<DiscId> {
        match *self {
            DiscRequirement::Single(id) => vec![id],
            DiscRequirement::EitherOf(a, b) => vec![a, b],
        }
    }

    pub fn accepts(&self, id: DiscId) -> bool {
        match *self {
            DiscRequirement::Single(a) => a == id,
            DiscRequirement::EitherOf(a, b) => a == id || b == id,
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, DiscRequirement::EitherOf(..))
    }
}
