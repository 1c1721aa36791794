//! Turn ordering handed to the simulation together with the parsed map.

/// The season of a game turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Season {
    Spring,
    Fall,
}

impl Season {
    pub const fn name(self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Fall => "fall",
        }
    }
}

/// The phase within a game turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Movement,
    Retreat,
    Build,
}

impl Phase {
    pub const fn name(self) -> &'static str {
        match self {
            Phase::Movement => "moves",
            Phase::Retreat => "retreats",
            Phase::Build => "builds",
        }
    }
}

/// A point in the phase ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Turn {
    pub year: u16,
    pub season: Season,
    pub phase: Phase,
}

impl Turn {
    /// The opening movement phase of `year`.
    pub const fn spring_moves(year: u16) -> Self {
        Turn {
            year,
            season: Season::Spring,
            phase: Phase::Movement,
        }
    }
}

impl std::fmt::Display for Turn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.season.name(), self.year, self.phase.name())
    }
}
