use serde::{Deserialize, Serialize};

/// The two hosts of every podcast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Speaker {
    Alex,
    Brenda,
}

impl Speaker {
    /// Speaker list in turn order: `[S0, S1]`
    pub const ALL: [Speaker; 2] = [Speaker::Alex, Speaker::Brenda];

    /// Speaker holding the floor at a given position, alternating by parity
    pub fn at(position: usize) -> Self {
        Self::ALL[position % 2]
    }

    /// The speaker not currently holding the floor
    pub fn other(self) -> Self {
        match self {
            Speaker::Alex => Speaker::Brenda,
            Speaker::Brenda => Speaker::Alex,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Speaker::Alex => "Alex",
            Speaker::Brenda => "Brenda",
        }
    }
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
