//! Built-in rival roster.

use super::types::OpponentProfile;

pub struct Rival {
    pub name: &'static str,
    pub avatar: &'static str,
    /// Starting leaderboard points.
    pub rank_points: u32,
}

pub const ROSTER: [Rival; 6] = [
    Rival {
        name: "Vex",
        avatar: "fox",
        rank_points: 80,
    },
    Rival {
        name: "Nyra",
        avatar: "owl",
        rank_points: 180,
    },
    Rival {
        name: "Korrin",
        avatar: "bear",
        rank_points: 320,
    },
    Rival {
        name: "Sable",
        avatar: "raven",
        rank_points: 560,
    },
    Rival {
        name: "Talon",
        avatar: "hawk",
        rank_points: 820,
    },
    Rival {
        name: "Aurelia",
        avatar: "lion",
        rank_points: 1150,
    },
];

pub fn find_rival(name: &str) -> Option<&'static Rival> {
    ROSTER.iter().find(|r| r.name.eq_ignore_ascii_case(name))
}

impl Rival {
    pub fn profile(&self) -> OpponentProfile {
        OpponentProfile {
            name: self.name.to_string(),
            avatar: self.avatar.to_string(),
        }
    }
}
