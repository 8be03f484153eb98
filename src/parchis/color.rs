use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TeamColor {
    Yellow,
    Green,
    Red,
    Blue,
}

impl TeamColor {
    /// Default play order. Teams missing from a configured order are appended in this order.
    pub const ALL: [TeamColor; 4] = [
        TeamColor::Yellow,
        TeamColor::Green,
        TeamColor::Red,
        TeamColor::Blue,
    ];

    pub fn from_letter(letter: char) -> Option<TeamColor> {
        match letter.to_ascii_uppercase() {
            'Y' => Some(TeamColor::Yellow),
            'G' => Some(TeamColor::Green),
            'R' => Some(TeamColor::Red),
            'B' => Some(TeamColor::Blue),
            _ => None,
        }
    }

    pub fn letter(&self) -> char {
        match self {
            TeamColor::Yellow => 'Y',
            TeamColor::Green => 'G',
            TeamColor::Red => 'R',
            TeamColor::Blue => 'B',
        }
    }

    /// Cell where pieces of this team enter the outer track when leaving jail.
    pub fn launch_cell(&self) -> u8 {
        match self {
            TeamColor::Yellow => 4,
            TeamColor::Green => 21,
            TeamColor::Red => 38,
            TeamColor::Blue => 55,
        }
    }

    /// Last outer cell before the team's internal track.
    pub fn entry_threshold(&self) -> u8 {
        match self {
            TeamColor::Yellow => 67,
            TeamColor::Green => 16,
            TeamColor::Red => 33,
            TeamColor::Blue => 50,
        }
    }

    /// Parses a turn order such as `"RBGY"`. Letters are case-insensitive,
    /// unknown letters and repeats are ignored and unlisted teams are appended
    /// in [`TeamColor::ALL`] order.
    pub fn turn_order(code: &str) -> Vec<TeamColor> {
        let mut order = Vec::with_capacity(Self::ALL.len());
        for color in code.chars().filter_map(Self::from_letter).chain(Self::ALL) {
            if !order.contains(&color) {
                order.push(color);
            }
        }
        order
    }
}

impl fmt::Display for TeamColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TeamColor::Yellow => "yellow",
            TeamColor::Green => "green",
            TeamColor::Red => "red",
            TeamColor::Blue => "blue",
        };
        write!(f, "{}", name)
    }
}
