use std::fmt;

use rand::random_range;

/// Value a die must show for a piece to leave jail.
pub const JAIL_EXIT_VALUE: u8 = 5;

/// A roll of two six-sided dice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dice {
    die1: u8,
    die2: u8,
}

impl Dice {
    pub const fn new(die1: u8, die2: u8) -> Self {
        Dice { die1, die2 }
    }

    pub fn roll() -> Self {
        let die1 = random_range(1..=6);
        let die2 = random_range(1..=6);
        Dice::new(die1, die2)
    }

    pub fn die1(&self) -> u8 {
        self.die1
    }

    pub fn die2(&self) -> u8 {
        self.die2
    }

    pub fn is_double(&self) -> bool {
        self.die1 == self.die2
    }

    pub fn total(&self) -> u8 {
        self.die1 + self.die2
    }

    pub fn contains(&self, value: u8) -> bool {
        self.die1 == value || self.die2 == value
    }

    pub fn allows_jail_exit(&self) -> bool {
        self.contains(JAIL_EXIT_VALUE)
    }

    /// The die left over after using one showing `value`. For a double that is `value` again.
    pub fn other_than(&self, value: u8) -> u8 {
        if self.die1 == value { self.die2 } else { self.die1 }
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.die1, self.die2)
    }
}

/// Source of dice rolls for the engine.
pub trait Roll {
    fn roll(&mut self) -> Dice;
}

/// Unseeded uniform dice.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomDice;

impl Roll for RandomDice {
    fn roll(&mut self) -> Dice {
        Dice::roll()
    }
}

/// Replays a fixed sequence of rolls, starting over once it runs out.
#[derive(Debug, Clone)]
pub struct FixedDice {
    rolls: Vec<Dice>,
    next: usize,
}

impl FixedDice {
    pub fn new(rolls: Vec<Dice>) -> Self {
        assert!(!rolls.is_empty(), "FixedDice needs at least one roll");
        FixedDice { rolls, next: 0 }
    }
}

impl Roll for FixedDice {
    fn roll(&mut self) -> Dice {
        let dice = self.rolls[self.next];
        self.next = (self.next + 1) % self.rolls.len();
        dice
    }
}
