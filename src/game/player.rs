use std::fmt;

use super::board::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Red,
    Blue,
}

impl Player {
    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::Red => Player::Blue,
            Player::Blue => Player::Red,
        }
    }

    /// Player identifier: 1 for the first mover, 2 for the second
    pub fn number(self) -> u8 {
        match self {
            Player::Red => 1,
            Player::Blue => 2,
        }
    }

    /// Convert player to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Player::Red => Cell::Red,
            Player::Blue => Cell::Blue,
        }
    }

    /// Get player name for display
    pub fn name(self) -> &'static str {
        match self {
            Player::Red => "Red",
            Player::Blue => "Blue",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {} ({})", self.number(), self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_player() {
        assert_eq!(Player::Red.other(), Player::Blue);
        assert_eq!(Player::Blue.other(), Player::Red);
    }

    #[test]
    fn test_player_numbers() {
        assert_eq!(Player::Red.number(), 1);
        assert_eq!(Player::Blue.number(), 2);
    }

    #[test]
    fn test_cell_round_trip() {
        for player in [Player::Red, Player::Blue] {
            assert_eq!(player.to_cell().player(), Some(player));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Player::Blue.to_string(), "player 2 (Blue)");
    }
}
