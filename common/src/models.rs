use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Player identifier the server uses for its automated opponent.
pub const AI_PLAYER: &str = "Computer";

pub const DEFAULT_PLAYER1: &str = "Player 1";
pub const DEFAULT_PLAYER2: &str = "Player 2";

#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    #[serde(rename = "pvp")]
    Pvp,
    #[serde(rename = "ai")]
    Ai,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Pvp => "pvp",
            Mode::Ai => "ai",
        }
    }

    /// The other mode, used by toggles in the front end
    pub fn toggled(self) -> Self {
        match self {
            Mode::Pvp => Mode::Ai,
            Mode::Ai => Mode::Pvp,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub enum Difficulty {
    #[serde(rename = "easy")]
    Easy,
    #[serde(rename = "medium")]
    Medium,
    #[default]
    #[serde(rename = "hard")]
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Cycle easy -> medium -> hard -> easy
    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A board cell as sent by the server: a blank string for an empty slot,
/// otherwise the symbol of the player owning the token.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum Cell {
    #[default]
    Empty,
    Token(String),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn symbol(&self) -> Option<&str> {
        match self {
            Cell::Empty => None,
            Cell::Token(symbol) => Some(symbol),
        }
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        if value.trim().is_empty() {
            Cell::Empty
        } else {
            Cell::Token(value)
        }
    }
}

impl From<Cell> for String {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Empty => " ".to_string(),
            Cell::Token(symbol) => symbol,
        }
    }
}

/// `(row, col)` pair, encoded on the wire as a two element array.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellPos(pub usize, pub usize);

impl CellPos {
    pub fn row(self) -> usize {
        self.0
    }

    pub fn col(self) -> usize {
        self.1
    }
}

/// Authoritative snapshot of a game, replaced wholesale on every server response.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct GameState {
    pub board: Vec<Vec<Cell>>,
    pub current_player: String,
    pub game_over: bool,
    #[serde(default)]
    pub winner: Option<String>,
    #[serde(default)]
    pub winning_cells: Vec<CellPos>,
    #[serde(default)]
    pub symbols: HashMap<String, String>,
    #[serde(default)]
    pub move_times: HashMap<String, f64>,
}

impl GameState {
    pub fn rows(&self) -> usize {
        self.board.len()
    }

    pub fn columns(&self) -> usize {
        self.board.first().map_or(0, Vec::len)
    }

    pub fn get_cell(&self, pos: CellPos) -> Option<&Cell> {
        self.board.get(pos.row())?.get(pos.col())
    }

    /// Number of tokens placed on the board so far
    pub fn token_count(&self) -> usize {
        self.board
            .iter()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count()
    }

    pub fn is_turn_of(&self, player: &str) -> bool {
        self.current_player == player
    }

    pub fn symbol_of(&self, player: &str) -> Option<&str> {
        self.symbols.get(player).map(String::as_str)
    }

    /// Accumulated thinking time of a player in seconds, zero if unknown
    pub fn move_time_of(&self, player: &str) -> f64 {
        self.move_times.get(player).copied().unwrap_or(0.0)
    }

    pub fn is_winning_cell(&self, pos: CellPos) -> bool {
        self.winning_cells.contains(&pos)
    }

    /// True once the game ended without a winner
    pub fn is_draw(&self) -> bool {
        self.game_over && self.winner.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRESH_STATE: &str = r#"{
        "board": [
            [" ", " ", " ", " ", " ", " ", " "],
            [" ", " ", " ", " ", " ", " ", " "],
            [" ", " ", " ", " ", " ", " ", " "],
            [" ", " ", " ", " ", " ", " ", " "],
            [" ", " ", " ", " ", " ", " ", " "],
            [" ", " ", " ", "X", " ", " ", " "]
        ],
        "current_player": "Bob",
        "winner": null,
        "game_over": false,
        "move_times": {"Alice": 1.25, "Bob": 0.0},
        "symbols": {"Alice": "X", "Bob": "O"},
        "winning_cells": []
    }"#;

    #[test]
    fn decodes_server_snapshot() {
        let state: GameState = serde_json::from_str(FRESH_STATE).unwrap();
        assert_eq!(state.rows(), 6);
        assert_eq!(state.columns(), 7);
        assert_eq!(state.token_count(), 1);
        assert_eq!(
            state.get_cell(CellPos(5, 3)),
            Some(&Cell::Token("X".to_string()))
        );
        assert_eq!(state.get_cell(CellPos(0, 0)), Some(&Cell::Empty));
        assert!(state.is_turn_of("Bob"));
        assert_eq!(state.symbol_of("Alice"), Some("X"));
        assert_eq!(state.move_time_of("Alice"), 1.25);
        assert_eq!(state.move_time_of("Nobody"), 0.0);
        assert!(!state.is_draw());
    }

    #[test]
    fn optional_fields_default_when_missing() {
        let json = r#"{"board": [[" "]], "current_player": "A", "game_over": true}"#;
        let state: GameState = serde_json::from_str(json).unwrap();
        assert!(state.winner.is_none());
        assert!(state.winning_cells.is_empty());
        assert!(state.symbols.is_empty());
        assert!(state.is_draw());
    }

    #[test]
    fn winning_cells_are_row_col_arrays() {
        let json = r#"{"board": [], "current_player": "A", "game_over": true,
            "winner": "A", "winning_cells": [[5, 0], [4, 1]]}"#;
        let state: GameState = serde_json::from_str(json).unwrap();
        assert_eq!(state.winning_cells, vec![CellPos(5, 0), CellPos(4, 1)]);
        assert!(state.is_winning_cell(CellPos(4, 1)));
        assert!(!state.is_winning_cell(CellPos(1, 4)));
        assert_eq!(serde_json::to_string(&CellPos(5, 0)).unwrap(), "[5,0]");
    }

    #[test]
    fn empty_cell_serializes_as_blank() {
        assert_eq!(serde_json::to_string(&Cell::Empty).unwrap(), r#"" ""#);
        let cell: Cell = serde_json::from_str(r#""O""#).unwrap();
        assert_eq!(cell.symbol(), Some("O"));
    }

    #[test]
    fn mode_and_difficulty_use_lowercase_names() {
        assert_eq!(serde_json::to_string(&Mode::Ai).unwrap(), r#""ai""#);
        assert_eq!(
            serde_json::to_string(&Difficulty::Medium).unwrap(),
            r#""medium""#
        );
        assert_eq!(Mode::default(), Mode::Pvp);
        assert_eq!(Difficulty::default(), Difficulty::Hard);
        assert_eq!(Difficulty::Hard.next(), Difficulty::Easy);
        assert_eq!(Mode::Pvp.toggled(), Mode::Ai);
    }
}
