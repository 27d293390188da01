use std::fmt;

use connect4_common::models::{Cell, CellPos, GameState};

/// A single slot of the rendered grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellView {
    pub cell: Cell,
    pub winning: bool,
}

/// Render model of a board snapshot.
///
/// Built from the grid and the winning cells only. It knows nothing about
/// sessions or turns; a front end draws it and maps clicks back to column
/// indices with [`BoardView::column_at`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    rows: Vec<Vec<CellView>>,
    columns: usize,
}

impl BoardView {
    pub fn new(board: &[Vec<Cell>], winning_cells: &[CellPos]) -> Self {
        let rows = board
            .iter()
            .enumerate()
            .map(|(row, cells)| {
                cells
                    .iter()
                    .enumerate()
                    .map(|(col, cell)| CellView {
                        cell: cell.clone(),
                        winning: winning_cells.contains(&CellPos(row, col)),
                    })
                    .collect()
            })
            .collect();
        let columns = board.first().map_or(0, Vec::len);

        Self { rows, columns }
    }

    pub fn from_state(state: &GameState) -> Self {
        Self::new(&state.board, &state.winning_cells)
    }

    pub fn rows(&self) -> &[Vec<CellView>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of clickable columns
    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn cell(&self, pos: CellPos) -> Option<&CellView> {
        self.rows.get(pos.row())?.get(pos.col())
    }

    /// Positions highlighted as part of the winning line, in row-major order
    pub fn winning_positions(&self) -> Vec<CellPos> {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(row, cells)| {
                cells
                    .iter()
                    .enumerate()
                    .filter(|(_, view)| view.winning)
                    .map(move |(col, _)| CellPos(row, col))
            })
            .collect()
    }

    /// Map a horizontal click position to the column under it
    pub fn column_at(&self, x: u16, origin: u16, cell_width: u16) -> Option<usize> {
        if cell_width == 0 || x < origin {
            return None;
        }
        let col = usize::from((x - origin) / cell_width);
        (col < self.columns).then_some(col)
    }
}

impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for view in row {
                let symbol = view.cell.symbol().unwrap_or(".");
                if view.winning {
                    write!(f, "[{}]", symbol)?;
                } else {
                    write!(f, " {} ", symbol)?;
                }
            }
            writeln!(f)?;
        }
        for col in 0..self.columns {
            write!(f, " {} ", col)?;
        }
        writeln!(f)
    }
}
