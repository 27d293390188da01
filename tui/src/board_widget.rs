use connect4_client::{BoardView, CellView};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

const CELL_WIDTH: u16 = 3;
/// Width of the "  ║" prefix in front of the first cell
const PREFIX_WIDTH: u16 = 3;
/// Width of the " ║" suffix after the last cell
const SUFFIX_WIDTH: u16 = 2;

/// Where the board's cells ended up on screen, for mapping mouse clicks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    pub cells_x: u16,
    pub top: u16,
    pub bottom: u16,
}

impl BoardLayout {
    /// Column under a click, if the click landed on the board
    pub fn column_at(&self, view: &BoardView, x: u16, y: u16) -> Option<usize> {
        if y < self.top || y >= self.bottom {
            return None;
        }
        view.column_at(x, self.cells_x, CELL_WIDTH)
    }
}

fn cell_span(view: &CellView) -> Span<'static> {
    let Some(symbol) = view.cell.symbol() else {
        return Span::styled(" . ", Style::default().fg(Color::DarkGray));
    };
    let color = match symbol {
        "X" => Color::Red,
        "O" => Color::Yellow,
        _ => Color::White,
    };
    let mut style = Style::default().fg(color);
    if view.winning {
        style = style.bg(Color::Green).add_modifier(Modifier::BOLD);
    }
    Span::styled(" ● ", style)
}

/// Render the board with a column selector, centered horizontally in `area`.
pub fn render_board(
    frame: &mut Frame,
    view: &BoardView,
    selected_column: Option<usize>,
    area: Rect,
) -> BoardLayout {
    let columns = view.columns();
    let inner_width = CELL_WIDTH * columns as u16;
    let width = PREFIX_WIDTH + inner_width + SUFFIX_WIDTH;
    let x = area.x + area.width.saturating_sub(width) / 2;

    let mut lines = Vec::new();

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw(" ".repeat(PREFIX_WIDTH as usize))];
    for col in 0..columns {
        let label = format!(" {} ", col + 1);
        if Some(col) == selected_column {
            col_line.push(Span::styled(
                label,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(label));
        }
    }
    lines.push(Line::from(col_line));

    let border = "═".repeat(inner_width as usize + 1);
    lines.push(Line::from(format!("  ╔{}╗", border)));

    for row in view.rows() {
        let mut spans = vec![Span::raw("  ║")];
        spans.extend(row.iter().map(cell_span));
        spans.push(Span::raw(" ║"));
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(format!("  ╚{}╝", border)));

    let mut indicator_line = vec![Span::raw(" ".repeat(PREFIX_WIDTH as usize))];
    for col in 0..columns {
        if Some(col) == selected_column {
            indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    lines.push(Line::from(indicator_line));

    let height = (lines.len() as u16).min(area.height);
    let board_area = Rect::new(x, area.y, width.min(area.width), height);
    frame.render_widget(Paragraph::new(lines), board_area);

    BoardLayout {
        cells_x: x + PREFIX_WIDTH,
        // Skip the column label line and the top border
        top: area.y + 2,
        bottom: area.y + 2 + view.row_count() as u16,
    }
}

#[cfg(test)]
mod tests {
    use connect4_client::{Cell, CellPos};
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    fn view() -> BoardView {
        let mut board = vec![vec![Cell::Empty; 7]; 6];
        board[5][0] = Cell::Token("X".to_string());
        board[5][1] = Cell::Token("O".to_string());
        BoardView::new(&board, &[CellPos(5, 0)])
    }

    #[test]
    fn layout_maps_clicks_to_columns() {
        let backend = TestBackend::new(40, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        let view = view();

        let mut layout = None;
        terminal
            .draw(|frame| {
                let area = frame.size();
                layout = Some(render_board(frame, &view, Some(3), area));
            })
            .unwrap();
        let layout = layout.unwrap();

        // 3 + 21 + 2 = 26 wide, centered in 40 columns
        assert_eq!(layout.cells_x, 7 + PREFIX_WIDTH);
        assert_eq!((layout.top, layout.bottom), (2, 8));
        assert_eq!(layout.column_at(&view, 10, 4), Some(0));
        assert_eq!(layout.column_at(&view, 29, 7), Some(6));
        assert_eq!(layout.column_at(&view, 10, 1), None);
        assert_eq!(layout.column_at(&view, 10, 8), None);
    }

    #[test]
    fn highlights_winning_cells() {
        let backend = TestBackend::new(40, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        let view = view();

        terminal
            .draw(|frame| {
                let area = frame.size();
                render_board(frame, &view, None, area);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        // Bottom row starts right after the "  ║" prefix
        let winner = buffer.get(11, 7);
        let other = buffer.get(14, 7);
        assert_eq!(winner.symbol(), "●");
        assert_eq!(winner.bg, Color::Green);
        assert_eq!(other.bg, Color::Reset);
        assert_eq!(other.fg, Color::Yellow);
    }
}
