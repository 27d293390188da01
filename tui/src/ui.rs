use connect4_client::{GameApi, GameState, Mode, Session};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, Field, Screen};
use crate::board_widget::{BoardLayout, render_board};

/// Draw the current screen. Returns where the board landed, if one was drawn.
pub fn render<A: GameApi + 'static>(frame: &mut Frame, app: &App<A>) -> Option<BoardLayout> {
    match app.screen {
        Screen::Setup => {
            render_setup(frame, app);
            None
        }
        Screen::Game => render_game(frame, app),
    }
}

fn render_setup<A: GameApi + 'static>(frame: &mut Frame, app: &App<A>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(8),    // Form
            Constraint::Length(3), // Controls
        ])
        .split(frame.size());

    render_title(frame, "New game", chunks[0]);

    let form = &app.form;
    let mut rows = vec![form_row("Player 1", &form.player1, form.focus == Field::Player1)];
    rows.push(form_row(
        "Player 2",
        form.opponent(),
        form.focus == Field::Player2,
    ));
    let mode = match form.mode {
        Mode::Pvp => "Player vs Player",
        Mode::Ai => "Player vs AI",
    };
    rows.push(form_row("Mode", mode, form.focus == Field::Mode));
    if form.mode == Mode::Ai {
        rows.push(form_row(
            "Difficulty",
            form.difficulty.as_str(),
            form.focus == Field::Difficulty,
        ));
    }
    rows.push(Line::from(""));
    let start_style = if form.focus == Field::Start {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    rows.push(Line::from(Span::styled("[ Start ]", start_style)));

    let body = Paragraph::new(rows)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(body, chunks[1]);

    render_controls(
        frame,
        "Tab/↑↓: Move  |  ←→/Space: Change  |  Enter: Start  |  Esc: Quit",
        chunks[2],
    );
}

fn form_row<'a>(label: &'a str, value: &'a str, focused: bool) -> Line<'a> {
    let value_style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::raw(format!("{:>10}: ", label)),
        Span::styled(value, value_style),
    ])
}

fn render_game<A: GameApi + 'static>(frame: &mut Frame, app: &App<A>) -> Option<BoardLayout> {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Length(1),  // Players
            Constraint::Min(10),    // Board
            Constraint::Length(3),  // Message
            Constraint::Length(1),  // Move times
            Constraint::Length(3),  // Controls
        ])
        .split(frame.size());

    let controller = &app.controller;
    render_controls(
        frame,
        "←→/1-7/Click: Drop  |  n: Play again  |  r: Refresh  |  s: Setup  |  q: Quit",
        chunks[5],
    );

    let (Some(session), Some(state)) = (controller.session(), controller.state()) else {
        render_title(frame, "Connect Four", chunks[0]);
        let status = if controller.is_loading() {
            "Loading...".to_string()
        } else {
            controller
                .last_error()
                .map(|error| format!("{} (press 'n' to try again)", error))
                .unwrap_or_default()
        };
        render_message(frame, Some(status.as_str()), chunks[3]);
        return None;
    };

    render_header(frame, state, chunks[0]);
    render_players(frame, session, state, chunks[1]);

    let layout = controller.board_view().map(|view| {
        let selected = (!state.game_over).then_some(app.selected_column);
        render_board(frame, &view, selected, chunks[2])
    });

    let status = if controller.is_loading() {
        Some("Loading...".to_string())
    } else {
        app.message.clone()
    };
    render_message(frame, status.as_deref(), chunks[3]);
    render_times(frame, session, state, chunks[4]);

    layout
}

fn render_title(frame: &mut Frame, title: &str, area: Rect) {
    let header = Paragraph::new(title)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Connect Four"));
    frame.render_widget(header, area);
}

fn symbol_color(symbol: Option<&str>) -> Color {
    match symbol {
        Some("X") => Color::Red,
        Some("O") => Color::Yellow,
        _ => Color::White,
    }
}

fn render_header(frame: &mut Frame, state: &GameState, area: Rect) {
    let (status, color) = if state.game_over {
        match &state.winner {
            Some(winner) => (
                format!("{} wins!", winner),
                symbol_color(state.symbol_of(winner)),
            ),
            None => ("Draw!".to_string(), Color::White),
        }
    } else {
        (
            format!("Turn: {}", state.current_player),
            symbol_color(state.symbol_of(&state.current_player)),
        )
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Connect Four"));
    frame.render_widget(header, area);
}

fn render_players(frame: &mut Frame, session: &Session, state: &GameState, area: Rect) {
    let [player1, player2] = session.players();
    let label = |player: &str| {
        let symbol = state.symbol_of(player);
        Span::styled(
            format!("● {} ({})", player, symbol.unwrap_or("?")),
            Style::default().fg(symbol_color(symbol)),
        )
    };
    let mut spans = vec![label(player1), Span::raw("  vs  "), label(player2)];
    if session.is_ai() {
        spans.push(Span::raw(format!("  [{}]", session.difficulty)));
    }

    let players = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(players, area);
}

fn render_message(frame: &mut Frame, message: Option<&str>, area: Rect) {
    let text = message.unwrap_or("");
    let widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Green))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(widget, area);
}

fn render_times(frame: &mut Frame, session: &Session, state: &GameState, area: Rect) {
    let [player1, player2] = session.players();
    let times = format!(
        "Time: {} - {:.2}s | {} - {:.2}s",
        player1,
        state.move_time_of(player1),
        player2,
        state.move_time_of(player2)
    );
    let widget = Paragraph::new(times)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, help: &str, area: Rect) {
    let controls = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));
    frame.render_widget(controls, area);
}

#[cfg(test)]
mod tests {
    use connect4_client::{Connect4Client, SessionController};
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    fn app() -> App<Connect4Client> {
        let client = Connect4Client::new("http://localhost:5000").unwrap();
        App::new(SessionController::new(client))
    }

    fn screen_text(app: &App<Connect4Client>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(90, 24)).unwrap();
        terminal
            .draw(|frame| {
                render(frame, app);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn setup_shows_ai_opponent() {
        let mut app = app();
        assert!(screen_text(&app).contains("Player 2"));

        app.form.mode = Mode::Ai;
        let text = screen_text(&app);
        assert!(text.contains("Computer"));
        assert!(text.contains("Difficulty"));
        assert!(text.contains("[ Start ]"));
    }

    #[test]
    fn game_screen_without_session_draws_no_board() {
        let mut app = app();
        app.screen = Screen::Game;

        let mut terminal = Terminal::new(TestBackend::new(90, 24)).unwrap();
        let mut layout = None;
        terminal
            .draw(|frame| layout = render(frame, &app))
            .unwrap();
        assert!(layout.is_none());
    }
}
