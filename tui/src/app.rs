use connect4_client::{
    AI_PLAYER, DEFAULT_PLAYER1, DEFAULT_PLAYER2, Difficulty, GameApi, Mode, SessionController,
    Transition,
};
use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use futures_util::StreamExt;
use ratatui::{Terminal, backend::Backend};
use tracing::{debug, info};

use crate::board_widget::BoardLayout;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Player1,
    Player2,
    Mode,
    Difficulty,
    Start,
}

/// The setup form shown before a game: names, mode and difficulty
#[derive(Debug, Clone)]
pub struct SetupForm {
    pub player1: String,
    pub player2: String,
    pub mode: Mode,
    pub difficulty: Difficulty,
    pub focus: Field,
}

impl Default for SetupForm {
    fn default() -> Self {
        Self {
            player1: DEFAULT_PLAYER1.to_string(),
            player2: DEFAULT_PLAYER2.to_string(),
            mode: Mode::default(),
            difficulty: Difficulty::default(),
            focus: Field::Player1,
        }
    }
}

impl SetupForm {
    /// Fields visible for the current mode, in tab order
    pub fn fields(&self) -> Vec<Field> {
        match self.mode {
            Mode::Pvp => vec![Field::Player1, Field::Player2, Field::Mode, Field::Start],
            Mode::Ai => vec![
                Field::Player1,
                Field::Mode,
                Field::Difficulty,
                Field::Start,
            ],
        }
    }

    pub fn focus_next(&mut self) {
        self.move_focus(1);
    }

    pub fn focus_previous(&mut self) {
        let len = self.fields().len();
        self.move_focus(len - 1);
    }

    fn move_focus(&mut self, step: usize) {
        let fields = self.fields();
        let current = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(current + step) % fields.len()];
    }

    /// Name shown for the second seat
    pub fn opponent(&self) -> &str {
        match self.mode {
            Mode::Ai => AI_PLAYER,
            Mode::Pvp => &self.player2,
        }
    }

    fn focused_name(&mut self) -> Option<&mut String> {
        match self.focus {
            Field::Player1 => Some(&mut self.player1),
            Field::Player2 => Some(&mut self.player2),
            _ => None,
        }
    }

    /// Returns true when the key asks to start the game
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_previous(),
            KeyCode::Backspace => {
                if let Some(name) = self.focused_name() {
                    name.pop();
                }
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')
                if matches!(self.focus, Field::Mode | Field::Difficulty) =>
            {
                self.toggle_focused();
            }
            KeyCode::Enter => match self.focus {
                Field::Start => return true,
                Field::Mode | Field::Difficulty => self.toggle_focused(),
                _ => self.focus_next(),
            },
            KeyCode::Char(c) => {
                if let Some(name) = self.focused_name() {
                    name.push(c);
                }
            }
            _ => {}
        }
        false
    }

    fn toggle_focused(&mut self) {
        match self.focus {
            Field::Mode => self.mode = self.mode.toggled(),
            Field::Difficulty => self.difficulty = self.difficulty.next(),
            _ => {}
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Setup,
    Game,
}

enum Step {
    Terminal(Option<std::io::Result<Event>>),
    Session(Transition),
}

pub struct App<A> {
    pub(crate) controller: SessionController<A>,
    pub(crate) form: SetupForm,
    pub(crate) screen: Screen,
    pub(crate) selected_column: usize,
    pub(crate) message: Option<String>,
    board_layout: Option<BoardLayout>,
    should_quit: bool,
}

impl<A: GameApi + 'static> App<A> {
    pub fn new(controller: SessionController<A>) -> Self {
        Self {
            controller,
            form: SetupForm::default(),
            screen: Screen::Setup,
            selected_column: 3,
            message: None,
            board_layout: None,
            should_quit: false,
        }
    }

    /// Main application loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        let mut events = EventStream::new();

        loop {
            let mut layout = None;
            terminal.draw(|frame| layout = crate::ui::render(frame, self))?;
            self.board_layout = layout;

            if self.should_quit {
                break;
            }

            let step = tokio::select! {
                event = events.next() => Step::Terminal(event),
                Some(transition) = self.controller.settle() => Step::Session(transition),
            };

            match step {
                Step::Terminal(Some(event)) => self.handle_event(event?),
                Step::Terminal(None) => break,
                Step::Session(transition) => self.handle_transition(transition),
            }
        }
        Ok(())
    }

    pub(crate) fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Setup => {
                if self.form.handle_key(key) {
                    self.start_game();
                }
            }
            Screen::Game => self.handle_game_key(key),
        }
    }

    fn handle_game_key(&mut self, key: KeyEvent) {
        let columns = self.columns();
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < columns {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.drop_piece(self.selected_column),
            KeyCode::Char(c @ '1'..='9') => {
                let column = c as usize - '1' as usize;
                self.selected_column = column.min(columns.saturating_sub(1));
                self.drop_piece(column);
            }
            KeyCode::Char('n') => self.start_game(),
            KeyCode::Char('r') => {
                if self.controller.resync() {
                    self.message = Some("Refreshing game state...".to_string());
                }
            }
            KeyCode::Char('s') => self.screen = Screen::Setup,
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.screen != Screen::Game || mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let (Some(layout), Some(view)) = (self.board_layout, self.controller.board_view()) else {
            return;
        };
        if let Some(column) = layout.column_at(&view, mouse.column, mouse.row) {
            self.selected_column = column;
            self.drop_piece(column);
        }
    }

    fn columns(&self) -> usize {
        self.controller.state().map_or(7, |state| state.columns())
    }

    fn drop_piece(&mut self, column: usize) {
        // Illegal moves are ignored by the controller; nothing to report
        if self.controller.submit_move(column) {
            debug!("Dropped a token in column {}", column);
            self.message = None;
        }
    }

    pub(crate) fn start_game(&mut self) {
        let form = &self.form;
        self.controller
            .begin_session(form.mode, &form.player1, &form.player2, form.difficulty);
        self.screen = Screen::Game;
        self.message = None;
    }

    pub(crate) fn handle_transition(&mut self, transition: Transition) {
        match transition {
            Transition::Started => {
                self.selected_column = self.columns() / 2;
                self.message = Some("New game started!".to_string());
            }
            Transition::Updated => {}
            Transition::Finished { winner } => {
                info!("Game finished, winner: {:?}", winner);
                self.message = Some(match winner {
                    Some(winner) => format!("{} wins! Press 'n' to play again.", winner),
                    None => "It's a draw! Press 'n' to play again.".to_string(),
                });
            }
            Transition::Stale => {}
            Transition::Failed(error) => {
                self.message = Some(format!("{} (press 'r' to retry)", error));
            }
        }
    }
}
