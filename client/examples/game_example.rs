use connect4_client::{
    AI_PLAYER, ClientConfig, Connect4Client, Difficulty, Mode, SessionController, Transition,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Create a high-level session against the configured server
    let config = ClientConfig::from_env();
    let mut session = SessionController::new(Connect4Client::new(&config.server_url)?);

    // Start a game against the medium AI
    session.begin_session(Mode::Ai, "Alice", AI_PLAYER, Difficulty::Medium);
    if let Some(Transition::Failed(error)) = session.settle().await {
        return Err(error.into());
    }
    println!(
        "Game started! Game ID: {}",
        session.session().map_or("?", |s| s.id.as_str())
    );

    // Alice cycles through the columns; the controller plays the AI's turns
    let mut column = 3;
    loop {
        if let Some(state) = session.state() {
            if state.game_over {
                break;
            }
            column = (column + 1) % state.columns().max(1);
        }

        if !session.submit_move(column) && !session.is_awaiting_response() {
            println!("Move in column {} was not accepted", column);
            break;
        }

        while session.is_awaiting_response() {
            match session.settle().await {
                Some(Transition::Failed(error)) => return Err(error.into()),
                Some(Transition::Finished { winner }) => {
                    match winner {
                        Some(winner) => println!("🎉 {} won!", winner),
                        None => println!("Draw!"),
                    }
                    break;
                }
                Some(_) => {}
                None => break,
            }
        }

        if let Some(board) = session.board_view() {
            println!("{}", board);
        }
    }

    Ok(())
}
