use connect4_client::{
    BoardView, ClientConfig, Connect4Client, Difficulty, GameApi, Mode, StartRequest,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Create a client connecting to the configured server
    let config = ClientConfig::from_env();
    let client = Connect4Client::new(&config.server_url)?;

    // Create a new two player game
    let request = StartRequest::new(Mode::Pvp, "Alice", "Bob", Difficulty::Hard);
    let started = client.start(request).await?;
    println!("Created game with ID: {}", started.game_id);
    println!("{} starts", started.state.current_player);

    // Alice drops a token in the middle column
    let response = client.make_move(&started.game_id, 3).await?;
    if let Some(result) = &response.result {
        println!("Server says: {}", result);
    }
    println!("{} to play", response.state.current_player);

    // Bob stacks on top of it
    client.make_move(&started.game_id, 3).await?;

    // Read the snapshot back and print it
    let state = client.fetch_state(&started.game_id).await?;
    print!("{}", BoardView::from_state(&state));
    for (player, seconds) in &state.move_times {
        println!(
            "  {} ({}) - {:.2}s",
            player,
            state.symbol_of(player).unwrap_or("?"),
            seconds
        );
    }

    Ok(())
}
