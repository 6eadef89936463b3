//! Serve command - run the JSON HTTP API.

use colored::Colorize;
use invivodb::{AnimalRegistry, InvivoConfig};

use crate::server::{app, state::AppState};

pub fn run(config: InvivoConfig, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let database = config.database_path.clone();
    let registry = AnimalRegistry::open(config)?;
    let state = AppState::new(registry);

    let url = format!("http://localhost:{}", port);
    println!();
    println!(
        "{} {}",
        "Starting invivoDB API at".cyan().bold(),
        url.white().bold()
    );
    println!();
    println!("  Database: {}", database.display());
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(app::run_server(state, port))
}
