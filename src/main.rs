use clap::Parser;
use taskboard::cli::commands::Cli;
use taskboard::cli::handlers;
use taskboard::io::config_io::load_config;
use taskboard::io::logging::init_logging;
use taskboard::ops::Board;

fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = init_logging(&config.log, cli.log_file.as_deref()) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }

    // Seeds go through the same validation as typed names
    let mut board = Board::new();
    for name in &cli.tasks {
        board.add_task(name);
    }

    let result = match cli.command {
        // No subcommand → launch TUI
        None => taskboard::tui::run(board, &config),
        Some(_) => handlers::dispatch(&cli, &board),
    };
    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
