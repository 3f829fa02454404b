use crate::cli::commands::{Cli, Commands};
use crate::cli::output::{BoardJson, format_board};
use crate::ops::Board;

/// Run a non-interactive subcommand against the starting board
pub fn dispatch(cli: &Cli, board: &Board) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Some(Commands::Show) => cmd_show(board, cli.json),
        None => Ok(()),
    }
}

pub fn cmd_show(board: &Board, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(&BoardJson::new(board))?);
    } else {
        for line in format_board(board) {
            println!("{}", line);
        }
    }
    Ok(())
}
