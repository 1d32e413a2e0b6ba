//! Stonehenge command-line player.
//!
//! ## Usage
//!
//! - `stonehenge` - Play side length 2, human (p1) against iterative minimax (p2)
//! - `stonehenge --side-length 3 --p1 rough-outcome --p2 rough-outcome` - Watch two bots
//! - `stonehenge rules` - Print the rules
//!
//! Set `RUST_LOG=debug` to see search statistics.

use std::io::{self, BufRead, Write};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use log::{info, warn};

use stonehenge::board::Player;
use stonehenge::game::{Game, StonehengeGame};
use stonehenge::state::Move;
use stonehenge::strategy::{
    interactive_strategy, minimax_iterative_strategy, minimax_recursive_strategy,
    rough_outcome_strategy,
};

/// Stonehenge: claim cells, capture ley-lines
#[derive(Parser)]
#[command(name = "stonehenge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Side length of the board (1 to 5)
    #[arg(long, default_value_t = 2)]
    side_length: usize,

    /// Strategy for player 1
    #[arg(long, value_enum, default_value_t = StrategyKind::Interactive)]
    p1: StrategyKind,

    /// Strategy for player 2
    #[arg(long, value_enum, default_value_t = StrategyKind::MinimaxIterative)]
    p2: StrategyKind,

    /// Let player 2 move first
    #[arg(long)]
    p2_starts: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the rules of the game
    Rules,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum StrategyKind {
    Interactive,
    RoughOutcome,
    MinimaxRecursive,
    MinimaxIterative,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Rules) => {
            println!("{}", StonehengeGame::instructions());
            Ok(())
        }
        None => {
            let mut game = StonehengeGame::new(!cli.p2_starts, cli.side_length)
                .context("cannot start game")?;
            let stdin = io::stdin();
            play_game(&mut game, [cli.p1, cli.p2], &mut stdin.lock(), &mut io::stdout())
        }
    }
}

/// Alternate the two strategies until the game is over, printing the board
/// after every move.
fn play_game<R: BufRead, W: Write>(
    game: &mut StonehengeGame,
    strategies: [StrategyKind; 2],
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<()> {
    writeln!(output, "{}", game.current_state())?;

    while !game.is_over(game.current_state()) {
        let player = game.current_state().current_player();
        let kind = match player {
            Player::P1 => strategies[0],
            Player::P2 => strategies[1],
        };
        let mv = choose_move(game, kind, input, output)?;

        match game.apply(mv) {
            Ok(()) => {
                info!("{player} played {mv}");
                writeln!(output, "{player} plays {mv}\n")?;
                writeln!(output, "{}", game.current_state())?;
            }
            Err(err) if kind == StrategyKind::Interactive => {
                warn!("rejected {mv} from {player}");
                writeln!(output, "{err}")?;
            }
            Err(err) => return Err(err).context(format!("{kind:?} strategy failed")),
        }
    }

    match game.winner() {
        Some(player) => writeln!(output, "{player} wins!")?,
        None => writeln!(output, "The game ended without a winner.")?,
    }
    Ok(())
}

fn choose_move<R: BufRead, W: Write>(
    game: &StonehengeGame,
    kind: StrategyKind,
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<Move> {
    let choice = match kind {
        StrategyKind::Interactive => {
            return interactive_strategy(game, input, output).context("no move entered");
        }
        StrategyKind::RoughOutcome => rough_outcome_strategy(game),
        StrategyKind::MinimaxRecursive => minimax_recursive_strategy(game),
        StrategyKind::MinimaxIterative => minimax_iterative_strategy(game),
    };
    match choice {
        Some(mv) => Ok(mv),
        None => bail!("{kind:?} strategy found no move"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["stonehenge"]);
        assert_eq!(cli.side_length, 2);
        assert_eq!(cli.p1, StrategyKind::Interactive);
        assert_eq!(cli.p2, StrategyKind::MinimaxIterative);
        assert!(!cli.p2_starts);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_strategies() {
        let cli = Cli::parse_from([
            "stonehenge",
            "--side-length",
            "3",
            "--p1",
            "rough-outcome",
            "--p2",
            "minimax-recursive",
            "--p2-starts",
        ]);
        assert_eq!(cli.side_length, 3);
        assert_eq!(cli.p1, StrategyKind::RoughOutcome);
        assert_eq!(cli.p2, StrategyKind::MinimaxRecursive);
        assert!(cli.p2_starts);
    }

    #[test]
    fn test_bots_play_to_the_end() {
        let mut game = StonehengeGame::new(true, 2).unwrap();
        let mut output = Vec::new();
        play_game(
            &mut game,
            [StrategyKind::MinimaxIterative, StrategyKind::RoughOutcome],
            &mut io::empty(),
            &mut output,
        )
        .unwrap();
        // p1 has a forced win on the side-2 board
        assert_eq!(game.winner(), Some(Player::P1));
        assert!(String::from_utf8(output).unwrap().ends_with("p1 wins!\n"));
    }

    #[test]
    fn test_interactive_reprompts_on_invalid_move() {
        let mut game = StonehengeGame::new(true, 1).unwrap();
        let mut input = "?\nZ\nB\n".as_bytes();
        let mut output = Vec::new();
        play_game(
            &mut game,
            [StrategyKind::Interactive, StrategyKind::Interactive],
            &mut input,
            &mut output,
        )
        .unwrap();
        assert_eq!(game.current_state().claimed_count(Player::P1), 1);
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("invalid move: <invalid>"));
        assert!(text.contains("invalid move: Z"));
        assert!(text.contains("p1 plays B"));
    }

    #[test]
    fn test_interactive_eof_is_an_error() {
        let mut game = StonehengeGame::new(true, 2).unwrap();
        let result = play_game(
            &mut game,
            [StrategyKind::Interactive, StrategyKind::RoughOutcome],
            &mut io::empty(),
            &mut io::sink(),
        );
        assert!(result.is_err());
    }
}
