use std::io::{self, BufRead};

use crate::board::{Board, Player, ALL_HEXES, NUM_HEXES};
use crate::evaluation::evaluate;
use crate::search::find_best_move;
use crate::types::SearchConfig;

/// Text-command shell around the engine. One command per line on
/// stdin, responses on stdout.
///
///   position <string>   load a position in the h.../p1.../p2.../turn
///                       codec
///   startpos            reset to the initial position
///   go [depth N] [time MS] [verbose]
///   moves               list legal moves for the side to move
///   eval                static evaluation of the current position
///   print | d           board dump
///   save                emit the current position string
///   quit
pub fn run() {
    let stdin = io::stdin();
    let mut board = Board::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();

        match tokens[0] {
            "position" => {
                if tokens.len() >= 2 {
                    board.load_position(tokens[1]);
                }
            }
            "startpos" | "newgame" => {
                board = Board::new();
            }
            "go" => {
                let config = parse_go(&tokens);
                let result = find_best_move(&mut board, &config);
                match result.best_move {
                    Some(mv) => println!(
                        "bestmove {} score {} depth {} nodes {} time {}ms tt {}/{}",
                        mv,
                        result.score,
                        result.depth,
                        result.nodes_searched,
                        result.time_ms,
                        result.tt_hits,
                        result.tt_misses
                    ),
                    None => println!("bestmove none score {}", result.score),
                }
                if result.timeout {
                    println!("timeout at depth {}", result.depth + 1);
                }
            }
            "moves" => {
                let moves = board.valid_moves();
                let listing: Vec<String> = moves.iter().map(|mv| mv.to_string()).collect();
                println!("{} moves: {}", moves.len(), listing.join(" "));
            }
            "eval" => {
                println!(
                    "P1={} P2={} eval={} ({} to move)",
                    board.score(Player::P1),
                    board.score(Player::P2),
                    evaluate(&board),
                    board.side_to_move()
                );
            }
            "print" | "d" => {
                print!("{}", render_board(&board));
            }
            "save" => {
                println!("{}", board.save_position());
            }
            "quit" => break,
            _ => {}
        }
    }
}

/// parse `go [depth N] [time MS] [verbose]`, defaults from SearchConfig.
fn parse_go(tokens: &[&str]) -> SearchConfig {
    let mut config = SearchConfig::default();
    let mut i = 1;

    while i < tokens.len() {
        match tokens[i] {
            "depth" => {
                i += 1;
                if i < tokens.len() {
                    if let Ok(d) = tokens[i].parse() {
                        config.max_depth = d;
                    }
                }
            }
            "time" => {
                i += 1;
                if i < tokens.len() {
                    if let Ok(ms) = tokens[i].parse() {
                        config.time_limit_ms = ms;
                    }
                }
            }
            "verbose" => {
                config.verbose = true;
            }
            _ => {}
        }
        i += 1;
    }

    config
}

/// multi-line board dump in the style of the `print` command.
fn render_board(board: &Board) -> String {
    let mut out = String::new();

    out.push_str("=== Hexuki Board ===\n");
    out.push_str(&format!(
        "Occupied: {}/{}, {} to move\n",
        board.occupied().popcnt(),
        NUM_HEXES,
        board.side_to_move()
    ));
    out.push_str(&format!(
        "Scores: P1={} P2={}\n",
        board.score(Player::P1),
        board.score(Player::P2)
    ));

    for hex in ALL_HEXES {
        if board.is_occupied(hex) {
            out.push_str(&format!(
                "  {} (row={}, col={}): value={}\n",
                hex,
                hex.row(),
                hex.col(),
                board.tile_value(hex)
            ));
        }
    }

    let p1: Vec<String> = board.available_tiles(Player::P1).values().map(|v| v.to_string()).collect();
    let p2: Vec<String> = board.available_tiles(Player::P2).values().map(|v| v.to_string()).collect();
    out.push_str(&format!("P1 tiles: [{}]\n", p1.join(", ")));
    out.push_str(&format!("P2 tiles: [{}]\n", p2.join(", ")));

    out
}
