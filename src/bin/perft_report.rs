//! Perft breakdown runner for checking move generation by hand.
//!
//! Usage:
//! `cargo run --release --bin perft_report`
//! `cargo run --release --bin perft_report -- --depth 4 --fen "<fen>"`
//!
//! Set `RUST_LOG=debug` for per-move tracing output.

use std::time::Instant;

use tracing::info;
use tracing_subscriber::EnvFilter;

use plum_rules::game_state::chess_rules::STARTING_POSITION_FEN;
use plum_rules::game_state::position::Position;
use plum_rules::move_generation::legal_move_generator::LegalMoveGenerator;
use plum_rules::move_generation::move_generator::MoveGenerator;
use plum_rules::move_generation::perft::{perft_divide, PerftCounts};
use plum_rules::utils::san::encode_san;

fn arg_value(flag: &str) -> Option<String> {
    let args: Vec<String> = std::env::args().collect();
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|i| args.get(i + 1).cloned())
}

fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let depth = arg_value("--depth")
        .and_then(|v| v.parse::<u8>().ok())
        .unwrap_or(3)
        .max(1);
    let fen = arg_value("--fen").unwrap_or_else(|| STARTING_POSITION_FEN.to_owned());
    let position = Position::from_fen(&fen).map_err(|e| e.to_string())?;

    info!(depth, fen = %fen, "perft run");
    println!("{}", position.board);

    let generator = LegalMoveGenerator;
    let root_moves = generator.generate_legal_moves(&position);
    let started = Instant::now();
    let divided = perft_divide(&generator, &position, depth);
    let elapsed = started.elapsed();

    let mut total = PerftCounts::default();
    for (generated, counts) in &divided {
        println!("{:<8} {}", encode_san(generated, &root_moves), counts.nodes);
        total.merge(*counts);
    }

    let nps = (total.nodes as f64 / elapsed.as_secs_f64().max(1e-9)) as u64;
    println!(
        "depth={depth} nodes={} captures={} ep={} castles={} promotions={} checks={} mates={} elapsed_ms={} nps={nps}",
        total.nodes,
        total.captures,
        total.en_passant,
        total.castles,
        total.promotions,
        total.checks,
        total.checkmates,
        elapsed.as_millis(),
    );
    Ok(())
}
