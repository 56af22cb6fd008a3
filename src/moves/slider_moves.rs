//! Occupancy-aware ray attacks for bishops, rooks and queens.
//!
//! Rays stop at (and include) the first occupied square; whether that square
//! is a capture or a friendly blocker is decided by the caller.

use crate::game_state::chess_types::{
    Square, ALL_DIRECTIONS, DIAGONAL_DIRECTIONS, ORTHOGONAL_DIRECTIONS,
};

#[inline]
pub fn bishop_attacks(square: Square, occupancy: u64) -> u64 {
    slider_attacks(square, &DIAGONAL_DIRECTIONS, occupancy)
}

#[inline]
pub fn rook_attacks(square: Square, occupancy: u64) -> u64 {
    slider_attacks(square, &ORTHOGONAL_DIRECTIONS, occupancy)
}

#[inline]
pub fn queen_attacks(square: Square, occupancy: u64) -> u64 {
    slider_attacks(square, &ALL_DIRECTIONS, occupancy)
}

pub fn slider_attacks(square: Square, directions: &[(i8, i8)], occupancy: u64) -> u64 {
    directions
        .iter()
        .fold(0u64, |acc, &(df, dr)| acc | trace_ray(square, df, dr, occupancy))
}

fn trace_ray(square: Square, file_step: i8, rank_step: i8, occupancy: u64) -> u64 {
    let mut attacks = 0u64;
    let mut cursor = square.offset(file_step, rank_step);

    while let Some(target) = cursor {
        attacks |= target.bit();
        if occupancy & target.bit() != 0 {
            break;
        }
        cursor = target.offset(file_step, rank_step);
    }

    attacks
}

/// Squares strictly between `a` and `b` when they share a rank, file or
/// diagonal; zero otherwise.
pub fn squares_between(a: Square, b: Square) -> u64 {
    let df = b.file() as i8 - a.file() as i8;
    let dr = b.rank() as i8 - a.rank() as i8;
    let aligned = (df == 0) != (dr == 0) || (df != 0 && df.abs() == dr.abs());
    if !aligned {
        return 0;
    }

    let step_f = df.signum();
    let step_r = dr.signum();
    let mut between = 0u64;
    let mut cursor = a.offset(step_f, step_r);
    while let Some(sq) = cursor {
        if sq == b {
            break;
        }
        between |= sq.bit();
        cursor = sq.offset(step_f, step_r);
    }
    between
}
