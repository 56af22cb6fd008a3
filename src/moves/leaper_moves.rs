//! Precomputed attack tables for the leaping pieces (knight and king).
//!
//! Tables are built at compile time from the offset lists in
//! `chess_types`, one bitboard per origin square.

use crate::game_state::chess_types::{Square, KING_OFFSETS, KNIGHT_OFFSETS};

pub const KNIGHT_ATTACKS: [u64; 64] = generate_leaper_table(&KNIGHT_OFFSETS);
pub const KING_ATTACKS: [u64; 64] = generate_leaper_table(&KING_OFFSETS);

#[inline]
pub const fn knight_attacks(square: Square) -> u64 {
    KNIGHT_ATTACKS[square.index() as usize]
}

#[inline]
pub const fn king_attacks(square: Square) -> u64 {
    KING_ATTACKS[square.index() as usize]
}

/// Targets of a leaper with the given offsets. The knight and king offset
/// lists hit the precomputed tables; any other list is traced directly.
pub fn leaper_attacks(square: Square, offsets: &[(i8, i8)]) -> u64 {
    if *offsets == KNIGHT_OFFSETS[..] {
        knight_attacks(square)
    } else if *offsets == KING_OFFSETS[..] {
        king_attacks(square)
    } else {
        leaper_mask(square.index() as usize, offsets)
    }
}

const fn leaper_mask(sq: usize, offsets: &[(i8, i8)]) -> u64 {
    let file = (sq % 8) as i8;
    let rank = (sq / 8) as i8;
    let mut attacks = 0u64;

    let mut i = 0usize;
    while i < offsets.len() {
        let (df, dr) = offsets[i];
        let f = file + df;
        let r = rank + dr;
        if f >= 0 && f < 8 && r >= 0 && r < 8 {
            attacks |= 1u64 << (r as u32 * 8 + f as u32);
        }
        i += 1;
    }

    attacks
}

const fn generate_leaper_table(offsets: &[(i8, i8)]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        table[sq] = leaper_mask(sq, offsets);
        sq += 1;
    }

    table
}
