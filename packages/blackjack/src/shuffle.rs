//! Riffle shuffle of a multi-deck pool.
//!
//! Each pass cuts the pool into two halves and interleaves them by flipping a
//! fair coin for every card, the way a human riffle drops cards from either
//! hand. The result is not a uniform permutation: a few passes still leave
//! local runs from the original halves. Five passes are used by default.

use rand::Rng;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::{Card, Error, Rank, Suit};

pub const DEFAULT_SHUFFLE_PASSES: u8 = 5;

/// One ordered 52-card deck, suit by suit, Ace through King.
pub fn new_deck() -> Vec<Card> {
    Suit::ALL
        .iter()
        .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| Card::new(rank, suit)))
        .collect()
}

/// `num_decks` ordered decks concatenated.
pub fn new_shoe(num_decks: u8) -> Result<Vec<Card>, Error> {
    if num_decks == 0 {
        return Err(Error::InvalidDeckCount(num_decks));
    }
    let deck = new_deck();
    let mut shoe = Vec::with_capacity(deck.len() * num_decks as usize);
    for _ in 0..num_decks {
        shoe.extend_from_slice(&deck);
    }
    Ok(shoe)
}

/// A single halve-and-interleave pass.
///
/// The first half holds `n / 2` cards and the second the rest, both in
/// original order. Output length always equals input length.
pub fn riffle<T: Clone, R: Rng>(rng: &mut R, pool: &[T]) -> Vec<T> {
    let (left, right) = pool.split_at(pool.len() / 2);
    let mut out = Vec::with_capacity(pool.len());
    let (mut i, mut j) = (0, 0);

    while i < left.len() || j < right.len() {
        let take_left = if i == left.len() {
            false
        } else if j == right.len() {
            true
        } else {
            rng.gen_bool(0.5)
        };

        if take_left {
            out.push(left[i].clone());
            i += 1;
        } else {
            out.push(right[j].clone());
            j += 1;
        }
    }

    out
}

/// Apply `passes` riffle passes using the supplied randomness source.
pub fn shuffle_with_rng<T: Clone, R: Rng>(rng: &mut R, pool: &[T], passes: u8) -> Vec<T> {
    let mut deck = pool.to_vec();
    for _ in 0..passes {
        deck = riffle(rng, &deck);
    }
    log::debug!("Shuffled {} cards ({passes} riffle passes)", deck.len());
    deck
}

/// Shuffle with a freshly seeded generator and the default pass count.
pub fn shuffle_pool(pool: &[Card]) -> Vec<Card> {
    let mut rng = ChaCha8Rng::from_entropy();
    shuffle_with_rng(&mut rng, pool, DEFAULT_SHUFFLE_PASSES)
}
