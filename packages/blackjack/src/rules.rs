use serde::{Deserialize, Serialize};

use crate::advisor::DEFAULT_SEARCH_DEPTH;
use crate::hand::{calculate_hand_value, is_soft_hand};
use crate::shuffle::DEFAULT_SHUFFLE_PASSES;
use crate::{Card, Error};

/// Dealer stops drawing at this total (subject to the soft 17 rule).
pub const DEALER_STAND_THRESHOLD: u16 = 17;

/// Configurable blackjack game rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRules {
    /// Number of decks in the shoe
    pub num_decks: u8,

    /// Dealer hits on soft 17
    pub dealer_hits_soft_17: bool,

    /// Plies explored by the lookahead search
    pub search_depth: u8,

    /// Riffle passes applied when shuffling the shoe
    pub shuffle_passes: u8,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            num_decks: 1,
            dealer_hits_soft_17: false,
            search_depth: DEFAULT_SEARCH_DEPTH,
            shuffle_passes: DEFAULT_SHUFFLE_PASSES,
        }
    }
}

impl GameRules {
    /// Single deck, dealer hits soft 17
    pub fn single_deck() -> Self {
        Self {
            dealer_hits_soft_17: true,
            ..Self::default()
        }
    }

    /// Multi-deck shoe, dealer stands on all 17s
    pub fn shoe(num_decks: u8) -> Self {
        Self {
            num_decks,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.num_decks == 0 {
            return Err(Error::InvalidDeckCount(self.num_decks));
        }
        Ok(())
    }

    /// Dealer drawing policy. The lookahead search and the real dealer loop
    /// both go through this so they always agree.
    pub fn dealer_should_hit(&self, dealer_cards: &[Card]) -> bool {
        let value = calculate_hand_value(dealer_cards);
        if value >= DEALER_STAND_THRESHOLD {
            value == DEALER_STAND_THRESHOLD
                && self.dealer_hits_soft_17
                && is_soft_hand(dealer_cards)
        } else {
            true
        }
    }
}
