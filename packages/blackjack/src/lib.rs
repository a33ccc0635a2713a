//! Blackjack hit/stand advisor.
//!
//! Cards and hand values, a riffle shuffler, a bounded-depth search over
//! future deals and the recommendation engine built on top of it, plus a
//! single-player round driver and a Hi-Lo counting baseline.

mod advisor;
mod card;
mod error;
mod game_state;
mod hand;
mod rules;
mod search;
mod shuffle;
mod simulation;
mod strategy;

pub use advisor::{
    choose_action, recommend_action, Advisor, Recommendation, DEFAULT_SEARCH_DEPTH,
};
pub use card::{Card, Rank, Suit, ValueTable};
pub use error::Error;
pub use game_state::{GamePhase, GameState, HandOutcome};
pub use hand::{
    calculate_hand_value, calculate_hand_value as hand_value, is_blackjack, is_busted,
    is_soft_hand, Hand,
};
pub use rules::{GameRules, DEALER_STAND_THRESHOLD};
pub use search::{resolve, search, Outcome, Search, SearchState, Step, Tally, Traversal, Turn};
pub use shuffle::{
    new_deck, new_shoe, riffle, shuffle_pool, shuffle_with_rng, DEFAULT_SHUFFLE_PASSES,
};
pub use simulation::{
    play_round, simulate, HiLoStrategy, SearchStrategy, SimulationReport, Strategy,
};
pub use strategy::{
    hilo_value, recommend_hilo_action, remaining_decks, true_count, Action, RunningCount,
};
