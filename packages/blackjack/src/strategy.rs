//! Hi-Lo card counting: a cheap alternative to the lookahead search.
//!
//! Instead of enumerating futures, the player keeps a running tally of the
//! cards seen so far, scales it by the decks left in the shoe and picks a
//! hit/stand threshold from the result.

use serde::{Deserialize, Serialize};

use crate::hand::calculate_hand_value;
use crate::{Card, Rank};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Hit,
    Stand,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Hit => "hit",
            Action::Stand => "stand",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hi-Lo tag: +1 for 2-6, 0 for 7-9, -1 for tens and aces.
pub fn hilo_value(rank: Rank) -> i32 {
    match rank {
        Rank::Two | Rank::Three | Rank::Four | Rank::Five | Rank::Six => 1,
        Rank::Seven | Rank::Eight | Rank::Nine => 0,
        Rank::Ten | Rank::Jack | Rank::Queen | Rank::King | Rank::Ace => -1,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningCount(i32);

impl RunningCount {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn observe(&mut self, card: &Card) {
        self.0 += hilo_value(card.rank);
    }

    pub fn observe_all<'a>(&mut self, cards: impl IntoIterator<Item = &'a Card>) {
        for card in cards {
            self.observe(card);
        }
    }

    pub fn value(&self) -> i32 {
        self.0
    }

    /// True count for a shoe with `cards_left` undealt cards.
    pub fn true_count(&self, cards_left: usize) -> f64 {
        true_count(self.0, remaining_decks(cards_left))
    }
}

/// Whole decks left in the shoe.
pub fn remaining_decks(cards_left: usize) -> usize {
    cards_left / 52
}

/// Running count per remaining deck. With less than a full deck left the
/// running count is used as is.
pub fn true_count(running_count: i32, remaining_decks: usize) -> f64 {
    if remaining_decks == 0 {
        running_count as f64
    } else {
        running_count as f64 / remaining_decks as f64
    }
}

/// Pick hit or stand from the true count.
pub fn recommend_hilo_action(
    player_cards: &[Card],
    dealer_up_card: &Card,
    true_count: f64,
) -> Action {
    let player_value = calculate_hand_value(player_cards);
    let dealer_weak = matches!(
        dealer_up_card.rank,
        Rank::Two | Rank::Three | Rank::Four | Rank::Five | Rank::Six
    );

    let stand = if true_count >= 2.0 {
        // Rich in tens: stand early
        player_value >= 12
    } else if true_count >= 1.0 {
        player_value > 15
    } else {
        player_value >= 13 || (player_value >= 12 && dealer_weak)
    };

    if stand {
        Action::Stand
    } else {
        Action::Hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(list: &[&str]) -> Vec<Card> {
        list.iter().map(|s| s.parse().unwrap()).collect()
    }

    fn c(s: &str) -> Card {
        s.parse().unwrap()
    }

    #[test]
    fn test_hilo_values() {
        assert_eq!(hilo_value(Rank::Two), 1);
        assert_eq!(hilo_value(Rank::Six), 1);
        assert_eq!(hilo_value(Rank::Seven), 0);
        assert_eq!(hilo_value(Rank::Nine), 0);
        assert_eq!(hilo_value(Rank::Ten), -1);
        assert_eq!(hilo_value(Rank::King), -1);
        assert_eq!(hilo_value(Rank::Ace), -1);
    }

    #[test]
    fn test_full_deck_counts_to_zero() {
        let mut count = RunningCount::new();
        count.observe_all(&crate::shuffle::new_deck());
        assert_eq!(count.value(), 0);
    }

    #[test]
    fn test_running_count_accumulates() {
        let mut count = RunningCount::new();
        count.observe_all(&cards(&["2H", "5S", "KC", "8D", "3C"]));
        assert_eq!(count.value(), 2);
    }

    #[test]
    fn test_true_count_divides_by_whole_decks() {
        assert_eq!(true_count(6, 3), 2.0);
        assert_eq!(true_count(-3, 2), -1.5);
        assert_eq!(true_count(4, 0), 4.0);
        assert_eq!(remaining_decks(103), 1);
        assert_eq!(remaining_decks(104), 2);
    }

    #[test]
    fn test_high_count_stands_on_12() {
        assert_eq!(recommend_hilo_action(&cards(&["10H", "2S"]), &c("10C"), 2.5), Action::Stand);
        assert_eq!(recommend_hilo_action(&cards(&["9H", "2S"]), &c("10C"), 2.5), Action::Hit);
    }

    #[test]
    fn test_mild_count_hits_through_15() {
        assert_eq!(recommend_hilo_action(&cards(&["10H", "5S"]), &c("6C"), 1.0), Action::Hit);
        assert_eq!(recommend_hilo_action(&cards(&["10H", "6S"]), &c("6C"), 1.0), Action::Stand);
    }

    #[test]
    fn test_neutral_count_uses_dealer_up_card() {
        assert_eq!(recommend_hilo_action(&cards(&["10H", "2S"]), &c("4C"), 0.0), Action::Stand);
        assert_eq!(recommend_hilo_action(&cards(&["10H", "2S"]), &c("9C"), 0.0), Action::Hit);
        assert_eq!(recommend_hilo_action(&cards(&["10H", "3S"]), &c("9C"), -1.0), Action::Stand);
    }

    #[test]
    fn test_action_display() {
        assert_eq!(Action::Hit.to_string(), "hit");
        assert_eq!(Action::Stand.to_string(), "stand");
    }
}
