use std::fmt;

use crate::{Card, ValueTable};
use serde::{Deserialize, Serialize};

/// Calculate the value of a blackjack hand
pub fn calculate_hand_value(cards: &[Card]) -> u16 {
    ValueTable::STANDARD.hand_value(cards)
}

/// Total with every ace counted as 1
fn hard_total(cards: &[Card]) -> u16 {
    cards
        .iter()
        .map(|c| if c.is_ace() { 1 } else { c.value() as u16 })
        .sum()
}

/// Check if a hand is soft (has an ace counted as 11)
pub fn is_soft_hand(cards: &[Card]) -> bool {
    cards.iter().any(Card::is_ace) && hard_total(cards) + ValueTable::ACE_DEMOTION <= 21
}

/// Check if a hand is busted
pub fn is_busted(cards: &[Card]) -> bool {
    calculate_hand_value(cards) > 21
}

/// Check if a hand is blackjack (21 with 2 cards)
pub fn is_blackjack(cards: &[Card]) -> bool {
    cards.len() == 2 && calculate_hand_value(cards) == 21
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    pub cards: Vec<Card>,
    pub stood: bool,
}

impl Hand {
    pub fn new() -> Self {
        Self {
            cards: Vec::new(),
            stood: false,
        }
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self {
            cards,
            stood: false,
        }
    }

    pub fn value(&self) -> u16 {
        calculate_hand_value(&self.cards)
    }

    pub fn is_soft(&self) -> bool {
        is_soft_hand(&self.cards)
    }

    pub fn is_busted(&self) -> bool {
        is_busted(&self.cards)
    }

    pub fn is_blackjack(&self) -> bool {
        is_blackjack(&self.cards)
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{card}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Rank, Suit};

    fn c(s: &str) -> Card {
        s.parse().unwrap()
    }

    fn cards(list: &[&str]) -> Vec<Card> {
        list.iter().map(|s| c(s)).collect()
    }

    #[test]
    fn test_calculate_hand_value_simple() {
        assert_eq!(calculate_hand_value(&cards(&["2H", "3S"])), 5);
    }

    #[test]
    fn test_calculate_hand_value_with_face_cards() {
        assert_eq!(calculate_hand_value(&cards(&["KH", "QS"])), 20);
    }

    #[test]
    fn test_calculate_hand_value_blackjack() {
        assert_eq!(calculate_hand_value(&cards(&["AH", "KS"])), 21);
    }

    #[test]
    fn test_calculate_hand_value_soft_ace() {
        assert_eq!(calculate_hand_value(&cards(&["AH", "6S"])), 17); // Ace as 11
    }

    #[test]
    fn test_calculate_hand_value_hard_ace() {
        assert_eq!(calculate_hand_value(&cards(&["AH", "6S", "9C"])), 16); // Ace as 1
    }

    #[test]
    fn test_calculate_hand_value_multiple_aces() {
        // One ace as 11, one as 1
        assert_eq!(calculate_hand_value(&cards(&["AH", "AS", "9C"])), 21);
    }

    #[test]
    fn test_calculate_hand_value_reports_true_bust_total() {
        // Every ace demoted and still over 21.
        assert_eq!(calculate_hand_value(&cards(&["AH", "AS", "KC", "QD", "5H"])), 27);
        assert_eq!(calculate_hand_value(&cards(&["KC", "QD", "5H"])), 25);
    }

    #[test]
    fn test_calculate_hand_value_empty() {
        assert_eq!(calculate_hand_value(&[]), 0);
    }

    #[test]
    fn test_no_aces_is_plain_sum() {
        for a in Rank::ALL.into_iter().filter(|r| *r != Rank::Ace) {
            for b in Rank::ALL.into_iter().filter(|r| *r != Rank::Ace) {
                let hand = [Card::new(a, Suit::Spades), Card::new(b, Suit::Hearts)];
                let sum = hand.iter().map(|c| c.value() as u16).sum::<u16>();
                assert_eq!(calculate_hand_value(&hand), sum);
            }
        }
    }

    #[test]
    fn test_aces_give_best_total_within_bounds() {
        // Brute force over every way of counting each ace as 1 or 11.
        let fillers = [Rank::Two, Rank::Five, Rank::Nine, Rank::King];
        for aces in 0..=4usize {
            for filler in fillers {
                for fillers_len in 0..=3usize {
                    let filler_card = Card::new(filler, Suit::Hearts);
                    let mut hand: Vec<Card> = vec![Card::new(Rank::Ace, Suit::Clubs); aces];
                    hand.extend(std::iter::repeat(filler_card).take(fillers_len));
                    let base = fillers_len as u16 * filler_card.value() as u16;
                    let totals: Vec<u16> = (0..=aces as u16)
                        .map(|high| base + aces as u16 + 10 * high)
                        .collect();
                    let expected = totals
                        .iter()
                        .copied()
                        .filter(|t| *t <= 21)
                        .max()
                        .unwrap_or_else(|| *totals.iter().min().unwrap());

                    let value = calculate_hand_value(&hand);
                    assert_eq!(value, expected, "aces={aces} filler={filler:?} x{fillers_len}");
                    assert!(value <= 13 * hand.len() as u16);
                    assert!(value >= hand.len() as u16);
                }
            }
        }
    }

    #[test]
    fn test_is_busted() {
        assert!(is_busted(&cards(&["KH", "QS", "5C"])));
    }

    #[test]
    fn test_not_busted() {
        assert!(!is_busted(&cards(&["KH", "QS"])));
    }

    #[test]
    fn test_is_blackjack() {
        assert!(is_blackjack(&cards(&["AH", "KS"])));
    }

    #[test]
    fn test_not_blackjack_three_cards() {
        assert!(!is_blackjack(&cards(&["7H", "7S", "7C"])));
    }

    #[test]
    fn test_is_soft_hand() {
        assert!(is_soft_hand(&cards(&["AH", "6S"])));
    }

    #[test]
    fn test_soft_hand_with_two_aces() {
        assert!(is_soft_hand(&cards(&["AH", "AS", "5C"])));
    }

    #[test]
    fn test_not_soft_hand_hard_ace() {
        assert!(!is_soft_hand(&cards(&["AH", "6S", "9C"])));
    }

    #[test]
    fn test_not_soft_hand_no_ace() {
        assert!(!is_soft_hand(&cards(&["KH", "QS"])));
    }

    #[test]
    fn test_hand_struct_value() {
        let mut hand = Hand::new();
        hand.add_card(c("KH"));
        hand.add_card(c("7S"));
        assert_eq!(hand.value(), 17);
        assert_eq!(hand.len(), 2);
    }

    #[test]
    fn test_hand_struct_is_blackjack() {
        let hand = Hand::from_cards(cards(&["AH", "KS"]));
        assert!(hand.is_blackjack());
    }

    #[test]
    fn test_hand_display_keeps_deal_order() {
        let hand = Hand::from_cards(cards(&["10H", "AS", "2C"]));
        assert_eq!(hand.to_string(), "10♥ A♠ 2♣");
    }
}
