use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Position in `Rank::ALL` (Ace = 0, King = 12).
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }

    pub fn from_symbol(symbol: &str) -> Result<Self, Error> {
        let rank = match symbol.trim().to_ascii_uppercase().as_str() {
            "A" | "1" | "ACE" => Rank::Ace,
            "2" => Rank::Two,
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "10" | "T" => Rank::Ten,
            "J" | "JACK" => Rank::Jack,
            "Q" | "QUEEN" => Rank::Queen,
            "K" | "KING" => Rank::King,
            _ => return Err(Error::InvalidRank(symbol.to_string())),
        };
        Ok(rank)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Rank {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rank::from_symbol(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    pub fn symbol(self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
        }
    }

    pub fn from_symbol(symbol: &str) -> Result<Self, Error> {
        let suit = match symbol.trim().to_ascii_uppercase().as_str() {
            "S" | "♠" | "SPADES" => Suit::Spades,
            "H" | "♥" | "HEARTS" => Suit::Hearts,
            "D" | "♦" | "DIAMONDS" => Suit::Diamonds,
            "C" | "♣" | "CLUBS" => Suit::Clubs,
            _ => return Err(Error::InvalidSuit(symbol.to_string())),
        };
        Ok(suit)
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Blackjack value of each rank, indexed by `Rank::index`.
///
/// The table is immutable and handed to the valuation code explicitly, so a
/// variant game can supply its own values without touching global state.
/// Aces are stored at their high value; valuation demotes them as needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueTable([u8; 13]);

impl ValueTable {
    pub const STANDARD: ValueTable = ValueTable([11, 2, 3, 4, 5, 6, 7, 8, 9, 10, 10, 10, 10]);

    /// Amount subtracted when an ace is counted low instead of high.
    pub const ACE_DEMOTION: u16 = 10;

    pub const fn new(values: [u8; 13]) -> Self {
        Self(values)
    }

    pub fn value(&self, rank: Rank) -> u8 {
        self.0[rank.index()]
    }

    /// Best total for `cards`: the largest total not above 21 if one exists,
    /// otherwise the total with every ace counted low.
    pub fn hand_value(&self, cards: &[Card]) -> u16 {
        let mut total: u16 = 0;
        let mut aces = 0;

        for card in cards {
            total = total.saturating_add(self.value(card.rank) as u16);
            if card.is_ace() {
                aces += 1;
            }
        }

        while total > 21 && aces > 0 {
            total -= Self::ACE_DEMOTION;
            aces -= 1;
        }

        total
    }
}

impl Default for ValueTable {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub fn to_display(&self) -> String {
        format!("{}{}", self.rank.symbol(), self.suit.symbol())
    }

    /// High value of the card under the standard table (Ace = 11).
    pub fn value(&self) -> u8 {
        ValueTable::STANDARD.value(self.rank)
    }

    pub fn is_ace(&self) -> bool {
        self.rank == Rank::Ace
    }

    /// Deck position: `suit * 13 + rank`, Ace of Spades = 0, King of Clubs = 51.
    pub fn index(&self) -> usize {
        self.suit as usize * 13 + self.rank.index()
    }

    pub fn from_index(index: usize) -> Result<Self, Error> {
        if index >= 52 {
            return Err(Error::InvalidCardIndex(index));
        }
        Ok(Card::new(Rank::ALL[index % 13], Suit::ALL[index / 13]))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl FromStr for Card {
    type Err = Error;

    /// Parses `"10H"`, `"as"`, `"Q♦"`: rank symbol followed by a one-character suit.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (split, _) = s
            .char_indices()
            .last()
            .ok_or_else(|| Error::InvalidRank(s.to_string()))?;
        let (rank, suit) = s.split_at(split);
        Ok(Card::new(Rank::from_symbol(rank)?, Suit::from_symbol(suit)?))
    }
}
