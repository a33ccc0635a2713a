use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::advisor::{Advisor, Recommendation};
use crate::search::{resolve, Outcome};
use crate::shuffle::{new_shoe, shuffle_with_rng};
use crate::strategy::{recommend_hilo_action, RunningCount};
use crate::{Action, Card, Error, GameRules, Hand};

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    NotStarted,
    PlayerTurn,
    DealerTurn,
    Settled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandOutcome {
    Win,
    Loss,
    Push,
}

impl From<Outcome> for HandOutcome {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Win => HandOutcome::Win,
            Outcome::Lose | Outcome::Bust => HandOutcome::Loss,
            Outcome::Tie => HandOutcome::Push,
        }
    }
}

/// One player against the dealer, dealt from a single shoe.
///
/// The top of the shoe is the end of `shoe`. The dealer's first card is the
/// up card; the second stays face down until the player's turn is over.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub player: Hand,
    pub dealer: Hand,
    pub shoe: Vec<Card>,
    pub phase: GamePhase,
    pub rules: GameRules,
    pub outcome: Option<HandOutcome>,
}

impl GameState {
    /// Fresh, unshuffled shoe for `rules.num_decks` decks.
    pub fn new(rules: GameRules) -> Result<Self, Error> {
        rules.validate()?;
        Ok(Self::with_shoe(rules, new_shoe(rules.num_decks)?))
    }

    /// Round dealt from a caller-arranged shoe.
    pub fn with_shoe(rules: GameRules, shoe: Vec<Card>) -> Self {
        Self {
            player: Hand::new(),
            dealer: Hand::new(),
            shoe,
            phase: GamePhase::NotStarted,
            rules,
            outcome: None,
        }
    }

    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.shoe = shuffle_with_rng(rng, &self.shoe, self.rules.shuffle_passes);
    }

    fn expect_phase(&self, phase: GamePhase) -> Result<(), Error> {
        if self.phase != phase {
            return Err(Error::InvalidPhase(format!("{:?}", self.phase)));
        }
        Ok(())
    }

    fn draw(&mut self) -> Result<Card, Error> {
        self.shoe.pop().ok_or(Error::EmptyShoe)
    }

    /// Player, dealer, player, dealer.
    pub fn deal_initial(&mut self) -> Result<(), Error> {
        self.expect_phase(GamePhase::NotStarted)?;
        if self.shoe.len() < 4 {
            return Err(Error::EmptyShoe);
        }
        for _ in 0..2 {
            let card = self.draw()?;
            self.player.add_card(card);
            let card = self.draw()?;
            self.dealer.add_card(card);
        }
        self.phase = GamePhase::PlayerTurn;
        self.after_player_card();
        Ok(())
    }

    /// A bust ends the round on the spot; 21 hands over to the dealer.
    fn after_player_card(&mut self) {
        if self.player.is_busted() {
            self.finish(HandOutcome::Loss);
        } else if self.player.value() == 21 {
            self.phase = GamePhase::DealerTurn;
        }
    }

    fn finish(&mut self, outcome: HandOutcome) {
        self.phase = GamePhase::Settled;
        self.outcome = Some(outcome);
        log::debug!(
            "Round settled: player {} ({}), dealer {} ({}) -> {:?}",
            self.player,
            self.player.value(),
            self.dealer,
            self.dealer.value(),
            outcome
        );
    }

    pub fn hit(&mut self) -> Result<Card, Error> {
        self.expect_phase(GamePhase::PlayerTurn)?;
        let card = self.draw()?;
        self.player.add_card(card);
        self.after_player_card();
        Ok(card)
    }

    pub fn stand(&mut self) -> Result<(), Error> {
        self.expect_phase(GamePhase::PlayerTurn)?;
        self.player.stood = true;
        self.phase = GamePhase::DealerTurn;
        Ok(())
    }

    pub fn apply(&mut self, action: Action) -> Result<(), Error> {
        match action {
            Action::Hit => self.hit().map(|_| ()),
            Action::Stand => self.stand(),
        }
    }

    pub fn dealer_should_hit(&self) -> bool {
        self.rules.dealer_should_hit(&self.dealer.cards)
    }

    /// Draw for the dealer until the rules say stop. Returns the cards drawn.
    pub fn play_dealer(&mut self) -> Result<Vec<Card>, Error> {
        self.expect_phase(GamePhase::DealerTurn)?;
        let mut drawn = Vec::new();
        while self.dealer_should_hit() {
            let card = self.draw()?;
            log::trace!("Dealer draws {card}");
            self.dealer.add_card(card);
            drawn.push(card);
        }
        Ok(drawn)
    }

    /// Finish the dealer's hand if needed and compare totals.
    pub fn settle(&mut self) -> Result<HandOutcome, Error> {
        if let (GamePhase::Settled, Some(outcome)) = (self.phase, self.outcome) {
            return Ok(outcome);
        }
        self.expect_phase(GamePhase::DealerTurn)?;
        self.play_dealer()?;
        let outcome = HandOutcome::from(resolve(&self.player.cards, &self.dealer.cards));
        self.finish(outcome);
        Ok(outcome)
    }

    pub fn dealer_up_card(&self) -> Option<&Card> {
        self.dealer.cards.first()
    }

    fn hole_card_hidden(&self) -> bool {
        matches!(self.phase, GamePhase::NotStarted | GamePhase::PlayerTurn)
    }

    /// Dealer cards the player is allowed to see.
    pub fn visible_dealer_cards(&self) -> &[Card] {
        if self.hole_card_hidden() {
            &self.dealer.cards[..self.dealer.cards.len().min(1)]
        } else {
            &self.dealer.cards
        }
    }

    /// Every card the player has not seen: the shoe plus a face-down hole card.
    pub fn unseen_cards(&self) -> Vec<Card> {
        let mut unseen = self.shoe.clone();
        unseen.extend_from_slice(&self.dealer.cards[self.visible_dealer_cards().len()..]);
        unseen
    }

    /// Lookahead recommendation from the player's point of view.
    pub fn recommend(&self, advisor: &Advisor) -> Recommendation {
        advisor.evaluate(&self.player.cards, self.visible_dealer_cards(), &self.unseen_cards())
    }

    /// Hi-Lo count over the cards dealt face up this round.
    pub fn running_count(&self) -> RunningCount {
        let mut count = RunningCount::new();
        count.observe_all(&self.player.cards);
        count.observe_all(self.visible_dealer_cards());
        count
    }

    pub fn recommend_hilo(&self) -> Option<Action> {
        let up_card = self.dealer_up_card()?;
        let true_count = self.running_count().true_count(self.unseen_cards().len());
        Some(recommend_hilo_action(&self.player.cards, up_card, true_count))
    }
}
