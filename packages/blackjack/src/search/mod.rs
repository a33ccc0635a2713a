//! Bounded-depth enumeration of future game states.
//!
//! Every remaining card in the pool is treated as an equally weighted
//! possible next card, so a player hit (or a dealer draw) fans out into one
//! successor per pool position. Each successor owns its own copy of both
//! hands and the pool; siblings never share mutable state.
//!
//! Plies alternate between the player and the dealer:
//!
//! * player node: stand (same cards, dealer to act) plus one hit per pool card
//! * dealer node: resolves as soon as the dealer must stop, otherwise one draw
//!   per pool card with the player to act next
//!
//! A node is terminal once the depth budget is spent or the player is over
//! 21. Running out of depth compares whatever partial hands exist at that
//! point, so deep futures are approximated rather than played out.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::hand::calculate_hand_value;
use crate::{Card, GameRules};

/// Classification of a single terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Lose,
    Tie,
    /// Player went over 21. Counts as a loss.
    Bust,
}

/// Compare final (or partial) hands.
pub fn resolve(player: &[Card], dealer: &[Card]) -> Outcome {
    let player_value = calculate_hand_value(player);
    let dealer_value = calculate_hand_value(dealer);

    if player_value > 21 {
        Outcome::Bust
    } else if dealer_value > 21 || player_value > dealer_value {
        Outcome::Win
    } else if player_value < dealer_value {
        Outcome::Lose
    } else {
        Outcome::Tie
    }
}

/// Terminal outcome counts from one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub win: u64,
    pub lose: u64,
    pub tie: u64,
    pub bust: u64,
}

impl Tally {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.win += 1,
            Outcome::Lose => self.lose += 1,
            Outcome::Tie => self.tie += 1,
            Outcome::Bust => self.bust += 1,
        }
    }

    pub fn merge(&mut self, other: &Tally) {
        self.win += other.win;
        self.lose += other.lose;
        self.tie += other.tie;
        self.bust += other.bust;
    }

    pub fn merged(mut self, other: Tally) -> Tally {
        self.merge(&other);
        self
    }

    pub fn count(&self, outcome: Outcome) -> u64 {
        match outcome {
            Outcome::Win => self.win,
            Outcome::Lose => self.lose,
            Outcome::Tie => self.tie,
            Outcome::Bust => self.bust,
        }
    }

    /// Number of terminal states explored.
    pub fn total(&self) -> u64 {
        self.win + self.lose + self.tie + self.bust
    }

    /// Plain losses plus busts.
    pub fn losses(&self) -> u64 {
        self.lose + self.bust
    }

    /// Share of terminal states that are wins; 0.0 for an empty tally.
    pub fn win_probability(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.win as f64 / total as f64,
        }
    }
}

impl From<Outcome> for Tally {
    fn from(outcome: Outcome) -> Self {
        let mut tally = Tally::default();
        tally.record(outcome);
        tally
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Turn {
    Player,
    Dealer,
}

/// One node of the search tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    pub player: Vec<Card>,
    pub dealer: Vec<Card>,
    pub pool: Vec<Card>,
    pub turn: Turn,
    /// Plies left before the node is cut off.
    pub depth: u8,
}

impl SearchState {
    pub fn new(
        player: Vec<Card>,
        dealer: Vec<Card>,
        pool: Vec<Card>,
        turn: Turn,
        depth: u8,
    ) -> Self {
        Self {
            player,
            dealer,
            pool,
            turn,
            depth,
        }
    }

    /// Copy of the pool with position `index` removed, plus the removed card.
    pub fn take(&self, index: usize) -> (Card, Vec<Card>) {
        let mut pool = self.pool.clone();
        let card = pool.remove(index);
        (card, pool)
    }

    /// Player draws pool position `index`; the dealer acts next.
    pub fn player_draws(&self, index: usize) -> SearchState {
        let (card, pool) = self.take(index);
        let mut player = self.player.clone();
        player.push(card);
        let depth = self.depth.saturating_sub(1);
        SearchState::new(player, self.dealer.clone(), pool, Turn::Dealer, depth)
    }

    /// Dealer draws pool position `index`; the player acts next.
    pub fn dealer_draws(&self, index: usize) -> SearchState {
        let (card, pool) = self.take(index);
        let mut dealer = self.dealer.clone();
        dealer.push(card);
        let depth = self.depth.saturating_sub(1);
        SearchState::new(self.player.clone(), dealer, pool, Turn::Player, depth)
    }

    pub fn player_stands(&self) -> SearchState {
        SearchState::new(
            self.player.clone(),
            self.dealer.clone(),
            self.pool.clone(),
            Turn::Dealer,
            self.depth.saturating_sub(1),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Terminal(Outcome),
    Branch(Vec<SearchState>),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Traversal {
    /// Recursive; memory bounded by depth.
    #[default]
    DepthFirst,
    /// Explicit FIFO queue; memory bounded by the widest ply.
    BreadthFirst,
    /// Root successors searched depth-first on the rayon pool.
    #[cfg(feature = "parallel")]
    Parallel,
}

/// Exhaustive search under a fixed dealer policy.
#[derive(Debug, Clone, Copy)]
pub struct Search {
    rules: GameRules,
    traversal: Traversal,
}

impl Search {
    pub fn new(rules: GameRules) -> Self {
        Self {
            rules,
            traversal: Traversal::default(),
        }
    }

    pub fn with_traversal(mut self, traversal: Traversal) -> Self {
        self.traversal = traversal;
        self
    }

    /// Successors of `state`, or its outcome if it is terminal.
    pub fn expand(&self, state: &SearchState) -> Step {
        if state.depth == 0 || calculate_hand_value(&state.player) > 21 {
            return Step::Terminal(resolve(&state.player, &state.dealer));
        }

        match state.turn {
            Turn::Player => {
                let mut children = Vec::with_capacity(state.pool.len() + 1);
                children.push(state.player_stands());
                children.extend((0..state.pool.len()).map(|i| state.player_draws(i)));
                Step::Branch(children)
            }
            Turn::Dealer => {
                // A dealer that has to hit from an empty pool is stuck where it is.
                if !self.rules.dealer_should_hit(&state.dealer) || state.pool.is_empty() {
                    Step::Terminal(resolve(&state.player, &state.dealer))
                } else {
                    Step::Branch((0..state.pool.len()).map(|i| state.dealer_draws(i)).collect())
                }
            }
        }
    }

    pub fn run(&self, root: SearchState) -> Tally {
        let (depth, pool) = (root.depth, root.pool.len());
        let tally = match self.traversal {
            Traversal::DepthFirst => self.depth_first(&root),
            Traversal::BreadthFirst => self.breadth_first(root),
            #[cfg(feature = "parallel")]
            Traversal::Parallel => self.parallel(&root),
        };
        log::trace!(
            "search depth={depth} pool={pool} -> win={} lose={} tie={} bust={}",
            tally.win,
            tally.lose,
            tally.tie,
            tally.bust
        );
        tally
    }

    fn depth_first(&self, state: &SearchState) -> Tally {
        match self.expand(state) {
            Step::Terminal(outcome) => Tally::from(outcome),
            Step::Branch(children) => children
                .iter()
                .fold(Tally::default(), |acc, child| acc.merged(self.depth_first(child))),
        }
    }

    fn breadth_first(&self, root: SearchState) -> Tally {
        let mut tally = Tally::default();
        let mut queue = VecDeque::from([root]);

        while let Some(state) = queue.pop_front() {
            match self.expand(&state) {
                Step::Terminal(outcome) => tally.record(outcome),
                Step::Branch(children) => queue.extend(children),
            }
        }

        tally
    }

    #[cfg(feature = "parallel")]
    fn parallel(&self, root: &SearchState) -> Tally {
        use rayon::prelude::*;

        match self.expand(root) {
            Step::Terminal(outcome) => Tally::from(outcome),
            Step::Branch(children) => children
                .par_iter()
                .map(|child| self.depth_first(child))
                .reduce(Tally::default, Tally::merged),
        }
    }
}

/// Search from a player decision point with the default rules.
pub fn search(pool: &[Card], player_hand: &[Card], dealer_hand: &[Card], max_depth: u8) -> Tally {
    let root = SearchState::new(
        player_hand.to_vec(),
        dealer_hand.to_vec(),
        pool.to_vec(),
        Turn::Player,
        max_depth,
    );
    Search::new(GameRules::default()).run(root)
}
