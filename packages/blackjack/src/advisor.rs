use serde::{Deserialize, Serialize};

use crate::search::{Search, SearchState, Tally, Traversal, Turn};
use crate::{Action, Card, GameRules};

/// Default lookahead used by `recommend_action`.
pub const DEFAULT_SEARCH_DEPTH: u8 = 3;

/// Both searches behind a hit/stand decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub action: Action,
    /// Outcomes summed over every possible next card. Display only: a seed
    /// that busts at once contributes one leaf, so the raw ratio is skewed.
    pub hit: Tally,
    pub stand: Tally,
    /// Number of hypothetical next cards the hit search was seeded with.
    pub hit_branches: usize,
    /// Mean of the per-card win probabilities, each next card weighted equally.
    pub hit_probability: f64,
}

impl Recommendation {
    pub fn hit_win_probability(&self) -> f64 {
        self.hit_probability
    }

    pub fn stand_win_probability(&self) -> f64 {
        self.stand.win_probability()
    }
}

/// Strictly better hit odds are required to hit; ties stand.
pub fn choose_action(hit_win_probability: f64, stand_win_probability: f64) -> Action {
    if hit_win_probability > stand_win_probability {
        Action::Hit
    } else {
        Action::Stand
    }
}

/// Hit/stand recommendation engine built on the exhaustive search.
#[derive(Debug, Clone, Copy)]
pub struct Advisor {
    search: Search,
    depth: u8,
}

impl Advisor {
    pub fn new(rules: GameRules) -> Self {
        Self {
            search: Search::new(rules),
            depth: rules.search_depth,
        }
    }

    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_traversal(mut self, traversal: Traversal) -> Self {
        self.search = self.search.with_traversal(traversal);
        self
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Search once as if the player just hit and once as if they just stood.
    ///
    /// The hit search is seeded with each pool card in turn as the drawn card
    /// (removed from that seed's pool). Every seed counts as one equally
    /// likely world, so the hit probability is the mean of the per-seed win
    /// probabilities. Both searches start with the dealer to act and get the
    /// full depth budget.
    pub fn evaluate(
        &self,
        player_hand: &[Card],
        dealer_hand: &[Card],
        pool: &[Card],
    ) -> Recommendation {
        let root = SearchState::new(
            player_hand.to_vec(),
            dealer_hand.to_vec(),
            pool.to_vec(),
            Turn::Player,
            self.depth,
        );

        let mut hit = Tally::default();
        let mut seed_probability_sum = 0.0;
        for index in 0..pool.len() {
            let (card, rest) = root.take(index);
            let mut player = root.player.clone();
            player.push(card);
            let seed =
                SearchState::new(player, root.dealer.clone(), rest, Turn::Dealer, self.depth);
            let tally = self.search.run(seed);
            seed_probability_sum += tally.win_probability();
            hit.merge(&tally);
        }
        let hit_probability = if pool.is_empty() {
            0.0
        } else {
            seed_probability_sum / pool.len() as f64
        };

        let stand = self.search.run(SearchState {
            turn: Turn::Dealer,
            ..root
        });

        let action = choose_action(hit_probability, stand.win_probability());
        log::debug!(
            "player={} dealer={} pool={} depth={}: hit p={:.4} ({} states), \
             stand p={:.4} ({} states) -> {}",
            crate::calculate_hand_value(player_hand),
            crate::calculate_hand_value(dealer_hand),
            pool.len(),
            self.depth,
            hit_probability,
            hit.total(),
            stand.win_probability(),
            stand.total(),
            action
        );

        Recommendation {
            action,
            hit,
            stand,
            hit_branches: pool.len(),
            hit_probability,
        }
    }

    pub fn recommend(&self, player_hand: &[Card], dealer_hand: &[Card], pool: &[Card]) -> Action {
        self.evaluate(player_hand, dealer_hand, pool).action
    }
}

impl Default for Advisor {
    fn default() -> Self {
        Self::new(GameRules::default())
    }
}

/// Hit or stand for the given position, with the default dealer rules.
pub fn recommend_action(
    player_hand: &[Card],
    dealer_hand: &[Card],
    remaining_pool: &[Card],
    max_depth: u8,
) -> Action {
    Advisor::default()
        .with_depth(max_depth)
        .recommend(player_hand, dealer_hand, remaining_pool)
}
