use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::advisor::Advisor;
use crate::game_state::{GamePhase, GameState, HandOutcome};
use crate::{Action, Error, GameRules};

/// Decision policy for automated play.
pub trait Strategy {
    fn name(&self) -> &'static str;

    /// Called once per player decision while the round is in `PlayerTurn`.
    fn decide(&self, game: &GameState) -> Action;
}

/// Lookahead search from the player's point of view.
#[derive(Debug, Clone, Copy)]
pub struct SearchStrategy {
    advisor: Advisor,
}

impl SearchStrategy {
    pub fn new(rules: GameRules) -> Self {
        Self {
            advisor: Advisor::new(rules),
        }
    }

    pub fn with_depth(mut self, depth: u8) -> Self {
        self.advisor = self.advisor.with_depth(depth);
        self
    }
}

impl Strategy for SearchStrategy {
    fn name(&self) -> &'static str {
        "search"
    }

    fn decide(&self, game: &GameState) -> Action {
        game.recommend(&self.advisor).action
    }
}

/// Hi-Lo count thresholds.
#[derive(Debug, Clone, Copy, Default)]
pub struct HiLoStrategy;

impl Strategy for HiLoStrategy {
    fn name(&self) -> &'static str {
        "hilo"
    }

    fn decide(&self, game: &GameState) -> Action {
        game.recommend_hilo().unwrap_or(Action::Stand)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub games: u64,
    pub wins: u64,
    pub losses: u64,
    pub pushes: u64,
}

impl SimulationReport {
    pub fn record(&mut self, outcome: HandOutcome) {
        self.games += 1;
        match outcome {
            HandOutcome::Win => self.wins += 1,
            HandOutcome::Loss => self.losses += 1,
            HandOutcome::Push => self.pushes += 1,
        }
    }

    fn rate(&self, count: u64) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            count as f64 / self.games as f64
        }
    }

    pub fn win_rate(&self) -> f64 {
        self.rate(self.wins)
    }

    pub fn loss_rate(&self) -> f64 {
        self.rate(self.losses)
    }

    pub fn push_rate(&self) -> f64 {
        self.rate(self.pushes)
    }
}

impl std::fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} games: {} wins ({:.1}%), {} losses ({:.1}%), {} pushes ({:.1}%)",
            self.games,
            self.wins,
            self.win_rate() * 100.0,
            self.losses,
            self.loss_rate() * 100.0,
            self.pushes,
            self.push_rate() * 100.0
        )
    }
}

/// Play one round from a freshly shuffled shoe.
pub fn play_round<S: Strategy, R: Rng>(
    strategy: &S,
    rules: GameRules,
    rng: &mut R,
) -> Result<GameState, Error> {
    let mut game = GameState::new(rules)?;
    game.shuffle(rng);
    game.deal_initial()?;
    while game.phase == GamePhase::PlayerTurn {
        let action = strategy.decide(&game);
        log::trace!("{}: {} on {}", strategy.name(), action, game.player.value());
        game.apply(action)?;
    }
    game.settle()?;
    Ok(game)
}

pub fn simulate<S: Strategy, R: Rng>(
    strategy: &S,
    rules: GameRules,
    games: u64,
    rng: &mut R,
) -> Result<SimulationReport, Error> {
    rules.validate()?;
    let mut report = SimulationReport::default();
    for _ in 0..games {
        let game = play_round(strategy, rules, rng)?;
        if let Some(outcome) = game.outcome {
            report.record(outcome);
        }
    }
    log::info!("{} strategy: {}", strategy.name(), report);
    Ok(report)
}
