use blackjack::{
    simulate, Advisor, GameRules, GameState, HiLoStrategy, SearchStrategy, DEFAULT_SEARCH_DEPTH,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

mod console;

type BoxErr = Box<dyn std::error::Error + Send + Sync>;

#[derive(Parser)]
#[command(name = "blackjack-advisor", about = "Blackjack with lookahead hit/stand advice")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Clone, Copy)]
struct TableArgs {
    /// Number of decks in the shoe
    #[arg(long, env = "BLACKJACK_DECKS", default_value = "1")]
    decks: u8,

    /// Plies explored by the advisor
    #[arg(long, env = "BLACKJACK_DEPTH", default_value_t = DEFAULT_SEARCH_DEPTH)]
    depth: u8,

    /// Dealer hits soft 17
    #[arg(long, default_value_t = false)]
    hits_soft_17: bool,

    /// Seed for a reproducible shuffle
    #[arg(long, env = "BLACKJACK_SEED")]
    seed: Option<u64>,
}

impl TableArgs {
    fn rules(&self) -> GameRules {
        GameRules {
            num_decks: self.decks,
            dealer_hits_soft_17: self.hits_soft_17,
            search_depth: self.depth,
            ..GameRules::default()
        }
    }

    fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyKind {
    Search,
    Hilo,
}

#[derive(Subcommand)]
enum Command {
    /// Play a round at the console with advice on every decision
    Play {
        #[command(flatten)]
        table: TableArgs,
    },

    /// Play automated rounds and report the results
    Simulate {
        /// Number of rounds to play
        #[arg(long, default_value = "1000")]
        games: u64,

        #[arg(long, value_enum, default_value = "hilo")]
        strategy: StrategyKind,

        #[command(flatten)]
        table: TableArgs,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Play { table } => run_play(table),
        Command::Simulate { games, strategy, table } => run_simulate(games, strategy, table),
    };

    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run_play(table: TableArgs) -> Result<(), BoxErr> {
    let rules = table.rules();
    let mut game = GameState::new(rules)?;
    game.shuffle(&mut table.rng());
    game.deal_initial()?;
    log::debug!("Dealt from a {}-deck shoe, {} cards left", rules.num_decks, game.shoe.len());

    let advisor = Advisor::new(rules);
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();
    console::play_round(&mut game, &advisor, &mut input, &mut output)?;
    Ok(())
}

fn run_simulate(games: u64, strategy: StrategyKind, table: TableArgs) -> Result<(), BoxErr> {
    let rules = table.rules();
    let mut rng = table.rng();
    log::info!(
        "Simulating {games} rounds ({} decks, depth {})",
        rules.num_decks,
        rules.search_depth
    );

    let report = match strategy {
        StrategyKind::Search => simulate(&SearchStrategy::new(rules), rules, games, &mut rng)?,
        StrategyKind::Hilo => simulate(&HiLoStrategy, rules, games, &mut rng)?,
    };
    println!("{report}");
    Ok(())
}
