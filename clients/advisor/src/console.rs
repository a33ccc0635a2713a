use std::io::{BufRead, Write};

use blackjack::{Action, Advisor, Card, GamePhase, GameState, HandOutcome, Recommendation};

use crate::BoxErr;

fn render_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(Card::to_display)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Table view from the player's seat. The hole card shows as `??` until the
/// player's turn is over.
pub fn render_table(game: &GameState) -> String {
    let visible = game.visible_dealer_cards();
    let hidden = game.dealer.len() - visible.len();
    let mut dealer = render_cards(visible);
    for _ in 0..hidden {
        dealer.push_str(" ??");
    }
    let dealer_total = blackjack::calculate_hand_value(visible);

    format!(
        "Dealer: {dealer} ({dealer_total}{})\nPlayer: {} ({})",
        if hidden > 0 { "+" } else { "" },
        render_cards(&game.player.cards),
        game.player.value()
    )
}

pub fn render_recommendation(rec: &Recommendation, hilo: Option<Action>) -> String {
    let mut line = format!(
        "Advisor: {} (hit {:.1}% over {} outcomes, stand {:.1}% over {} outcomes)",
        rec.action,
        rec.hit_win_probability() * 100.0,
        rec.hit.total(),
        rec.stand_win_probability() * 100.0,
        rec.stand.total()
    );
    if let Some(action) = hilo {
        line.push_str(&format!("\nHi-Lo:   {action}"));
    }
    line
}

pub fn render_outcome(outcome: HandOutcome) -> &'static str {
    match outcome {
        HandOutcome::Win => "You win!",
        HandOutcome::Loss => "Dealer wins.",
        HandOutcome::Push => "Push.",
    }
}

pub fn parse_action(input: &str) -> Option<Action> {
    match input.trim().to_ascii_lowercase().as_str() {
        "hit" | "h" => Some(Action::Hit),
        "stand" | "s" => Some(Action::Stand),
        _ => None,
    }
}

/// Ask until the player types a valid action. `None` on end of input.
pub fn prompt_action<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> std::io::Result<Option<Action>> {
    loop {
        write!(output, "Hit or stand? ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        match parse_action(&line) {
            Some(action) => return Ok(Some(action)),
            None => writeln!(output, "Please type 'hit' or 'stand'.")?,
        }
    }
}

/// Play one dealt round against the console.
pub fn play_round<R: BufRead, W: Write>(
    game: &mut GameState,
    advisor: &Advisor,
    input: &mut R,
    output: &mut W,
) -> Result<HandOutcome, BoxErr> {
    while game.phase == GamePhase::PlayerTurn {
        writeln!(output, "{}", render_table(game))?;
        let rec = game.recommend(advisor);
        writeln!(output, "{}", render_recommendation(&rec, game.recommend_hilo()))?;

        let Some(action) = prompt_action(input, output)? else {
            log::warn!("Input closed, standing");
            game.stand()?;
            break;
        };
        if action == Action::Hit {
            let card = game.hit()?;
            writeln!(output, "You draw {}", card.to_display())?;
        } else {
            game.stand()?;
        }
    }

    if game.phase == GamePhase::DealerTurn {
        for card in game.play_dealer()? {
            writeln!(output, "Dealer draws {}", card.to_display())?;
        }
    }
    let outcome = game.settle()?;

    writeln!(output, "{}", render_table(game))?;
    writeln!(output, "{}", render_outcome(outcome))?;
    Ok(outcome)
}
