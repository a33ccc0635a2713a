use blackjack::{
    calculate_hand_value, new_deck, new_shoe, recommend_action, search, shuffle_with_rng, simulate,
    Action, Advisor, Card, Error, GamePhase, GameRules, GameState, HiLoStrategy, Outcome, Rank,
    SearchStrategy, Suit, Tally,
};
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn cards(list: &[&str]) -> Vec<Card> {
    list.iter().map(|s| s.parse().unwrap()).collect()
}

#[test]
fn stand_on_nineteen_with_one_ply() {
    let pool = cards(&["10S", "KD", "QH", "9C", "8S", "4D"]);
    let action = recommend_action(&cards(&["10H", "9S"]), &cards(&["10C", "7D"]), &pool, 1);
    assert_eq!(action, Action::Stand);
}

#[test]
fn stand_on_nineteen_against_every_up_card() {
    let player = cards(&["10H", "9S"]);
    for rank in Rank::ALL {
        let up_card = Card::new(rank, Suit::Clubs);
        let pool: Vec<Card> = new_deck()
            .into_iter()
            .filter(|card| *card != up_card && !player.contains(card))
            .collect();
        assert_eq!(pool.len(), 49);

        let rec = Advisor::default().with_depth(1).evaluate(&player, &[up_card], &pool);
        assert_eq!(rec.action, Action::Stand, "up card {up_card}");
        assert!(rec.hit_win_probability() < rec.stand_win_probability(), "up card {up_card}");
    }
}

#[test]
fn soft_seventeen_against_low_pool() {
    let player = cards(&["AH", "6S"]);
    let dealer = cards(&["9C"]);
    let pool = cards(&["2H", "3D", "4C", "5S", "2C", "3S"]);

    let rec = Advisor::default().with_depth(2).evaluate(&player, &dealer, &pool);
    assert_eq!(rec.hit_branches, pool.len());
    assert!(rec.hit.total() > 0);
    assert!(rec.stand.total() > 0);
    for p in [rec.hit_win_probability(), rec.stand_win_probability()] {
        assert!((0.0..=1.0).contains(&p));
    }
    // Low cards never bust a soft 17 on one hit.
    assert_eq!(rec.hit.bust, 0);
}

#[test]
fn single_card_pool_has_one_hit_successor() {
    let pool = cards(&["5H"]);
    let rec = Advisor::default().evaluate(&cards(&["KH", "QS"]), &cards(&["10C", "6D"]), &pool);
    assert_eq!(rec.hit_branches, 1);
    assert!(rec.hit.total() >= 1);
    assert!(rec.stand.total() >= 1);
    assert_eq!(rec.action, Action::Stand);
}

#[test]
fn malformed_cards_are_rejected() {
    assert!(matches!("ZH".parse::<Card>(), Err(Error::InvalidRank(_))));
    assert!(matches!("10X".parse::<Card>(), Err(Error::InvalidSuit(_))));
    assert!(matches!(Card::from_index(52), Err(Error::InvalidCardIndex(52))));
}

#[test]
fn free_search_from_decision_point() {
    let tally = search(&cards(&["2H"]), &cards(&["10H", "8S"]), &cards(&["10C", "6D"]), 2);
    assert_eq!(tally, Tally { win: 1, tie: 1, ..Tally::default() });
    assert_eq!(tally.count(Outcome::Tie), 1);
}

#[test]
fn shuffled_shoe_keeps_every_card() {
    let shoe = new_shoe(3).unwrap();
    let mut shuffled = shuffle_with_rng(&mut ChaCha8Rng::seed_from_u64(11), &shoe, 5);
    assert_ne!(shuffled, shoe);

    let mut sorted = shoe.clone();
    sorted.sort_by_key(Card::index);
    shuffled.sort_by_key(Card::index);
    assert_eq!(shuffled, sorted);
}

#[test]
fn advised_round_plays_to_settlement() {
    let rules = GameRules::default();
    let advisor = Advisor::new(rules).with_depth(1);
    let mut rng = ChaCha8Rng::seed_from_u64(21);

    for _ in 0..10 {
        let mut game = GameState::new(rules).unwrap();
        game.shuffle(&mut rng);
        game.deal_initial().unwrap();
        while game.phase == GamePhase::PlayerTurn {
            let rec = game.recommend(&advisor);
            game.apply(rec.action).unwrap();
        }
        game.settle().unwrap();

        assert_eq!(game.phase, GamePhase::Settled);
        assert!(game.outcome.is_some());
        if !game.player.is_busted() {
            assert!(calculate_hand_value(&game.dealer.cards) >= 17);
        } else {
            assert_eq!(game.dealer.len(), 2);
        }
    }
}

#[test]
fn simulation_outcomes_sum_to_games() {
    let rules = GameRules::shoe(2);
    let mut rng = ChaCha8Rng::seed_from_u64(31);
    let hilo = simulate(&HiLoStrategy, rules, 300, &mut rng).unwrap();
    assert_eq!(hilo.wins + hilo.losses + hilo.pushes, 300);

    let search = simulate(&SearchStrategy::new(rules).with_depth(1), rules, 10, &mut rng).unwrap();
    assert_eq!(search.games, 10);
    assert_eq!(search.wins + search.losses + search.pushes, 10);
}
