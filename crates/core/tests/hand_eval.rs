use trashpoker_core::{
    categorize, evaluate, Card, EvalRules, HandCategory, Rank, RngState, Settlement, Suit,
};

fn hand(cards: &[(Rank, Suit)]) -> Vec<Card> {
    cards
        .iter()
        .map(|(rank, suit)| Card::standard(*suit, *rank))
        .collect()
}

fn score(cards: &[Card], rules: EvalRules) -> Settlement {
    // Lucky stays off in these fixtures, so the roll inside evaluate is
    // never consulted and any seed works.
    evaluate(cards, 10, rules, &mut RngState::from_seed(1))
}

#[test]
fn royal_flush_pays_five_hundred_to_one() {
    let cards = hand(&[
        (Rank::Ten, Suit::Spades),
        (Rank::Jack, Suit::Spades),
        (Rank::Queen, Suit::Spades),
        (Rank::King, Suit::Spades),
        (Rank::Ace, Suit::Spades),
    ]);
    let settlement = score(&cards, EvalRules::default());
    assert_eq!(settlement.category, HandCategory::RoyalFlush);
    assert_eq!(settlement.payout, 5000);
}

#[test]
fn straight_flush_below_the_ace_pays_one_hundred() {
    let cards = hand(&[
        (Rank::Five, Suit::Clubs),
        (Rank::Six, Suit::Clubs),
        (Rank::Seven, Suit::Clubs),
        (Rank::Eight, Suit::Clubs),
        (Rank::Nine, Suit::Clubs),
    ]);
    let settlement = score(&cards, EvalRules::default());
    assert_eq!(settlement.category, HandCategory::StraightFlush);
    assert_eq!(settlement.payout, 1000);
}

#[test]
fn four_of_a_kind_beats_a_full_house() {
    let cards = hand(&[
        (Rank::Nine, Suit::Spades),
        (Rank::Nine, Suit::Hearts),
        (Rank::Nine, Suit::Diamonds),
        (Rank::Nine, Suit::Clubs),
        (Rank::Two, Suit::Spades),
    ]);
    assert_eq!(
        categorize(&cards, EvalRules::default()),
        HandCategory::FourOfAKind
    );
}

#[test]
fn full_house_pays_ten() {
    let cards = hand(&[
        (Rank::Two, Suit::Spades),
        (Rank::Two, Suit::Hearts),
        (Rank::Two, Suit::Diamonds),
        (Rank::Three, Suit::Clubs),
        (Rank::Three, Suit::Spades),
    ]);
    let settlement = score(&cards, EvalRules::default());
    assert_eq!(settlement.category, HandCategory::FullHouse);
    assert_eq!(settlement.payout, 100);
}

#[test]
fn flush_without_a_straight() {
    let cards = hand(&[
        (Rank::Two, Suit::Hearts),
        (Rank::Five, Suit::Hearts),
        (Rank::Eight, Suit::Hearts),
        (Rank::Jack, Suit::Hearts),
        (Rank::King, Suit::Hearts),
    ]);
    assert_eq!(categorize(&cards, EvalRules::default()), HandCategory::Flush);
}

#[test]
fn straight_across_suits() {
    let cards = hand(&[
        (Rank::Seven, Suit::Spades),
        (Rank::Eight, Suit::Hearts),
        (Rank::Nine, Suit::Diamonds),
        (Rank::Ten, Suit::Clubs),
        (Rank::Jack, Suit::Spades),
    ]);
    assert_eq!(
        categorize(&cards, EvalRules::default()),
        HandCategory::Straight
    );
}

#[test]
fn the_wheel_counts_as_a_five_high_straight() {
    let cards = hand(&[
        (Rank::Ace, Suit::Spades),
        (Rank::Two, Suit::Hearts),
        (Rank::Three, Suit::Diamonds),
        (Rank::Four, Suit::Clubs),
        (Rank::Five, Suit::Spades),
    ]);
    assert_eq!(
        categorize(&cards, EvalRules::default()),
        HandCategory::Straight
    );
}

#[test]
fn low_run_in_one_suit_is_a_straight_flush_not_royal() {
    let cards = hand(&[
        (Rank::Ace, Suit::Diamonds),
        (Rank::Two, Suit::Diamonds),
        (Rank::Three, Suit::Diamonds),
        (Rank::Four, Suit::Diamonds),
        (Rank::Five, Suit::Diamonds),
    ]);
    assert_eq!(
        categorize(&cards, EvalRules::default()),
        HandCategory::StraightFlush
    );
}

#[test]
fn pairs_and_trips_ladder() {
    let trips = hand(&[
        (Rank::Queen, Suit::Spades),
        (Rank::Queen, Suit::Hearts),
        (Rank::Queen, Suit::Diamonds),
        (Rank::Two, Suit::Clubs),
        (Rank::Nine, Suit::Spades),
    ]);
    assert_eq!(
        categorize(&trips, EvalRules::default()),
        HandCategory::ThreeOfAKind
    );

    let two_pair = hand(&[
        (Rank::Queen, Suit::Spades),
        (Rank::Queen, Suit::Hearts),
        (Rank::Nine, Suit::Diamonds),
        (Rank::Nine, Suit::Clubs),
        (Rank::Two, Suit::Spades),
    ]);
    assert_eq!(
        categorize(&two_pair, EvalRules::default()),
        HandCategory::TwoPair
    );

    let pair = hand(&[
        (Rank::Queen, Suit::Spades),
        (Rank::Queen, Suit::Hearts),
        (Rank::Nine, Suit::Diamonds),
        (Rank::Four, Suit::Clubs),
        (Rank::Two, Suit::Spades),
    ]);
    assert_eq!(categorize(&pair, EvalRules::default()), HandCategory::OnePair);
}

#[test]
fn high_card_pays_nothing() {
    let cards = hand(&[
        (Rank::Two, Suit::Spades),
        (Rank::Three, Suit::Hearts),
        (Rank::Four, Suit::Diamonds),
        (Rank::Five, Suit::Clubs),
        (Rank::Seven, Suit::Spades),
    ]);
    let settlement = score(&cards, EvalRules::default());
    assert_eq!(settlement.category, HandCategory::HighCard);
    assert_eq!(settlement.payout, 0);
}

#[test]
fn jokers_wild_turns_every_jack_into_a_wildcard() {
    let cards = hand(&[
        (Rank::Jack, Suit::Spades),
        (Rank::Jack, Suit::Hearts),
        (Rank::Two, Suit::Diamonds),
        (Rank::Three, Suit::Clubs),
        (Rank::Four, Suit::Spades),
    ]);
    let rules = EvalRules {
        lucky: false,
        jokers_wild: true,
    };
    let settlement = score(&cards, rules);
    assert_eq!(settlement.category, HandCategory::ThreeOfAKind);
    assert_eq!(settlement.payout, 30);
    // Without the modifier the same cards are a bare pair of Jacks.
    assert_eq!(
        categorize(&cards, EvalRules::default()),
        HandCategory::OnePair
    );
}

#[test]
fn wildcards_boost_the_largest_group_only() {
    let mut cards = hand(&[
        (Rank::Nine, Suit::Spades),
        (Rank::Nine, Suit::Hearts),
        (Rank::Four, Suit::Diamonds),
        (Rank::Four, Suit::Clubs),
    ]);
    cards.push(Card::wild());
    // One pair of nines grows to trips; the fours stay a pair.
    assert_eq!(
        categorize(&cards, EvalRules::default()),
        HandCategory::FullHouse
    );
}

#[test]
fn wild_hands_never_make_flushes_or_straights() {
    let mut four_spades = hand(&[
        (Rank::Two, Suit::Spades),
        (Rank::Five, Suit::Spades),
        (Rank::Seven, Suit::Spades),
        (Rank::Nine, Suit::Spades),
    ]);
    four_spades.push(Card::wild());
    assert_eq!(
        categorize(&four_spades, EvalRules::default()),
        HandCategory::OnePair
    );

    let mut open_run = hand(&[
        (Rank::Five, Suit::Spades),
        (Rank::Six, Suit::Hearts),
        (Rank::Seven, Suit::Diamonds),
        (Rank::Eight, Suit::Clubs),
    ]);
    open_run.push(Card::wild());
    assert_eq!(
        categorize(&open_run, EvalRules::default()),
        HandCategory::OnePair
    );

    // A forced-wild Jack spoils a natural flush the same way.
    let jack_flush = hand(&[
        (Rank::Two, Suit::Hearts),
        (Rank::Five, Suit::Hearts),
        (Rank::Eight, Suit::Hearts),
        (Rank::Jack, Suit::Hearts),
        (Rank::King, Suit::Hearts),
    ]);
    let rules = EvalRules {
        lucky: false,
        jokers_wild: true,
    };
    assert_eq!(categorize(&jack_flush, rules), HandCategory::OnePair);
}

#[test]
fn an_all_wild_hand_scores_as_one_big_group() {
    let cards = vec![Card::wild(); 5];
    assert_eq!(
        categorize(&cards, EvalRules::default()),
        HandCategory::FourOfAKind
    );
}

#[test]
fn lucky_charm_sometimes_overrides_the_real_hand() {
    let cards = hand(&[
        (Rank::Two, Suit::Spades),
        (Rank::Three, Suit::Hearts),
        (Rank::Four, Suit::Diamonds),
        (Rank::Five, Suit::Clubs),
        (Rank::Seven, Suit::Spades),
    ]);
    let rules = EvalRules {
        lucky: true,
        jokers_wild: false,
    };
    let mut rng = RngState::from_seed(99);
    let lucky = [
        HandCategory::LuckyPair,
        HandCategory::LuckyTwoPair,
        HandCategory::LuckyThreeOfAKind,
    ];
    let mut upgrades = 0;
    for _ in 0..2000 {
        let settlement = evaluate(&cards, 10, rules, &mut rng);
        if lucky.contains(&settlement.category) {
            upgrades += 1;
        } else {
            assert_eq!(settlement.category, HandCategory::HighCard);
        }
    }
    assert!(upgrades > 0, "the 10% upgrade roll never fired");
    assert!(upgrades < 2000, "the upgrade roll fired every time");
}

#[test]
fn fractional_multipliers_floor_the_payout() {
    let settlement = Settlement::from_category(HandCategory::LuckyPair, 15);
    assert_eq!(settlement.payout, 22); // floor(15 * 1.5)
    let settlement = Settlement::from_category(HandCategory::LuckyTwoPair, 7);
    assert_eq!(settlement.payout, 17); // floor(7 * 2.5)
}

#[test]
fn paytable_multipliers() {
    let expected = [
        (HandCategory::RoyalFlush, 500.0),
        (HandCategory::StraightFlush, 100.0),
        (HandCategory::FourOfAKind, 50.0),
        (HandCategory::FullHouse, 10.0),
        (HandCategory::Flush, 5.0),
        (HandCategory::Straight, 5.0),
        (HandCategory::ThreeOfAKind, 3.0),
        (HandCategory::TwoPair, 2.0),
        (HandCategory::OnePair, 1.0),
        (HandCategory::HighCard, 0.0),
        (HandCategory::LuckyPair, 1.5),
        (HandCategory::LuckyTwoPair, 2.5),
        (HandCategory::LuckyThreeOfAKind, 4.0),
    ];
    for (category, multiplier) in expected {
        assert_eq!(category.multiplier(), multiplier, "{}", category.id());
    }
}
