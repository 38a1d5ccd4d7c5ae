use crate::{rank_value, Card, Rank, RngState};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandCategory {
    RoyalFlush,
    StraightFlush,
    FourOfAKind,
    FullHouse,
    Flush,
    Straight,
    ThreeOfAKind,
    TwoPair,
    OnePair,
    HighCard,
    LuckyPair,
    LuckyTwoPair,
    LuckyThreeOfAKind,
}

impl HandCategory {
    pub const ALL: [HandCategory; 13] = [
        HandCategory::RoyalFlush,
        HandCategory::StraightFlush,
        HandCategory::FourOfAKind,
        HandCategory::FullHouse,
        HandCategory::Flush,
        HandCategory::Straight,
        HandCategory::ThreeOfAKind,
        HandCategory::TwoPair,
        HandCategory::OnePair,
        HandCategory::HighCard,
        HandCategory::LuckyPair,
        HandCategory::LuckyTwoPair,
        HandCategory::LuckyThreeOfAKind,
    ];

    pub fn id(self) -> &'static str {
        match self {
            HandCategory::RoyalFlush => "royal_flush",
            HandCategory::StraightFlush => "straight_flush",
            HandCategory::FourOfAKind => "four_kind",
            HandCategory::FullHouse => "full_house",
            HandCategory::Flush => "flush",
            HandCategory::Straight => "straight",
            HandCategory::ThreeOfAKind => "three_kind",
            HandCategory::TwoPair => "two_pair",
            HandCategory::OnePair => "pair",
            HandCategory::HighCard => "high_card",
            HandCategory::LuckyPair => "lucky_pair",
            HandCategory::LuckyTwoPair => "lucky_two_pair",
            HandCategory::LuckyThreeOfAKind => "lucky_three_kind",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            HandCategory::RoyalFlush => "Royal Flush",
            HandCategory::StraightFlush => "Straight Flush",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::FullHouse => "Full House",
            HandCategory::Flush => "Flush",
            HandCategory::Straight => "Straight",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::OnePair => "One Pair",
            HandCategory::HighCard => "High Card",
            HandCategory::LuckyPair => "Lucky Pair",
            HandCategory::LuckyTwoPair => "Lucky Two Pair",
            HandCategory::LuckyThreeOfAKind => "Lucky Three of a Kind",
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            HandCategory::RoyalFlush => 500.0,
            HandCategory::StraightFlush => 100.0,
            HandCategory::FourOfAKind => 50.0,
            HandCategory::FullHouse => 10.0,
            HandCategory::Flush => 5.0,
            HandCategory::Straight => 5.0,
            HandCategory::ThreeOfAKind => 3.0,
            HandCategory::TwoPair => 2.0,
            HandCategory::OnePair => 1.0,
            HandCategory::HighCard => 0.0,
            HandCategory::LuckyPair => 1.5,
            HandCategory::LuckyTwoPair => 2.5,
            HandCategory::LuckyThreeOfAKind => 4.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalRules {
    pub lucky: bool,
    pub jokers_wild: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settlement {
    pub category: HandCategory,
    pub multiplier: f64,
    pub payout: i64,
}

impl Settlement {
    pub fn from_category(category: HandCategory, bet: i64) -> Self {
        let multiplier = category.multiplier();
        Self {
            category,
            multiplier,
            payout: (bet as f64 * multiplier).floor() as i64,
        }
    }
}

const LUCKY_UPGRADES: [HandCategory; 3] = [
    HandCategory::LuckyPair,
    HandCategory::LuckyTwoPair,
    HandCategory::LuckyThreeOfAKind,
];

/// Score a five-card hand against the paytable.
///
/// An active lucky charm short-circuits real scoring one time in ten and pays
/// a fixed upgrade instead, even when the natural hand would have paid more.
pub fn evaluate(cards: &[Card], bet: i64, rules: EvalRules, rng: &mut RngState) -> Settlement {
    if rules.lucky && rng.roll(10) {
        let upgrade = LUCKY_UPGRADES[rng.pick(LUCKY_UPGRADES.len())];
        return Settlement::from_category(upgrade, bet);
    }
    Settlement::from_category(categorize(cards, rules), bet)
}

/// Deterministic categorization, with the lucky roll factored out.
pub fn categorize(cards: &[Card], rules: EvalRules) -> HandCategory {
    let wildcards = cards.iter().filter(|c| card_value(**c, rules) == 0).count();
    let regular: Vec<Card> = cards
        .iter()
        .copied()
        .filter(|c| card_value(*c, rules) != 0)
        .collect();

    // Flush and straight run over regular cards only and demand all five, so
    // any wild (or forced-wild Jack) locks the hand out of those categories.
    let is_flush = check_flush(&regular);
    let straight_high = check_straight(&regular, rules);

    let mut groups = count_groups(&regular, rules);
    if wildcards > 0 {
        if groups.is_empty() {
            groups.push(0);
        }
        groups[0] += wildcards;
    }
    let largest = groups.first().copied().unwrap_or(0);
    let second = groups.get(1).copied().unwrap_or(0);

    if is_flush && straight_high == Some(14) {
        HandCategory::RoyalFlush
    } else if is_flush && straight_high.is_some() {
        HandCategory::StraightFlush
    } else if largest >= 4 {
        HandCategory::FourOfAKind
    } else if largest == 3 && second == 2 {
        HandCategory::FullHouse
    } else if is_flush {
        HandCategory::Flush
    } else if straight_high.is_some() {
        HandCategory::Straight
    } else if largest == 3 {
        HandCategory::ThreeOfAKind
    } else if largest == 2 && second == 2 {
        HandCategory::TwoPair
    } else if largest == 2 {
        HandCategory::OnePair
    } else {
        HandCategory::HighCard
    }
}

/// Explicit wildcards count 0; with Joker's Wild active every Jack does too.
pub fn card_value(card: Card, rules: EvalRules) -> u8 {
    if card.is_wild {
        return 0;
    }
    if rules.jokers_wild && card.rank == Rank::Jack {
        return 0;
    }
    rank_value(card.rank)
}

fn check_flush(regular: &[Card]) -> bool {
    if regular.len() < 5 {
        return false;
    }
    let suit = regular[0].suit;
    regular.iter().all(|card| card.suit == suit)
}

/// Returns the high card of the straight, with A-2-3-4-5 counted as
/// high-card five.
fn check_straight(regular: &[Card], rules: EvalRules) -> Option<u8> {
    if regular.len() < 5 {
        return None;
    }
    let mut values: Vec<u8> = regular.iter().map(|c| card_value(*c, rules)).collect();
    values.sort_unstable();
    if values == [2, 3, 4, 5, 14] {
        return Some(5);
    }
    if values.windows(2).all(|w| w[1] - w[0] == 1) {
        values.last().copied()
    } else {
        None
    }
}

fn count_groups(regular: &[Card], rules: EvalRules) -> Vec<usize> {
    let mut counts: HashMap<u8, usize> = HashMap::new();
    for card in regular {
        *counts.entry(card_value(*card, rules)).or_insert(0) += 1;
    }
    let mut groups: Vec<usize> = counts.into_values().collect();
    groups.sort_by(|a, b| b.cmp(a));
    groups
}
