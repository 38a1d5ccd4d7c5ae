use crate::{Card, Rank, RngState, Suit};

/// A freshly built pile of cards, drawn from the front.
///
/// There is no persistent shoe: every deal, discard refill, and high-low draw
/// builds and shuffles its own deck, so the same card showing up across
/// independent draws is expected.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    next: usize,
}

impl Deck {
    /// 52 standard cards in suit-major, rank-minor order, then
    /// `wildcard_count` explicit wildcards.
    pub fn build(wildcard_count: u32) -> Self {
        let mut cards = Vec::with_capacity(52 + wildcard_count as usize);
        for suit in Suit::STANDARD {
            for rank in Rank::STANDARD {
                cards.push(Card::standard(suit, rank));
            }
        }
        for _ in 0..wildcard_count {
            cards.push(Card::wild());
        }
        Self { cards, next: 0 }
    }

    pub fn fresh(wildcard_count: u32, rng: &mut RngState) -> Self {
        let mut deck = Self::build(wildcard_count);
        rng.shuffle(&mut deck.cards);
        deck
    }

    pub fn take(&mut self) -> Option<Card> {
        let card = self.cards.get(self.next).copied();
        if card.is_some() {
            self.next += 1;
        }
        card
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
