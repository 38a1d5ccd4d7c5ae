use crate::{
    evaluate, shop, Card, Deck, EconomyLedger, EvalRules, Event, EventBus, Powerup, PurchaseError,
    Rank, RngState, Settlement,
};
use thiserror::Error;

mod double;

pub use double::{hilo_wins, DoubleGame, DoubleOdds, GuessDirection, DOUBLE_ROUND_CAP};

pub const HAND_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Dealt,
    /// A winning hand is on the table; the payout is held until the player
    /// collects or takes it into double-or-nothing.
    Evaluated,
    Doubling,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("bet must be positive and within balance")]
    InvalidBet,
    #[error("no cards selected")]
    NothingSelected,
    #[error("hand already discarded")]
    AlreadyDiscarded,
    #[error("no mulligans left")]
    NoMulligans,
    #[error("invalid phase: {0:?}")]
    InvalidPhase(Phase),
    #[error("invalid card index {0}")]
    InvalidCardIndex(usize),
    #[error("table is busy")]
    Busy,
}

/// The session controller: one player, one round in flight, one ledger.
/// All economy mutation goes through here; callers drain the event bus and
/// persist the ledger after every command.
#[derive(Debug)]
pub struct Table {
    pub ledger: EconomyLedger,
    pub rng: RngState,
    phase: Phase,
    hand: Vec<Card>,
    selected: Vec<usize>,
    has_discarded: bool,
    busy: bool,
    bet: i64,
    pending_payout: i64,
    double: Option<DoubleGame>,
}

impl Table {
    pub fn new(ledger: EconomyLedger, rng: RngState) -> Self {
        Self {
            ledger,
            rng,
            phase: Phase::Idle,
            hand: Vec::new(),
            selected: Vec::new(),
            has_discarded: false,
            busy: false,
            bet: 0,
            pending_payout: 0,
            double: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    /// Indices marked for discard, in the order they were picked.
    pub fn selected(&self) -> &[usize] {
        &self.selected
    }

    pub fn has_discarded(&self) -> bool {
        self.has_discarded
    }

    pub fn bet(&self) -> i64 {
        self.bet
    }

    pub fn pending_payout(&self) -> i64 {
        self.pending_payout
    }

    pub fn double_game(&self) -> Option<&DoubleGame> {
        self.double.as_ref()
    }

    pub fn busy(&self) -> bool {
        self.busy
    }

    /// The presentation layer holds the table busy while it paces an
    /// animation; every command is rejected until released.
    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    fn ensure_ready(&self) -> Result<(), TableError> {
        if self.busy {
            Err(TableError::Busy)
        } else {
            Ok(())
        }
    }

    /// Validates the bet against the pre-accrual balance, then accrues
    /// compound interest and passive income, deducts the bet, and deals five
    /// cards from a fresh deck.
    pub fn deal(&mut self, bet: i64, events: &mut EventBus) -> Result<(), TableError> {
        self.ensure_ready()?;
        if self.phase != Phase::Idle {
            return Err(TableError::InvalidPhase(self.phase));
        }
        if bet <= 0 || bet > self.ledger.balance {
            return Err(TableError::InvalidBet);
        }

        let interest = self.ledger.interest_accrual();
        let passive = self.ledger.powerups.passive_income;
        if interest > 0 || passive > 0 {
            self.ledger.balance += interest + passive;
            events.push(Event::IncomeAccrued {
                interest,
                passive,
                balance: self.ledger.balance,
            });
        }

        self.bet = bet;
        self.ledger.balance -= bet;
        self.has_discarded = false;
        self.selected.clear();
        self.hand = self.draw_hand();
        self.phase = Phase::Dealt;
        events.push(Event::HandDealt {
            count: self.hand.len(),
        });
        Ok(())
    }

    fn draw_hand(&mut self) -> Vec<Card> {
        let mut deck = Deck::fresh(self.ledger.powerups.wildcards_in_deck, &mut self.rng);
        let mut hand = Vec::with_capacity(HAND_SIZE);
        while hand.len() < HAND_SIZE {
            let Some(card) = deck.take() else { break };
            hand.push(card);
        }
        hand
    }

    /// Toggles a card in or out of the discard selection. Returns whether the
    /// card is selected afterwards.
    pub fn toggle_select(&mut self, index: usize) -> Result<bool, TableError> {
        self.ensure_ready()?;
        if self.phase != Phase::Dealt {
            return Err(TableError::InvalidPhase(self.phase));
        }
        if self.has_discarded {
            return Err(TableError::AlreadyDiscarded);
        }
        if index >= self.hand.len() {
            return Err(TableError::InvalidCardIndex(index));
        }
        if let Some(pos) = self.selected.iter().position(|&i| i == index) {
            self.selected.remove(pos);
            Ok(false)
        } else {
            self.selected.push(index);
            Ok(true)
        }
    }

    /// Replaces the selected cards from a fresh deck, in selection order,
    /// then evaluates. The discard can happen once per round.
    pub fn discard(&mut self, events: &mut EventBus) -> Result<Settlement, TableError> {
        self.ensure_ready()?;
        if self.phase != Phase::Dealt {
            return Err(TableError::InvalidPhase(self.phase));
        }
        if self.has_discarded {
            return Err(TableError::AlreadyDiscarded);
        }
        if self.selected.is_empty() {
            return Err(TableError::NothingSelected);
        }

        let mut deck = Deck::fresh(self.ledger.powerups.wildcards_in_deck, &mut self.rng);
        let indices = std::mem::take(&mut self.selected);
        let mut replaced = 0;
        for index in indices {
            let Some(card) = deck.take() else { break };
            self.hand[index] = card;
            replaced += 1;
        }
        self.has_discarded = true;
        events.push(Event::CardsReplaced { count: replaced });
        self.evaluate(events)
    }

    /// Throws the whole hand back and redeals without touching the bet or
    /// the discard right. Costs one mulligan charge.
    pub fn mulligan(&mut self, events: &mut EventBus) -> Result<(), TableError> {
        self.ensure_ready()?;
        if self.phase != Phase::Dealt {
            return Err(TableError::InvalidPhase(self.phase));
        }
        if self.has_discarded {
            return Err(TableError::AlreadyDiscarded);
        }
        if self.ledger.powerups.mulligan == 0 {
            return Err(TableError::NoMulligans);
        }
        self.ledger.powerups.mulligan -= 1;
        self.selected.clear();
        self.hand = self.draw_hand();
        events.push(Event::HandRedealt {
            mulligans_left: self.ledger.powerups.mulligan,
        });
        Ok(())
    }

    /// Keeps the hand as dealt and evaluates it.
    pub fn stand(&mut self, events: &mut EventBus) -> Result<Settlement, TableError> {
        self.ensure_ready()?;
        if self.phase != Phase::Dealt {
            return Err(TableError::InvalidPhase(self.phase));
        }
        self.evaluate(events)
    }

    fn evaluate(&mut self, events: &mut EventBus) -> Result<Settlement, TableError> {
        let rules = EvalRules {
            lucky: self.ledger.powerups.lucky > 0,
            jokers_wild: self.ledger.powerups.jokers_wild > 0,
        };
        let settlement = evaluate(&self.hand, self.bet, rules, &mut self.rng);

        // Wildcards dealt into the hand are spent whether or not they helped.
        // Jacks forced wild by Joker's Wild are not deck wildcards and cost
        // nothing.
        let wildcards_spent = self
            .hand
            .iter()
            .filter(|card| card.rank == Rank::Wild)
            .count() as u32;
        if wildcards_spent > 0 {
            self.ledger.powerups.wildcards_in_deck = self
                .ledger
                .powerups
                .wildcards_in_deck
                .saturating_sub(wildcards_spent);
        }

        // One charge per evaluated round, fired or not.
        if self.ledger.powerups.lucky > 0 {
            self.ledger.powerups.lucky -= 1;
        }
        if self.ledger.powerups.jokers_wild > 0 {
            self.ledger.powerups.jokers_wild -= 1;
        }

        events.push(Event::HandScored {
            category: settlement.category,
            multiplier: settlement.multiplier,
            payout: settlement.payout,
            wildcards_spent,
        });

        if settlement.payout > 0 {
            self.pending_payout = settlement.payout;
            self.phase = Phase::Evaluated;
        } else {
            if self.ledger.powerups.insurance > 0 {
                let refund = self.bet / 2;
                self.ledger.balance += refund;
                self.ledger.powerups.insurance -= 1;
                events.push(Event::InsuranceRefunded {
                    refund,
                    rounds_left: self.ledger.powerups.insurance,
                });
            }
            self.settle(0, events);
        }
        Ok(settlement)
    }

    /// Banks the held payout and returns to idle.
    pub fn collect(&mut self, events: &mut EventBus) -> Result<i64, TableError> {
        self.ensure_ready()?;
        if self.phase != Phase::Evaluated {
            return Err(TableError::InvalidPhase(self.phase));
        }
        let payout = self.pending_payout;
        self.settle(payout, events);
        Ok(payout)
    }

    /// Terminates the round: banks `payout`, clears round state, and signals
    /// the broke handler when the balance has run out.
    fn settle(&mut self, payout: i64, events: &mut EventBus) {
        self.ledger.balance += payout;
        events.push(Event::RoundSettled {
            payout,
            balance: self.ledger.balance,
        });
        self.hand.clear();
        self.selected.clear();
        self.has_discarded = false;
        self.bet = 0;
        self.pending_payout = 0;
        self.double = None;
        self.phase = Phase::Idle;
        if self.ledger.is_broke() {
            events.push(Event::WentBroke {
                balance: self.ledger.balance,
            });
        }
    }

    /// Shop purchases are legal in any phase; the shop is its own screen.
    pub fn buy(&mut self, item: Powerup, events: &mut EventBus) -> Result<i64, PurchaseError> {
        let cost = item.price(&self.ledger.powerups);
        let balance = shop::purchase(&mut self.ledger, item)?;
        events.push(Event::PowerupPurchased {
            item,
            cost,
            balance,
        });
        Ok(balance)
    }
}
