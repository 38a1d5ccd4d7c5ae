use super::{Phase, Table, TableError};
use crate::{Card, Deck, Event, EventBus};

/// Surviving this many rounds wins the jackpot pool on top of the stake.
pub const DOUBLE_ROUND_CAP: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessDirection {
    High,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoubleGame {
    pub stake: i64,
    pub round: u32,
    pub shown: Card,
}

/// Win/lose/tie chances for a shown card, in whole percent. Informational
/// only; outcomes never consult this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoubleOdds {
    pub higher: u32,
    pub lower: u32,
    pub tie: u32,
}

impl DoubleOdds {
    pub fn for_value(value: u8) -> Self {
        let v = i64::from(value.clamp(2, 14));
        Self {
            higher: percent(14 - v),
            lower: percent(v - 2),
            tie: percent(1),
        }
    }
}

fn percent(outcomes: i64) -> u32 {
    ((outcomes * 100) as f64 / 13.0).round() as u32
}

/// The comparison rule: ties always go to the player.
pub fn hilo_wins(direction: GuessDirection, shown: u8, mystery: u8) -> bool {
    match direction {
        GuessDirection::High => mystery >= shown,
        GuessDirection::Low => mystery <= shown,
    }
}

impl Table {
    /// High-low compares rank values only, so the deck here carries no
    /// wildcards regardless of what the player owns.
    fn draw_double_card(&mut self) -> Card {
        let deck = Deck::fresh(0, &mut self.rng);
        deck.cards()[0]
    }

    /// Puts the held payout at stake and shows the first card.
    pub fn enter_double(&mut self, events: &mut EventBus) -> Result<(), TableError> {
        self.ensure_ready()?;
        if self.phase != Phase::Evaluated {
            return Err(TableError::InvalidPhase(self.phase));
        }
        let shown = self.draw_double_card();
        let stake = self.pending_payout;
        self.pending_payout = 0;
        self.double = Some(DoubleGame {
            stake,
            round: 1,
            shown,
        });
        self.phase = Phase::Doubling;
        events.push(Event::DoubleStarted { stake, shown });
        Ok(())
    }

    /// Draws the mystery card from its own fresh deck and resolves the round.
    /// Returns whether the guess won.
    pub fn guess(
        &mut self,
        direction: GuessDirection,
        events: &mut EventBus,
    ) -> Result<bool, TableError> {
        self.ensure_ready()?;
        let Some(game) = self.double else {
            return Err(TableError::InvalidPhase(self.phase));
        };
        let mystery = self.draw_double_card();
        let won = hilo_wins(direction, game.shown.value(), mystery.value());
        events.push(Event::DoubleResolved {
            round: game.round,
            shown: game.shown,
            mystery,
            won,
            stake: game.stake,
        });

        if !won {
            self.ledger.jackpot += game.stake;
            events.push(Event::DoubleLost {
                swallowed: game.stake,
                jackpot: self.ledger.jackpot,
            });
            self.double = None;
            self.settle(0, events);
            return Ok(false);
        }

        let mut stake = game.stake * 2;
        let round = game.round + 1;
        if round > DOUBLE_ROUND_CAP {
            let amount = self.ledger.jackpot;
            self.ledger.jackpot = 0;
            stake += amount;
            events.push(Event::JackpotWon {
                amount,
                total: stake,
            });
            self.double = Some(DoubleGame {
                stake,
                round,
                shown: game.shown,
            });
            self.finish_double(events);
            return Ok(true);
        }

        let shown = self.draw_double_card();
        self.double = Some(DoubleGame {
            stake,
            round,
            shown,
        });
        Ok(true)
    }

    pub fn cash_out(&mut self, events: &mut EventBus) -> Result<i64, TableError> {
        self.ensure_ready()?;
        if self.phase != Phase::Doubling {
            return Err(TableError::InvalidPhase(self.phase));
        }
        Ok(self.finish_double(events))
    }

    fn finish_double(&mut self, events: &mut EventBus) -> i64 {
        let stake = self.double.take().map(|game| game.stake).unwrap_or(0);
        self.ledger.balance += stake;
        events.push(Event::DoubleCashedOut {
            amount: stake,
            balance: self.ledger.balance,
        });
        self.settle(0, events);
        stake
    }

    /// Present only while doubling and only for a master-powerup owner.
    pub fn double_odds(&self) -> Option<DoubleOdds> {
        if !self.ledger.powerups.double_or_nothing_master {
            return None;
        }
        self.double
            .as_ref()
            .map(|game| DoubleOdds::for_value(game.shown.value()))
    }
}
