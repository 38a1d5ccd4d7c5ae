use crate::{Card, HandCategory, Powerup};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    IncomeAccrued {
        interest: i64,
        passive: i64,
        balance: i64,
    },
    HandDealt { count: usize },
    HandRedealt { mulligans_left: u32 },
    CardsReplaced { count: usize },
    HandScored {
        category: HandCategory,
        multiplier: f64,
        payout: i64,
        wildcards_spent: u32,
    },
    InsuranceRefunded { refund: i64, rounds_left: u32 },
    DoubleStarted { stake: i64, shown: Card },
    DoubleResolved {
        round: u32,
        shown: Card,
        mystery: Card,
        won: bool,
        stake: i64,
    },
    DoubleLost { swallowed: i64, jackpot: i64 },
    JackpotWon { amount: i64, total: i64 },
    DoubleCashedOut { amount: i64, balance: i64 },
    RoundSettled { payout: i64, balance: i64 },
    WentBroke { balance: i64 },
    PowerupPurchased {
        item: Powerup,
        cost: i64,
        balance: i64,
    },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }
}
