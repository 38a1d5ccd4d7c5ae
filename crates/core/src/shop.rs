use crate::{EconomyLedger, Powerups};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Everything the shop sells, each with a price rule and a stacking effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Powerup {
    Wildcard,
    PassiveIncome,
    LuckyCharm,
    Insurance,
    Mulligan,
    JokersWild,
    DoubleOrNothingMaster,
    CompoundInterest,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PurchaseError {
    #[error("insufficient funds: need {price}, have {balance}")]
    InsufficientFunds { price: i64, balance: i64 },
    #[error("already owned")]
    AlreadyOwned,
}

impl Powerup {
    pub const ALL: [Powerup; 8] = [
        Powerup::Wildcard,
        Powerup::PassiveIncome,
        Powerup::LuckyCharm,
        Powerup::Insurance,
        Powerup::Mulligan,
        Powerup::JokersWild,
        Powerup::DoubleOrNothingMaster,
        Powerup::CompoundInterest,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Powerup::Wildcard => "wildcard",
            Powerup::PassiveIncome => "passive",
            Powerup::LuckyCharm => "lucky",
            Powerup::Insurance => "insurance",
            Powerup::Mulligan => "mulligan",
            Powerup::JokersWild => "jokers",
            Powerup::DoubleOrNothingMaster => "master",
            Powerup::CompoundInterest => "interest",
        }
    }

    pub fn from_id(id: &str) -> Option<Powerup> {
        Powerup::ALL.into_iter().find(|item| item.id() == id)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Powerup::Wildcard => "Wild Card",
            Powerup::PassiveIncome => "Passive Income",
            Powerup::LuckyCharm => "Lucky Charm",
            Powerup::Insurance => "Insurance",
            Powerup::Mulligan => "Mulligan",
            Powerup::JokersWild => "Joker's Wild",
            Powerup::DoubleOrNothingMaster => "Double-or-Nothing Master",
            Powerup::CompoundInterest => "Compound Interest",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Powerup::Wildcard => "adds one wildcard to every fresh deck",
            Powerup::PassiveIncome => "+5 gc paid out at every deal",
            Powerup::LuckyCharm => "5 rounds of 10% lucky upgrades",
            Powerup::Insurance => "3 rounds of half-bet refunds on a loss",
            Powerup::Mulligan => "2 full redeals that keep your bet",
            Powerup::JokersWild => "5 rounds where every Jack plays wild",
            Powerup::DoubleOrNothingMaster => "shows high-low odds, permanently",
            Powerup::CompoundInterest => "+1% of balance accrued at every deal",
        }
    }

    pub fn price(self, powerups: &Powerups) -> i64 {
        match self {
            Powerup::Wildcard => 100,
            Powerup::PassiveIncome => 200,
            Powerup::LuckyCharm => 150,
            Powerup::Insurance => 75,
            Powerup::Mulligan => 200,
            Powerup::JokersWild => 250,
            Powerup::DoubleOrNothingMaster => 1000,
            Powerup::CompoundInterest => {
                500 + 250 * powerups.compound_interest_purchases as i64
            }
        }
    }

    fn apply(self, powerups: &mut Powerups) {
        match self {
            Powerup::Wildcard => powerups.wildcards_in_deck += 1,
            Powerup::PassiveIncome => powerups.passive_income += 5,
            Powerup::LuckyCharm => powerups.lucky += 5,
            Powerup::Insurance => powerups.insurance += 3,
            Powerup::Mulligan => powerups.mulligan += 2,
            Powerup::JokersWild => powerups.jokers_wild += 5,
            Powerup::DoubleOrNothingMaster => powerups.double_or_nothing_master = true,
            Powerup::CompoundInterest => {
                powerups.compound_interest += 1;
                powerups.compound_interest_purchases += 1;
            }
        }
    }
}

/// Deducts the price and applies the stacking effect, or fails with no state
/// change. A repeat master purchase is rejected before any money moves.
pub fn purchase(ledger: &mut EconomyLedger, item: Powerup) -> Result<i64, PurchaseError> {
    if item == Powerup::DoubleOrNothingMaster && ledger.powerups.double_or_nothing_master {
        return Err(PurchaseError::AlreadyOwned);
    }
    let price = item.price(&ledger.powerups);
    if ledger.balance < price {
        return Err(PurchaseError::InsufficientFunds {
            price,
            balance: ledger.balance,
        });
    }
    ledger.balance -= price;
    item.apply(&mut ledger.powerups);
    Ok(ledger.balance)
}
