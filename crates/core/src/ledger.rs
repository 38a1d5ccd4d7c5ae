use serde::{Deserialize, Serialize};

pub const STARTING_BALANCE: i64 = 500;

/// Stacking modifier counters. Charges are rounds (lucky, insurance,
/// jokers_wild), uses (mulligan), flat amounts (passive_income), a percent
/// level (compound_interest), or a one-time flag (double_or_nothing_master).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Powerups {
    #[serde(default)]
    pub wildcards_in_deck: u32,
    #[serde(default)]
    pub passive_income: i64,
    #[serde(default)]
    pub lucky: u32,
    #[serde(default)]
    pub insurance: u32,
    #[serde(default)]
    pub double_or_nothing_master: bool,
    #[serde(default)]
    pub mulligan: u32,
    #[serde(default)]
    pub jokers_wild: u32,
    /// Percent of balance accrued at each deal.
    #[serde(default)]
    pub compound_interest: u32,
    /// Purchase count; drives the next compound-interest price.
    #[serde(default)]
    pub compound_interest_purchases: u32,
}

/// The persisted economy. Round state is deliberately not part of this:
/// only balance, jackpot, and powerups survive a restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EconomyLedger {
    pub balance: i64,
    pub jackpot: i64,
    pub powerups: Powerups,
}

impl Default for EconomyLedger {
    fn default() -> Self {
        Self {
            balance: STARTING_BALANCE,
            jackpot: 0,
            powerups: Powerups::default(),
        }
    }
}

impl EconomyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// floor(balance × pct / 100); balance is non-negative whenever this runs.
    pub fn interest_accrual(&self) -> i64 {
        if self.powerups.compound_interest == 0 {
            return 0;
        }
        self.balance * self.powerups.compound_interest as i64 / 100
    }

    pub fn is_broke(&self) -> bool {
        self.balance <= 0
    }

    pub fn to_saved(&self, last_saved: Option<String>) -> SavedLedger {
        SavedLedger {
            balance: self.balance,
            jackpot: self.jackpot,
            powerups: SavedPowerups {
                current: self.powerups.clone(),
                wildcard: None,
                passive: None,
            },
            last_saved,
        }
    }

    pub fn from_saved(saved: SavedLedger) -> Self {
        Self {
            balance: saved.balance,
            jackpot: saved.jackpot.max(0),
            powerups: saved.powerups.migrate(),
        }
    }
}

fn default_balance() -> i64 {
    STARTING_BALANCE
}

/// External save schema: camelCase JSON under a single key, forward- and
/// backward-compatible. Unknown fields are ignored, missing fields default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedLedger {
    #[serde(default = "default_balance")]
    pub balance: i64,
    #[serde(default)]
    pub jackpot: i64,
    #[serde(default)]
    pub powerups: SavedPowerups,
    #[serde(default)]
    pub last_saved: Option<String>,
}

impl Default for SavedLedger {
    fn default() -> Self {
        Self {
            balance: STARTING_BALANCE,
            jackpot: 0,
            powerups: SavedPowerups::default(),
            last_saved: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SavedPowerups {
    #[serde(flatten)]
    pub current: Powerups,
    /// Legacy: individual wildcard charges, sold in batches of five.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wildcard: Option<i64>,
    /// Legacy: passive income as an on/off flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passive: Option<bool>,
}

impl SavedPowerups {
    pub fn migrate(self) -> Powerups {
        let mut powerups = self.current;
        if let Some(old) = self.wildcard {
            let old = old.max(0);
            powerups.wildcards_in_deck = ((old + 4) / 5) as u32;
        }
        if self.passive == Some(true) {
            powerups.passive_income = 5;
        }
        powerups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_load_roundtrip() {
        let mut ledger = EconomyLedger::new();
        ledger.balance = 1234;
        ledger.jackpot = 640;
        ledger.powerups.wildcards_in_deck = 2;
        ledger.powerups.passive_income = 15;
        ledger.powerups.lucky = 4;
        ledger.powerups.insurance = 1;
        ledger.powerups.double_or_nothing_master = true;
        ledger.powerups.mulligan = 3;
        ledger.powerups.jokers_wild = 2;
        ledger.powerups.compound_interest = 3;
        ledger.powerups.compound_interest_purchases = 3;

        let saved = ledger.to_saved(Some("2026-08-06T12:00:00Z".to_string()));
        let reloaded = EconomyLedger::from_saved(saved);
        assert_eq!(reloaded, ledger);
    }

    #[test]
    fn saved_schema_uses_camel_case_keys() {
        let ledger = EconomyLedger::new();
        let body = serde_json::to_string(&ledger.to_saved(None)).expect("encode");
        assert!(body.contains("\"wildcardsInDeck\""));
        assert!(body.contains("\"passiveIncome\""));
        assert!(body.contains("\"doubleOrNothingMaster\""));
        assert!(body.contains("\"compoundInterestPurchases\""));
    }

    #[test]
    fn missing_fields_default() {
        let saved: SavedLedger = serde_json::from_str("{}").expect("decode");
        let ledger = EconomyLedger::from_saved(saved);
        assert_eq!(ledger.balance, STARTING_BALANCE);
        assert_eq!(ledger.jackpot, 0);
        assert_eq!(ledger.powerups, Powerups::default());
    }

    #[test]
    fn legacy_wildcard_count_migrates_in_batches_of_five() {
        let body = r#"{"balance":800,"jackpot":10,"powerups":{"wildcard":12}}"#;
        let saved: SavedLedger = serde_json::from_str(body).expect("decode");
        let ledger = EconomyLedger::from_saved(saved);
        assert_eq!(ledger.powerups.wildcards_in_deck, 3);
        assert_eq!(ledger.balance, 800);
    }

    #[test]
    fn legacy_passive_flag_migrates_to_flat_income() {
        let body = r#"{"powerups":{"passive":true}}"#;
        let saved: SavedLedger = serde_json::from_str(body).expect("decode");
        assert_eq!(EconomyLedger::from_saved(saved).powerups.passive_income, 5);

        let body = r#"{"powerups":{"passive":false}}"#;
        let saved: SavedLedger = serde_json::from_str(body).expect("decode");
        assert_eq!(EconomyLedger::from_saved(saved).powerups.passive_income, 0);
    }

    #[test]
    fn interest_accrual_floors() {
        let mut ledger = EconomyLedger::new();
        ledger.balance = 333;
        ledger.powerups.compound_interest = 3;
        assert_eq!(ledger.interest_accrual(), 9);
        ledger.powerups.compound_interest = 0;
        assert_eq!(ledger.interest_accrual(), 0);
    }
}
