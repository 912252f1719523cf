use log::{debug, warn};
use std::env;

#[cfg(test)]
use mockall::automock;

use crate::domain::AtmError;

/// Face value of every bill loaded in the dispenser.
pub const BILL_DENOMINATION: u32 = 20;
/// Bills loaded in a fresh dispenser.
pub const INITIAL_BILL_COUNT: u32 = 500;

const CASH_BILLS_ENV: &str = "ATM_CASH_BILLS";

#[cfg_attr(test, automock)]
pub trait CashDispenser {
    fn is_sufficient_cash_available(&self, amount: u32) -> bool;
    fn dispense_cash(&mut self, amount: u32) -> Result<(), AtmError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryCashDispenser {
    count: u32,
}

impl MemoryCashDispenser {
    pub fn new(count: u32) -> Self {
        MemoryCashDispenser { count }
    }

    /// Loads the bill count from `ATM_CASH_BILLS`, falling back to the default load.
    pub fn from_env() -> Self {
        Self::from_var(env::var(CASH_BILLS_ENV).ok())
    }

    fn from_var(value: Option<String>) -> Self {
        match value {
            Some(value) => match value.trim().parse() {
                Ok(count) => Self::new(count),
                Err(_) => {
                    warn!(
                        "Ignoring {}={:?}, using {} bills",
                        CASH_BILLS_ENV, value, INITIAL_BILL_COUNT
                    );
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    fn bills_required(amount: u32) -> Result<u32, AtmError> {
        if amount == 0 || amount % BILL_DENOMINATION != 0 {
            return Err(AtmError::UnsupportedAmount(amount));
        }
        Ok(amount / BILL_DENOMINATION)
    }
}

impl Default for MemoryCashDispenser {
    fn default() -> Self {
        Self::new(INITIAL_BILL_COUNT)
    }
}

impl CashDispenser for MemoryCashDispenser {
    fn is_sufficient_cash_available(&self, amount: u32) -> bool {
        Self::bills_required(amount)
            .map(|bills| bills <= self.count)
            .unwrap_or(false)
    }

    fn dispense_cash(&mut self, amount: u32) -> Result<(), AtmError> {
        let bills = Self::bills_required(amount)?;
        if bills > self.count {
            return Err(AtmError::InsufficientCash(amount));
        }
        self.count -= bills;
        debug!("Dispensed {} bills, {} left", bills, self.count);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sufficient_cash() {
        let dispenser = MemoryCashDispenser::default();

        assert!(dispenser.is_sufficient_cash_available(100));
        assert!(dispenser.is_sufficient_cash_available(10000));
        assert!(!dispenser.is_sufficient_cash_available(10020));
    }

    #[test]
    fn test_insufficient_cash_for_small_load() {
        let dispenser = MemoryCashDispenser::new(10);

        assert!(dispenser.is_sufficient_cash_available(200));
        assert!(!dispenser.is_sufficient_cash_available(10000));
    }

    #[test]
    fn test_amount_must_be_whole_bills() {
        let mut dispenser = MemoryCashDispenser::default();

        assert!(!dispenser.is_sufficient_cash_available(30));
        assert!(!dispenser.is_sufficient_cash_available(0));
        assert!(matches!(
            dispenser.dispense_cash(30),
            Err(AtmError::UnsupportedAmount(30))
        ));
        assert_eq!(dispenser.count(), INITIAL_BILL_COUNT);
    }

    #[test]
    fn test_dispense_after_positive_check() {
        let mut dispenser = MemoryCashDispenser::default();

        assert!(dispenser.is_sufficient_cash_available(100));
        assert!(dispenser.dispense_cash(100).is_ok());
        assert_eq!(dispenser.count(), INITIAL_BILL_COUNT - 5);
    }

    #[test]
    fn test_bill_count_override() {
        assert_eq!(MemoryCashDispenser::from_var(Some(" 10 ".to_string())).count(), 10);
        assert_eq!(
            MemoryCashDispenser::from_var(Some("lots".to_string())).count(),
            INITIAL_BILL_COUNT
        );
        assert_eq!(
            MemoryCashDispenser::from_var(Some("-3".to_string())).count(),
            INITIAL_BILL_COUNT
        );
        assert_eq!(MemoryCashDispenser::from_var(None).count(), INITIAL_BILL_COUNT);
    }

    #[test]
    fn test_over_dispensing_is_an_error() {
        let mut dispenser = MemoryCashDispenser::new(2);

        assert!(matches!(
            dispenser.dispense_cash(60),
            Err(AtmError::InsufficientCash(60))
        ));
        assert_eq!(dispenser.count(), 2);
        assert!(dispenser.dispense_cash(40).is_ok());
        assert_eq!(dispenser.count(), 0);
    }
}
