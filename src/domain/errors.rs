use rust_decimal::Decimal;
use thiserror::Error;

use crate::AccountNumber;

#[derive(Error, Debug)]
pub enum AtmError {
    #[error("Account {0} not found")]
    AccountNotFound(AccountNumber),
    #[error("Account {0} already exists")]
    DuplicateAccount(AccountNumber),
    #[error("Account {0} has inconsistent balances")]
    InvalidAccount(AccountNumber),
    #[error("Insufficient funds in account {account_number}: requested {requested}, available {available}")]
    InsufficientFunds {
        account_number: AccountNumber,
        requested: Decimal,
        available: Decimal,
    },
    #[error("Insufficient cash available in the dispenser for {0}")]
    InsufficientCash(u32),
    #[error("Amount {0} cannot be dispensed in whole bills")]
    UnsupportedAmount(u32),
    #[error("Invalid amount {0}")]
    InvalidAmount(Decimal),
    #[error("Invalid menu selection {0}")]
    InvalidSelection(u32),
    #[error("Invalid transaction code {0}")]
    InvalidTransactionCode(u32),
    #[error("No user is authenticated")]
    NotAuthenticated,
    #[error("Keypad input closed")]
    InputClosed,
    #[error("I/O error - {0}")]
    IOError(#[from] std::io::Error),
    #[error("Error parsing CSV file - {0}")]
    CSVError(#[from] csv::Error),
}
