use std::fmt;

use rust_decimal::Decimal;
use serde::Deserialize;
use typed_builder::TypedBuilder;

use super::AtmError;

pub type AccountNumber = u32;
pub type Pin = u32;

/// A bank account as stored by the bank database.
///
/// The available balance excludes deposits that have not cleared yet, so it never exceeds the
/// total balance.
#[derive(Clone, PartialEq, Eq, Deserialize, TypedBuilder)]
pub struct Account {
    #[serde(rename = "account")]
    account_number: AccountNumber,
    #[serde(rename = "pin")]
    pin: Pin,
    #[serde(rename = "available", with = "rust_decimal::serde::str")]
    #[builder(setter(into))]
    available_balance: Decimal,
    #[serde(rename = "total", with = "rust_decimal::serde::str")]
    #[builder(setter(into))]
    total_balance: Decimal,
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Account [number {} - available {:.2} - total {:.2}]",
            self.account_number, self.available_balance, self.total_balance
        )
    }
}

impl Account {
    pub fn account_number(&self) -> AccountNumber {
        self.account_number
    }

    pub fn available_balance(&self) -> Decimal {
        self.available_balance
    }

    pub fn total_balance(&self) -> Decimal {
        self.total_balance
    }

    pub fn validate_pin(&self, pin: Pin) -> bool {
        self.pin == pin
    }

    /// Checks that balances are non-negative and that available does not exceed total.
    pub fn validate(&self) -> Result<(), AtmError> {
        if self.available_balance.is_sign_negative()
            || self.total_balance.is_sign_negative()
            || self.available_balance > self.total_balance
        {
            return Err(AtmError::InvalidAccount(self.account_number));
        }
        Ok(())
    }

    /// Credits a deposit. Only the total balance grows until the deposit clears.
    pub fn credit(&mut self, amount: Decimal) -> Result<(), AtmError> {
        ensure_positive(amount)?;
        self.total_balance = checked_add(self.total_balance, amount)?;
        Ok(())
    }

    pub fn debit(&mut self, amount: Decimal) -> Result<(), AtmError> {
        ensure_positive(amount)?;
        if amount > self.available_balance {
            return Err(AtmError::InsufficientFunds {
                account_number: self.account_number,
                requested: amount,
                available: self.available_balance,
            });
        }
        self.available_balance -= amount;
        self.total_balance -= amount;
        Ok(())
    }

    /// Gives back a previous debit to both balances.
    pub fn reverse_debit(&mut self, amount: Decimal) -> Result<(), AtmError> {
        ensure_positive(amount)?;
        let available_balance = checked_add(self.available_balance, amount)?;
        let total_balance = checked_add(self.total_balance, amount)?;
        self.available_balance = available_balance;
        self.total_balance = total_balance;
        Ok(())
    }
}

fn checked_add(balance: Decimal, amount: Decimal) -> Result<Decimal, AtmError> {
    balance
        .checked_add(amount)
        .ok_or(AtmError::InvalidAmount(amount))
}

fn ensure_positive(amount: Decimal) -> Result<(), AtmError> {
    if amount <= Decimal::ZERO {
        return Err(AtmError::InvalidAmount(amount));
    }
    Ok(())
}

/// Entries of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    BalanceInquiry,
    Withdrawal,
    Deposit,
    Exit,
}

impl TryFrom<u32> for MenuOption {
    type Error = AtmError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(MenuOption::BalanceInquiry),
            2 => Ok(MenuOption::Withdrawal),
            3 => Ok(MenuOption::Deposit),
            4 => Ok(MenuOption::Exit),
            _ => Err(AtmError::InvalidTransactionCode(code)),
        }
    }
}

/// Entries of the withdrawal menu: a fixed dollar amount or cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WithdrawalOption {
    Amount(u32),
    Cancel,
}

impl WithdrawalOption {
    pub const AMOUNTS: [u32; 5] = [20, 40, 60, 100, 200];
    pub const CANCEL_CODE: u32 = 6;
}

impl TryFrom<u32> for WithdrawalOption {
    type Error = AtmError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            Self::CANCEL_CODE => Ok(WithdrawalOption::Cancel),
            1..=5 => Ok(WithdrawalOption::Amount(Self::AMOUNTS[code as usize - 1])),
            _ => Err(AtmError::InvalidSelection(code)),
        }
    }
}
