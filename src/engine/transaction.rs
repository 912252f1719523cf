//! Transactions a user can run once authenticated.
//!
//! A transaction only remembers the account it runs against. The ATM lends it the devices it
//! needs for the duration of `execute`.
use log::{error, info, warn};
use rust_decimal::Decimal;
use std::fmt;

use super::BankDatabase;
use super::CashDispenser;
use crate::domain::AccountNumber;
use crate::domain::AtmError;
use crate::domain::MenuOption;
use crate::domain::WithdrawalOption;
use crate::io::DepositSlot;
use crate::io::Keypad;
use crate::io::Screen;

const CANCELED_DEPOSIT: u32 = 0;

/// How a transaction ended. Declines are reported to the user and are not errors.
#[derive(Debug)]
pub enum Outcome {
    Completed,
    Cancelled,
    Declined(AtmError),
}

impl Outcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed)
    }
}

/// Devices lent to a transaction while it runs.
pub struct Peripherals<'a> {
    pub screen: &'a mut dyn Screen,
    pub keypad: &'a mut dyn Keypad,
    pub bank: &'a mut dyn BankDatabase,
    pub cash_dispenser: &'a mut dyn CashDispenser,
    pub deposit_slot: &'a mut dyn DepositSlot,
}

impl fmt::Debug for Peripherals<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Peripherals").finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transaction {
    BalanceInquiry(BalanceInquiry),
    Withdrawal(Withdrawal),
    Deposit(Deposit),
}

impl Transaction {
    /// Builds the transaction behind a main menu entry. `Exit` has no transaction.
    pub fn from_menu(option: MenuOption, account_number: AccountNumber) -> Option<Self> {
        match option {
            MenuOption::BalanceInquiry => {
                Some(Transaction::BalanceInquiry(BalanceInquiry::new(account_number)))
            }
            MenuOption::Withdrawal => Some(Transaction::Withdrawal(Withdrawal::new(account_number))),
            MenuOption::Deposit => Some(Transaction::Deposit(Deposit::new(account_number))),
            MenuOption::Exit => None,
        }
    }

    pub fn account_number(&self) -> AccountNumber {
        match self {
            Transaction::BalanceInquiry(t) => t.account_number,
            Transaction::Withdrawal(t) => t.account_number,
            Transaction::Deposit(t) => t.account_number,
        }
    }

    pub fn execute(&self, devices: Peripherals<'_>) -> Result<Outcome, AtmError> {
        match self {
            Transaction::BalanceInquiry(t) => t.execute(devices.screen, devices.bank),
            Transaction::Withdrawal(t) => t.execute(
                devices.screen,
                devices.keypad,
                devices.bank,
                devices.cash_dispenser,
            ),
            Transaction::Deposit(t) => t.execute(
                devices.screen,
                devices.keypad,
                devices.bank,
                devices.deposit_slot,
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceInquiry {
    account_number: AccountNumber,
}

impl BalanceInquiry {
    pub fn new(account_number: AccountNumber) -> Self {
        BalanceInquiry { account_number }
    }

    pub fn execute(
        &self,
        screen: &mut dyn Screen,
        bank: &dyn BankDatabase,
    ) -> Result<Outcome, AtmError> {
        let available = bank.get_available_balance(self.account_number)?;
        let total = bank.get_total_balance(self.account_number)?;

        screen.display_message_line("\nBalance Information:");
        screen.display_message(" - Available balance: ");
        screen.display_dollar_amount(available);
        screen.display_message("\n - Total balance:     ");
        screen.display_dollar_amount(total);
        screen.display_message_line("");
        Ok(Outcome::Completed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Withdrawal {
    account_number: AccountNumber,
}

impl Withdrawal {
    pub fn new(account_number: AccountNumber) -> Self {
        Withdrawal { account_number }
    }

    /// Runs a single withdrawal attempt. Balance and cash are both checked before anything is
    /// debited or dispensed.
    pub fn execute(
        &self,
        screen: &mut dyn Screen,
        keypad: &mut dyn Keypad,
        bank: &mut dyn BankDatabase,
        cash_dispenser: &mut dyn CashDispenser,
    ) -> Result<Outcome, AtmError> {
        let amount = match self.display_menu_of_amounts(screen, keypad)? {
            Ok(WithdrawalOption::Amount(amount)) => amount,
            Ok(WithdrawalOption::Cancel) => {
                screen.display_message_line("\nCanceling transaction...");
                return Ok(Outcome::Cancelled);
            }
            Err(e) => {
                screen.display_message_line("\nInvalid selection.");
                return Ok(Outcome::Declined(e));
            }
        };
        let requested = Decimal::from(amount);

        let available = bank.get_available_balance(self.account_number)?;
        if requested > available {
            warn!(
                "Withdrawal of {} declined for account {}: insufficient funds",
                amount, self.account_number
            );
            screen.display_message_line("\nInsufficient funds in your account.");
            return Ok(Outcome::Declined(AtmError::InsufficientFunds {
                account_number: self.account_number,
                requested,
                available,
            }));
        }

        if !cash_dispenser.is_sufficient_cash_available(amount) {
            warn!(
                "Withdrawal of {} declined for account {}: insufficient cash",
                amount, self.account_number
            );
            screen.display_message_line("\nInsufficient cash available in the ATM.");
            return Ok(Outcome::Declined(AtmError::InsufficientCash(amount)));
        }

        bank.debit(self.account_number, requested)?;
        if let Err(e) = cash_dispenser.dispense_cash(amount) {
            error!(
                "Dispensing {} for account {} failed, reversing debit: {}",
                amount, self.account_number, e
            );
            bank.reverse_debit(self.account_number, requested)?;
            return Err(e);
        }

        info!("Dispensed {} to account {}", amount, self.account_number);
        screen.display_message_line("\nYour cash has been dispensed. Please take your cash now.");
        Ok(Outcome::Completed)
    }

    fn display_menu_of_amounts(
        &self,
        screen: &mut dyn Screen,
        keypad: &mut dyn Keypad,
    ) -> Result<Result<WithdrawalOption, AtmError>, AtmError> {
        screen.display_message_line("\nWithdrawal Menu:");
        for (i, amount) in WithdrawalOption::AMOUNTS.iter().enumerate() {
            screen.display_message_line(&format!("{} - ${}", i + 1, amount));
        }
        screen.display_message_line(&format!(
            "{} - Cancel transaction",
            WithdrawalOption::CANCEL_CODE
        ));
        screen.display_message("\nChoose a withdrawal amount: ");
        Ok(WithdrawalOption::try_from(keypad.get_input()?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deposit {
    account_number: AccountNumber,
}

impl Deposit {
    pub fn new(account_number: AccountNumber) -> Self {
        Deposit { account_number }
    }

    /// Takes the amount in cents, waits for the envelope and credits the total balance. The
    /// envelope content is trusted.
    pub fn execute(
        &self,
        screen: &mut dyn Screen,
        keypad: &mut dyn Keypad,
        bank: &mut dyn BankDatabase,
        deposit_slot: &mut dyn DepositSlot,
    ) -> Result<Outcome, AtmError> {
        screen.display_message("\nPlease enter a deposit amount in CENTS (or 0 to cancel): ");
        let cents = keypad.get_input()?;
        if cents == CANCELED_DEPOSIT {
            screen.display_message_line("\nCanceling transaction...");
            return Ok(Outcome::Cancelled);
        }
        let amount = Decimal::new(i64::from(cents), 2);

        screen.display_message("\nPlease insert a deposit envelope containing ");
        screen.display_dollar_amount(amount);
        screen.display_message_line(".");

        if !deposit_slot.is_envelope_received() {
            screen.display_message_line(
                "\nYou did not insert an envelope, so the ATM has canceled your transaction.",
            );
            return Ok(Outcome::Cancelled);
        }

        bank.credit(self.account_number, amount)?;
        info!("Deposited {} to account {}", amount, self.account_number);
        screen.display_message_line(
            "\nYour envelope has been received.\nNOTE: The money just deposited will not be \
             available until we verify the amount of any enclosed cash and your checks clear.",
        );
        Ok(Outcome::Completed)
    }
}
