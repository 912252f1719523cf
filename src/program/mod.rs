//! This module contains the ATM itself: it authenticates users against a `BankDatabase` and runs
//! the transactions they pick from the main menu, talking to them through a `Screen` and a
//! `Keypad` and handling money through a `CashDispenser` and a `DepositSlot`.
//!
//! # Example
//!
//! ```no_run
//! use atm_case_study::*;
//!
//! let mut atm = Atm::builder()
//!     .bank(MemoryBankDatabase::default())
//!     .screen(WriterScreen::stdout())
//!     .keypad(ReaderKeypad::stdin())
//!     .cash_dispenser(MemoryCashDispenser::default())
//!     .deposit_slot(EnvelopeDepositSlot)
//!     .build();
//! atm.run().unwrap();
//! ```
use log::{debug, info};
use typed_builder::TypedBuilder;

use crate::{
    AccountNumber, AtmError, BankDatabase, CashDispenser, DepositSlot, Keypad, MenuOption,
    Outcome, Peripherals, Screen, Transaction,
};

/// An automated teller machine serving one user at a time.
#[derive(Debug, TypedBuilder)]
pub struct Atm<B, S, K, C, D> {
    bank: B,
    screen: S,
    keypad: K,
    cash_dispenser: C,
    deposit_slot: D,
    #[builder(default, setter(skip))]
    session: Session,
}

/// Authentication state of the user at the machine.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    user_authenticated: bool,
    current_account_number: Option<AccountNumber>,
}

impl Session {
    fn authenticated(account_number: AccountNumber) -> Self {
        Session {
            user_authenticated: true,
            current_account_number: Some(account_number),
        }
    }
}

impl<B, S, K, C, D> Atm<B, S, K, C, D>
where
    B: BankDatabase,
    S: Screen,
    K: Keypad,
    C: CashDispenser,
    D: DepositSlot,
{
    /// Serves users until the keypad runs out of input.
    ///
    /// Each user is welcomed, asked for credentials until they authenticate, then served from the
    /// main menu until they choose to exit.
    pub fn run(&mut self) -> Result<(), AtmError> {
        match self.serve_users() {
            Err(AtmError::InputClosed) => {
                info!("Keypad closed, shutting down");
                Ok(())
            }
            other => other,
        }
    }

    fn serve_users(&mut self) -> Result<(), AtmError> {
        loop {
            self.screen.display_message_line("\nWelcome!");
            while !self.is_user_authenticated() {
                self.authenticate_user()?;
            }
            self.perform_transactions()?;
            self.session = Session::default();
            self.screen.display_message_line("\nThank you! Goodbye!");
        }
    }

    /// Asks for an account number and PIN and checks them against the bank.
    ///
    /// # Returns
    ///
    /// Whether the user is now authenticated. A failed attempt clears the session.
    pub fn authenticate_user(&mut self) -> Result<bool, AtmError> {
        self.screen
            .display_message("\nPlease enter your account number: ");
        let account_number = self.keypad.get_input()?;
        self.screen.display_message("\nEnter your PIN: ");
        let pin = self.keypad.get_input()?;

        if self.bank.authenticate_user(account_number, pin) {
            self.session = Session::authenticated(account_number);
            Ok(true)
        } else {
            self.session = Session::default();
            self.screen
                .display_message_line("Invalid account number or PIN. Please try again.");
            Ok(false)
        }
    }

    /// Builds the transaction for a main menu code for the authenticated account.
    pub fn create_transaction(&self, code: u32) -> Result<Transaction, AtmError> {
        let account_number = self
            .current_account_number()
            .ok_or(AtmError::NotAuthenticated)?;
        match MenuOption::try_from(code)? {
            MenuOption::Exit => Err(AtmError::InvalidTransactionCode(code)),
            option => Transaction::from_menu(option, account_number)
                .ok_or(AtmError::InvalidTransactionCode(code)),
        }
    }

    pub fn execute(&mut self, transaction: &Transaction) -> Result<Outcome, AtmError> {
        let outcome = transaction.execute(Peripherals {
            screen: &mut self.screen,
            keypad: &mut self.keypad,
            bank: &mut self.bank,
            cash_dispenser: &mut self.cash_dispenser,
            deposit_slot: &mut self.deposit_slot,
        })?;
        debug!("{:?} finished: {:?}", transaction, outcome);
        Ok(outcome)
    }

    fn perform_transactions(&mut self) -> Result<(), AtmError> {
        loop {
            let code = self.display_main_menu()?;
            if let Ok(MenuOption::Exit) = MenuOption::try_from(code) {
                self.screen.display_message_line("\nExiting the system...");
                return Ok(());
            }
            match self.create_transaction(code) {
                Ok(transaction) => {
                    self.execute(&transaction)?;
                }
                Err(AtmError::InvalidTransactionCode(_)) => {
                    self.screen
                        .display_message_line("\nYou did not enter a valid selection. Try again.");
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn display_main_menu(&mut self) -> Result<u32, AtmError> {
        self.screen.display_message_line("\nMain menu:");
        self.screen.display_message_line("1 - View my balance");
        self.screen.display_message_line("2 - Withdraw cash");
        self.screen.display_message_line("3 - Deposit funds");
        self.screen.display_message_line("4 - Exit\n");
        self.screen.display_message("Enter a choice: ");
        self.keypad.get_input()
    }

    pub fn is_user_authenticated(&self) -> bool {
        self.session.user_authenticated
    }

    pub fn current_account_number(&self) -> Option<AccountNumber> {
        self.session.current_account_number
    }

    pub fn bank(&self) -> &B {
        &self.bank
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    pub fn cash_dispenser(&self) -> &C {
        &self.cash_dispenser
    }
}
