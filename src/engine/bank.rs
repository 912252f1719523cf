//! Memory implementation of the bank database.
use log::{debug, info};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::fmt;

#[cfg(test)]
use mockall::automock;

use crate::domain::Account;
use crate::domain::AccountNumber;
use crate::domain::AtmError;
use crate::domain::Pin;

/// Account store consulted by the ATM.
#[cfg_attr(test, automock)]
pub trait BankDatabase {
    /// Returns `true` iff an account with this number exists and its PIN matches.
    fn authenticate_user(&self, account_number: AccountNumber, pin: Pin) -> bool;
    fn get_available_balance(&self, account_number: AccountNumber) -> Result<Decimal, AtmError>;
    fn get_total_balance(&self, account_number: AccountNumber) -> Result<Decimal, AtmError>;
    fn credit(&mut self, account_number: AccountNumber, amount: Decimal) -> Result<(), AtmError>;
    fn debit(&mut self, account_number: AccountNumber, amount: Decimal) -> Result<(), AtmError>;
    /// Undoes a debit whose cash could not be handed out.
    fn reverse_debit(
        &mut self,
        account_number: AccountNumber,
        amount: Decimal,
    ) -> Result<(), AtmError>;
}

/// Bank database holding every account in memory, owned exclusively by the database.
#[derive(Clone)]
pub struct MemoryBankDatabase {
    accounts: HashMap<AccountNumber, Account>,
}

impl fmt::Debug for MemoryBankDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryBankDatabase")
            .field("accounts", &self.accounts.len())
            .finish()
    }
}

impl MemoryBankDatabase {
    /// Creates a database with no accounts.
    pub fn empty() -> Self {
        MemoryBankDatabase {
            accounts: HashMap::new(),
        }
    }

    /// Creates a database from the given accounts.
    ///
    /// # Errors
    ///
    /// Fails with `DuplicateAccount` if two accounts share a number and with `InvalidAccount` if
    /// an account has an available balance above its total balance.
    pub fn from_accounts<I>(accounts: I) -> Result<Self, AtmError>
    where
        I: IntoIterator<Item = Account>,
    {
        let mut database = Self::empty();
        for account in accounts {
            database.insert(account)?;
        }
        Ok(database)
    }

    pub fn insert(&mut self, account: Account) -> Result<(), AtmError> {
        account.validate()?;
        let account_number = account.account_number();
        if self.accounts.contains_key(&account_number) {
            return Err(AtmError::DuplicateAccount(account_number));
        }
        debug!("Loaded {:?}", account);
        self.accounts.insert(account_number, account);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn account(&self, account_number: AccountNumber) -> Result<&Account, AtmError> {
        self.accounts
            .get(&account_number)
            .ok_or(AtmError::AccountNotFound(account_number))
    }

    fn account_mut(&mut self, account_number: AccountNumber) -> Result<&mut Account, AtmError> {
        self.accounts
            .get_mut(&account_number)
            .ok_or(AtmError::AccountNotFound(account_number))
    }
}

impl Default for MemoryBankDatabase {
    /// The two demo accounts every fresh ATM knows about.
    fn default() -> Self {
        let mut accounts = HashMap::new();
        for account in [
            Account::builder()
                .account_number(12345)
                .pin(54321)
                .available_balance(dec!(1000.00))
                .total_balance(dec!(1200.00))
                .build(),
            Account::builder()
                .account_number(98765)
                .pin(56789)
                .available_balance(dec!(200.00))
                .total_balance(dec!(200.00))
                .build(),
        ] {
            accounts.insert(account.account_number(), account);
        }
        MemoryBankDatabase { accounts }
    }
}

impl BankDatabase for MemoryBankDatabase {
    fn authenticate_user(&self, account_number: AccountNumber, pin: Pin) -> bool {
        let authenticated = self
            .accounts
            .get(&account_number)
            .map(|account| account.validate_pin(pin))
            .unwrap_or(false);
        if authenticated {
            info!("Account {} authenticated", account_number);
        } else {
            info!("Authentication failed for account {}", account_number);
        }
        authenticated
    }

    fn get_available_balance(&self, account_number: AccountNumber) -> Result<Decimal, AtmError> {
        Ok(self.account(account_number)?.available_balance())
    }

    fn get_total_balance(&self, account_number: AccountNumber) -> Result<Decimal, AtmError> {
        Ok(self.account(account_number)?.total_balance())
    }

    fn credit(&mut self, account_number: AccountNumber, amount: Decimal) -> Result<(), AtmError> {
        self.account_mut(account_number)?.credit(amount)?;
        debug!("Credited {} to account {}", amount, account_number);
        Ok(())
    }

    fn debit(&mut self, account_number: AccountNumber, amount: Decimal) -> Result<(), AtmError> {
        self.account_mut(account_number)?.debit(amount)?;
        debug!("Debited {} from account {}", amount, account_number);
        Ok(())
    }

    fn reverse_debit(
        &mut self,
        account_number: AccountNumber,
        amount: Decimal,
    ) -> Result<(), AtmError> {
        self.account_mut(account_number)?.reverse_debit(amount)?;
        debug!("Reversed debit of {} on account {}", amount, account_number);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use fake::Fake;

    use super::*;

    #[test]
    fn test_authenticate_user() {
        let database = MemoryBankDatabase::default();

        assert!(database.authenticate_user(12345, 54321));
        assert!(!database.authenticate_user(12345, 12345));
        assert!(!database.authenticate_user(99999, 54321));
        assert!(database.authenticate_user(98765, 56789));
    }

    #[test]
    fn test_authenticate_unknown_accounts() {
        let database = MemoryBankDatabase::default();
        for _ in 0..100 {
            let account_number: AccountNumber = (100_000..u32::MAX).fake();
            let pin: Pin = (0..100_000).fake();
            assert!(!database.authenticate_user(account_number, pin));
        }
    }

    #[test]
    fn test_debit_updates_available_balance() {
        let mut database = MemoryBankDatabase::default();

        database.debit(12345, dec!(20.0)).unwrap();

        assert_eq!(database.get_available_balance(12345).unwrap(), dec!(980.0));
        assert_eq!(database.get_total_balance(12345).unwrap(), dec!(1180.0));
    }

    #[test]
    fn test_credit_updates_total_balance() {
        let account = Account::builder()
            .account_number(12345)
            .pin(54321)
            .available_balance(dec!(950.0))
            .total_balance(dec!(950.0))
            .build();
        let mut database = MemoryBankDatabase::from_accounts([account]).unwrap();

        database.credit(12345, dec!(50.0)).unwrap();

        assert_eq!(database.get_total_balance(12345).unwrap(), dec!(1000.0));
        assert_eq!(database.get_available_balance(12345).unwrap(), dec!(950.0));
    }

    #[test]
    fn test_repeated_reads_are_stable() {
        let database = MemoryBankDatabase::default();
        let first = (
            database.get_available_balance(12345).unwrap(),
            database.get_total_balance(12345).unwrap(),
        );
        let second = (
            database.get_available_balance(12345).unwrap(),
            database.get_total_balance(12345).unwrap(),
        );
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_account_is_an_error() {
        let mut database = MemoryBankDatabase::default();

        assert!(matches!(
            database.get_available_balance(99999),
            Err(AtmError::AccountNotFound(99999))
        ));
        assert!(matches!(
            database.credit(99999, dec!(1)),
            Err(AtmError::AccountNotFound(99999))
        ));
    }

    #[test]
    fn test_from_accounts_rejects_duplicates() {
        let account = Account::builder()
            .account_number(1)
            .pin(1)
            .available_balance(dec!(1))
            .total_balance(dec!(1))
            .build();

        let result = MemoryBankDatabase::from_accounts([account.clone(), account]);

        assert!(matches!(result, Err(AtmError::DuplicateAccount(1))));
    }
}
