mod bank;
mod cash;
mod transaction;

pub use bank::BankDatabase;
pub use bank::MemoryBankDatabase;
pub use cash::CashDispenser;
pub use cash::MemoryCashDispenser;
pub use cash::BILL_DENOMINATION;
pub use cash::INITIAL_BILL_COUNT;
pub use transaction::BalanceInquiry;
pub use transaction::Deposit;
pub use transaction::Outcome;
pub use transaction::Peripherals;
pub use transaction::Transaction;
pub use transaction::Withdrawal;

#[cfg(test)]
pub use bank::MockBankDatabase;
#[cfg(test)]
pub use cash::MockCashDispenser;
