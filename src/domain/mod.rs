//! Module that describe domain entities and errors.
mod entities;
mod errors;

pub use entities::Account;
pub use entities::AccountNumber;
pub use entities::MenuOption;
pub use entities::Pin;
pub use entities::WithdrawalOption;
pub use errors::*;
