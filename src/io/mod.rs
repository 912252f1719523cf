mod console;
mod csv;

pub use self::console::EnvelopeDepositSlot;
pub use self::console::ReaderKeypad;
pub use self::console::WriterScreen;
pub use self::csv::CSVAccountReader;

#[cfg(test)]
use mockall::automock;
use rust_decimal::Decimal;

use crate::AtmError;

/// Output device showing messages to the user.
#[cfg_attr(test, automock)]
pub trait Screen {
    /// Shows a message without a line break.
    fn display_message(&mut self, message: &str);
    fn display_message_line(&mut self, message: &str);
    /// Shows an amount formatted as dollars, e.g. `$1,000.00`.
    fn display_dollar_amount(&mut self, amount: Decimal) {
        self.display_message(&format_dollars(amount));
    }
}

/// Input device producing the numbers typed by the user.
#[cfg_attr(test, automock)]
pub trait Keypad {
    /// Returns the next number entered, or `AtmError::InputClosed` once no more input will come.
    fn get_input(&mut self) -> Result<u32, AtmError>;
}

#[cfg_attr(test, automock)]
pub trait DepositSlot {
    fn is_envelope_received(&mut self) -> bool;
}

pub fn format_dollars(amount: Decimal) -> String {
    let rounded = format!("{:.2}", amount.abs().round_dp(2));
    let (whole, cents) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}${}.{}", sign, grouped, cents)
}
