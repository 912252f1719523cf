use std::fs::File;
use std::io::{BufReader, Read};

use crate::{Account, AtmError};

/// Reads accounts from a CSV file with the headers `account,pin,available,total`.
#[derive(Debug)]
pub struct CSVAccountReader<'a> {
    filename: &'a str,
}

impl<'a> CSVAccountReader<'a> {
    pub fn new(filename: &'a str) -> Self {
        CSVAccountReader { filename }
    }

    pub fn read(&self) -> Result<Vec<Account>, AtmError> {
        let file = File::open(self.filename)?;
        read_accounts(BufReader::new(file))
    }
}

pub(crate) fn read_accounts<R: Read>(reader: R) -> Result<Vec<Account>, AtmError> {
    let mut rdr = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(::csv::Trim::All)
        .from_reader(reader);
    let mut accounts = Vec::new();
    for record in rdr.deserialize() {
        accounts.push(record?);
    }
    Ok(accounts)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_read_accounts() {
        let data = "account, pin, available, total\n12345, 54321, 1000.00, 1200.00\n98765,56789,200,200\n";

        let accounts = read_accounts(data.as_bytes()).unwrap();

        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].account_number(), 12345);
        assert!(accounts[0].validate_pin(54321));
        assert_eq!(accounts[0].available_balance(), dec!(1000));
        assert_eq!(accounts[1].total_balance(), dec!(200));
    }

    #[test]
    fn test_read_accounts_keeps_decimal_precision() {
        let data = "account,pin,available,total\n1,1,12345678901234567.89,79228162514264337593543950335\n";

        let accounts = read_accounts(data.as_bytes()).unwrap();

        assert_eq!(
            accounts[0].available_balance(),
            Decimal::from_str("12345678901234567.89").unwrap()
        );
        assert_eq!(accounts[0].total_balance(), Decimal::MAX);
    }

    #[test]
    fn test_read_accounts_with_bad_record() {
        let data = "account,pin,available,total\n12345,not-a-pin,1,1\n";

        assert!(matches!(
            read_accounts(data.as_bytes()),
            Err(AtmError::CSVError(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let reader = CSVAccountReader::new("does/not/exist.csv");

        assert!(matches!(reader.read(), Err(AtmError::IOError(_))));
    }
}
