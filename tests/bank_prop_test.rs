use atm_case_study::*;

use proptest::prelude::*;
use rust_decimal::Decimal;

#[derive(Debug, Clone)]
enum Operation {
    Credit(u32),
    Debit(u32),
}

fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        (0..100_000u32).prop_map(Operation::Credit),
        (0..100_000u32).prop_map(Operation::Debit),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]
    #[test]
    fn test_balances_stay_consistent(operations in proptest::collection::vec(operation(), 0..50)) {
        let mut bank = MemoryBankDatabase::default();
        for operation in operations {
            let before = bank.get_available_balance(12345).unwrap();
            match operation {
                Operation::Credit(cents) => {
                    let amount = Decimal::new(i64::from(cents), 2);
                    match bank.credit(12345, amount) {
                        Ok(_) => prop_assert!(amount > Decimal::ZERO),
                        Err(e) => prop_assert!(matches!(e, AtmError::InvalidAmount(_))),
                    }
                    prop_assert_eq!(bank.get_available_balance(12345).unwrap(), before);
                }
                Operation::Debit(cents) => {
                    let amount = Decimal::new(i64::from(cents), 2);
                    match bank.debit(12345, amount) {
                        Ok(_) => prop_assert_eq!(
                            bank.get_available_balance(12345).unwrap(),
                            before - amount
                        ),
                        Err(AtmError::InsufficientFunds { .. }) => {
                            prop_assert!(amount > before);
                            prop_assert_eq!(bank.get_available_balance(12345).unwrap(), before);
                        }
                        Err(e) => prop_assert!(matches!(e, AtmError::InvalidAmount(_))),
                    }
                }
            }
            let available = bank.get_available_balance(12345).unwrap();
            let total = bank.get_total_balance(12345).unwrap();
            prop_assert!(available >= Decimal::ZERO);
            prop_assert!(available <= total);
        }
    }

    #[test]
    fn test_dispenser_never_goes_negative(amounts in proptest::collection::vec(0..1_000u32, 0..50)) {
        let mut dispenser = MemoryCashDispenser::new(20);
        for amount in amounts {
            let before = dispenser.count();
            if dispenser.is_sufficient_cash_available(amount) {
                prop_assert!(dispenser.dispense_cash(amount).is_ok());
                prop_assert_eq!(dispenser.count(), before - amount / BILL_DENOMINATION);
            } else {
                prop_assert!(dispenser.dispense_cash(amount).is_err());
                prop_assert_eq!(dispenser.count(), before);
            }
        }
    }
}
