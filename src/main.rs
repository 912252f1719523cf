use anyhow::Context;
use atm_case_study::{
    Atm, CSVAccountReader, EnvelopeDepositSlot, MemoryBankDatabase, MemoryCashDispenser,
    ReaderKeypad, WriterScreen,
};
use log::info;
use std::env;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let bank = match args.get(1) {
        Some(filename) => {
            let accounts = CSVAccountReader::new(filename)
                .read()
                .with_context(|| format!("Error reading accounts from {}", filename))?;
            MemoryBankDatabase::from_accounts(accounts)?
        }
        None => MemoryBankDatabase::default(),
    };
    info!("Bank database ready with {} accounts", bank.len());

    let mut atm = Atm::builder()
        .bank(bank)
        .screen(WriterScreen::stdout())
        .keypad(ReaderKeypad::stdin())
        .cash_dispenser(MemoryCashDispenser::from_env())
        .deposit_slot(EnvelopeDepositSlot)
        .build();
    atm.run()?;
    Ok(())
}
