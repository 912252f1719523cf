use log::{debug, warn};
use std::fmt;
use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

use super::{DepositSlot, Keypad, Screen};
use crate::AtmError;

/// Screen printing to any writer.
pub struct WriterScreen<W> {
    writer: W,
}

impl<W> fmt::Debug for WriterScreen<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WriterScreen")
    }
}

impl WriterScreen<Stdout> {
    pub fn stdout() -> Self {
        WriterScreen::new(io::stdout())
    }
}

impl<W: Write> WriterScreen<W> {
    pub fn new(writer: W) -> Self {
        WriterScreen { writer }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write(&mut self, message: &str, newline: bool) {
        let result = if newline {
            writeln!(self.writer, "{}", message)
        } else {
            write!(self.writer, "{}", message)
        };
        // Prompts have no newline, flush so they show before the keypad blocks.
        if let Err(e) = result.and_then(|_| self.writer.flush()) {
            warn!("Could not write to screen: {}", e);
        }
    }
}

impl<W: Write> Screen for WriterScreen<W> {
    fn display_message(&mut self, message: &str) {
        self.write(message, false);
    }

    fn display_message_line(&mut self, message: &str) {
        self.write(message, true);
    }
}

/// Keypad reading one number per line.
pub struct ReaderKeypad<R> {
    reader: R,
}

impl<R> fmt::Debug for ReaderKeypad<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReaderKeypad")
    }
}

impl ReaderKeypad<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        ReaderKeypad::new(BufReader::new(io::stdin()))
    }
}

impl<R: BufRead> ReaderKeypad<R> {
    pub fn new(reader: R) -> Self {
        ReaderKeypad { reader }
    }
}

impl<R: BufRead> Keypad for ReaderKeypad<R> {
    fn get_input(&mut self) -> Result<u32, AtmError> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if self.reader.read_until(b'\n', &mut buf)? == 0 {
                return Err(AtmError::InputClosed);
            }
            let line = String::from_utf8_lossy(&buf);
            match line.trim().parse() {
                Ok(value) => return Ok(value),
                Err(_) => warn!("Ignoring non-numeric keypad input {:?}", line.trim()),
            }
        }
    }
}

/// Deposit slot of the simulation: every envelope is received.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvelopeDepositSlot;

impl DepositSlot for EnvelopeDepositSlot {
    fn is_envelope_received(&mut self) -> bool {
        debug!("Deposit envelope received");
        true
    }
}
