//! Recording transport shared by the integration tests.
//!
//! Every line change, SPI write and delay lands in one timeline so tests can
//! check ordering across the bus and the control lines.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType as PinErrorType, OutputPin};
use embedded_hal::spi::{self, ErrorKind, SpiBus};
use pcd8544::driver::Pcd8544;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Ce(bool),
    Dc(bool),
    Rst(bool),
    Write(Vec<u8>),
    Flush,
    DelayMs(u32),
}

#[derive(Default)]
pub struct State {
    pub events: Vec<Event>,
    /// zero-based indices of SPI writes that should fail
    pub fail_writes: BTreeSet<usize>,
    writes: usize,
}

#[derive(Clone, Default)]
pub struct Recorder(Rc<RefCell<State>>);

impl Recorder {
    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().events.clone()
    }

    pub fn take(&self) -> Vec<Event> {
        std::mem::take(&mut self.0.borrow_mut().events)
    }

    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Write(bytes) => Some(bytes),
                _ => None,
            })
            .collect()
    }

    /// Fail the `n`th write from now on (0 = the next one)
    pub fn fail_write(&self, n: usize) {
        let mut state = self.0.borrow_mut();
        let index = state.writes + n;
        state.fail_writes.insert(index);
    }

    fn push(&self, event: Event) {
        self.0.borrow_mut().events.push(event);
    }
}

#[derive(Clone, Copy, Debug)]
pub enum LineId {
    Ce,
    Dc,
    Rst,
}

pub struct Line {
    id: LineId,
    recorder: Recorder,
}

impl PinErrorType for Line {
    type Error = Infallible;
}

impl Line {
    fn set(&mut self, high: bool) {
        let event = match self.id {
            LineId::Ce => Event::Ce(high),
            LineId::Dc => Event::Dc(high),
            LineId::Rst => Event::Rst(high),
        };
        self.recorder.push(event);
    }
}

impl OutputPin for Line {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set(true);
        Ok(())
    }
}

#[derive(Debug)]
pub struct BusFault;

impl spi::Error for BusFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

pub struct Bus {
    recorder: Recorder,
}

impl spi::ErrorType for Bus {
    type Error = BusFault;
}

impl SpiBus for Bus {
    fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
        unimplemented!("the PCD8544 is write-only")
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        self.recorder.push(Event::Write(words.to_vec()));
        let mut state = self.recorder.0.borrow_mut();
        let index = state.writes;
        state.writes += 1;
        if state.fail_writes.contains(&index) {
            Err(BusFault)
        } else {
            Ok(())
        }
    }

    fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> {
        unimplemented!("the PCD8544 is write-only")
    }

    fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
        unimplemented!("the PCD8544 is write-only")
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.recorder.push(Event::Flush);
        Ok(())
    }
}

pub struct Delay {
    recorder: Recorder,
}

impl DelayNs for Delay {
    fn delay_ns(&mut self, ns: u32) {
        self.recorder.push(Event::DelayMs(ns / 1_000_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.recorder.push(Event::DelayMs(ms));
    }
}

pub type Lcd = Pcd8544<Bus, Line, Line, Line>;

pub fn setup() -> (Lcd, Delay, Recorder) {
    let recorder = Recorder::default();
    let line = |id| Line {
        id,
        recorder: recorder.clone(),
    };
    let lcd = Pcd8544::new(
        Bus {
            recorder: recorder.clone(),
        },
        line(LineId::Ce),
        line(LineId::Dc),
        line(LineId::Rst),
    );
    let delay = Delay {
        recorder: recorder.clone(),
    };
    (lcd, delay, recorder)
}

/// A driver whose buffer has already been pushed once, with an empty log.
pub fn flushed() -> (Lcd, Recorder) {
    let (mut lcd, _delay, recorder) = setup();
    lcd.flush().unwrap();
    recorder.take();
    (lcd, recorder)
}

/// Events for one framed transmission
pub fn framed(bytes: &[u8], data: bool) -> Vec<Event> {
    vec![
        Event::Dc(data),
        Event::Ce(false),
        Event::Write(bytes.to_vec()),
        Event::Flush,
        Event::Ce(true),
    ]
}

pub fn cmd(byte: u8) -> Vec<Event> {
    framed(&[byte], false)
}

pub fn data(bytes: &[u8]) -> Vec<Event> {
    framed(bytes, true)
}
