//! The instrumented division writes its loop state but computes the same numbers.

use std::fmt::Write;
use std::io;
use std::sync::{Arc, Mutex};

use fixed_uint::{long_divide, DivModResult, DivisionObserver, DivisionStep, Error, Uint128, U2048, U256, U512};
use tracing_subscriber::EnvFilter;

#[test]
fn instrumented_matches_plain_division() {
    let dividend = U512::MAX / U512::from(3u8);
    let divisor = (U512::ONE << 200) + U512::from(12345u32);
    let mut trace = String::new();
    let traced = U512::instrumented_div_mod(&mut trace, dividend, divisor).unwrap();
    assert_eq!(traced, dividend.div_mod(divisor).unwrap());

    let lines: Vec<&str> = trace.lines().collect();
    assert_eq!(lines.first(), Some(&"BEGIN INSTRUMENTED DIV MOD 512"));
    assert_eq!(lines.last(), Some(&"END INSTRUMENTED DIV MOD 512"));
    assert!(lines.contains(&"flsDividend: 510"));
    assert!(lines.contains(&"flsDenominator: 200"));
    assert!(lines.contains(&"shiftAmount: 310"));
    assert_eq!(lines.iter().filter(|l| l.starts_with("i = ")).count(), 311);
    assert!(trace.contains(&format!("final quotient: {:#x}", traced.quotient)));
    assert!(trace.contains(&format!("final remainder: {:#x}", traced.remainder)));
}

#[test]
fn instrumented_short_circuits() {
    let mut trace = String::new();
    let res = U256::instrumented_div_mod(&mut trace, U256::from(5u8), U256::from(9u8)).unwrap();
    assert_eq!(res, DivModResult::new(U256::ZERO, U256::from(5u8)));
    assert!(!trace.contains("STARTING CALCULATION LOOP"));
    assert!(trace.contains("final remainder: 0x5"));
}

struct FullSink {
    room: usize,
}

impl Write for FullSink {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        if s.len() > self.room {
            return Err(std::fmt::Error);
        }
        self.room -= s.len();
        Ok(())
    }
}

#[test]
fn failing_sink_is_reported() {
    let mut sink = FullSink { room: 64 };
    let res = Uint128::instrumented_div_mod(&mut sink, Uint128::MAX, Uint128::from_u64(3));
    assert_eq!(res, Err(Error::Trace(std::fmt::Error)));
}

#[derive(Default)]
struct Record {
    subtractions: Vec<bool>,
}

impl<T> DivisionObserver<T> for Record {
    fn step(&mut self, step: &DivisionStep<T>) {
        self.subtractions.push(step.subtracted);
    }
}

#[test]
fn custom_observer_sees_quotient_bits() {
    let dividend = U2048::from(0b1011_0110u32) << 1000;
    let divisor = U2048::ONE << 1000;
    let mut record = Record::default();
    let res = long_divide(dividend, divisor, &mut record);
    assert_eq!(res.quotient, U2048::from(0b1011_0110u32));
    // one step per quotient bit, most significant first
    assert_eq!(record.subtractions, vec![true, false, true, true, false, true, true, false]);
}

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn traced_division_emits_events() {
    let buf = SharedBuf::default();
    let writer = buf.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("fixed_uint=trace"))
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let res = tracing::subscriber::with_default(subscriber, || {
        U256::from(1000u32).traced_div_mod(U256::from(7u8)).unwrap()
    });
    assert_eq!(res, DivModResult::new(U256::from(142u8), U256::from(6u8)));
    assert_eq!(U256::ONE.traced_div_mod(U256::ZERO), Err(Error::DivideByZero));

    let output = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.iter().filter(|l| l.contains("begin long division")).count(), 1);
    assert!(lines.iter().any(|l| l.contains("normalized divisor") && l.contains("shift=7")));
    assert_eq!(lines.iter().filter(|l| l.contains("long division step")).count(), 8);
    assert!(lines.iter().any(|l| l.contains("end long division") && l.contains("quotient=142") && l.contains("remainder=6")));
}
