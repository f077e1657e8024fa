//! Binary shift-subtract long division, the one division algorithm shared by
//! every width. The loop reports its state to a [`DivisionObserver`]; the
//! default observer does nothing, so traced and untraced division are the
//! same code.

use std::fmt::Write;

use crate::bits::fls;
use crate::error::{Error, Result};
use crate::limb::Limb;

/// Quotient and remainder of one division.
///
/// `quotient * divisor + remainder == dividend` and `remainder < divisor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DivModResult<T> {
    pub quotient: T,
    pub remainder: T,
}

impl<T> DivModResult<T> {
    pub fn new(quotient: T, remainder: T) -> Self {
        DivModResult { quotient, remainder }
    }
}

impl<T> From<DivModResult<T>> for (T, T) {
    fn from(res: DivModResult<T>) -> Self {
        (res.quotient, res.remainder)
    }
}

/// State of the long-division loop after one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DivisionStep<T> {
    pub index: u32,
    pub last_index: u32,
    pub quotient: T,
    pub denominator: T,
    pub subtracted: bool,
    pub remainder: T,
}

/// Receives the internal state of [`long_divide`] as it runs.
pub trait DivisionObserver<T> {
    fn begin(&mut self, _dividend: T, _divisor: T) {}

    fn normalized(&mut self, _fls_dividend: u32, _fls_divisor: u32, _shift: u32, _denominator: T) {}

    fn step(&mut self, _step: &DivisionStep<T>) {}

    fn finish(&mut self, _result: &DivModResult<T>) {}
}

/// Observer that records nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTrace;

impl<T> DivisionObserver<T> for NoTrace {}

/// Writes a human-readable trace of every loop iteration to a text sink.
///
/// The first write error is kept and returned by [`TraceWriter::finish`];
/// the division itself carries on regardless.
pub struct TraceWriter<'a, W: Write> {
    sink: &'a mut W,
    error: Option<std::fmt::Error>,
}

impl<'a, W: Write> TraceWriter<'a, W> {
    pub fn new(sink: &'a mut W) -> Self {
        TraceWriter { sink, error: None }
    }

    pub fn finish(self) -> Result<()> {
        match self.error {
            Some(err) => Err(Error::Trace(err)),
            None => Ok(()),
        }
    }

    fn line(&mut self, args: std::fmt::Arguments<'_>) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.sink.write_fmt(args).and_then(|_| self.sink.write_char('\n')) {
            self.error = Some(err);
        }
    }
}

impl<'a, T: Limb, W: Write> DivisionObserver<T> for TraceWriter<'a, W> {
    fn begin(&mut self, dividend: T, divisor: T) {
        self.line(format_args!("BEGIN INSTRUMENTED DIV MOD {}", T::BITS));
        self.line(format_args!("dividend: {:#x}", dividend));
        self.line(format_args!("divisor: {:#x}", divisor));
    }

    fn normalized(&mut self, fls_dividend: u32, fls_divisor: u32, shift: u32, denominator: T) {
        self.line(format_args!("flsDividend: {}", fls_dividend));
        self.line(format_args!("flsDenominator: {}", fls_divisor));
        self.line(format_args!("shiftAmount: {}", shift));
        self.line(format_args!("denominator <<= {} == {:#x}", shift, denominator));
        self.line(format_args!("STARTING CALCULATION LOOP"));
    }

    fn step(&mut self, step: &DivisionStep<T>) {
        self.line(format_args!("i = {} of {}", step.index, step.last_index));
        self.line(format_args!("quotient: {:#x}", step.quotient));
        self.line(format_args!("denominator: {:#x}", step.denominator));
        self.line(format_args!("dividendGreaterThanOrEqualToDenom: {}", step.subtracted));
        self.line(format_args!("remainder: {:#x}", step.remainder));
    }

    fn finish(&mut self, result: &DivModResult<T>) {
        self.line(format_args!("final quotient: {:#x}", result.quotient));
        self.line(format_args!("final remainder: {:#x}", result.remainder));
        self.line(format_args!("END INSTRUMENTED DIV MOD {}", T::BITS));
    }
}

/// Emits every loop iteration as a `tracing` event at `TRACE` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl<T: Limb> DivisionObserver<T> for TracingObserver {
    fn begin(&mut self, dividend: T, divisor: T) {
        tracing::trace!(bits = T::BITS, dividend = %dividend,
            divisor = %divisor, "begin long division");
    }

    fn normalized(&mut self, fls_dividend: u32, fls_divisor: u32, shift: u32, _denominator: T) {
        tracing::trace!(fls_dividend, fls_divisor, shift, "normalized divisor");
    }

    fn step(&mut self, step: &DivisionStep<T>) {
        tracing::trace!(index = step.index, subtracted = step.subtracted,
            quotient = %step.quotient,
            remainder = %step.remainder, "long division step");
    }

    fn finish(&mut self, result: &DivModResult<T>) {
        tracing::trace!(quotient = %result.quotient,
            remainder = %result.remainder, "end long division");
    }
}

/// Shift-subtract long division.
///
/// The divisor is shifted left until its top bit lines up with the
/// dividend's, then for each bit position the quotient is shifted left and
/// the divisor subtracted from the running remainder whenever it fits.
/// `divisor` must be non-zero; callers check it.
pub fn long_divide<T: Limb, O: DivisionObserver<T>>(dividend: T, divisor: T, observer: &mut O) -> DivModResult<T> {
    debug_assert!(!divisor.is_zero());
    observer.begin(dividend, divisor);

    if divisor > dividend {
        let res = DivModResult::new(T::ZERO, dividend);
        observer.finish(&res);
        return res;
    }
    if divisor == dividend {
        let res = DivModResult::new(T::ONE, T::ZERO);
        observer.finish(&res);
        return res;
    }

    let fls_dividend = fls(dividend);
    let fls_divisor = fls(divisor);
    let shift = fls_dividend - fls_divisor;
    let mut denominator = divisor << shift;
    let mut remainder = dividend;
    let mut quotient = T::ZERO;
    observer.normalized(fls_dividend, fls_divisor, shift, denominator);

    for index in 0..=shift {
        quotient = quotient << 1;
        let subtracted = remainder >= denominator;
        if subtracted {
            remainder = remainder.overflowing_sub(denominator).0;
            quotient = quotient | T::ONE;
        }
        observer.step(&DivisionStep { index, last_index: shift, quotient, denominator, subtracted, remainder });
        denominator = denominator >> 1;
    }

    let res = DivModResult::new(quotient, remainder);
    observer.finish(&res);
    res
}

/// Checked division with the zero-divisor test done before the loop starts.
pub fn div_mod<T: Limb>(dividend: T, divisor: T) -> Result<DivModResult<T>> {
    if divisor.is_zero() {
        return Err(Error::DivideByZero);
    }
    let (quotient, remainder) = dividend.div_rem(divisor);
    Ok(DivModResult::new(quotient, remainder))
}

/// Long division that also writes its step-by-step trace to `sink`.
///
/// Returns the same numbers as [`div_mod`]; a sink that refuses text turns
/// into [`Error::Trace`].
pub fn instrumented_div_mod<T: Limb, W: Write>(sink: &mut W, dividend: T, divisor: T) -> Result<DivModResult<T>> {
    if divisor.is_zero() {
        return Err(Error::DivideByZero);
    }
    let mut writer = TraceWriter::new(sink);
    let res = long_divide(dividend, divisor, &mut writer);
    writer.finish()?;
    Ok(res)
}

/// Long division reporting each step through `tracing`.
pub fn traced_div_mod<T: Limb>(dividend: T, divisor: T) -> Result<DivModResult<T>> {
    if divisor.is_zero() {
        return Err(Error::DivideByZero);
    }
    Ok(long_divide(dividend, divisor, &mut TracingObserver))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Uint128;

    #[derive(Default)]
    struct CountSteps {
        steps: u32,
        began: bool,
        finished: bool,
    }

    impl<T> DivisionObserver<T> for CountSteps {
        fn begin(&mut self, _dividend: T, _divisor: T) {
            self.began = true;
        }
        fn step(&mut self, _step: &DivisionStep<T>) {
            self.steps += 1;
        }
        fn finish(&mut self, _result: &DivModResult<T>) {
            self.finished = true;
        }
    }

    #[test]
    fn test_long_divide_steps() {
        let mut counter = CountSteps::default();
        let res = long_divide(Uint128::from_u64(1000), Uint128::from_u64(7), &mut counter);
        assert_eq!(res, DivModResult::new(Uint128::from_u64(142), Uint128::from_u64(6)));
        // fls(1000) = 9, fls(7) = 2
        assert_eq!(counter.steps, 8);
        assert!(counter.began && counter.finished);
    }

    #[test]
    fn test_long_divide_early_outs() {
        let big = Uint128::from_parts(1, 0);
        let res = long_divide(Uint128::from_u64(5), big, &mut NoTrace);
        assert_eq!(res, DivModResult::new(Uint128::ZERO, Uint128::from_u64(5)));
        let res = long_divide(big, big, &mut NoTrace);
        assert_eq!(res, DivModResult::new(Uint128::ONE, Uint128::ZERO));
    }

    #[test]
    fn test_instrumented_matches_plain() {
        let dividend = Uint128::from_parts(0x1234_5678_9abc_def0, 0x1234_5678_9abc_def0);
        let divisor = Uint128::from_u64(0x10);
        let mut trace = String::new();
        let traced = instrumented_div_mod(&mut trace, dividend, divisor).unwrap();
        assert_eq!(traced, div_mod(dividend, divisor).unwrap());
        assert!(trace.starts_with("BEGIN INSTRUMENTED DIV MOD 128\n"));
        assert!(trace.ends_with("END INSTRUMENTED DIV MOD 128\n"));
        assert!(trace.contains("shiftAmount: 120"));
    }

    #[test]
    fn test_instrumented_zero_divisor() {
        let mut trace = String::new();
        let res = instrumented_div_mod(&mut trace, Uint128::ONE, Uint128::ZERO);
        assert_eq!(res, Err(Error::DivideByZero));
        assert!(trace.is_empty());
    }

    struct Refuse;

    impl Write for Refuse {
        fn write_str(&mut self, _s: &str) -> std::fmt::Result {
            Err(std::fmt::Error)
        }
    }

    #[test]
    fn test_instrumented_failing_sink() {
        let res = instrumented_div_mod(&mut Refuse, Uint128::from_u64(100), Uint128::from_u64(3));
        assert_eq!(res, Err(Error::Trace(std::fmt::Error)));
    }
}
