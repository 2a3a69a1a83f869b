use crate::{
    domain::{Clock, ClockDomain},
    signal::{Signal, SignalValue},
};

/// Index of an evaluation step. Signal nodes cache one value per step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step(u64);

impl Step {
    fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Steps a signal graph through time. Every step flips the clock and then
/// samples the signal, so steps alternate rising, falling, rising, ...
pub struct EvalIter<D: ClockDomain, T: SignalValue> {
    signal: Signal<D, T>,
    clk: Clock<D>,
    step: Step,
}

impl<D: ClockDomain, T: SignalValue> EvalIter<D, T> {
    pub(crate) fn new(signal: Signal<D, T>, clk: &Clock<D>) -> Self {
        Self {
            signal,
            clk: clk.clone(),
            step: Step(0),
        }
    }

    pub fn step(&mut self) -> T {
        self.clk.advance();
        self.step = self.step.next();
        self.signal.sample(self.step)
    }

    /// One clock period: the rising step, then the falling one. Returns the
    /// value settled after the edge.
    pub fn cycle(&mut self) -> T {
        self.step();
        self.step()
    }
}

impl<D: ClockDomain, T: SignalValue> Iterator for EvalIter<D, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        Some(self.step())
    }
}
