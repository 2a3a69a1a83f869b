use super::{Signal, SignalValue};
use crate::domain::{Clock, ClockDomain};

/// Rising-edge register with a synchronous active-high reset.
///
/// `rst` and `data` are sampled together on every step and the result is
/// latched on the next rising edge, so a reset reaches the output with the
/// same latency as data does.
pub fn reg<D: ClockDomain, T: SignalValue>(
    clk: &Clock<D>,
    rst: &Signal<D, bool>,
    init: T,
    data: &Signal<D, T>,
) -> Signal<D, T> {
    let clk = clk.clone();
    let rst = rst.clone();
    let data = data.clone();

    let mut current = init.clone();
    let mut pending = init.clone();

    Signal::from_fn(move |step| {
        if clk.is_rising() {
            current = pending.clone();
        }

        let rst = rst.sample(step);
        let data = data.sample(step);
        pending = if rst { init.clone() } else { data };

        current.clone()
    })
}
