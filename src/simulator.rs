use std::{fmt::Debug, io, path::Path};

use tracing::{debug, info, trace};

use crate::{
    error::Result,
    trace::{TraceVars, Tracer},
};

/// Synchronous component described by two pure functions: the clocked state
/// transition and the combinational output.
pub trait Synchronous {
    type Input: Copy + Default + Debug;
    type Output: Copy + PartialEq + Debug;
    type State: Copy + Default + Debug;

    const NAME: &'static str;

    fn tick(state: Self::State, input: Self::Input, reset: bool) -> Self::State;

    fn comb(state: Self::State) -> Self::Output;

    fn line_trace(input: Self::Input, state: Self::State, output: Self::Output) -> String;

    fn trace_vars(vars: TraceVars) -> TraceVars;

    fn trace(
        tracer: &mut Tracer,
        input: Self::Input,
        state: Self::State,
        output: Self::Output,
    ) -> io::Result<()>;
}

/// Number of cycles [`Simulator::sim_reset`] holds reset asserted.
pub const RESET_CYCLES: u64 = 2;

/// Cycle-based driver. Each [`tick`](Simulator::tick) applies one clock edge
/// with the current input and reset, then settles the combinational output.
#[derive(Debug)]
pub struct Simulator<C: Synchronous> {
    input: C::Input,
    reset: bool,
    state: C::State,
    output: C::Output,
    cycle: u64,
    line_trace: bool,
    lines: Vec<String>,
    tracer: Option<Tracer>,
}

impl<C: Synchronous> Default for Simulator<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Synchronous> Simulator<C> {
    pub fn new() -> Self {
        let state = C::State::default();
        Self {
            input: C::Input::default(),
            reset: false,
            state,
            output: C::comb(state),
            cycle: 0,
            line_trace: false,
            lines: Vec::new(),
            tracer: None,
        }
    }

    pub fn with_line_trace(mut self, enabled: bool) -> Self {
        self.line_trace = enabled;
        self
    }

    pub fn with_tracer(mut self, tracer: Tracer) -> Self {
        self.tracer = Some(tracer);
        self
    }

    /// Variables dumped per cycle: `clk`, `reset` and whatever the component
    /// declares.
    pub fn trace_vars() -> TraceVars {
        C::trace_vars(
            TraceVars::default()
                .var::<bool>("clk")
                .var::<bool>("reset"),
        )
    }

    pub fn open_vcd(self, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let tracer = Tracer::open_vcd(path, &Self::trace_vars(), C::NAME)?;
        info!("dumping waveforms to {}", path.display());

        Ok(self.with_tracer(tracer))
    }

    #[inline]
    pub fn set_input(&mut self, input: C::Input) {
        self.input = input;
    }

    #[inline]
    pub fn set_reset(&mut self, reset: bool) {
        self.reset = reset;
    }

    #[inline]
    pub fn input(&self) -> C::Input {
        self.input
    }

    #[inline]
    pub fn state(&self) -> C::State {
        self.state
    }

    #[inline]
    pub fn out(&self) -> C::Output {
        self.output
    }

    /// Number of clock edges applied so far.
    #[inline]
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    #[inline]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Recomputes the combinational output from the current state without
    /// advancing the clock.
    pub fn eval_combinational(&mut self) -> C::Output {
        self.output = C::comb(self.state);
        self.output
    }

    pub fn tick(&mut self) -> Result<C::Output> {
        let input = self.input;
        let before = self.state;

        self.state = C::tick(self.state, input, self.reset);
        self.eval_combinational();

        debug!(
            cycle = self.cycle,
            reset = self.reset,
            "{:?} -> {:?}",
            before,
            self.state
        );

        if self.line_trace {
            let line = format!(
                "{:>3}: {}",
                self.cycle,
                C::line_trace(input, self.state, self.output)
            );
            trace!("{line}");
            self.lines.push(line);
        }

        if let Some(tracer) = self.tracer.as_mut() {
            // clock high for the first half of the period, low for the second
            let time = self.cycle * 2;
            tracer.time(time)?;
            tracer.change("clk", &true)?;
            tracer.change("reset", &self.reset)?;
            C::trace(tracer, input, self.state, self.output)?;
            tracer.time(time + 1)?;
            tracer.change("clk", &false)?;
        }

        self.cycle += 1;
        Ok(self.output)
    }

    /// Holds reset asserted for [`RESET_CYCLES`] cycles, then releases it.
    pub fn sim_reset(&mut self) -> Result<()> {
        debug!("reset asserted for {RESET_CYCLES} cycles");
        self.set_reset(true);
        for _ in 0 .. RESET_CYCLES {
            self.tick()?;
        }
        self.set_reset(false);

        Ok(())
    }

    /// Runs one cycle per input and returns the settled output of each.
    pub fn run<I>(&mut self, inputs: I) -> Result<Vec<C::Output>>
    where
        I: IntoIterator<Item = C::Input>,
    {
        inputs
            .into_iter()
            .map(|input| {
                self.set_input(input);
                self.tick()
            })
            .collect()
    }

    /// Flushes the waveform dump, if any.
    pub fn finish(&mut self) -> Result<()> {
        if let Some(tracer) = self.tracer.as_mut() {
            tracer.flush()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cast::{Cast, CastFrom},
        reg_incr::{RegIncr, Word},
        trace::tests::SharedBuf,
    };

    fn word(v: u8) -> Word {
        v.cast()
    }

    fn outs(values: Vec<Word>) -> Vec<u8> {
        values.into_iter().map(u8::cast_from).collect()
    }

    #[test]
    fn one_step() {
        let mut sim = Simulator::<RegIncr>::new();
        sim.set_input(word(41));
        let out = sim.tick().unwrap();

        assert_eq!(u8::cast_from(sim.state().reg_out), 41);
        assert_eq!(u8::cast_from(out), 42);
        assert_eq!(sim.cycle(), 1);
    }

    #[test]
    fn reset_forces_zero() {
        let mut sim = Simulator::<RegIncr>::new();
        sim.set_input(word(200));
        sim.tick().unwrap();

        sim.set_reset(true);
        sim.set_input(word(77));
        sim.tick().unwrap();

        assert_eq!(u8::cast_from(sim.state().reg_out), 0);
        assert_eq!(u8::cast_from(sim.out()), 1);
    }

    #[test]
    fn sim_reset_takes_two_cycles() {
        let mut sim = Simulator::<RegIncr>::new().with_line_trace(true);
        sim.set_input(word(3));
        sim.sim_reset().unwrap();

        assert_eq!(sim.cycle(), RESET_CYCLES);
        assert_eq!(u8::cast_from(sim.out()), 1);
        assert_eq!(sim.lines(), ["  0: 03 (00) 01", "  1: 03 (00) 01"]);

        sim.tick().unwrap();
        assert_eq!(u8::cast_from(sim.out()), 4);
    }

    #[test]
    fn overflow_wraps() {
        let mut sim = Simulator::<RegIncr>::new();
        assert_eq!(outs(sim.run([word(255)]).unwrap()), [0]);
    }

    #[test]
    fn comb_idempotent() {
        let mut sim = Simulator::<RegIncr>::new();
        sim.set_input(word(9));
        sim.tick().unwrap();

        sim.set_input(word(100));
        for _ in 0 .. 3 {
            assert_eq!(u8::cast_from(sim.eval_combinational()), 10);
        }
        assert_eq!(sim.cycle(), 1);
    }

    #[test]
    fn sequence() {
        let mut sim = Simulator::<RegIncr>::new().with_line_trace(true);
        let mut regs = vec![];
        let mut out = vec![];
        for v in [5, 0, 255] {
            sim.set_input(word(v));
            out.push(u8::cast_from(sim.tick().unwrap()));
            regs.push(u8::cast_from(sim.state().reg_out));
        }

        assert_eq!(regs, [5, 0, 255]);
        assert_eq!(out, [6, 1, 0]);
        assert_eq!(sim.lines(), [
            "  0: 05 (05) 06",
            "  1: 00 (00) 01",
            "  2: ff (ff) 00"
        ]);
    }

    #[test]
    fn dumps_vcd() {
        let buf = SharedBuf::default();
        let tracer = Tracer::new(
            Box::new(buf.clone()),
            &Simulator::<RegIncr>::trace_vars(),
            RegIncr::NAME,
        )
        .unwrap();

        let mut sim = Simulator::<RegIncr>::new().with_tracer(tracer);
        sim.run([word(5), word(6)]).unwrap();
        sim.finish().unwrap();

        let out = buf.contents();
        assert!(out.contains("$scope module RegIncrRTL $end"), "{out}");
        for var in ["clk", "reset", "in_", "reg_out", "out"] {
            assert!(out.contains(&format!(" {var} $end")), "{var}: {out}");
        }
        for time in ["#0", "#1", "#2", "#3"] {
            assert!(out.lines().any(|line| line == time), "{time}: {out}");
        }
        assert!(out.contains("b00000110"), "{out}");
    }
}
