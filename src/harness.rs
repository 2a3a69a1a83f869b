use std::{fmt::Display, str::FromStr};

use tracing::debug;

use crate::{
    error::{Error, Result},
    simulator::{Simulator, Synchronous},
};

/// Test-vector table: each row drives the input, checks the settled output
/// (unless it is a don't-care) and then clocks the component.
#[derive(Debug, Clone)]
pub struct TestVectors<C: Synchronous> {
    rows: Vec<(C::Input, Option<C::Output>)>,
}

impl<C: Synchronous> Default for TestVectors<C> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<C: Synchronous> TestVectors<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(mut self, input: C::Input, output: C::Output) -> Self {
        self.rows.push((input, Some(output)));
        self
    }

    pub fn row_any(mut self, input: C::Input) -> Self {
        self.rows.push((input, None));
        self
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Resets the simulator, then plays every row. Stops at the first
    /// mismatching output.
    pub fn run(&self, sim: &mut Simulator<C>) -> Result<()>
    where
        C::Output: Display,
    {
        sim.sim_reset()?;

        for (input, expected) in self.rows.iter().copied() {
            sim.set_input(input);
            let actual = sim.eval_combinational();

            if let Some(expected) = expected {
                if actual != expected {
                    return Err(Error::Mismatch {
                        cycle: sim.cycle(),
                        port: "out",
                        expected: expected.to_string(),
                        actual: actual.to_string(),
                    });
                }
            }

            sim.tick()?;
        }

        debug!("{} test vectors passed", self.rows.len());
        Ok(())
    }
}

impl<C> FromStr for TestVectors<C>
where
    C: Synchronous,
    C::Input: FromStr<Err = Error>,
    C::Output: FromStr<Err = Error>,
{
    type Err = Error;

    /// One row per line: `<in> <out>`, where `<out>` may be `?`. Blank lines
    /// and `#` comments are skipped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut vectors = Self::new();

        for (idx, line) in s.lines().enumerate() {
            let line = line.split('#').next().unwrap_or_default().trim();
            if line.is_empty() {
                continue;
            }

            let bad = |reason: String| Error::BadVector {
                line: idx + 1,
                reason,
            };

            let fields = line.split_whitespace().collect::<Vec<_>>();
            let [input, output] = fields.as_slice() else {
                return Err(bad(format!("expected 2 fields, found {}", fields.len())));
            };

            let input = input.parse().map_err(|e: Error| bad(e.to_string()))?;
            vectors = match *output {
                "?" => vectors.row_any(input),
                output => {
                    let output = output.parse().map_err(|e: Error| bad(e.to_string()))?;
                    vectors.row(input, output)
                }
            };
        }

        Ok(vectors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cast::Cast,
        reg_incr::{RegIncr, Word},
    };

    fn word(v: u8) -> Word {
        v.cast()
    }

    #[test]
    fn passes() {
        let vectors = TestVectors::<RegIncr>::new()
            .row_any(word(0x00))
            .row(word(0x13), word(0x01))
            .row(word(0x27), word(0x14))
            .row(word(0xff), word(0x28))
            .row(word(0x00), word(0x00));

        let mut sim = Simulator::new();
        vectors.run(&mut sim).unwrap();
        assert_eq!(sim.cycle(), 2 + 5);
    }

    #[test]
    fn reports_mismatch() {
        let vectors = TestVectors::<RegIncr>::new()
            .row(word(0x10), word(0x01))
            .row(word(0x20), word(0x12));

        let mut sim = Simulator::new();
        let err = vectors.run(&mut sim).unwrap_err();
        match err {
            Error::Mismatch {
                cycle,
                port,
                expected,
                actual,
            } => {
                assert_eq!(cycle, 3);
                assert_eq!(port, "out");
                assert_eq!(expected, "18");
                assert_eq!(actual, "17");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn parse_table() {
        let vectors: TestVectors<RegIncr> = "
            # in_  out
            0x00   ?
            0x13   0x01   # first real value
            39     0x14
        "
        .parse()
        .unwrap();
        assert_eq!(vectors.len(), 3);

        let mut sim = Simulator::new();
        vectors.run(&mut sim).unwrap();
    }

    #[test]
    fn parse_errors() {
        let err = "0x00\n".parse::<TestVectors<RegIncr>>().unwrap_err();
        assert!(matches!(err, Error::BadVector { line: 1, .. }), "{err}");

        let err = "1 2\n3 zz\n".parse::<TestVectors<RegIncr>>().unwrap_err();
        assert!(matches!(err, Error::BadVector { line: 2, .. }), "{err}");
    }
}
