//! Clock domains and the clock shared by a signal graph.

use std::{cell::Cell, marker::PhantomData, rc::Rc};

use derive_where::derive_where;
use strum::Display;

pub const PS_PER_SECOND: u64 = 1_000_000_000_000;

pub trait ClockDomain: 'static {
    /// In hertz
    const FREQ: u64;
    /// In picoseconds
    const PERIOD: u64 = PS_PER_SECOND / Self::FREQ;
}

/// Domain used by tests, clocked at `HZ` hertz.
pub struct TestDomain<const HZ: u64>;

impl<const HZ: u64> ClockDomain for TestDomain<HZ> {
    const FREQ: u64 = HZ;
}

pub type TD4 = TestDomain<4>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Edge {
    Rising,
    Falling,
}

impl Edge {
    fn flip(self) -> Self {
        match self {
            Self::Rising => Self::Falling,
            Self::Falling => Self::Rising,
        }
    }
}

/// Clock of domain `D`. Clones share the same edge, which the evaluator
/// flips once per step.
#[derive_where(Debug, Clone)]
pub struct Clock<D: ClockDomain> {
    edge: Rc<Cell<Edge>>,
    _dom: PhantomData<D>,
}

impl<D: ClockDomain> Default for Clock<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: ClockDomain> Clock<D> {
    /// Starts on a falling edge so that the first step rises.
    pub fn new() -> Self {
        Self {
            edge: Rc::new(Cell::new(Edge::Falling)),
            _dom: PhantomData,
        }
    }

    #[inline]
    pub fn edge(&self) -> Edge {
        self.edge.get()
    }

    #[inline]
    pub fn is_rising(&self) -> bool {
        self.edge() == Edge::Rising
    }

    pub(crate) fn advance(&self) -> Edge {
        let edge = self.edge().flip();
        self.edge.set(edge);
        edge
    }
}
