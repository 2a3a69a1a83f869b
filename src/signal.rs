//! Clocked signal graph for structural descriptions. A node is evaluated at
//! most once per step, so every reader of a shared node sees the same value
//! within a step.

mod reg;

use std::{cell::RefCell, marker::PhantomData, rc::Rc};

use derive_where::derive_where;
pub use reg::reg;

use crate::{
    domain::{Clock, ClockDomain},
    eval::{EvalIter, Step},
};

pub trait SignalValue: Clone + 'static {}

impl SignalValue for bool {}

impl<A: SignalValue, B: SignalValue> SignalValue for (A, B) {}

struct Node<T> {
    cached: Option<(Step, T)>,
    eval: Box<dyn FnMut(Step) -> T>,
}

impl<T: SignalValue> Node<T> {
    fn sample(&mut self, step: Step) -> T {
        if let Some((at, value)) = &self.cached {
            if *at == step {
                return value.clone();
            }
        }

        let value = (self.eval)(step);
        self.cached = Some((step, value.clone()));
        value
    }
}

#[derive_where(Clone)]
pub struct Signal<D: ClockDomain, T: SignalValue> {
    node: Rc<RefCell<Node<T>>>,
    _dom: PhantomData<D>,
}

impl<D: ClockDomain, T: SignalValue> Signal<D, T> {
    pub(crate) fn from_fn(eval: impl FnMut(Step) -> T + 'static) -> Self {
        Self {
            node: Rc::new(RefCell::new(Node {
                cached: None,
                eval: Box::new(eval),
            })),
            _dom: PhantomData,
        }
    }

    pub(crate) fn sample(&self, step: Step) -> T {
        self.node.borrow_mut().sample(step)
    }

    /// Constant signal.
    pub fn lift(value: T) -> Self {
        Self::from_fn(move |_| value.clone())
    }

    /// Signal driven from the testbench through the returned [`Source`].
    pub fn source(value: T) -> (Source<T>, Self) {
        let source = Source(Rc::new(RefCell::new(value)));
        let driver = source.clone();

        (source, Self::from_fn(move |_| driver.get()))
    }

    pub fn map<U: SignalValue>(&self, f: impl Fn(T) -> U + 'static) -> Signal<D, U> {
        let this = self.clone();
        Signal::from_fn(move |step| f(this.sample(step)))
    }

    pub fn zip<U: SignalValue>(&self, other: &Signal<D, U>) -> Signal<D, (T, U)> {
        let this = self.clone();
        let other = other.clone();
        Signal::from_fn(move |step| (this.sample(step), other.sample(step)))
    }

    pub fn eval(&self, clk: &Clock<D>) -> EvalIter<D, T> {
        EvalIter::new(self.clone(), clk)
    }
}

/// Testbench handle of a [`Signal::source`].
#[derive(Debug, Clone)]
pub struct Source<T>(Rc<RefCell<T>>);

impl<T: SignalValue> Source<T> {
    pub fn get(&self) -> T {
        self.0.borrow().clone()
    }

    pub fn set(&self, value: T) {
        *self.0.borrow_mut() = value;
    }
}
