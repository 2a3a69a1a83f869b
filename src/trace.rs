//! Flat VCD dump: one module scope with one variable per name.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use derive_where::derive_where;
use rustc_hash::FxHashMap;
use vcd::{IdCode, TimescaleUnit, Value, VarType, Writer};

use crate::unsigned::Unsigned;

/// Value that can be dumped as a VCD variable.
pub trait Traceable {
    const WIDTH: u32;

    fn dump<W: Write>(&self, vcd: &mut Writer<W>, id: IdCode) -> io::Result<()>;
}

fn level(bit: bool) -> Value {
    if bit {
        Value::V1
    } else {
        Value::V0
    }
}

impl Traceable for bool {
    const WIDTH: u32 = 1;

    fn dump<W: Write>(&self, vcd: &mut Writer<W>, id: IdCode) -> io::Result<()> {
        vcd.change_scalar(id, level(*self))
    }
}

impl<const N: usize> Traceable for Unsigned<N> {
    const WIDTH: u32 = N as u32;

    fn dump<W: Write>(&self, vcd: &mut Writer<W>, id: IdCode) -> io::Result<()> {
        vcd.change_vector(id, self.bits().map(level))
    }
}

/// Variables declared by a [`Tracer`], in declaration order.
#[derive(Debug, Clone, Default)]
pub struct TraceVars {
    vars: Vec<(&'static str, u32)>,
}

impl TraceVars {
    pub fn var<T: Traceable>(mut self, name: &'static str) -> Self {
        self.vars.push((name, T::WIDTH));
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.vars.iter().map(|(name, _)| *name)
    }
}

#[derive_where(Debug)]
pub struct Tracer {
    ids: FxHashMap<&'static str, IdCode>,
    #[derive_where(skip)]
    vcd: Writer<Box<dyn Write>>,
}

impl Tracer {
    /// Time unit of [`Tracer::time`].
    pub const TIMESCALE: (u32, TimescaleUnit) = (1, TimescaleUnit::NS);

    pub fn open_vcd(path: impl AsRef<Path>, vars: &TraceVars, module: &str) -> io::Result<Self> {
        let file = BufWriter::new(File::create(path)?);
        Self::new(Box::new(file), vars, module)
    }

    /// Writes the VCD header declaring `vars` inside `module`.
    pub fn new(writer: Box<dyn Write>, vars: &TraceVars, module: &str) -> io::Result<Self> {
        let mut vcd = Writer::new(writer);
        let (ts, unit) = Self::TIMESCALE;
        vcd.timescale(ts, unit)?;
        vcd.add_module(module)?;

        let mut ids = FxHashMap::default();
        for &(name, width) in &vars.vars {
            let id = vcd.add_var(VarType::Wire, width, name, None)?;
            ids.insert(name, id);
        }

        vcd.upscope()?;
        vcd.enddefinitions()?;

        Ok(Self { ids, vcd })
    }

    pub fn time(&mut self, time: u64) -> io::Result<()> {
        self.vcd.timestamp(time)
    }

    /// Records a new value of `name`. Undeclared names are skipped.
    pub fn change<T: Traceable>(&mut self, name: &str, value: &T) -> io::Result<()> {
        match self.ids.get(name) {
            Some(id) => value.dump(&mut self.vcd, *id),
            None => Ok(()),
        }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.vcd.flush()
    }
}
