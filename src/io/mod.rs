//! Output sinks for emitted isotypic artifacts.
//!
//! The engine never selects an output destination itself; callers configure a
//! sink up front and pass it in. When a sink is configured, artifacts are
//! streamed to it in discovery order instead of being buffered in memory.

use std::io::Write;

use anyhow::{self, format_err};
use indexmap::IndexSet;
use itertools::Itertools;

use crate::sparse::{SparseSet, SparseSimplexVector};


/// An append-only ordered output channel for isotypic artifacts.
pub trait IsotypicSink {
    /// Emits one basis or spanning vector.
    fn emit_vector(&mut self, vector: &SparseSimplexVector) -> Result<(), anyhow::Error>;

    /// Emits a coordinate support set.
    fn emit_support(&mut self, support: &IndexSet<SparseSet>) -> Result<(), anyhow::Error>;
}

/// A sink that writes each artifact as one line of text to an underlying
/// writer.
pub struct LineSink<W: Write> {
    writer: W,
}

impl<W: Write> LineSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> IsotypicSink for LineSink<W> {
    fn emit_vector(&mut self, vector: &SparseSimplexVector) -> Result<(), anyhow::Error> {
        writeln!(self.writer, "{vector}").map_err(|err| format_err!(err))
    }

    fn emit_support(&mut self, support: &IndexSet<SparseSet>) -> Result<(), anyhow::Error> {
        writeln!(self.writer, "{{{}}}", support.iter().join(" "))
            .map_err(|err| format_err!(err))
    }
}
