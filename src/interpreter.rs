//! [`Interpreter`] implementation

use crate::arena::Arena;
use crate::stack::Stack;
use crate::types::Value;

use rand::rngs::StdRng;

mod alu;
mod bitwise;
mod cast;
mod compare;
mod constructors;
mod executors;
mod flow;
mod heap;
mod internal;
mod interrupts;
mod post_execution;

/// Stack-machine interpreter.
///
/// Owns every piece of run state: the value stack, the return-address
/// and frame-base stacks, the hidden accumulators, the object arena and
/// the noise PRNG. Nothing is process-wide, so several interpreters can
/// coexist in one process; a single instance must not be driven from
/// two threads.
///
/// The type is generic over its standard streams so embedders and tests
/// can substitute buffers for the host console.
#[derive(Debug)]
pub struct Interpreter<I, O> {
    stack: Stack<Value>,
    call: Stack<usize>,
    frame: Stack<usize>,
    base: usize,
    ip: usize,
    lambda: Value,
    transfer: Value,
    arena: Arena,
    rng: StdRng,
    input: I,
    output: O,
}

impl<I, O> Interpreter<I, O> {
    /// The value stack.
    pub fn stack(&self) -> &Stack<Value> {
        &self.stack
    }

    /// The return-address stack.
    pub fn call(&self) -> &Stack<usize> {
        &self.call
    }

    /// The frame-base stack.
    pub fn frame(&self) -> &Stack<usize> {
        &self.frame
    }

    /// The current frame base.
    pub const fn base(&self) -> usize {
        self.base
    }

    /// The object arena; empty after a completed [`run`](Self::run).
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// The output stream.
    pub fn output(&self) -> &O {
        &self.output
    }
}
