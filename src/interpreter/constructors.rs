//! Exposed constructors API for the [`Interpreter`]

use super::Interpreter;
use crate::arena::Arena;
use crate::stack::Stack;
use crate::types::Value;

use rand::rngs::StdRng;
use rand::SeedableRng;

use std::io;

impl<I, O> Interpreter<I, O> {
    /// Create a new interpreter over the provided standard streams.
    pub fn with_io(input: I, output: O) -> Self {
        Self {
            stack: Stack::new(),
            call: Stack::new(),
            frame: Stack::new(),
            base: 0,
            ip: 0,
            lambda: Value::default(),
            transfer: Value::default(),
            arena: Arena::new(),
            rng: StdRng::from_entropy(),
            input,
            output,
        }
    }

    /// Fix the noise PRNG seed, making runs deterministic modulo I/O.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }
}

impl Interpreter<io::Empty, io::Sink> {
    /// Create a new interpreter detached from the host console.
    ///
    /// Reads see an exhausted input and writes are discarded.
    pub fn new() -> Self {
        Self::with_io(io::empty(), io::sink())
    }
}

impl Default for Interpreter<io::Empty, io::Sink> {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter<io::BufReader<io::Stdin>, io::Stdout> {
    /// Create a new interpreter wired to the host console.
    pub fn stdio() -> Self {
        Self::with_io(io::BufReader::new(io::stdin()), io::stdout())
    }
}
