//! Interpreter-wide constants

/// Initial capacity of every interpreter stack.
pub const INITIAL_STACK_CAPACITY: usize = 16;

/// Mask applied to every byte of a serialised string, terminator included.
pub const STRING_MASK: u8 = 0b0101_1010;
