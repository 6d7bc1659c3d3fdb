//! Heap-object arena
//!
//! Every heap allocation performed by an opcode registers exactly one
//! object here and pushes its [`Handle`]. Objects are never released
//! individually; [`Arena::sweep`] drops the whole registry in one pass
//! at the end of a run. A handle outliving a sweep resolves to
//! [`Fault::DanglingObject`].

use crate::complex::Complex;
use crate::error::Fault;
use crate::types::Value;

/// Stable index of a registered heap object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(usize);

/// A heap object owned by the arena.
///
/// Runtime strings are byte strings: the language's characters are
/// single bytes, and element access indexes bytes.
#[derive(Debug, Clone, PartialEq)]
pub enum HeapObject {
    Complex(Complex),
    String(Vec<u8>),
    Array(Vec<Value>),
}

#[derive(Debug, Default, Clone)]
pub struct Arena {
    entries: Vec<HeapObject>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an object and returns its handle.
    pub fn register(&mut self, object: HeapObject) -> Handle {
        self.entries.push(object);
        Handle(self.entries.len() - 1)
    }

    pub fn get(&self, handle: Handle) -> Result<&HeapObject, Fault> {
        self.entries.get(handle.0).ok_or(Fault::DanglingObject)
    }

    pub fn get_mut(&mut self, handle: Handle) -> Result<&mut HeapObject, Fault> {
        self.entries.get_mut(handle.0).ok_or(Fault::DanglingObject)
    }

    pub fn complex(&self, handle: Handle) -> Result<Complex, Fault> {
        match self.get(handle)? {
            HeapObject::Complex(complex) => Ok(*complex),
            _ => Err(Fault::ValueMismatch),
        }
    }

    pub fn string(&self, handle: Handle) -> Result<&Vec<u8>, Fault> {
        match self.get(handle)? {
            HeapObject::String(string) => Ok(string),
            _ => Err(Fault::ValueMismatch),
        }
    }

    pub fn string_mut(&mut self, handle: Handle) -> Result<&mut Vec<u8>, Fault> {
        match self.get_mut(handle)? {
            HeapObject::String(string) => Ok(string),
            _ => Err(Fault::ValueMismatch),
        }
    }

    pub fn array(&self, handle: Handle) -> Result<&Vec<Value>, Fault> {
        match self.get(handle)? {
            HeapObject::Array(array) => Ok(array),
            _ => Err(Fault::ValueMismatch),
        }
    }

    pub fn array_mut(&mut self, handle: Handle) -> Result<&mut Vec<Value>, Fault> {
        match self.get_mut(handle)? {
            HeapObject::Array(array) => Ok(array),
            _ => Err(Fault::ValueMismatch),
        }
    }

    /// Releases every registered object and empties the registry.
    /// Returns how many objects were released.
    pub fn sweep(&mut self) -> usize {
        let released = self.entries.len();
        self.entries.clear();
        released
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
