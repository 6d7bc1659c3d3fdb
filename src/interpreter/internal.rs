use super::Interpreter;
use crate::arena::HeapObject;
use crate::complex::Complex;
use crate::error::Fault;
use crate::types::Value;

impl<I, O> Interpreter<I, O> {
    pub(crate) fn pop(&mut self) -> Result<Value, Fault> {
        self.stack.pop().ok_or(Fault::StackUnderflow)
    }

    pub(crate) fn top(&self) -> Result<Value, Fault> {
        self.stack.top().ok_or(Fault::StackUnderflow)
    }

    /// Registers a complex result and returns its stack value.
    pub(crate) fn register_complex(&mut self, complex: Complex) -> Value {
        Value::Object(self.arena.register(HeapObject::Complex(complex)))
    }

    pub(crate) fn register_string(&mut self, string: Vec<u8>) -> Value {
        Value::Object(self.arena.register(HeapObject::String(string)))
    }

    pub(crate) fn register_array(&mut self, array: Vec<Value>) -> Value {
        Value::Object(self.arena.register(HeapObject::Array(array)))
    }

    pub(crate) fn complex_at(&self, value: Value) -> Result<Complex, Fault> {
        self.arena.complex(value.object()?)
    }

    pub(crate) fn string_at(&self, value: Value) -> Result<&Vec<u8>, Fault> {
        self.arena.string(value.object()?)
    }

    pub(crate) fn array_at(&self, value: Value) -> Result<&Vec<Value>, Fault> {
        self.arena.array(value.object()?)
    }
}
