//! Heap-object opcodes: string literals, element access, conjugates and
//! the empty-object pushes

use super::Interpreter;
use crate::complex::Complex;
use crate::error::Fault;
use crate::program::Program;
use crate::types::Value;

impl<I, O> Interpreter<I, O> {
    /// `STR`: allocate a copy of a string-pool entry.
    pub(crate) fn string_literal(&mut self, program: &Program, index: usize) -> Result<(), Fault> {
        let literal = program.strings.get(index).ok_or(Fault::IndexOutOfRange)?;
        let value = self.register_string(literal.clone().into_bytes());
        self.stack.push(value);
        Ok(())
    }

    pub(crate) fn string_get(&mut self) -> Result<(), Fault> {
        let index = self.pop()?.integer()?;
        let value = self.pop()?;
        let string = self.string_at(value)?;
        if index < 0 || index as usize >= string.len() {
            return Err(Fault::IndexOutOfRange);
        }
        let byte = string[index as usize];
        self.stack.push(Value::Byte(byte));
        Ok(())
    }

    /// `SSS` leaves the stored element on the stack.
    pub(crate) fn string_set(&mut self) -> Result<(), Fault> {
        let element = self.pop()?;
        let index = self.pop()?.integer()?;
        let handle = self.pop()?.object()?;
        let string = self.arena.string_mut(handle)?;
        if index < 0 || index as usize >= string.len() {
            return Err(Fault::IndexOutOfRange);
        }
        string[index as usize] = element.byte()?;
        self.stack.push(element);
        Ok(())
    }

    pub(crate) fn array_get(&mut self) -> Result<(), Fault> {
        let index = self.pop()?.integer()?;
        let value = self.pop()?;
        let array = self.array_at(value)?;
        if index < 0 || index as usize >= array.len() {
            return Err(Fault::IndexOutOfRange);
        }
        let element = array[index as usize];
        self.stack.push(element);
        Ok(())
    }

    /// `ASS` extends the array with the element up to the index, then
    /// stores it; the element stays on the stack.
    pub(crate) fn array_set(&mut self) -> Result<(), Fault> {
        let element = self.pop()?;
        let index = self.pop()?.integer()?;
        let handle = self.pop()?.object()?;
        if index < 0 {
            return Err(Fault::IndexOutOfRange);
        }
        let array = self.arena.array_mut(handle)?;
        while index as usize >= array.len() {
            array.push(element);
        }
        array[index as usize] = element;
        self.stack.push(element);
        Ok(())
    }

    pub(crate) fn string_count(&mut self) -> Result<(), Fault> {
        let value = self.pop()?;
        let length = self.string_at(value)?.len();
        self.stack.push(Value::Integer(length as i64));
        Ok(())
    }

    pub(crate) fn array_count(&mut self) -> Result<(), Fault> {
        let value = self.pop()?;
        let length = self.array_at(value)?.len();
        self.stack.push(Value::Integer(length as i64));
        Ok(())
    }

    /// `CCJ`: conjugate of the top complex, freshly allocated.
    pub(crate) fn complex_conjugate(&mut self) -> Result<(), Fault> {
        let value = self.pop()?;
        let conjugate = self.complex_at(value)?.conjugate();
        let registered = self.register_complex(conjugate);
        self.stack.push(registered);
        Ok(())
    }

    pub(crate) fn push_empty_complex(&mut self) {
        let value = self.register_complex(Complex::default());
        self.stack.push(value);
    }

    pub(crate) fn push_empty_string(&mut self) {
        let value = self.register_string(Vec::new());
        self.stack.push(value);
    }

    pub(crate) fn push_empty_array(&mut self) {
        let value = self.register_array(Vec::new());
        self.stack.push(value);
    }

    /// `PSA`: collect the top `count` values, deepest first.
    pub(crate) fn push_array(&mut self, count: usize) -> Result<(), Fault> {
        let start = self
            .stack
            .size()
            .checked_sub(count)
            .ok_or(Fault::StackUnderflow)?;
        let mut array = Vec::with_capacity(count);
        for index in start..self.stack.size() {
            array.push(self.stack.at(index).ok_or(Fault::IndexOutOfRange)?);
        }
        let dropped = self.stack.decrease(count);
        debug_assert!(dropped);
        let value = self.register_array(array);
        self.stack.push(value);
        Ok(())
    }
}
