//! Interrupt handlers
//!
//! The syscall-like surface of the machine: console writes and reads,
//! thread sleep, the wall clock and the noise source. Writes pop a
//! one-byte type tag first and format the value beneath it; reads
//! allocate and register a fresh string.

use super::Interpreter;
use crate::conv::{imaginary_to_string, real_to_string};
use crate::error::Fault;
use crate::opcode::Interrupt;
use crate::types::{Type, Value};

use rand::Rng;

use std::io::{BufRead, Write};
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

impl<I, O> Interpreter<I, O>
where
    I: BufRead,
    O: Write,
{
    pub(crate) fn interrupt(&mut self, request: Interrupt) -> Result<(), Fault> {
        match request {
            Interrupt::Write => self.write_value(false),
            Interrupt::WriteLine => self.write_value(true),
            Interrupt::Read => {
                let token = self.read_token()?;
                let value = self.register_string(token);
                self.stack.push(value);
                Ok(())
            }
            Interrupt::ReadLine => {
                let line = self.read_line()?;
                let value = self.register_string(line);
                self.stack.push(value);
                Ok(())
            }
            Interrupt::Sleep => {
                let milliseconds = self.pop()?.natural()?;
                thread::sleep(Duration::from_millis(milliseconds));
                Ok(())
            }
            Interrupt::Clock => {
                let epoch = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .unwrap_or_default()
                    .as_millis() as i64;
                self.stack.push(Value::Integer(epoch));
                Ok(())
            }
            Interrupt::Noise => {
                let noise = self.rng.gen::<i64>();
                self.stack.push(Value::Integer(noise));
                Ok(())
            }
        }
    }

    fn write_value(&mut self, line: bool) -> Result<(), Fault> {
        let tag = Type::try_from(self.pop()?.byte()?)?;
        let value = self.pop()?;
        let written = match tag {
            Type::Boolean => {
                write!(self.output, "{}", if value.boolean()? { "true" } else { "false" })
            }
            Type::Character => self.output.write_all(&[value.byte()?]),
            Type::Byte => write!(self.output, "{:x}", value.byte()?),
            Type::Natural => write!(self.output, "{}", value.natural()?),
            Type::Integer => write!(self.output, "{}", value.integer()?),
            Type::Real => write!(self.output, "{}", real_to_string(value.real()?)),
            Type::Imaginary => write!(self.output, "{}", imaginary_to_string(value.real()?)),
            Type::Complex => {
                let complex = self.complex_at(value)?;
                write!(self.output, "{complex}")
            }
            Type::String => {
                let handle = value.object()?;
                self.output.write_all(self.arena.string(handle)?)
            }
            _ => return Err(Fault::InvalidType(tag)),
        };
        written.map_err(|_| Fault::Stream)?;
        if line {
            writeln!(self.output).map_err(|_| Fault::Stream)?;
        }
        Ok(())
    }

    /// Skips leading whitespace, then consumes one token, leaving the
    /// delimiter in the stream.
    fn read_token(&mut self) -> Result<Vec<u8>, Fault> {
        loop {
            let buffer = self.input.fill_buf().map_err(|_| Fault::Stream)?;
            if buffer.is_empty() {
                return Ok(Vec::new());
            }
            let skip = buffer
                .iter()
                .take_while(|byte| byte.is_ascii_whitespace())
                .count();
            let done = skip < buffer.len();
            self.input.consume(skip);
            if done {
                break;
            }
        }
        let mut token = Vec::new();
        loop {
            let buffer = self.input.fill_buf().map_err(|_| Fault::Stream)?;
            if buffer.is_empty() {
                break;
            }
            let take = buffer
                .iter()
                .take_while(|byte| !byte.is_ascii_whitespace())
                .count();
            token.extend_from_slice(&buffer[..take]);
            let done = take < buffer.len();
            self.input.consume(take);
            if done {
                break;
            }
        }
        Ok(token)
    }

    /// Consumes one line, dropping the terminator.
    fn read_line(&mut self) -> Result<Vec<u8>, Fault> {
        let mut line = Vec::new();
        self.input
            .read_until(b'\n', &mut line)
            .map_err(|_| Fault::Stream)?;
        if line.last() == Some(&b'\n') {
            line.pop();
        }
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Ok(line)
    }
}
