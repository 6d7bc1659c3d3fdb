//! Dispatch loop and evaluation entry points

use super::Interpreter;
use crate::error::{Crash, Fault};
use crate::interpreter::compare::Comparison;
use crate::opcode::{Instruction, Opcode};
use crate::program::Program;
use crate::state::ExecuteState;
use crate::types::Value;

use std::io::{BufRead, Write};

impl<I, O> Interpreter<I, O>
where
    I: BufRead,
    O: Write,
{
    /// Evaluate and discard the final value, then clear the stack and
    /// sweep the arena.
    pub fn run(&mut self, program: &Program) -> Result<(), Crash> {
        self.evaluate(program)?;
        self.stack.clear();
        self.sweep();
        Ok(())
    }

    /// Evaluate and return the final stack top.
    ///
    /// Execution starts at instruction zero with a zero frame base and
    /// ends at `HLT` or past the last instruction. Falling off the end
    /// leaves the arena intact so a heap-typed result stays resolvable;
    /// `HLT` clears and sweeps first and yields `Integer(0)`.
    pub fn evaluate(&mut self, program: &Program) -> Result<Value, Crash> {
        let count = program.instructions.len();
        self.ip = 0;
        self.base = 0;
        tracing::debug!(instructions = count, "evaluating program");
        while self.ip < count {
            let instruction = program.instructions[self.ip];
            let state = match self.instruction(program, instruction) {
                Ok(state) => state,
                Err(fault) => {
                    let crash = Crash::new(self.ip, instruction, fault);
                    tracing::warn!(%crash, "evaluation crashed");
                    self.stack.clear();
                    self.sweep();
                    return Err(crash);
                }
            };
            if !state.should_continue() {
                return Ok(Value::Integer(0));
            }
            if state == ExecuteState::Proceed {
                self.ip += 1;
            }
        }
        tracing::debug!("program ran past the last instruction");
        Ok(self.stack.pop().unwrap_or_default())
    }

    /// Wrap a code sequence in a disposable program and evaluate it.
    ///
    /// Used by the compiler to fold constant expressions.
    pub fn fold(&mut self, code: Vec<Instruction>) -> Result<Value, Crash> {
        let program = Program {
            instructions: code,
            ..Program::default()
        };
        self.evaluate(&program)
    }

    #[tracing::instrument(name = "instruction", level = "trace", skip(self, program))]
    fn instruction(
        &mut self,
        program: &Program,
        instruction: Instruction,
    ) -> Result<ExecuteState, Fault> {
        tracing::trace!(ip = self.ip, "dispatch");
        match instruction.op {
            Opcode::RST => (),
            Opcode::PSH | Opcode::TYP => self.stack.push(instruction.value()?),
            Opcode::STR => self.string_literal(program, instruction.index()?)?,
            Opcode::LLA => self.lambda = self.pop()?,
            Opcode::ULA => self.stack.push(self.lambda),
            Opcode::LAM => return self.call_lambda(),
            Opcode::CTP => self.transfer = self.pop()?,
            Opcode::LTP => self.stack.push(self.transfer),
            Opcode::GET => self.stack_get(instruction.index()?)?,
            Opcode::SET => self.stack_set(instruction.index()?)?,
            Opcode::SWP => self.swap_slots()?,
            Opcode::SSF => self.set_stack_frame(instruction.index()?)?,
            Opcode::GLF => self.get_local(instruction.index()?)?,
            Opcode::SLF => self.set_local(instruction.index()?)?,
            Opcode::ADD => self.add(instruction.pair()?)?,
            Opcode::SUB => self.subtract(instruction.pair()?)?,
            Opcode::MUL => self.multiply(instruction.pair()?)?,
            Opcode::DIV => self.divide(instruction.pair()?)?,
            Opcode::MOD => self.modulus(instruction.pair()?)?,
            Opcode::BSL => self.shift_left(instruction.tag()?)?,
            Opcode::BSR => self.shift_right(instruction.tag()?)?,
            Opcode::BRL => self.rotate_left(instruction.tag()?)?,
            Opcode::BRR => self.rotate_right(instruction.tag()?)?,
            Opcode::BWA => self.bitwise_and(instruction.pair()?)?,
            Opcode::BWO => self.bitwise_or(instruction.pair()?)?,
            Opcode::BWX => self.bitwise_xor(instruction.pair()?)?,
            Opcode::INV => self.invert(instruction.tag()?)?,
            Opcode::NEG => self.negate(instruction.tag()?)?,
            Opcode::SGS => self.string_get()?,
            Opcode::SSS => self.string_set()?,
            Opcode::AGS => self.array_get()?,
            Opcode::ASS => self.array_set()?,
            Opcode::SCN => self.string_count()?,
            Opcode::ACN => self.array_count()?,
            Opcode::CCJ => self.complex_conjugate()?,
            // Vector and matrix conjugates are reserved.
            Opcode::VCJ | Opcode::MCJ => (),
            Opcode::PST => self.stack.push(Value::Boolean(true)),
            Opcode::PSF => self.stack.push(Value::Boolean(false)),
            Opcode::PSI => self.stack.push(Value::Real(f64::INFINITY)),
            Opcode::PSU => self.stack.push(Value::Real(f64::NAN)),
            Opcode::PEC => self.push_empty_complex(),
            Opcode::PES => self.push_empty_string(),
            Opcode::PSA => self.push_array(instruction.index()?)?,
            Opcode::PEA => self.push_empty_array(),
            Opcode::POP => {
                self.pop()?;
            }
            Opcode::DHD => {
                let top = self.top()?;
                self.stack.push(top);
            }
            Opcode::DSK => {
                if !self.stack.decrease(instruction.index()?) {
                    return Err(Fault::StackUnderflow);
                }
            }
            Opcode::JMP => return Ok(self.jump(instruction.index()?)),
            Opcode::JIF => return self.jump_if(instruction.index()?, false, false),
            Opcode::JIT => return self.jump_if(instruction.index()?, true, false),
            Opcode::JAF => return self.jump_if(instruction.index()?, false, true),
            Opcode::JAT => return self.jump_if(instruction.index()?, true, true),
            Opcode::EQL => self.compare(instruction.pair()?, Comparison::Equal)?,
            Opcode::NEQ => self.compare(instruction.pair()?, Comparison::NotEqual)?,
            Opcode::GRT => self.compare(instruction.pair()?, Comparison::Greater)?,
            Opcode::GEQ => self.compare(instruction.pair()?, Comparison::GreaterEqual)?,
            Opcode::LSS => self.compare(instruction.pair()?, Comparison::Less)?,
            Opcode::LEQ => self.compare(instruction.pair()?, Comparison::LessEqual)?,
            Opcode::NOT => self.negate_boolean()?,
            Opcode::CLL => self.native_call(instruction.pair()?)?,
            Opcode::CAL => return Ok(self.call_routine(instruction.index()?)),
            Opcode::RET => return self.ret(),
            Opcode::CST => self.cast(instruction.pair()?)?,
            Opcode::INT => self.interrupt(instruction.request()?)?,
            Opcode::HLT => {
                self.stack.clear();
                self.sweep();
                return Ok(ExecuteState::Halt);
            }
        }
        Ok(ExecuteState::Proceed)
    }
}
