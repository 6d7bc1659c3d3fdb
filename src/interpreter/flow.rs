//! Control transfers, stack slots and frame machinery

use super::Interpreter;
use crate::error::Fault;
use crate::state::ExecuteState;

impl<I, O> Interpreter<I, O> {
    pub(crate) fn jump(&mut self, target: usize) -> ExecuteState {
        self.ip = target;
        ExecuteState::Jump
    }

    /// Conditional jump; `keep` leaves the condition on the stack.
    pub(crate) fn jump_if(
        &mut self,
        target: usize,
        expected: bool,
        keep: bool,
    ) -> Result<ExecuteState, Fault> {
        let condition = if keep {
            self.top()?.boolean()?
        } else {
            self.pop()?.boolean()?
        };
        if condition == expected {
            Ok(self.jump(target))
        } else {
            Ok(ExecuteState::Proceed)
        }
    }

    pub(crate) fn call_routine(&mut self, target: usize) -> ExecuteState {
        self.call.push(self.ip);
        self.jump(target)
    }

    /// `LAM`: call through the lambda accumulator as a routine address.
    pub(crate) fn call_lambda(&mut self) -> Result<ExecuteState, Fault> {
        self.call.push(self.ip);
        let target = self.lambda.integer()? as usize;
        self.ip = target;
        if target == 0 {
            return Err(Fault::NullRoutine);
        }
        Ok(ExecuteState::Jump)
    }

    /// `RET` lands on the instruction after the call site.
    pub(crate) fn ret(&mut self) -> Result<ExecuteState, Fault> {
        self.base = self.frame.pop().ok_or(Fault::StackUnderflow)?;
        self.ip = self.call.pop().ok_or(Fault::StackUnderflow)?;
        Ok(ExecuteState::Proceed)
    }

    pub(crate) fn stack_get(&mut self, index: usize) -> Result<(), Fault> {
        let value = self.stack.at(index).ok_or(Fault::IndexOutOfRange)?;
        self.stack.push(value);
        Ok(())
    }

    pub(crate) fn stack_set(&mut self, index: usize) -> Result<(), Fault> {
        let top = self.top()?;
        if !self.stack.edit(index, top) {
            return Err(Fault::IndexOutOfRange);
        }
        Ok(())
    }

    /// `SWP`: the top two values are the absolute indices to exchange.
    pub(crate) fn swap_slots(&mut self) -> Result<(), Fault> {
        let second = self.pop()?.integer()? as usize;
        let first = self.pop()?.integer()? as usize;
        let left = self.stack.at(first).ok_or(Fault::IndexOutOfRange)?;
        let right = self.stack.at(second).ok_or(Fault::IndexOutOfRange)?;
        let edited = self.stack.edit(first, right) && self.stack.edit(second, left);
        debug_assert!(edited);
        Ok(())
    }

    /// `SSF`: save the caller's base and rebase over the arity window.
    pub(crate) fn set_stack_frame(&mut self, arity: usize) -> Result<(), Fault> {
        self.frame.push(self.base);
        self.base = self
            .stack
            .size()
            .checked_sub(arity)
            .ok_or(Fault::StackUnderflow)?;
        Ok(())
    }

    pub(crate) fn get_local(&mut self, index: usize) -> Result<(), Fault> {
        self.stack_get(self.base + index)
    }

    pub(crate) fn set_local(&mut self, index: usize) -> Result<(), Fault> {
        self.stack_set(self.base + index)
    }
}
