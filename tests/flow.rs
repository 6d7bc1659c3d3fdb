use gale_vm::prelude::*;

fn program(instructions: Vec<Instruction>) -> Program {
    Program {
        instructions,
        ..Program::default()
    }
}

fn evaluate(instructions: Vec<Instruction>) -> Result<Value, Crash> {
    Interpreter::new().evaluate(&program(instructions))
}

#[test]
fn absolute_jump_skips() {
    let value = evaluate(vec![
        Instruction::indexed(Opcode::JMP, 2),
        Instruction::push(Value::Integer(1)),
        Instruction::push(Value::Integer(2)),
    ]);
    assert_eq!(value, Ok(Value::Integer(2)));
}

#[test]
fn conditional_jumps_pop_their_condition() {
    // False does not take the jump; the condition is consumed.
    let mut vm = Interpreter::new();
    let value = vm
        .evaluate(&program(vec![
            Instruction::nullary(Opcode::PSF),
            Instruction::indexed(Opcode::JIT, 3),
            Instruction::push(Value::Integer(7)),
        ]))
        .expect("well-typed program");
    assert_eq!(value, Value::Integer(7));
    assert!(vm.stack().is_empty());
}

#[test]
fn peeking_jumps_keep_their_condition() {
    let mut vm = Interpreter::new();
    let value = vm
        .evaluate(&program(vec![
            Instruction::nullary(Opcode::PST),
            Instruction::indexed(Opcode::JAT, 3),
            Instruction::nullary(Opcode::RST),
            Instruction::push(Value::Integer(9)),
        ]))
        .expect("well-typed program");
    assert_eq!(value, Value::Integer(9));
    // The peeked boolean is still below the popped result.
    assert_eq!(vm.stack().size(), 1);
    assert_eq!(vm.stack().top(), Some(Value::Boolean(true)));
}

#[test]
fn jump_if_false_takes_the_branch() {
    let value = evaluate(vec![
        Instruction::nullary(Opcode::PSF),
        Instruction::indexed(Opcode::JIF, 3),
        Instruction::nullary(Opcode::RST),
        Instruction::push(Value::Integer(11)),
    ]);
    assert_eq!(value, Ok(Value::Integer(11)));
}

#[test]
fn routine_call_restores_the_frame() {
    let mut vm = Interpreter::new();
    let value = vm
        .evaluate(&program(vec![
            // 0..3: push the arguments and call the routine.
            Instruction::push(Value::Integer(40)),
            Instruction::push(Value::Integer(2)),
            Instruction::indexed(Opcode::CAL, 4),
            Instruction::indexed(Opcode::JMP, 9),
            // 4..8: the routine body over a two-slot frame.
            Instruction::indexed(Opcode::SSF, 2),
            Instruction::indexed(Opcode::GLF, 0),
            Instruction::indexed(Opcode::GLF, 1),
            Instruction::paired(Opcode::ADD, TypePair::new(Type::Integer, Type::Integer)),
            Instruction::nullary(Opcode::RET),
        ]))
        .expect("well-typed program");
    assert_eq!(value, Value::Integer(42));
    assert_eq!(vm.call().size(), 0);
    assert_eq!(vm.frame().size(), 0);
    assert_eq!(vm.base(), 0);
}

#[test]
fn lambda_call_goes_through_the_accumulator() {
    let value = evaluate(vec![
        // 0..2: load the routine address and call through it.
        Instruction::push(Value::Integer(4)),
        Instruction::nullary(Opcode::LLA),
        Instruction::nullary(Opcode::LAM),
        Instruction::indexed(Opcode::JMP, 7),
        // 4..6: the routine.
        Instruction::indexed(Opcode::SSF, 0),
        Instruction::push(Value::Integer(7)),
        Instruction::nullary(Opcode::RET),
    ]);
    assert_eq!(value, Ok(Value::Integer(7)));
}

#[test]
fn lambda_call_through_zero_crashes() {
    let crash = evaluate(vec![
        Instruction::push(Value::Integer(0)),
        Instruction::nullary(Opcode::LLA),
        Instruction::nullary(Opcode::LAM),
    ])
    .expect_err("zero routine address");
    assert_eq!(crash.fault(), Fault::NullRoutine);
    assert_eq!(crash.address(), 0);
    assert_eq!(crash.instruction().op, Opcode::LAM);
}

#[test]
fn unload_duplicates_the_accumulator() {
    let mut vm = Interpreter::new();
    let value = vm
        .evaluate(&program(vec![
            Instruction::push(Value::Integer(5)),
            Instruction::nullary(Opcode::LLA),
            Instruction::nullary(Opcode::ULA),
            Instruction::nullary(Opcode::ULA),
        ]))
        .expect("well-typed program");
    assert_eq!(value, Value::Integer(5));
    assert_eq!(vm.stack().size(), 1);
}

#[test]
fn transfer_accumulator_survives_stack_traffic() {
    let value = evaluate(vec![
        Instruction::push(Value::Integer(1)),
        Instruction::push(Value::Integer(2)),
        Instruction::nullary(Opcode::CTP),
        Instruction::nullary(Opcode::POP),
        Instruction::nullary(Opcode::LTP),
    ]);
    assert_eq!(value, Ok(Value::Integer(2)));
}

#[test]
fn slot_access() {
    let mut vm = Interpreter::new();
    let value = vm
        .evaluate(&program(vec![
            Instruction::push(Value::Integer(5)),
            Instruction::push(Value::Integer(9)),
            Instruction::indexed(Opcode::SET, 0),
            Instruction::indexed(Opcode::GET, 0),
        ]))
        .expect("well-typed program");
    assert_eq!(value, Value::Integer(9));
    assert_eq!(vm.stack().at(0), Some(Value::Integer(9)));
}

#[test]
fn swap_exchanges_the_indexed_slots() {
    let mut vm = Interpreter::new();
    let value = vm
        .evaluate(&program(vec![
            Instruction::push(Value::Integer(10)),
            Instruction::push(Value::Integer(20)),
            Instruction::push(Value::Integer(0)),
            Instruction::push(Value::Integer(1)),
            Instruction::nullary(Opcode::SWP),
        ]))
        .expect("well-typed program");
    assert_eq!(value, Value::Integer(10));
    assert_eq!(vm.stack().at(0), Some(Value::Integer(20)));
}

#[test]
fn stack_control() {
    let mut vm = Interpreter::new();
    let value = vm
        .evaluate(&program(vec![
            Instruction::push(Value::Integer(1)),
            Instruction::nullary(Opcode::DHD),
            Instruction::push(Value::Integer(2)),
            Instruction::push(Value::Integer(3)),
            Instruction::indexed(Opcode::DSK, 2),
        ]))
        .expect("well-typed program");
    assert_eq!(value, Value::Integer(1));
    assert_eq!(vm.stack().size(), 1);
}

#[test]
fn out_of_range_slot_crashes() {
    let crash = evaluate(vec![Instruction::indexed(Opcode::GET, 3)]).expect_err("empty stack");
    assert_eq!(crash.fault(), Fault::IndexOutOfRange);
}

#[test]
fn return_without_a_call_crashes() {
    let crash = evaluate(vec![Instruction::nullary(Opcode::RET)]).expect_err("no call frame");
    assert_eq!(crash.fault(), Fault::StackUnderflow);
}

#[test]
fn popping_an_empty_stack_crashes() {
    let crash = evaluate(vec![Instruction::nullary(Opcode::POP)]).expect_err("empty stack");
    assert_eq!(crash.fault(), Fault::StackUnderflow);
}

#[test]
fn rest_does_nothing() {
    let mut vm = Interpreter::new();
    let value = vm
        .evaluate(&program(vec![
            Instruction::nullary(Opcode::RST),
            Instruction::push(Value::Integer(1)),
            Instruction::nullary(Opcode::RST),
        ]))
        .expect("well-typed program");
    assert_eq!(value, Value::Integer(1));
}

#[test]
fn missing_operand_crashes() {
    let crash = evaluate(vec![Instruction::nullary(Opcode::JMP)]).expect_err("jump without target");
    assert_eq!(crash.fault(), Fault::MissingOperand);
}
