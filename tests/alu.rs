use gale_vm::prelude::*;

use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

fn program(instructions: Vec<Instruction>) -> Program {
    Program {
        instructions,
        ..Program::default()
    }
}

fn evaluate(instructions: Vec<Instruction>) -> Result<Value, Crash> {
    Interpreter::new().evaluate(&program(instructions))
}

fn binary(op: Opcode, left: Type, right: Type, a: Value, b: Value) -> Result<Value, Crash> {
    evaluate(vec![
        Instruction::push(a),
        Instruction::push(b),
        Instruction::paired(op, TypePair::new(left, right)),
    ])
}

#[test]
fn integer_addition() {
    let value = binary(
        Opcode::ADD,
        Type::Integer,
        Type::Integer,
        Value::Integer(2),
        Value::Integer(40),
    );
    assert_eq!(value, Ok(Value::Integer(42)));
}

#[test]
fn real_multiplication() {
    let value = binary(
        Opcode::MUL,
        Type::Real,
        Type::Real,
        Value::Real(1.5),
        Value::Real(2.5),
    );
    assert_eq!(value, Ok(Value::Real(3.75)));
}

#[test]
fn integer_plus_imaginary_allocates_a_complex() {
    let mut vm = Interpreter::new();
    let value = vm
        .evaluate(&program(vec![
            Instruction::push(Value::Integer(3)),
            Instruction::push(Value::Real(4.0)),
            Instruction::paired(Opcode::CST, TypePair::new(Type::Real, Type::Imaginary)),
            Instruction::paired(Opcode::ADD, TypePair::new(Type::Integer, Type::Imaginary)),
        ]))
        .expect("well-typed program");
    let handle = value.object().expect("complex result");
    assert_eq!(vm.arena().complex(handle), Ok(Complex::new(3.0, 4.0)));
}

#[test]
fn division_by_integral_zero_crashes() {
    let crash = evaluate(vec![
        Instruction::push(Value::Integer(10)),
        Instruction::push(Value::Integer(0)),
        Instruction::paired(Opcode::DIV, TypePair::new(Type::Integer, Type::Integer)),
    ])
    .expect_err("division by zero");
    assert_eq!(crash.address(), 2);
    assert_eq!(crash.instruction().op, Opcode::DIV);
    assert_eq!(crash.fault(), Fault::DivisionByZero);
}

#[test]
fn modulus_by_integral_zero_crashes() {
    let crash = evaluate(vec![
        Instruction::push(Value::Integer(10)),
        Instruction::push(Value::Integer(0)),
        Instruction::paired(Opcode::MOD, TypePair::new(Type::Integer, Type::Integer)),
    ])
    .expect_err("modulus by zero");
    assert_eq!(crash.fault(), Fault::DivisionByZero);
}

#[test]
fn real_division_by_zero_is_infinite() {
    let value = binary(
        Opcode::DIV,
        Type::Real,
        Type::Real,
        Value::Real(1.0),
        Value::Real(0.0),
    );
    assert_eq!(value, Ok(Value::Real(f64::INFINITY)));
}

#[test]
fn byte_operands_promote_to_integer() {
    let value = binary(
        Opcode::ADD,
        Type::Byte,
        Type::Byte,
        Value::Byte(0xf0),
        Value::Byte(0x20),
    );
    assert_eq!(value, Ok(Value::Integer(0x110)));

    let value = binary(
        Opcode::SUB,
        Type::Character,
        Type::Integer,
        Value::Byte(b'a'),
        Value::Integer(100),
    );
    assert_eq!(value, Ok(Value::Integer(-3)));
}

#[test]
fn natural_promotion_is_unsigned() {
    let value = binary(
        Opcode::ADD,
        Type::Natural,
        Type::Real,
        Value::natural_from(u64::MAX),
        Value::Real(0.0),
    );
    assert_eq!(value, Ok(Value::Real(u64::MAX as f64)));

    let value = binary(
        Opcode::DIV,
        Type::Natural,
        Type::Integer,
        Value::natural_from(u64::MAX),
        Value::Integer(1),
    );
    assert_eq!(value, Ok(Value::Integer(-1)));
}

#[test]
fn signed_division_truncates_toward_zero() {
    let value = binary(
        Opcode::DIV,
        Type::Integer,
        Type::Integer,
        Value::Integer(-7),
        Value::Integer(2),
    );
    assert_eq!(value, Ok(Value::Integer(-3)));

    let value = binary(
        Opcode::MOD,
        Type::Integer,
        Type::Integer,
        Value::Integer(-7),
        Value::Integer(2),
    );
    assert_eq!(value, Ok(Value::Integer(-1)));
}

#[test]
fn imaginary_product_keeps_the_plain_magnitude() {
    let value = binary(
        Opcode::MUL,
        Type::Imaginary,
        Type::Imaginary,
        Value::Real(2.0),
        Value::Real(3.0),
    );
    assert_eq!(value, Ok(Value::Real(6.0)));
}

#[test]
fn integer_overflow_wraps() {
    let value = binary(
        Opcode::ADD,
        Type::Integer,
        Type::Integer,
        Value::Integer(i64::MAX),
        Value::Integer(1),
    );
    assert_eq!(value, Ok(Value::Integer(i64::MIN)));
}

#[test]
fn unlisted_pairs_crash() {
    let crash = binary(
        Opcode::ADD,
        Type::Boolean,
        Type::Boolean,
        Value::Boolean(true),
        Value::Boolean(false),
    )
    .expect_err("booleans do not add");
    assert_eq!(
        crash.fault(),
        Fault::InvalidTypes(TypePair::new(Type::Boolean, Type::Boolean))
    );
}

#[test]
fn representation_mismatch_crashes() {
    let crash = binary(
        Opcode::ADD,
        Type::Integer,
        Type::Integer,
        Value::Real(1.0),
        Value::Integer(1),
    )
    .expect_err("declared integer holding a real");
    assert_eq!(crash.fault(), Fault::ValueMismatch);
}

#[test]
fn comparisons_push_booleans() {
    let value = binary(
        Opcode::GRT,
        Type::Integer,
        Type::Real,
        Value::Integer(3),
        Value::Real(2.5),
    );
    assert_eq!(value, Ok(Value::Boolean(true)));

    let value = binary(
        Opcode::LEQ,
        Type::Byte,
        Type::Natural,
        Value::Byte(7),
        Value::natural_from(7),
    );
    assert_eq!(value, Ok(Value::Boolean(true)));

    let value = binary(
        Opcode::NEQ,
        Type::Boolean,
        Type::Boolean,
        Value::Boolean(true),
        Value::Boolean(false),
    );
    assert_eq!(value, Ok(Value::Boolean(true)));
}

#[test]
fn boolean_not() {
    let value = evaluate(vec![
        Instruction::nullary(Opcode::PST),
        Instruction::nullary(Opcode::NOT),
    ]);
    assert_eq!(value, Ok(Value::Boolean(false)));
}

#[test]
fn shifts_and_rotates() {
    let shift = |op, tag, a, count| {
        evaluate(vec![
            Instruction::push(a),
            Instruction::push(Value::Integer(count)),
            Instruction::typed(op, tag),
        ])
    };

    assert_eq!(shift(Opcode::BSL, Type::Byte, Value::Byte(0b0000_0011), 2), Ok(Value::Byte(0b0000_1100)));
    assert_eq!(shift(Opcode::BSR, Type::Byte, Value::Byte(0b1000_0000), 7), Ok(Value::Byte(1)));
    assert_eq!(shift(Opcode::BSL, Type::Byte, Value::Byte(0xff), 9), Ok(Value::Byte(0)));
    assert_eq!(shift(Opcode::BSL, Type::Integer, Value::Integer(1), 40), Ok(Value::Integer(1 << 40)));
    assert_eq!(shift(Opcode::BRL, Type::Byte, Value::Byte(0b1000_0001), 1), Ok(Value::Byte(0b0000_0011)));
    assert_eq!(shift(Opcode::BRR, Type::Integer, Value::Integer(1), 1), Ok(Value::Integer(i64::MIN)));

    let crash = shift(Opcode::BSL, Type::Real, Value::Real(1.0), 1).expect_err("reals do not shift");
    assert_eq!(crash.fault(), Fault::InvalidType(Type::Real));
}

#[test]
fn bitwise_logic() {
    let value = binary(
        Opcode::BWA,
        Type::Integer,
        Type::Integer,
        Value::Integer(0b1100),
        Value::Integer(0b1010),
    );
    assert_eq!(value, Ok(Value::Integer(0b1000)));

    let value = binary(
        Opcode::BWX,
        Type::Byte,
        Type::Byte,
        Value::Byte(0b1100),
        Value::Byte(0b1010),
    );
    assert_eq!(value, Ok(Value::Byte(0b0110)));

    let value = binary(
        Opcode::BWO,
        Type::Boolean,
        Type::Boolean,
        Value::Boolean(false),
        Value::Boolean(true),
    );
    assert_eq!(value, Ok(Value::Boolean(true)));

    let crash = binary(
        Opcode::BWX,
        Type::Boolean,
        Type::Boolean,
        Value::Boolean(false),
        Value::Boolean(true),
    )
    .expect_err("xor has no boolean arm");
    assert_eq!(
        crash.fault(),
        Fault::InvalidTypes(TypePair::new(Type::Boolean, Type::Boolean))
    );
}

#[test]
fn inversion_and_negation() {
    let unary = |op, tag, a| evaluate(vec![Instruction::push(a), Instruction::typed(op, tag)]);

    assert_eq!(unary(Opcode::INV, Type::Byte, Value::Byte(0b1111_0000)), Ok(Value::Byte(0b0000_1111)));
    assert_eq!(unary(Opcode::INV, Type::Integer, Value::Integer(0)), Ok(Value::Integer(-1)));
    assert_eq!(unary(Opcode::NEG, Type::Integer, Value::Integer(42)), Ok(Value::Integer(-42)));
    assert_eq!(unary(Opcode::NEG, Type::Byte, Value::Byte(7)), Ok(Value::Integer(-7)));
    assert_eq!(unary(Opcode::NEG, Type::Real, Value::Real(1.5)), Ok(Value::Real(-1.5)));
}

#[test]
fn integral_casts() {
    let value = evaluate(vec![
        Instruction::push(Value::Byte(0xfe)),
        Instruction::paired(Opcode::CST, TypePair::new(Type::Byte, Type::Integer)),
    ]);
    assert_eq!(value, Ok(Value::Integer(0xfe)));

    let value = evaluate(vec![
        Instruction::push(Value::Integer(-1)),
        Instruction::paired(Opcode::CST, TypePair::new(Type::Integer, Type::Byte)),
    ]);
    assert_eq!(value, Ok(Value::Byte(0xff)));

    let value = evaluate(vec![
        Instruction::push(Value::Real(-2.9)),
        Instruction::paired(Opcode::CST, TypePair::new(Type::Real, Type::Integer)),
    ]);
    assert_eq!(value, Ok(Value::Integer(-2)));

    let crash = evaluate(vec![
        Instruction::push(Value::Boolean(true)),
        Instruction::paired(Opcode::CST, TypePair::new(Type::Boolean, Type::Integer)),
    ])
    .expect_err("booleans do not cast");
    assert_eq!(
        crash.fault(),
        Fault::InvalidTypes(TypePair::new(Type::Boolean, Type::Integer))
    );
}

#[test]
fn stack_balance_of_data_opcodes() {
    let mut vm = Interpreter::new();
    vm.evaluate(&program(vec![
        Instruction::push(Value::Integer(1)),
        Instruction::push(Value::Integer(2)),
        Instruction::paired(Opcode::ADD, TypePair::new(Type::Integer, Type::Integer)),
        Instruction::nullary(Opcode::DHD),
    ]))
    .expect("well-typed program");
    // Two pushes, one binary op, one duplicate, one popped result.
    assert_eq!(vm.stack().size(), 1);
}

#[quickcheck]
fn addition_commutes_across_integers(x: i64, y: i64) -> bool {
    let left = binary(Opcode::ADD, Type::Integer, Type::Integer, Value::Integer(x), Value::Integer(y));
    let right = binary(Opcode::ADD, Type::Integer, Type::Integer, Value::Integer(y), Value::Integer(x));
    left == right
}

#[quickcheck]
fn multiplication_commutes_across_mixed_operands(x: i64, y: f64) -> TestResult {
    if y.is_nan() || (x as f64 * y).is_nan() {
        return TestResult::discard();
    }
    let left = binary(Opcode::MUL, Type::Integer, Type::Real, Value::Integer(x), Value::Real(y));
    let right = binary(Opcode::MUL, Type::Real, Type::Integer, Value::Real(y), Value::Integer(x));
    TestResult::from_bool(left == right)
}

#[quickcheck]
fn widening_casts_round_trip(byte: u8) -> bool {
    let value = evaluate(vec![
        Instruction::push(Value::Byte(byte)),
        Instruction::paired(Opcode::CST, TypePair::new(Type::Byte, Type::Integer)),
        Instruction::paired(Opcode::CST, TypePair::new(Type::Integer, Type::Byte)),
    ]);
    value == Ok(Value::Byte(byte))
}
