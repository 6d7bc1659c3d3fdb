//! Typed arithmetic dispatch
//!
//! Every binary arithmetic opcode carries the pair of static operand
//! types; the match below covers the permitted cross product arm by
//! arm. Integral results wrap on overflow, mixed-signedness arms follow
//! the promotion of the unsigned operand, and any heap-typed result
//! registers a fresh arena object. Unlisted pairs crash.

use super::Interpreter;
use crate::complex::Complex;
use crate::error::Fault;
use crate::opcode::TypePair;
use crate::types::{Type, Value};

impl<I, O> Interpreter<I, O> {
    pub(crate) fn add(&mut self, types: TypePair) -> Result<(), Fault> {
        let b = self.pop()?;
        let a = self.pop()?;
        let value = match types.split() {
            (Type::Character | Type::Byte, Type::Character | Type::Byte) => {
                Value::Integer(a.byte()? as i64 + b.byte()? as i64)
            }
            (Type::Character | Type::Byte, Type::Natural | Type::Integer) => {
                Value::Integer((a.byte()? as i64).wrapping_add(b.integer()?))
            }
            (Type::Natural | Type::Integer, Type::Character | Type::Byte) => {
                Value::Integer(a.integer()?.wrapping_add(b.byte()? as i64))
            }
            (Type::Natural | Type::Integer, Type::Natural | Type::Integer) => {
                Value::Integer(a.integer()?.wrapping_add(b.integer()?))
            }
            (Type::Natural, Type::Real) => Value::Real(a.natural()? as f64 + b.real()?),
            (Type::Integer, Type::Real) => Value::Real(a.integer()? as f64 + b.real()?),
            (Type::Real, Type::Natural) => Value::Real(a.real()? + b.natural()? as f64),
            (Type::Real, Type::Integer) => Value::Real(a.real()? + b.integer()? as f64),
            (Type::Real, Type::Real) | (Type::Imaginary, Type::Imaginary) => {
                Value::Real(a.real()? + b.real()?)
            }
            (Type::Natural, Type::Imaginary) => {
                let complex = Complex::new(a.natural()? as f64, b.real()?);
                self.register_complex(complex)
            }
            (Type::Natural, Type::Complex) => {
                let complex = self.complex_at(b)?;
                self.register_complex(Complex::new(complex.a + a.natural()? as f64, complex.b))
            }
            (Type::Integer, Type::Imaginary) => {
                let complex = Complex::new(a.integer()? as f64, b.real()?);
                self.register_complex(complex)
            }
            (Type::Integer, Type::Complex) => {
                let complex = self.complex_at(b)?;
                self.register_complex(Complex::new(complex.a + a.integer()? as f64, complex.b))
            }
            (Type::Real, Type::Imaginary) => {
                let complex = Complex::new(a.real()?, b.real()?);
                self.register_complex(complex)
            }
            (Type::Real, Type::Complex) => {
                let complex = self.complex_at(b)?;
                self.register_complex(Complex::new(complex.a + a.real()?, complex.b))
            }
            (Type::Imaginary, Type::Natural) => {
                let complex = Complex::new(b.natural()? as f64, a.real()?);
                self.register_complex(complex)
            }
            (Type::Imaginary, Type::Integer) => {
                let complex = Complex::new(b.integer()? as f64, a.real()?);
                self.register_complex(complex)
            }
            (Type::Imaginary, Type::Real) => {
                let complex = Complex::new(b.real()?, a.real()?);
                self.register_complex(complex)
            }
            (Type::Imaginary, Type::Complex) => {
                let complex = self.complex_at(b)?;
                self.register_complex(Complex::new(complex.a, complex.b + a.real()?))
            }
            (Type::Complex, Type::Natural) => {
                let complex = self.complex_at(a)?;
                self.register_complex(Complex::new(complex.a + b.natural()? as f64, complex.b))
            }
            (Type::Complex, Type::Integer) => {
                let complex = self.complex_at(a)?;
                self.register_complex(Complex::new(complex.a + b.integer()? as f64, complex.b))
            }
            (Type::Complex, Type::Real) => {
                let complex = self.complex_at(a)?;
                self.register_complex(Complex::new(complex.a + b.real()?, complex.b))
            }
            (Type::Complex, Type::Imaginary) => {
                let complex = self.complex_at(a)?;
                self.register_complex(Complex::new(complex.a, complex.b + b.real()?))
            }
            (Type::Complex, Type::Complex) => {
                let sum = self.complex_at(a)? + self.complex_at(b)?;
                self.register_complex(sum)
            }
            (Type::String, Type::Character) => {
                let mut string = self.string_at(a)?.clone();
                string.push(b.byte()?);
                self.register_string(string)
            }
            (Type::Character, Type::String) => {
                let mut string = vec![a.byte()?];
                string.extend_from_slice(self.string_at(b)?);
                self.register_string(string)
            }
            (Type::String, Type::String) => {
                let mut string = self.string_at(a)?.clone();
                string.extend_from_slice(self.string_at(b)?);
                self.register_string(string)
            }
            _ => return Err(Fault::InvalidTypes(types)),
        };
        self.stack.push(value);
        Ok(())
    }

    pub(crate) fn subtract(&mut self, types: TypePair) -> Result<(), Fault> {
        let b = self.pop()?;
        let a = self.pop()?;
        let value = match types.split() {
            (Type::Character | Type::Byte, Type::Character | Type::Byte) => {
                Value::Integer(a.byte()? as i64 - b.byte()? as i64)
            }
            (Type::Character | Type::Byte, Type::Natural | Type::Integer) => {
                Value::Integer((a.byte()? as i64).wrapping_sub(b.integer()?))
            }
            (Type::Natural | Type::Integer, Type::Character | Type::Byte) => {
                Value::Integer(a.integer()?.wrapping_sub(b.byte()? as i64))
            }
            (Type::Natural | Type::Integer, Type::Natural | Type::Integer) => {
                Value::Integer(a.integer()?.wrapping_sub(b.integer()?))
            }
            (Type::Natural, Type::Real) => Value::Real(a.natural()? as f64 - b.real()?),
            (Type::Integer, Type::Real) => Value::Real(a.integer()? as f64 - b.real()?),
            (Type::Real, Type::Natural) => Value::Real(a.real()? - b.natural()? as f64),
            (Type::Real, Type::Integer) => Value::Real(a.real()? - b.integer()? as f64),
            (Type::Real, Type::Real) | (Type::Imaginary, Type::Imaginary) => {
                Value::Real(a.real()? - b.real()?)
            }
            (Type::Natural, Type::Imaginary) => {
                let complex = Complex::new(a.natural()? as f64, -b.real()?);
                self.register_complex(complex)
            }
            (Type::Natural, Type::Complex) => {
                let complex = self.complex_at(b)?;
                self.register_complex(Complex::new(a.natural()? as f64 - complex.a, -complex.b))
            }
            (Type::Integer, Type::Imaginary) => {
                let complex = Complex::new(a.integer()? as f64, -b.real()?);
                self.register_complex(complex)
            }
            (Type::Integer, Type::Complex) => {
                let complex = self.complex_at(b)?;
                self.register_complex(Complex::new(a.integer()? as f64 - complex.a, -complex.b))
            }
            (Type::Real, Type::Imaginary) => {
                let complex = Complex::new(a.real()?, -b.real()?);
                self.register_complex(complex)
            }
            (Type::Real, Type::Complex) => {
                let complex = self.complex_at(b)?;
                self.register_complex(Complex::new(a.real()? - complex.a, -complex.b))
            }
            (Type::Imaginary, Type::Natural) => {
                let complex = Complex::new(-(b.natural()? as f64), a.real()?);
                self.register_complex(complex)
            }
            (Type::Imaginary, Type::Integer) => {
                let complex = Complex::new(-(b.integer()? as f64), a.real()?);
                self.register_complex(complex)
            }
            (Type::Imaginary, Type::Real) => {
                let complex = Complex::new(-b.real()?, a.real()?);
                self.register_complex(complex)
            }
            (Type::Imaginary, Type::Complex) => {
                let complex = self.complex_at(b)?;
                self.register_complex(Complex::new(-complex.a, a.real()? - complex.b))
            }
            (Type::Complex, Type::Natural) => {
                let complex = self.complex_at(a)?;
                self.register_complex(Complex::new(complex.a - b.natural()? as f64, complex.b))
            }
            (Type::Complex, Type::Integer) => {
                let complex = self.complex_at(a)?;
                self.register_complex(Complex::new(complex.a - b.integer()? as f64, complex.b))
            }
            (Type::Complex, Type::Real) => {
                let complex = self.complex_at(a)?;
                self.register_complex(Complex::new(complex.a - b.real()?, complex.b))
            }
            (Type::Complex, Type::Imaginary) => {
                let complex = self.complex_at(a)?;
                self.register_complex(Complex::new(complex.a, complex.b - b.real()?))
            }
            (Type::Complex, Type::Complex) => {
                let difference = self.complex_at(a)? - self.complex_at(b)?;
                self.register_complex(difference)
            }
            _ => return Err(Fault::InvalidTypes(types)),
        };
        self.stack.push(value);
        Ok(())
    }

    pub(crate) fn multiply(&mut self, types: TypePair) -> Result<(), Fault> {
        let b = self.pop()?;
        let a = self.pop()?;
        let value = match types.split() {
            (Type::Character | Type::Byte, Type::Character | Type::Byte) => {
                Value::Integer(a.byte()? as i64 * b.byte()? as i64)
            }
            (Type::Character | Type::Byte, Type::Natural | Type::Integer) => {
                Value::Integer((a.byte()? as i64).wrapping_mul(b.integer()?))
            }
            (Type::Natural | Type::Integer, Type::Character | Type::Byte) => {
                Value::Integer(a.integer()?.wrapping_mul(b.byte()? as i64))
            }
            (Type::Natural | Type::Integer, Type::Natural | Type::Integer) => {
                Value::Integer(a.integer()?.wrapping_mul(b.integer()?))
            }
            (Type::Natural, Type::Real | Type::Imaginary) => {
                Value::Real(a.natural()? as f64 * b.real()?)
            }
            (Type::Integer, Type::Real | Type::Imaginary) => {
                Value::Real(a.integer()? as f64 * b.real()?)
            }
            (Type::Real | Type::Imaginary, Type::Natural) => {
                Value::Real(a.real()? * b.natural()? as f64)
            }
            (Type::Real | Type::Imaginary, Type::Integer) => {
                Value::Real(a.real()? * b.integer()? as f64)
            }
            // The imaginary-imaginary arm keeps the plain product of the
            // two magnitudes; the emitter owns any sign adjustment.
            (Type::Real | Type::Imaginary, Type::Real | Type::Imaginary) => {
                Value::Real(a.real()? * b.real()?)
            }
            (Type::Natural, Type::Complex) => {
                let complex = self.complex_at(b)?;
                let scale = a.natural()? as f64;
                self.register_complex(Complex::new(complex.a * scale, complex.b * scale))
            }
            (Type::Integer, Type::Complex) => {
                let complex = self.complex_at(b)?;
                let scale = a.integer()? as f64;
                self.register_complex(Complex::new(complex.a * scale, complex.b * scale))
            }
            (Type::Real, Type::Complex) => {
                let complex = self.complex_at(b)?;
                let scale = a.real()?;
                self.register_complex(Complex::new(complex.a * scale, complex.b * scale))
            }
            (Type::Imaginary, Type::Complex) => {
                let complex = self.complex_at(b)?;
                let scale = a.real()?;
                self.register_complex(Complex::new(-(complex.b * scale), complex.a * scale))
            }
            (Type::Complex, Type::Natural) => {
                let complex = self.complex_at(a)?;
                let scale = b.natural()? as f64;
                self.register_complex(Complex::new(complex.a * scale, complex.b * scale))
            }
            (Type::Complex, Type::Integer) => {
                let complex = self.complex_at(a)?;
                let scale = b.integer()? as f64;
                self.register_complex(Complex::new(complex.a * scale, complex.b * scale))
            }
            (Type::Complex, Type::Real) => {
                let complex = self.complex_at(a)?;
                let scale = b.real()?;
                self.register_complex(Complex::new(complex.a * scale, complex.b * scale))
            }
            (Type::Complex, Type::Imaginary) => {
                let complex = self.complex_at(a)?;
                let scale = b.real()?;
                self.register_complex(Complex::new(-(complex.b * scale), complex.a * scale))
            }
            (Type::Complex, Type::Complex) => {
                let product = self.complex_at(a)? * self.complex_at(b)?;
                self.register_complex(product)
            }
            _ => return Err(Fault::InvalidTypes(types)),
        };
        self.stack.push(value);
        Ok(())
    }

    pub(crate) fn divide(&mut self, types: TypePair) -> Result<(), Fault> {
        let b = self.pop()?;
        let a = self.pop()?;
        let value = match types.split() {
            (Type::Character | Type::Byte, Type::Character | Type::Byte) => {
                if b.byte()? == 0 {
                    return Err(Fault::DivisionByZero);
                }
                Value::Integer(a.byte()? as i64 / b.byte()? as i64)
            }
            (Type::Character | Type::Byte, Type::Natural) => {
                if b.integer()? == 0 {
                    return Err(Fault::DivisionByZero);
                }
                Value::Integer((a.byte()? as u64 / b.natural()?) as i64)
            }
            (Type::Character | Type::Byte, Type::Integer) => {
                if b.integer()? == 0 {
                    return Err(Fault::DivisionByZero);
                }
                Value::Integer(a.byte()? as i64 / b.integer()?)
            }
            (Type::Natural, Type::Character | Type::Byte) => {
                if b.byte()? == 0 {
                    return Err(Fault::DivisionByZero);
                }
                Value::Integer((a.natural()? / b.byte()? as u64) as i64)
            }
            (Type::Integer, Type::Character | Type::Byte) => {
                if b.byte()? == 0 {
                    return Err(Fault::DivisionByZero);
                }
                Value::Integer(a.integer()? / b.byte()? as i64)
            }
            // Any unsigned operand drags the division unsigned.
            (Type::Natural, Type::Natural | Type::Integer) | (Type::Integer, Type::Natural) => {
                if b.integer()? == 0 {
                    return Err(Fault::DivisionByZero);
                }
                Value::Integer((a.natural()? / b.natural()?) as i64)
            }
            (Type::Integer, Type::Integer) => {
                if b.integer()? == 0 {
                    return Err(Fault::DivisionByZero);
                }
                Value::Integer(a.integer()?.wrapping_div(b.integer()?))
            }
            (Type::Natural, Type::Real | Type::Imaginary) => {
                Value::Real(a.natural()? as f64 / b.real()?)
            }
            (Type::Integer, Type::Real | Type::Imaginary) => {
                Value::Real(a.integer()? as f64 / b.real()?)
            }
            (Type::Real | Type::Imaginary, Type::Natural) => {
                Value::Real(a.real()? / b.natural()? as f64)
            }
            (Type::Real | Type::Imaginary, Type::Integer) => {
                Value::Real(a.real()? / b.integer()? as f64)
            }
            (Type::Real | Type::Imaginary, Type::Real | Type::Imaginary) => {
                Value::Real(a.real()? / b.real()?)
            }
            (Type::Natural, Type::Complex) => {
                let complex = self.complex_at(b)?;
                let scale = a.natural()? as f64 / complex.squared_magnitude();
                self.register_complex(Complex::new(scale * complex.a, scale * -complex.b))
            }
            (Type::Integer, Type::Complex) => {
                let complex = self.complex_at(b)?;
                let scale = a.integer()? as f64 / complex.squared_magnitude();
                self.register_complex(Complex::new(scale * complex.a, scale * -complex.b))
            }
            (Type::Real, Type::Complex) => {
                let complex = self.complex_at(b)?;
                let scale = a.real()? / complex.squared_magnitude();
                self.register_complex(Complex::new(scale * complex.a, scale * -complex.b))
            }
            (Type::Imaginary, Type::Complex) => {
                let complex = self.complex_at(b)?;
                let scale = a.real()? / complex.squared_magnitude();
                self.register_complex(Complex::new(complex.b * scale, complex.a * scale))
            }
            (Type::Complex, Type::Natural) => {
                let complex = self.complex_at(a)?;
                let divisor = b.natural()? as f64;
                self.register_complex(Complex::new(complex.a / divisor, complex.b / divisor))
            }
            (Type::Complex, Type::Integer) => {
                let complex = self.complex_at(a)?;
                let divisor = b.integer()? as f64;
                self.register_complex(Complex::new(complex.a / divisor, complex.b / divisor))
            }
            (Type::Complex, Type::Real) => {
                let complex = self.complex_at(a)?;
                let divisor = b.real()?;
                self.register_complex(Complex::new(complex.a / divisor, complex.b / divisor))
            }
            (Type::Complex, Type::Imaginary) => {
                let complex = self.complex_at(a)?;
                let divisor = b.real()?;
                self.register_complex(Complex::new(complex.b / divisor, -(complex.a / divisor)))
            }
            (Type::Complex, Type::Complex) => {
                let quotient = self.complex_at(a)? / self.complex_at(b)?;
                self.register_complex(quotient)
            }
            _ => return Err(Fault::InvalidTypes(types)),
        };
        self.stack.push(value);
        Ok(())
    }

    pub(crate) fn modulus(&mut self, types: TypePair) -> Result<(), Fault> {
        let b = self.pop()?;
        let a = self.pop()?;
        let value = match types.split() {
            (Type::Character | Type::Byte, Type::Character | Type::Byte) => {
                if b.byte()? == 0 {
                    return Err(Fault::DivisionByZero);
                }
                Value::Integer((a.byte()? as u64 % b.byte()? as u64) as i64)
            }
            (Type::Character | Type::Byte, Type::Natural | Type::Integer) => {
                if b.integer()? == 0 {
                    return Err(Fault::DivisionByZero);
                }
                Value::Integer((a.byte()? as u64 % b.natural()?) as i64)
            }
            (Type::Natural | Type::Integer, Type::Character | Type::Byte) => {
                if b.byte()? == 0 {
                    return Err(Fault::DivisionByZero);
                }
                Value::Integer((a.natural()? % b.byte()? as u64) as i64)
            }
            (Type::Integer, Type::Integer) => {
                if b.integer()? == 0 {
                    return Err(Fault::DivisionByZero);
                }
                Value::Integer(a.integer()?.wrapping_rem(b.integer()?))
            }
            // The remaining mixed pairs reduce unsigned.
            (Type::Natural | Type::Integer, Type::Natural | Type::Integer) => {
                if b.integer()? == 0 {
                    return Err(Fault::DivisionByZero);
                }
                Value::Integer((a.natural()? % b.natural()?) as i64)
            }
            _ => return Err(Fault::InvalidTypes(types)),
        };
        self.stack.push(value);
        Ok(())
    }
}
