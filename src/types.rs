//! Runtime type tags and the tagged value representation

use crate::arena::Handle;
use crate::error::Fault;

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Static type of a runtime value, carried by the bytecode rather than by
/// the value itself.
///
/// `Boolean` through `Imaginary` are value types and fit in a machine
/// word; `Complex` through `Instance` are heap types, represented on the
/// stack by a [`Handle`] into the object arena. `Void` marks the absence
/// of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, IntoPrimitive, TryFromPrimitive, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Type {
    Boolean = 0x00,
    Character = 0x01,
    Byte = 0x02,
    Natural = 0x03,
    Integer = 0x04,
    Real = 0x05,
    Imaginary = 0x06,
    Complex = 0x07,
    String = 0x08,
    Array = 0x09,
    Vector = 0x0a,
    Routine = 0x0b,
    Class = 0x0c,
    Instance = 0x0d,
    Void = 0x0e,
}

impl Type {
    /// Three-letter code used by the decompiler.
    pub const fn code(self) -> &'static str {
        match self {
            Self::Boolean => "BLN",
            Self::Character => "CHR",
            Self::Byte => "BYT",
            Self::Natural => "NAT",
            Self::Integer => "INT",
            Self::Real => "REA",
            Self::Imaginary => "IMG",
            Self::Complex => "CPX",
            Self::String => "STR",
            Self::Array => "ARR",
            Self::Vector => "VEC",
            Self::Routine => "RTN",
            Self::Class => "DEF",
            Self::Instance => "INS",
            Self::Void => "VOD",
        }
    }

    /// Whether the type fits in a machine word.
    pub const fn is_value_type(self) -> bool {
        (self as u8) <= (Self::Imaginary as u8)
    }

    /// Whether the type is represented by an arena handle.
    pub const fn is_heap_type(self) -> bool {
        (self as u8) >= (Self::Complex as u8) && (self as u8) <= (Self::Instance as u8)
    }
}

/// A runtime value.
///
/// The bytecode carries the static type of every operand, so the variant
/// only distinguishes representation: `Character` values travel in the
/// `Byte` variant and `Natural` values in the `Integer` variant with the
/// bits reinterpreted as unsigned. Reading the wrong variant is a
/// precondition violation surfaced as [`Fault::ValueMismatch`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Boolean(bool),
    Byte(u8),
    Integer(i64),
    Real(f64),
    Object(Handle),
}

impl Value {
    /// Build the `Integer` representation of an unsigned value.
    pub const fn natural_from(value: u64) -> Self {
        Self::Integer(value as i64)
    }

    pub const fn boolean(self) -> Result<bool, Fault> {
        match self {
            Self::Boolean(boolean) => Ok(boolean),
            _ => Err(Fault::ValueMismatch),
        }
    }

    pub const fn byte(self) -> Result<u8, Fault> {
        match self {
            Self::Byte(byte) => Ok(byte),
            _ => Err(Fault::ValueMismatch),
        }
    }

    pub const fn integer(self) -> Result<i64, Fault> {
        match self {
            Self::Integer(integer) => Ok(integer),
            _ => Err(Fault::ValueMismatch),
        }
    }

    /// The `Integer` variant reinterpreted as unsigned.
    pub const fn natural(self) -> Result<u64, Fault> {
        match self {
            Self::Integer(integer) => Ok(integer as u64),
            _ => Err(Fault::ValueMismatch),
        }
    }

    pub const fn real(self) -> Result<f64, Fault> {
        match self {
            Self::Real(real) => Ok(real),
            _ => Err(Fault::ValueMismatch),
        }
    }

    pub const fn object(self) -> Result<Handle, Fault> {
        match self {
            Self::Object(handle) => Ok(handle),
            _ => Err(Fault::ValueMismatch),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Integer(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn type_byte_round_trip() {
        for tag in Type::iter() {
            assert_eq!(Type::try_from(tag as u8).ok(), Some(tag));
        }
        assert!(Type::try_from(0x0f).is_err());
        assert!(Type::try_from(0xff).is_err());
    }

    #[test]
    fn type_partition() {
        assert!(Type::Boolean.is_value_type());
        assert!(Type::Imaginary.is_value_type());
        assert!(!Type::Complex.is_value_type());
        assert!(Type::Complex.is_heap_type());
        assert!(Type::Instance.is_heap_type());
        assert!(!Type::Void.is_heap_type());
    }

    #[test]
    fn wrong_variant_is_a_fault() {
        assert_eq!(Value::Integer(1).boolean(), Err(Fault::ValueMismatch));
        assert_eq!(Value::Real(1.0).integer(), Err(Fault::ValueMismatch));
        assert_eq!(Value::Boolean(true).object(), Err(Fault::ValueMismatch));
    }

    #[test]
    fn natural_reinterprets_bits() {
        assert_eq!(Value::natural_from(u64::MAX).natural(), Ok(u64::MAX));
        assert_eq!(Value::natural_from(u64::MAX).integer(), Ok(-1));
    }
}
