//! Instructions for function bodies.

use super::{
    ty::{RefTy, ValTy},
    GlobalIndex,
};

/// Block type of a structured control instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockTy {
    /// No result value (the `0x40` sentinel)
    Empty,
    /// A single result value
    Val(ValTy),
}

/// Two-`u32` immediate pair.
///
/// For the load and store families the pair is the alignment exponent and the
/// address offset. `call_indirect` and the bulk `0xFC` operations reuse the
/// same shape for their two index operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemArg {
    /// First operand (alignment for loads and stores)
    pub x: u32,
    /// Second operand (offset for loads and stores)
    pub y: u32,
}

/// Constant expression used to initialize a global, an element segment
/// offset, or a data segment offset.
///
/// In the binary the expression is a single value-producing opcode followed
/// by `end`; the terminator is consumed during decoding and not retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstExpr {
    /// `i32.const` (0x41)
    I32(i32),
    /// `i64.const` (0x42)
    I64(i64),
    /// `f32.const` (0x43), raw little-endian bit pattern
    F32(u32),
    /// `f64.const` (0x44), raw little-endian bit pattern
    F64(u64),
    /// `global.get` (0x23)
    GlobalGet(GlobalIndex),
}

/// Immediate operand of an [`Instr`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Immediate<'a> {
    /// No immediate
    None,
    /// Single index operand (`br`, `call`, `local.get`, ...)
    U32(u32),
    /// `i32.const` payload
    I32(i32),
    /// `i64.const` payload
    I64(i64),
    /// `f32.const` payload, raw bit pattern
    F32(u32),
    /// `f64.const` payload, raw bit pattern
    F64(u64),
    /// Block type of `block`, `loop`, and `if`
    BlockTy(BlockTy),
    /// Reference type of `ref.null`
    RefTy(RefTy),
    /// Two-`u32` pair
    MemArg(MemArg),
    /// `br_table` labels with the default label appended last
    BrTable(&'a [u32]),
    /// Value types of a typed `select`; may be empty
    SelectTys(&'a [ValTy]),
}

/// A single decoded instruction.
///
/// The opcode space is open: opcodes this crate does not know about are
/// preserved as-is with no immediate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instr<'a> {
    /// Primary opcode byte
    pub op_code: u8,
    /// Secondary opcode for the `0xFC`-prefixed family
    pub secondary: Option<u32>,
    /// Immediate operand
    pub imm: Immediate<'a>,
}
