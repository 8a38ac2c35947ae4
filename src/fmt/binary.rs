//! WebAssembly binary format decoding.
//!
//! # See Also
//!
//! * [Binary Format spec](https://www.w3.org/TR/wasm-core-1/#binary-format)

use std::{error, fmt, io, str};

use bumpalo::{collections::Vec as BumpVec, Bump};
use log::debug;

use crate::module::{
    instr::{BlockTy, ConstExpr, Immediate, Instr, MemArg},
    ty::{FuncTy, GlobalTy, Limits, MemTy, Mut, NumTy, RefTy, TableTy, ValTy},
    Code, Custom, Data, Elem, Export, ExportDesc, FuncIndex, Global, GlobalIndex, Import,
    ImportDesc, Local, MemIndex, Module, TableIndex, TypeIndex,
};

use super::{IoRead, Read, ReadError, SliceRead};

mod leb128;

use leb128::{decode_s32, decode_s64, decode_u32};

/// Recommended extension for files containing Wasm modules in binary format.
pub const EXTENSION: &str = "wasm";

/// Recommended media type for Wasm modules in binary format.
pub const MEDIA_TYPE: &str = "application/wasm";

/// Magic number in preamble
pub const MAGIC: &[u8] = &[0x00, 0x61, 0x73, 0x6d];

/// Supported version
pub const VERSION: u32 = 1;

/// Classification of a decode failure.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// The preamble does not begin with `\0asm`.
    #[error("invalid magic bytes in preamble")]
    InvalidMagicByte,
    /// The preamble version is not supported. The value carries the version
    /// that was read.
    #[error("unsupported wasm version {0}")]
    InvalidWasmVersion(u32),
    /// A type section element did not begin with the functype discriminator.
    #[error("expected function type discriminator")]
    ExpectedFuncType,
    /// A constant expression was not terminated by `end`.
    #[error("constant expression is not terminated by end")]
    MissingEndForExpression,
    /// A function body was not terminated by `end`.
    #[error("function body is not terminated by end")]
    MissingEndForBody,
    /// A section's declared length disagrees with the bytes its payload
    /// actually occupies.
    #[error("section length disagrees with its payload")]
    MalformedSection,
    /// A closed enumeration saw an unknown discriminant.
    #[error("invalid encoding")]
    InvalidEncoding,
    /// A well-formed construct this crate does not decode.
    #[error("unsupported construct")]
    Unsupported,
    /// A LEB128 integer exceeded its target width.
    #[error("integer exceeds its encoding width")]
    Overflow,
    /// The input ended where bytes were required.
    #[error("unexpected end of input")]
    EndOfStream,
    /// The arena refused an allocation.
    #[error("arena allocation failed")]
    OutOfMemory,
    /// The underlying reader reported a failure.
    #[error("read failed")]
    Io(#[source] io::Error),
}

impl From<ReadError> for ErrorKind {
    fn from(value: ReadError) -> Self {
        match value {
            ReadError::Eof => Self::EndOfStream,
            ReadError::Limit => Self::MalformedSection,
            ReadError::Io(e) => Self::Io(e),
        }
    }
}

/// Error during decoding
#[derive(Debug)]
pub struct Error {
    /// Classification
    kind: ErrorKind,
    /// Byte offset read
    pos: u64,
    /// Section being decoded, if any
    section: Option<u8>,
}

impl Error {
    /// Classification of the failure.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Byte offset when the error occurred.
    #[inline]
    #[must_use]
    pub fn pos(&self) -> u64 {
        self.pos
    }

    /// ID of the section whose payload was being decoded when the error
    /// occurred.
    #[inline]
    #[must_use]
    pub fn section(&self) -> Option<u8> {
        self.section
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at byte offset {}", self.kind, self.pos)?;
        if let Some(id) = self.section {
            write!(f, " (section {id})")?;
        }

        Ok(())
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(&self.kind)
    }
}

/// Bounded view over a parent reader.
///
/// Refuses to read past the declared payload length, and [`finish()`]
/// verifies that the payload was consumed exactly.
///
/// [`finish()`]: SectionReader::finish
#[derive(Debug)]
struct SectionReader<'p, R> {
    inner: &'p mut R,
    bytes_left: u64,
}

impl<'p, R> SectionReader<'p, R>
where
    R: Read,
{
    fn new(inner: &'p mut R, len: u32) -> Self {
        Self {
            inner,
            bytes_left: u64::from(len),
        }
    }

    /// Bytes remaining in the declared payload.
    #[inline]
    #[must_use]
    fn bytes_left(&self) -> u64 {
        self.bytes_left
    }

    /// Asserts that the declared payload was consumed exactly.
    fn finish(self) -> Result<(), ErrorKind> {
        if self.bytes_left != 0 {
            return Err(ErrorKind::MalformedSection);
        }

        Ok(())
    }
}

impl<R> Read for SectionReader<'_, R>
where
    R: Read,
{
    #[inline]
    fn next(&mut self) -> Result<u8, ReadError> {
        if self.bytes_left == 0 {
            return Err(ReadError::Limit);
        }
        let b = self.inner.next()?;
        self.bytes_left -= 1;
        Ok(b)
    }

    #[inline]
    fn peek(&mut self) -> Result<u8, ReadError> {
        if self.bytes_left == 0 {
            return Err(ReadError::Limit);
        }
        self.inner.peek()
    }

    #[inline]
    fn pos(&self) -> u64 {
        self.inner.pos()
    }
}

#[inline]
fn expect_magic<R>(reader: &mut R) -> Result<(), ErrorKind>
where
    R: Read,
{
    for e in MAGIC {
        if *e != reader.next()? {
            return Err(ErrorKind::InvalidMagicByte);
        }
    }

    Ok(())
}

#[inline]
fn decode_version<R>(reader: &mut R) -> Result<u32, ErrorKind>
where
    R: Read,
{
    let bytes = [
        reader.next()?,
        reader.next()?,
        reader.next()?,
        reader.next()?,
    ];
    let version = u32::from_le_bytes(bytes);
    if version != VERSION {
        return Err(ErrorKind::InvalidWasmVersion(version));
    }

    Ok(version)
}

fn decode_vec<'a, R, T, F>(arena: &'a Bump, reader: &mut R, mut f: F) -> Result<&'a [T], ErrorKind>
where
    R: Read,
    F: FnMut(&mut R) -> Result<T, ErrorKind>,
{
    let n = decode_u32(reader)?;
    let mut xs = BumpVec::new_in(arena);
    xs.try_reserve(usize::try_from(n).unwrap())
        .map_err(|_| ErrorKind::OutOfMemory)?;
    for _ in 0..n {
        xs.push(f(reader)?);
    }

    Ok(xs.into_bump_slice())
}

fn read_exact_bytes<'a, R>(arena: &'a Bump, reader: &mut R, n: usize) -> Result<&'a [u8], ErrorKind>
where
    R: Read,
{
    let mut buf = BumpVec::new_in(arena);
    buf.try_reserve(n).map_err(|_| ErrorKind::OutOfMemory)?;
    for _ in 0..n {
        buf.push(reader.next()?);
    }

    Ok(buf.into_bump_slice())
}

#[inline]
fn decode_bytes_vec<'a, R>(arena: &'a Bump, reader: &mut R) -> Result<&'a [u8], ErrorKind>
where
    R: Read,
{
    let n = decode_u32(reader)?;
    read_exact_bytes(arena, reader, usize::try_from(n).unwrap())
}

#[inline]
fn decode_name<'a, R>(arena: &'a Bump, reader: &mut R) -> Result<&'a str, ErrorKind>
where
    R: Read,
{
    let bytes = decode_bytes_vec(arena, reader)?;
    str::from_utf8(bytes).map_err(|_| ErrorKind::InvalidEncoding)
}

/// Reads the raw bit pattern of an `f32` as 4 little-endian bytes.
#[inline]
fn decode_f32_bits<R>(reader: &mut R) -> Result<u32, ErrorKind>
where
    R: Read,
{
    let bytes = [
        reader.next()?,
        reader.next()?,
        reader.next()?,
        reader.next()?,
    ];

    Ok(u32::from_le_bytes(bytes))
}

/// Reads the raw bit pattern of an `f64` as 8 little-endian bytes.
#[inline]
fn decode_f64_bits<R>(reader: &mut R) -> Result<u64, ErrorKind>
where
    R: Read,
{
    let bytes = [
        reader.next()?,
        reader.next()?,
        reader.next()?,
        reader.next()?,
        reader.next()?,
        reader.next()?,
        reader.next()?,
        reader.next()?,
    ];

    Ok(u64::from_le_bytes(bytes))
}

impl RefTy {
    fn decode<R>(reader: &mut R) -> Result<Self, ErrorKind>
    where
        R: Read,
    {
        Ok(match reader.next()? {
            0x70 => Self::FuncRef,
            0x6f => Self::ExternRef,
            _ => return Err(ErrorKind::InvalidEncoding),
        })
    }
}

impl ValTy {
    #[inline]
    fn decode_u8(ty: u8) -> Result<Self, ErrorKind> {
        Ok(match ty {
            0x7f => Self::Num(NumTy::I32),
            0x7e => Self::Num(NumTy::I64),
            0x7d => Self::Num(NumTy::F32),
            0x7c => Self::Num(NumTy::F64),
            0x70 => Self::Ref(RefTy::FuncRef),
            0x6f => Self::Ref(RefTy::ExternRef),
            _ => return Err(ErrorKind::InvalidEncoding),
        })
    }

    fn decode<R>(reader: &mut R) -> Result<Self, ErrorKind>
    where
        R: Read,
    {
        Self::decode_u8(reader.next()?)
    }
}

impl<'a> FuncTy<'a> {
    fn decode<R>(arena: &'a Bump, reader: &mut R) -> Result<Self, ErrorKind>
    where
        R: Read,
    {
        if reader.next()? != 0x60 {
            return Err(ErrorKind::ExpectedFuncType);
        }

        let rt1 = decode_vec(arena, reader, ValTy::decode)?;
        let rt2 = decode_vec(arena, reader, ValTy::decode)?;

        Ok(Self::new(rt1, rt2))
    }
}

impl Limits {
    fn decode<R>(reader: &mut R) -> Result<Self, ErrorKind>
    where
        R: Read,
    {
        let max_present = match reader.next()? {
            0x00 => false,
            0x01 => true,
            _ => return Err(ErrorKind::InvalidEncoding),
        };

        let min = decode_u32(reader)?;
        let max = max_present.then(|| decode_u32(reader)).transpose()?;

        Ok(Self { min, max })
    }
}

impl MemTy {
    fn decode<R>(reader: &mut R) -> Result<Self, ErrorKind>
    where
        R: Read,
    {
        let lim = Limits::decode(reader)?;
        Ok(Self { lim })
    }
}

impl TableTy {
    fn decode<R>(reader: &mut R) -> Result<Self, ErrorKind>
    where
        R: Read,
    {
        let elem_ty = RefTy::decode(reader)?;
        let lim = Limits::decode(reader)?;

        Ok(Self { elem_ty, lim })
    }
}

impl Mut {
    fn decode<R>(reader: &mut R) -> Result<Self, ErrorKind>
    where
        R: Read,
    {
        match reader.next()? {
            0x00 => Ok(Self::Const),
            0x01 => Ok(Self::Var),
            _ => Err(ErrorKind::InvalidEncoding),
        }
    }
}

impl GlobalTy {
    fn decode<R>(reader: &mut R) -> Result<Self, ErrorKind>
    where
        R: Read,
    {
        let t = ValTy::decode(reader)?;
        let m = Mut::decode(reader)?;

        Ok(Self { m, t })
    }
}

impl BlockTy {
    fn decode<R>(reader: &mut R) -> Result<Self, ErrorKind>
    where
        R: Read,
    {
        if reader.peek()? == 0x40 {
            reader.next()?;
            return Ok(Self::Empty);
        }

        ValTy::decode(reader).map(Self::Val)
    }
}

impl MemArg {
    fn decode<R>(reader: &mut R) -> Result<Self, ErrorKind>
    where
        R: Read,
    {
        let x = decode_u32(reader)?;
        let y = decode_u32(reader)?;

        Ok(Self { x, y })
    }
}

impl ConstExpr {
    /// Decodes a constant expression: a single value-producing opcode
    /// followed by `end`. The terminator is consumed and discarded.
    fn decode<R>(reader: &mut R) -> Result<Self, ErrorKind>
    where
        R: Read,
    {
        let expr = match reader.next()? {
            0x41 => Self::I32(decode_s32(reader)?),
            0x42 => Self::I64(decode_s64(reader)?),
            0x43 => Self::F32(decode_f32_bits(reader)?),
            0x44 => Self::F64(decode_f64_bits(reader)?),
            0x23 => Self::GlobalGet(GlobalIndex::new(decode_u32(reader)?)),
            _ => return Err(ErrorKind::InvalidEncoding),
        };

        if reader.next()? != 0x0b {
            return Err(ErrorKind::MissingEndForExpression);
        }

        Ok(expr)
    }
}

macro_rules! decode_idx {
    ($t:ty) => {
        impl $t {
            fn decode<R>(reader: &mut R) -> Result<Self, ErrorKind>
            where
                R: Read,
            {
                Ok(Self::new(decode_u32(reader)?))
            }
        }
    };
}

decode_idx!(TypeIndex);
decode_idx!(FuncIndex);
decode_idx!(TableIndex);
decode_idx!(MemIndex);
decode_idx!(GlobalIndex);

impl ImportDesc {
    fn decode<R>(reader: &mut R) -> Result<Self, ErrorKind>
    where
        R: Read,
    {
        match reader.next()? {
            0x00 => Ok(Self::Func(TypeIndex::decode(reader)?)),
            0x01 => Ok(Self::Table(TableTy::decode(reader)?)),
            0x02 => Ok(Self::Mem(MemTy::decode(reader)?)),
            0x03 => Ok(Self::Global(GlobalTy::decode(reader)?)),
            _ => Err(ErrorKind::InvalidEncoding),
        }
    }
}

impl<'a> Import<'a> {
    fn decode<R>(arena: &'a Bump, reader: &mut R) -> Result<Self, ErrorKind>
    where
        R: Read,
    {
        let module = decode_name(arena, reader)?;
        let name = decode_name(arena, reader)?;
        let desc = ImportDesc::decode(reader)?;

        Ok(Self { module, name, desc })
    }
}

impl ExportDesc {
    fn decode<R>(reader: &mut R) -> Result<Self, ErrorKind>
    where
        R: Read,
    {
        match reader.next()? {
            0x00 => Ok(Self::Func(FuncIndex::decode(reader)?)),
            0x01 => Ok(Self::Table(TableIndex::decode(reader)?)),
            0x02 => Ok(Self::Mem(MemIndex::decode(reader)?)),
            0x03 => Ok(Self::Global(GlobalIndex::decode(reader)?)),
            _ => Err(ErrorKind::InvalidEncoding),
        }
    }
}

impl<'a> Export<'a> {
    fn decode<R>(arena: &'a Bump, reader: &mut R) -> Result<Self, ErrorKind>
    where
        R: Read,
    {
        let name = decode_name(arena, reader)?;
        let desc = ExportDesc::decode(reader)?;

        Ok(Self { name, desc })
    }
}

impl Global {
    fn decode<R>(reader: &mut R) -> Result<Self, ErrorKind>
    where
        R: Read,
    {
        let ty = GlobalTy::decode(reader)?;
        let init = ConstExpr::decode(reader)?;

        Ok(Self { ty, init })
    }
}

impl<'a> Elem<'a> {
    fn decode<R>(arena: &'a Bump, reader: &mut R) -> Result<Self, ErrorKind>
    where
        R: Read,
    {
        // Only the original encoding is decoded. The reference-types
        // proposal adds segment kinds 1 through 7.
        match decode_u32(reader)? {
            0 => {
                let offset = ConstExpr::decode(reader)?;
                let funcs = decode_vec(arena, reader, FuncIndex::decode)?;

                Ok(Self {
                    table: TableIndex::new(0),
                    offset,
                    funcs,
                })
            }
            1..=7 => Err(ErrorKind::Unsupported),
            _ => Err(ErrorKind::InvalidEncoding),
        }
    }
}

impl Local {
    fn decode<R>(reader: &mut R) -> Result<Self, ErrorKind>
    where
        R: Read,
    {
        let n = decode_u32(reader)?;
        let ty = ValTy::decode(reader)?;

        Ok(Self { n, ty })
    }
}

impl<'a> Instr<'a> {
    /// Decodes the immediates of one instruction whose opcode byte has
    /// already been read.
    fn decode<R>(arena: &'a Bump, op_code: u8, reader: &mut R) -> Result<Self, ErrorKind>
    where
        R: Read,
    {
        let mut secondary = None;
        let imm = match op_code {
            // block, loop, if
            0x02..=0x04 => Immediate::BlockTy(BlockTy::decode(reader)?),
            // br, br_if, call, local.get/set/tee, global.get/set,
            // table.get/set, memory.size, memory.grow, ref.func
            0x0c | 0x0d | 0x10 | 0x20..=0x26 | 0x3f | 0x40 | 0xd2 => {
                Immediate::U32(decode_u32(reader)?)
            }
            // call_indirect and the load/store families
            0x11 | 0x28..=0x3e => Immediate::MemArg(MemArg::decode(reader)?),
            // br_table; the default label is appended after the targets
            0x0e => {
                let n = decode_u32(reader)?;
                let mut labels = BumpVec::new_in(arena);
                labels
                    .try_reserve(usize::try_from(n).unwrap() + 1)
                    .map_err(|_| ErrorKind::OutOfMemory)?;
                for _ in 0..n {
                    labels.push(decode_u32(reader)?);
                }
                labels.push(decode_u32(reader)?);
                Immediate::BrTable(labels.into_bump_slice())
            }
            // ref.null
            0xd0 => Immediate::RefTy(RefTy::decode(reader)?),
            // typed select; an empty type list is valid
            0x1c => Immediate::SelectTys(decode_vec(arena, reader, ValTy::decode)?),
            // saturating truncation, bulk memory, and table operations
            0xfc => {
                let s = decode_u32(reader)?;
                secondary = Some(s);
                match s {
                    0..=7 => Immediate::None,
                    8..=14 => Immediate::MemArg(MemArg::decode(reader)?),
                    15..=17 => Immediate::U32(decode_u32(reader)?),
                    _ => return Err(ErrorKind::Unsupported),
                }
            }
            0x41 => Immediate::I32(decode_s32(reader)?),
            0x42 => Immediate::I64(decode_s64(reader)?),
            0x43 => Immediate::F32(decode_f32_bits(reader)?),
            0x44 => Immediate::F64(decode_f64_bits(reader)?),
            _ => Immediate::None,
        };

        Ok(Self {
            op_code,
            secondary,
            imm,
        })
    }
}

impl<'a> Code<'a> {
    fn decode<R>(arena: &'a Bump, reader: &mut R) -> Result<Self, ErrorKind>
    where
        R: Read,
    {
        let size = decode_u32(reader)?;
        let mut body_reader = SectionReader::new(reader, size);

        let locals = decode_vec(arena, &mut body_reader, Local::decode)?;

        let mut instrs = BumpVec::new_in(arena);
        while body_reader.bytes_left() > 0 {
            let op_code = body_reader.next()?;
            instrs.push(Instr::decode(arena, op_code, &mut body_reader)?);
        }

        match instrs.last() {
            Some(instr) if instr.op_code == 0x0b => {}
            _ => return Err(ErrorKind::MissingEndForBody),
        }

        body_reader.finish()?;

        Ok(Self {
            locals,
            body: instrs.into_bump_slice(),
        })
    }
}

impl<'a> Data<'a> {
    fn decode<R>(arena: &'a Bump, reader: &mut R) -> Result<Self, ErrorKind>
    where
        R: Read,
    {
        let mem = MemIndex::decode(reader)?;
        let offset = ConstExpr::decode(reader)?;
        let init = decode_bytes_vec(arena, reader)?;

        Ok(Self { mem, offset, init })
    }
}

impl<'a> Custom<'a> {
    fn decode<R>(arena: &'a Bump, reader: &mut SectionReader<'_, R>) -> Result<Self, ErrorKind>
    where
        R: Read,
    {
        let name = decode_name(arena, reader)?;
        let n = usize::try_from(reader.bytes_left()).unwrap();
        let data = read_exact_bytes(arena, reader, n)?;

        Ok(Self { name, data })
    }
}

/// Section IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionId {
    /// Custom
    Custom,
    /// Type
    Type,
    /// Import
    Import,
    /// Function
    Function,
    /// Table
    Table,
    /// Memory
    Memory,
    /// Global
    Global,
    /// Export
    Export,
    /// Start
    Start,
    /// Element
    Element,
    /// Code
    Code,
    /// Data
    Data,
    /// Unknown or reserved section
    Unknown(u8),
}

impl From<u8> for SectionId {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Custom,
            1 => Self::Type,
            2 => Self::Import,
            3 => Self::Function,
            4 => Self::Table,
            5 => Self::Memory,
            6 => Self::Global,
            7 => Self::Export,
            8 => Self::Start,
            9 => Self::Element,
            10 => Self::Code,
            11 => Self::Data,
            _ => Self::Unknown(value),
        }
    }
}

impl<'a> Module<'a> {
    fn decode<R>(arena: &'a Bump, reader: &mut R) -> Result<Self, Error>
    where
        R: Read,
    {
        let mut cur_section = None;
        let result = Self::decode_inner(arena, reader, &mut cur_section);
        result.map_err(|kind| Error {
            kind,
            pos: reader.pos(),
            section: cur_section,
        })
    }

    #[allow(clippy::too_many_lines)]
    fn decode_inner<R>(
        arena: &'a Bump,
        reader: &mut R,
        cur_section: &mut Option<u8>,
    ) -> Result<Self, ErrorKind>
    where
        R: Read,
    {
        expect_magic(reader)?;
        let version = decode_version(reader)?;

        let mut types: &'a [FuncTy<'a>] = &[];
        let mut imports: &'a [Import<'a>] = &[];
        let mut funcs: &'a [TypeIndex] = &[];
        let mut tables: &'a [TableTy] = &[];
        let mut mems: &'a [MemTy] = &[];
        let mut globals: &'a [Global] = &[];
        let mut exports: &'a [Export<'a>] = &[];
        let mut start = None;
        let mut elems: &'a [Elem<'a>] = &[];
        let mut code: &'a [Code<'a>] = &[];
        let mut datas: &'a [Data<'a>] = &[];
        let mut customs = BumpVec::new_in(arena);

        loop {
            // End of input between sections is the success terminator.
            let id_byte = match reader.next() {
                Ok(b) => b,
                Err(ReadError::Eof) => break,
                Err(e) => return Err(e.into()),
            };
            let size = decode_u32(reader)?;
            *cur_section = Some(id_byte);

            let sec_id = SectionId::from(id_byte);
            debug!("decoding section {sec_id:?} ({size} bytes)");

            let mut sec = SectionReader::new(reader, size);
            match sec_id {
                SectionId::Custom => {
                    customs.push(Custom::decode(arena, &mut sec)?);
                }
                SectionId::Type => {
                    types = decode_vec(arena, &mut sec, |r| FuncTy::decode(arena, r))?;
                }
                SectionId::Import => {
                    imports = decode_vec(arena, &mut sec, |r| Import::decode(arena, r))?;
                }
                SectionId::Function => {
                    funcs = decode_vec(arena, &mut sec, TypeIndex::decode)?;
                }
                SectionId::Table => {
                    tables = decode_vec(arena, &mut sec, TableTy::decode)?;
                }
                SectionId::Memory => {
                    mems = decode_vec(arena, &mut sec, MemTy::decode)?;
                }
                SectionId::Global => {
                    globals = decode_vec(arena, &mut sec, Global::decode)?;
                }
                SectionId::Export => {
                    exports = decode_vec(arena, &mut sec, |r| Export::decode(arena, r))?;
                }
                SectionId::Start => {
                    start = Some(FuncIndex::decode(&mut sec)?);
                }
                SectionId::Element => {
                    elems = decode_vec(arena, &mut sec, |r| Elem::decode(arena, r))?;
                }
                SectionId::Code => {
                    code = decode_vec(arena, &mut sec, |r| Code::decode(arena, r))?;
                }
                SectionId::Data => {
                    datas = decode_vec(arena, &mut sec, |r| Data::decode(arena, r))?;
                }
                SectionId::Unknown(id) => {
                    debug!("skipping unknown section {id} ({size} bytes)");
                    let left = sec.bytes_left();
                    sec.skip(left)?;
                }
            }
            sec.finish()?;
            *cur_section = None;
        }

        Ok(Self {
            version,
            types,
            imports,
            funcs,
            tables,
            mems,
            globals,
            exports,
            start,
            elems,
            code,
            datas,
            customs: customs.into_bump_slice(),
        })
    }
}

/// Decodes a Wasm module in binary format.
///
/// # Errors
///
/// Returns an error if the data is invalid or if a problem occurs when
/// reading.
fn decode<'a, R>(arena: &'a Bump, mut reader: R) -> Result<Module<'a>, Error>
where
    R: Read,
{
    Module::decode(arena, &mut reader)
}

/// Decodes a Wasm module in binary format from a byte slice.
///
/// Every byte string in the returned [`Module`] is copied into the arena; the
/// module does not borrow the input slice.
///
/// # Errors
///
/// Returns an error if the data is invalid.
pub fn from_slice<'a>(arena: &'a Bump, s: &[u8]) -> Result<Module<'a>, Error> {
    decode(arena, SliceRead::new(s))
}

/// Decodes a Wasm module in binary format from an I/O reader.
///
/// The reader is consumed sequentially; no seeks are performed.
///
/// # Errors
///
/// Returns an error if the data is invalid or if a problem occurs when
/// reading.
pub fn from_reader<'a, R>(arena: &'a Bump, r: R) -> Result<Module<'a>, Error>
where
    R: io::Read,
{
    decode(arena, IoRead::new(r))
}
