//! WebAssembly binary format.

use std::io;

pub mod binary;

/// Failure reported by a byte source.
///
/// The primary purpose is to distinguish an end of input condition from an
/// underlying I/O failure. Bounded readers additionally report reads that
/// would cross their declared limit.
#[derive(Debug)]
pub(crate) enum ReadError {
    /// The input ended before the requested byte.
    Eof,
    /// A bounded reader refused to read past its declared length.
    Limit,
    /// The underlying reader reported a failure.
    Io(io::Error),
}

/// Trait used to read bytes.
pub(crate) trait Read {
    /// Consumes and returns the next byte.
    ///
    /// # Errors
    ///
    /// Returns a [`ReadError`] if the input is exhausted or the underlying
    /// reader fails.
    fn next(&mut self) -> Result<u8, ReadError>;

    /// Returns the next byte but does not consume it.
    ///
    /// Repeated peeks (with no [`next()`][Read::next] call) return the same
    /// byte.
    ///
    /// # Errors
    ///
    /// Returns a [`ReadError`] if the input is exhausted or the underlying
    /// reader fails.
    fn peek(&mut self) -> Result<u8, ReadError>;

    /// Returns the position in the stream of bytes.
    fn pos(&self) -> u64;

    /// Consumes `count` bytes without inspecting them.
    ///
    /// # Errors
    ///
    /// Returns a [`ReadError`] if the input ends before `count` bytes are
    /// consumed.
    fn skip(&mut self, mut count: u64) -> Result<(), ReadError> {
        while count > 0 {
            self.next()?;
            count -= 1;
        }

        Ok(())
    }
}

/// A wrapper to implement this crate's [`Read`] trait for [`std::io::Read`]
/// trait implementations.
#[derive(Debug)]
pub(crate) struct IoRead<R>
where
    R: io::Read,
{
    iter: io::Bytes<R>,
    peeked_byte: Option<u8>,
    byte_offset: u64,
}

impl<R> IoRead<R>
where
    R: io::Read,
{
    /// Instantiates a new reader.
    pub(crate) fn new(reader: R) -> Self {
        IoRead {
            iter: reader.bytes(),
            peeked_byte: None,
            byte_offset: 0,
        }
    }
}

impl<R> Read for IoRead<R>
where
    R: io::Read,
{
    #[inline]
    fn next(&mut self) -> Result<u8, ReadError> {
        match self.peeked_byte.take() {
            Some(b) => {
                self.byte_offset += 1;
                Ok(b)
            }
            None => match self.iter.next() {
                Some(Ok(b)) => {
                    self.byte_offset += 1;
                    Ok(b)
                }
                Some(Err(err)) if err.kind() == io::ErrorKind::UnexpectedEof => Err(ReadError::Eof),
                Some(Err(err)) => Err(ReadError::Io(err)),
                None => Err(ReadError::Eof),
            },
        }
    }

    #[inline]
    fn peek(&mut self) -> Result<u8, ReadError> {
        match self.peeked_byte {
            Some(b) => Ok(b),
            None => match self.iter.next() {
                Some(Ok(b)) => {
                    self.peeked_byte = Some(b);
                    Ok(b)
                }
                Some(Err(err)) if err.kind() == io::ErrorKind::UnexpectedEof => Err(ReadError::Eof),
                Some(Err(err)) => Err(ReadError::Io(err)),
                None => Err(ReadError::Eof),
            },
        }
    }

    #[inline]
    fn pos(&self) -> u64 {
        self.byte_offset
    }
}

/// A wrapper to implement this crate's [`Read`] trait for byte slices.
#[derive(Debug)]
pub(crate) struct SliceRead<'a> {
    slice: &'a [u8],
    byte_offset: usize,
}

impl<'a> SliceRead<'a> {
    /// Instantiates a new reader.
    #[must_use]
    pub(crate) fn new(slice: &'a [u8]) -> Self {
        SliceRead {
            slice,
            byte_offset: 0,
        }
    }
}

impl Read for SliceRead<'_> {
    #[inline]
    fn next(&mut self) -> Result<u8, ReadError> {
        if self.byte_offset < self.slice.len() {
            let b = self.slice[self.byte_offset];
            self.byte_offset += 1;
            Ok(b)
        } else {
            Err(ReadError::Eof)
        }
    }

    #[inline]
    fn peek(&mut self) -> Result<u8, ReadError> {
        if self.byte_offset < self.slice.len() {
            Ok(self.slice[self.byte_offset])
        } else {
            Err(ReadError::Eof)
        }
    }

    #[inline]
    fn pos(&self) -> u64 {
        u64::try_from(self.byte_offset).unwrap()
    }
}
