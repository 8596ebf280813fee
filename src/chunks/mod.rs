//! Reading and writing individual chunks.
//!
//! A chunk on the wire is:
//!
//! ```text
//! [length: u32 BE][type: 4 letters][payload: `length` bytes][CRC-32: u32 BE]
//! ```
//!
//! The CRC covers the type and payload but not the length. The
//! [`ChunkReader`] and [`ChunkWriter`] types handle the framing, and only let
//! the payload be moved through a [`BoundedReader`] or [`BoundedWriter`] sized
//! to the declared length. A [`ChunkRecord`] only has to deal with its own
//! fields.

use core::fmt::Debug;
use std::io::{Read, Write};

use alloc::{string::String, vec::Vec};

use crate::{BoundedReader, BoundedWriter, ChunkType, Crc32, XngError, IHDR, RGB8};

mod reader;
pub use reader::*;

mod writer;
pub use writer::*;

mod ihdr;

mod plte;
pub use plte::*;

mod trns;
pub use trns::*;

mod idat;
pub use idat::*;

mod iend;
pub use iend::*;

mod custom;
pub use custom::*;

mod chunk;
pub use chunk::*;

/// A chunk type with a fixed payload layout.
///
/// The dispatcher ([`Chunk::read`]) opens the chunk and calls `read_from`,
/// then finishes the reader itself. A record that reads too few or too many
/// bytes gets a budget error, it can't silently desync the stream.
pub trait ChunkRecord: Sized {
  /// The chunk type this record is stored as.
  const TYPE: ChunkType;

  /// Parses the record from an opened chunk's payload.
  fn read_from<R: Read>(reader: &mut ChunkReader<R>) -> Result<Self, XngError>;

  /// The exact number of payload bytes that `write_fields` will write.
  fn data_len(&self) -> usize;

  /// Writes the payload.
  fn write_fields<W: Write>(&self, writer: &mut ChunkWriter<W>) -> Result<(), XngError>;

  /// Writes the whole chunk (length, type, payload, and CRC).
  fn write_chunk<W: Write>(&self, out: W) -> Result<W, XngError> {
    let mut writer = ChunkWriter::begin(out, Self::TYPE, self.data_len())?;
    self.write_fields(&mut writer)?;
    writer.finish()
  }
}

/// How the characters of a string field are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TextEncoding {
  /// ISO 8859-1, one byte per character.
  Latin1,
  /// UTF-8
  Utf8,
  /// 7-bit ASCII only.
  Ascii,
}
impl TextEncoding {
  /// The number of bytes `s` takes in this encoding.
  ///
  /// ## Failure
  /// * `s` has a character that this encoding can't store.
  pub fn encoded_len(self, s: &str) -> Result<usize, XngError> {
    match self {
      Self::Utf8 => Ok(s.len()),
      Self::Latin1 => {
        if s.chars().all(|c| u32::from(c) <= 0xFF) {
          Ok(s.chars().count())
        } else {
          Err(XngError::InvalidText)
        }
      }
      Self::Ascii => {
        if s.is_ascii() {
          Ok(s.len())
        } else {
          Err(XngError::InvalidText)
        }
      }
    }
  }

  fn decode(self, bytes: Vec<u8>) -> Result<String, XngError> {
    match self {
      Self::Utf8 => String::from_utf8(bytes).map_err(|e| e.utf8_error().into()),
      Self::Latin1 => Ok(bytes.into_iter().map(char::from).collect()),
      Self::Ascii => {
        if bytes.is_ascii() {
          // ascii is always utf-8
          String::from_utf8(bytes).map_err(|e| e.utf8_error().into())
        } else {
          Err(XngError::InvalidText)
        }
      }
    }
  }
}

/// Where a string field stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StringEnd {
  /// A 0 byte follows the string (and isn't part of it).
  Nul,
  /// The string runs to the end of the payload.
  ToEnd,
}
impl StringEnd {
  #[inline]
  const fn terminator_len(self) -> usize {
    match self {
      Self::Nul => 1,
      Self::ToEnd => 0,
    }
  }
}

/// The full size of a string field, including any terminator.
///
/// Useful for [`ChunkRecord::data_len`].
#[inline]
pub fn string_field_len(s: &str, encoding: TextEncoding, end: StringEnd) -> Result<usize, XngError> {
  Ok(encoding.encoded_len(s)? + end.terminator_len())
}

/// Frames a payload with a correct length and CRC.
#[cfg(test)]
pub(crate) fn frame(chunk_type: ChunkType, payload: &[u8]) -> Vec<u8> {
  let mut v = Vec::new();
  v.extend_from_slice(&(payload.len() as u32).to_be_bytes());
  v.extend_from_slice(&chunk_type.to_bytes());
  v.extend_from_slice(payload);
  v.extend_from_slice(&crate::png_crc(chunk_type.to_bytes(), payload).to_be_bytes());
  v
}
