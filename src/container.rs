//! Whole files: a signature followed by chunks.

use std::io::{Read, Write};

use alloc::vec::Vec;

use crate::{Chunk, ChunkReader, XngError};

/// Which format a file's 8-byte signature marks it as.
///
/// The three signatures differ only in the first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Signature {
  /// Portable Network Graphics, a single image.
  Png,
  /// Multiple-image Network Graphics.
  Mng,
  /// JPEG Network Graphics.
  Jng,
}
impl Signature {
  pub const PNG_BYTES: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];
  pub const MNG_BYTES: [u8; 8] = [0x8A, b'M', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];
  pub const JNG_BYTES: [u8; 8] = [0x8B, b'J', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];

  #[inline]
  #[must_use]
  pub const fn to_bytes(self) -> [u8; 8] {
    match self {
      Self::Png => Self::PNG_BYTES,
      Self::Mng => Self::MNG_BYTES,
      Self::Jng => Self::JNG_BYTES,
    }
  }

  /// ## Failure
  /// * The bytes aren't one of the three signatures.
  #[inline]
  pub const fn from_bytes(bytes: [u8; 8]) -> Result<Self, XngError> {
    match bytes {
      Self::PNG_BYTES => Ok(Self::Png),
      Self::MNG_BYTES => Ok(Self::Mng),
      Self::JNG_BYTES => Ok(Self::Jng),
      _ => Err(XngError::UnrecognizedSignature),
    }
  }
}

/// A PNG, MNG, or JNG file, as its signature and list of chunks.
///
/// This layer doesn't check how the chunks relate to each other (that's left
/// to whatever interprets them, such as [`decode_image`](crate::decode_image)).
/// Reading stops at the end of the stream, not at any particular chunk.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct XngFile {
  pub signature: Signature,
  pub chunks: Vec<Chunk>,
}
impl XngFile {
  /// Reads a signature and then chunks until the stream is empty.
  ///
  /// ## Failure
  /// * The signature is unrecognized or cut short.
  /// * Any chunk fails to read. There's no partial result.
  pub fn read<R: Read>(mut source: R) -> Result<Self, XngError> {
    let mut signature_bytes = [0_u8; 8];
    source.read_exact(&mut signature_bytes)?;
    let signature = Signature::from_bytes(signature_bytes)?;
    let mut chunks = Vec::new();
    while let Some(reader) = ChunkReader::try_open(&mut source)? {
      let (chunk, _) = Chunk::read(reader)?;
      chunks.try_reserve(1)?;
      chunks.push(chunk);
    }
    log::debug!("read {signature:?} file with {} chunks", chunks.len());
    Ok(Self { signature, chunks })
  }

  /// Writes the signature and then each chunk in order.
  pub fn write<W: Write>(&self, mut out: W) -> Result<W, XngError> {
    out.write_all(&self.signature.to_bytes())?;
    for chunk in self.chunks.iter() {
      chunk.write_to(&mut out)?;
    }
    Ok(out)
  }

  /// Reads a file from bytes in memory.
  #[inline]
  pub fn from_bytes(bytes: &[u8]) -> Result<Self, XngError> {
    Self::read(bytes)
  }

  /// Writes the file to a new byte vec.
  #[inline]
  pub fn to_bytes(&self) -> Result<Vec<u8>, XngError> {
    self.write(Vec::new())
  }
}
