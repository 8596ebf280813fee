use core::fmt::{Debug, Display, Write};

use crate::XngError;

/// The four letter type code of a chunk.
///
/// Bit 5 (`0x20`, the ASCII case bit) of each letter is a property flag:
///
/// * 0: Critical (uppercase) or ancillary (lowercase).
/// * 1: Public (uppercase) or private (lowercase).
/// * 2: Reserved, must always be uppercase.
/// * 3: Unsafe to copy (uppercase) or safe to copy (lowercase).
///
/// A critical chunk must also be unsafe to copy. A `ChunkType` can only be
/// constructed from bytes that follow all of these rules.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ChunkType([u8; 4]);
#[allow(nonstandard_style)]
impl ChunkType {
  /// Image Header
  pub const IHDR: Self = Self(*b"IHDR");
  /// Palette
  pub const PLTE: Self = Self(*b"PLTE");
  /// Image Data
  pub const IDAT: Self = Self(*b"IDAT");
  /// Image End
  pub const IEND: Self = Self(*b"IEND");
  /// Transparency
  pub const tRNS: Self = Self(*b"tRNS");

  /// Checks the bytes and makes a chunk type.
  ///
  /// ## Failure
  /// * Any byte isn't an ASCII letter.
  /// * The third letter is lowercase.
  /// * The first letter is uppercase but the last letter is lowercase.
  #[inline]
  pub const fn new(bytes: [u8; 4]) -> Result<Self, XngError> {
    let [b0, b1, b2, b3] = bytes;
    if !(b0.is_ascii_alphabetic()
      && b1.is_ascii_alphabetic()
      && b2.is_ascii_alphabetic()
      && b3.is_ascii_alphabetic())
    {
      return Err(XngError::InvalidChunkType(bytes));
    }
    if b2.is_ascii_lowercase() {
      return Err(XngError::InvalidChunkType(bytes));
    }
    if b0.is_ascii_uppercase() && b3.is_ascii_lowercase() {
      return Err(XngError::InvalidChunkType(bytes));
    }
    Ok(Self(bytes))
  }

  /// The raw bytes of the type code.
  #[inline]
  #[must_use]
  pub const fn to_bytes(self) -> [u8; 4] {
    self.0
  }

  /// If a decoder must understand this chunk to display the image.
  #[inline]
  #[must_use]
  pub const fn is_critical(self) -> bool {
    (self.0[0] & 0x20) == 0
  }

  /// If this is a chunk type from the public, registered list.
  #[inline]
  #[must_use]
  pub const fn is_public(self) -> bool {
    (self.0[1] & 0x20) == 0
  }

  /// If an editor that doesn't understand this chunk can still copy it into a
  /// modified file.
  #[inline]
  #[must_use]
  pub const fn is_safe_to_copy(self) -> bool {
    (self.0[3] & 0x20) != 0
  }
}
impl TryFrom<[u8; 4]> for ChunkType {
  type Error = XngError;
  #[inline]
  fn try_from(bytes: [u8; 4]) -> Result<Self, Self::Error> {
    Self::new(bytes)
  }
}
impl TryFrom<&[u8]> for ChunkType {
  type Error = XngError;
  #[inline]
  fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
    match *bytes {
      [b0, b1, b2, b3] => Self::new([b0, b1, b2, b3]),
      _ => {
        // pad or cut the bytes so that the error still shows something
        let mut shown = [0_u8; 4];
        shown.iter_mut().zip(bytes.iter()).for_each(|(s, b)| *s = *b);
        Err(XngError::InvalidChunkType(shown))
      }
    }
  }
}
impl TryFrom<&str> for ChunkType {
  type Error = XngError;
  #[inline]
  fn try_from(s: &str) -> Result<Self, Self::Error> {
    Self::try_from(s.as_bytes())
  }
}
impl Debug for ChunkType {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_char('\"')?;
    Display::fmt(self, f)?;
    f.write_char('\"')
  }
}
impl Display for ChunkType {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    // all four bytes are known to be ascii letters
    for ch in self.0.iter().copied().map(|u| u as char) {
      f.write_char(ch)?;
    }
    Ok(())
  }
}

#[test]
fn test_chunk_type_validity() {
  for good in ["ikLj", "moNP", "yZZy", "oOOO", "FiVE", "ZYXW", "IHDR", "tRNS"] {
    assert!(ChunkType::try_from(good).is_ok(), "rejected {good}");
  }
  for bad in ["", "abcd", "sQrt", "FoUr", "0123", "IHD", "IHDRR", "IH R", "IH\u{e9}"] {
    assert!(ChunkType::try_from(bad).is_err(), "accepted {bad:?}");
  }
}

#[test]
fn test_chunk_type_properties() {
  assert!(ChunkType::IHDR.is_critical());
  assert!(ChunkType::IHDR.is_public());
  assert!(!ChunkType::IHDR.is_safe_to_copy());
  //
  assert!(!ChunkType::tRNS.is_critical());
  assert!(ChunkType::tRNS.is_public());
  assert!(!ChunkType::tRNS.is_safe_to_copy());
  //
  let private = ChunkType::try_from("ikLj").unwrap();
  assert!(!private.is_critical());
  assert!(!private.is_public());
  assert!(private.is_safe_to_copy());
}

#[cfg(feature = "alloc")]
#[test]
fn test_chunk_type_formatting() {
  use alloc::format;
  assert_eq!(format!("{}", ChunkType::PLTE), "PLTE");
  assert_eq!(format!("{:?}", ChunkType::IDAT), "\"IDAT\"");
}
