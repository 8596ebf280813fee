use core::{
  fmt,
  num::{ParseIntError, TryFromIntError},
  str::Utf8Error,
};

use crate::ChunkType;

/// The broad kind of failure an [`XngError`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorClass {
  /// Bad signature, truncated framing fields, or an illegal chunk type.
  MalformedContainer,
  /// A chunk's CRC-32 didn't match its type and payload.
  ChecksumMismatch,
  /// Something tried to move more (or fewer) bytes than a chunk declared.
  ///
  /// This is a broken invariant in the code doing the transfer, not bad input.
  BudgetViolation,
  /// A value was outside of its legal range (pixel samples, palette indexes,
  /// coordinates, and so on).
  RangeViolation,
  /// A recognized but unhandled method value.
  UnsupportedFeature,
  /// The framing was fine, but the data inside was structurally wrong.
  MalformedData,
  /// The underlying stream failed.
  Io,
}

/// An error from the `xng` crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XngError {
  /// The first 8 bytes didn't match any of the PNG, MNG, or JNG signatures.
  UnrecognizedSignature,

  /// The stream ended part way through some framing data.
  Truncated,

  /// The bytes given are not a legal chunk type.
  InvalidChunkType([u8; 4]),

  /// A chunk length can't exceed `i32::MAX`.
  InvalidChunkLength(usize),

  /// The CRC stored after a chunk didn't match the CRC of what was read.
  ChecksumMismatch { chunk_type: ChunkType, declared: u32, actual: u32 },

  /// A transfer asked for more bytes than the chunk had left.
  BudgetExceeded { requested: usize, remaining: usize },

  /// A chunk was finished with some of its declared bytes still unused.
  BudgetNotExhausted { remaining: usize },

  /// A position outside of the image.
  OutOfBounds { x: u32, y: u32 },

  /// The number of samples given doesn't match the image's channel count.
  WrongSampleCount { expected: usize, given: usize },

  /// A sample value that doesn't fit in its channel's bit depth.
  SampleOutOfRange { channel: usize, value: u16, bit_depth: u8 },

  /// A palette index that's not less than the palette's length.
  PaletteIndexOutOfRange { index: u8, palette_len: usize },

  /// Palettes must have 1 to 256 entries, and no more than the bit depth can
  /// address.
  InvalidPaletteLength(usize),

  /// A bit depth that isn't allowed with the color type.
  InvalidBitDepth(u8),

  /// The declared width and/or height is 0 or too large.
  InvalidDimensions { width: u32, height: u32 },

  /// The image is bigger than the decoder will allocate for.
  ///
  /// The decoder limits the width and height of images to
  /// [`MAX_DECODE_DIMENSION`](crate::MAX_DECODE_DIMENSION) to prevent
  /// accidental out-of-memory problems from a small file.
  DimensionsTooLarge { width: u32, height: u32 },

  /// A pixel must have 1 to 4 channels.
  InvalidChannelCount(usize),

  /// A packed scanline buffer isn't the length its samples need.
  WrongScanlineLength { expected: usize, given: usize },

  /// The color type byte isn't one of 0, 2, 3, 4, or 6.
  InvalidColorType(u8),

  /// Only compression method 0 (zlib) is defined.
  UnsupportedCompressionMethod(u8),

  /// Only filter method 0 (adaptive) is defined.
  UnsupportedFilterMethod(u8),

  /// Only interlace methods 0 (none) and 1 (Adam7) are defined.
  UnsupportedInterlaceMethod(u8),

  /// A critical chunk that this crate doesn't know how to handle.
  UnsupportedCriticalChunk(ChunkType),

  /// A scanline started with a filter type byte other than 0 through 4.
  UnknownFilterType { pass: usize, row: u32, filter: u8 },

  /// A chunk's payload didn't follow the rules for that type of chunk.
  InvalidChunkData(ChunkType),

  /// A string field had no NUL terminator before the end of the chunk.
  MissingNulTerminator,

  /// Text wasn't valid in the requested encoding.
  InvalidText,

  /// A required chunk was missing.
  MissingChunk(ChunkType),

  /// A chunk appeared where the PNG chunk ordering rules don't allow it.
  MisplacedChunk(ChunkType),

  /// Only PNG signature files can be decoded into an image.
  NotPngSignature,

  /// The zlib data stream couldn't be decompressed.
  Decompression,

  /// The decompressed data ended within the given reduced image and row.
  ImageDataTooShort { pass: usize, row: u32 },

  /// There was more decompressed data than the header accounts for.
  ImageDataTooLong,

  /// Compressed bytes follow the end of the zlib stream.
  TrailingCompressedData,

  /// A checked math operation failed.
  CheckedMath,

  /// The allocator couldn't give us enough space.
  #[cfg(feature = "alloc")]
  Alloc,

  /// The underlying stream failed with this kind of error.
  #[cfg(feature = "std")]
  Io(std::io::ErrorKind),
}

impl XngError {
  /// Which broad category of failure this is.
  #[must_use]
  pub const fn class(&self) -> ErrorClass {
    use XngError::*;
    match self {
      UnrecognizedSignature | Truncated | InvalidChunkType(_) | InvalidChunkLength(_) => {
        ErrorClass::MalformedContainer
      }
      ChecksumMismatch { .. } => ErrorClass::ChecksumMismatch,
      BudgetExceeded { .. } | BudgetNotExhausted { .. } => ErrorClass::BudgetViolation,
      OutOfBounds { .. }
      | WrongSampleCount { .. }
      | SampleOutOfRange { .. }
      | PaletteIndexOutOfRange { .. }
      | InvalidPaletteLength(_)
      | InvalidBitDepth(_)
      | InvalidDimensions { .. }
      | InvalidChannelCount(_)
      | CheckedMath => ErrorClass::RangeViolation,
      UnsupportedCompressionMethod(_)
      | UnsupportedFilterMethod(_)
      | UnsupportedInterlaceMethod(_)
      | UnsupportedCriticalChunk(_)
      | DimensionsTooLarge { .. }
      | UnknownFilterType { .. } => ErrorClass::UnsupportedFeature,
      InvalidColorType(_)
      | InvalidChunkData(_)
      | MissingNulTerminator
      | InvalidText
      | MissingChunk(_)
      | MisplacedChunk(_)
      | NotPngSignature
      | Decompression
      | ImageDataTooShort { .. }
      | WrongScanlineLength { .. }
      | ImageDataTooLong
      | TrailingCompressedData => ErrorClass::MalformedData,
      #[cfg(feature = "alloc")]
      Alloc => ErrorClass::MalformedData,
      #[cfg(feature = "std")]
      Io(_) => ErrorClass::Io,
    }
  }
}

impl fmt::Display for XngError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    use XngError::*;
    match self {
      UnrecognizedSignature => write!(f, "not a PNG, MNG, or JNG signature"),
      Truncated => write!(f, "the stream ended in the middle of a chunk"),
      InvalidChunkType(ty) => write!(f, "invalid chunk type \"{}\"", ty.escape_ascii()),
      InvalidChunkLength(len) => write!(f, "chunk length {len} is too large"),
      ChecksumMismatch { chunk_type, declared, actual } => write!(
        f,
        "{chunk_type} chunk CRC mismatch: declared {declared:#010X}, actual {actual:#010X}"
      ),
      BudgetExceeded { requested, remaining } => {
        write!(f, "transfer of {requested} bytes with only {remaining} bytes remaining")
      }
      BudgetNotExhausted { remaining } => {
        write!(f, "chunk finished with {remaining} declared bytes unused")
      }
      OutOfBounds { x, y } => write!(f, "position ({x}, {y}) is outside the image"),
      WrongSampleCount { expected, given } => {
        write!(f, "expected {expected} samples per pixel, got {given}")
      }
      SampleOutOfRange { channel, value, bit_depth } => {
        write!(f, "sample {value} in channel {channel} exceeds bit depth {bit_depth}")
      }
      PaletteIndexOutOfRange { index, palette_len } => {
        write!(f, "palette index {index} with a palette of {palette_len} entries")
      }
      InvalidPaletteLength(len) => write!(f, "illegal palette length {len}"),
      InvalidBitDepth(d) => write!(f, "illegal bit depth {d}"),
      InvalidDimensions { width, height } => write!(f, "illegal dimensions {width}x{height}"),
      DimensionsTooLarge { width, height } => {
        write!(f, "{width}x{height} is too large to decode")
      }
      InvalidChannelCount(c) => write!(f, "illegal channel count {c}"),
      WrongScanlineLength { expected, given } => {
        write!(f, "scanline should be {expected} bytes, got {given}")
      }
      InvalidColorType(c) => write!(f, "illegal color type {c}"),
      UnsupportedCompressionMethod(m) => write!(f, "unsupported compression method {m}"),
      UnsupportedFilterMethod(m) => write!(f, "unsupported filter method {m}"),
      UnsupportedInterlaceMethod(m) => write!(f, "unsupported interlace method {m}"),
      UnsupportedCriticalChunk(ty) => write!(f, "unsupported critical chunk {ty}"),
      UnknownFilterType { pass, row, filter } => {
        write!(f, "unknown filter type {filter} in pass {pass}, row {row}")
      }
      InvalidChunkData(ty) => write!(f, "invalid {ty} chunk data"),
      MissingNulTerminator => write!(f, "string has no NUL terminator"),
      InvalidText => write!(f, "text is not valid in the requested encoding"),
      MissingChunk(ty) => write!(f, "missing {ty} chunk"),
      MisplacedChunk(ty) => write!(f, "{ty} chunk is out of order"),
      NotPngSignature => write!(f, "only PNG files hold a single image"),
      Decompression => write!(f, "the image data is not a valid zlib stream"),
      ImageDataTooShort { pass, row } => {
        write!(f, "image data ended in pass {pass}, row {row}")
      }
      ImageDataTooLong => write!(f, "more image data than the header allows"),
      TrailingCompressedData => write!(f, "data follows the end of the zlib stream"),
      CheckedMath => write!(f, "a size computation overflowed"),
      #[cfg(feature = "alloc")]
      Alloc => write!(f, "allocation failure"),
      #[cfg(feature = "std")]
      Io(kind) => write!(f, "I/O error: {kind}"),
    }
  }
}

#[cfg(feature = "std")]
impl std::error::Error for XngError {}

#[cfg(feature = "std")]
impl From<std::io::Error> for XngError {
  #[inline]
  fn from(e: std::io::Error) -> Self {
    match e.kind() {
      std::io::ErrorKind::UnexpectedEof => Self::Truncated,
      kind => Self::Io(kind),
    }
  }
}
#[cfg(feature = "alloc")]
impl From<alloc::collections::TryReserveError> for XngError {
  #[inline]
  fn from(_: alloc::collections::TryReserveError) -> Self {
    Self::Alloc
  }
}
impl From<Utf8Error> for XngError {
  #[inline]
  fn from(_: Utf8Error) -> Self {
    Self::InvalidText
  }
}
impl From<ParseIntError> for XngError {
  #[inline]
  fn from(_: ParseIntError) -> Self {
    Self::CheckedMath
  }
}
impl From<TryFromIntError> for XngError {
  #[inline]
  fn from(_: TryFromIntError) -> Self {
    Self::CheckedMath
  }
}
