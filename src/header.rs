use crate::{bytes_per_scanline, ChunkType, InterlaceMethod, XngError};

/// The types of color that PNG supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ColorType {
  /// Greyscale
  Y = 0,
  /// Red, Green, Blue
  RGB = 2,
  /// Index into a palette.
  Index = 3,
  /// Greyscale + Alpha
  YA = 4,
  /// Red, Green, Blue, Alpha
  RGBA = 6,
}
impl ColorType {
  /// The number of channels in this type of color.
  #[inline]
  #[must_use]
  pub const fn channel_count(self) -> usize {
    match self {
      Self::Y => 1,
      Self::RGB => 3,
      Self::Index => 1,
      Self::YA => 2,
      Self::RGBA => 4,
    }
  }

  /// If this color type can be used with the bit depth given.
  #[inline]
  #[must_use]
  pub const fn allows_bit_depth(self, bit_depth: u8) -> bool {
    match self {
      Self::Y => matches!(bit_depth, 1 | 2 | 4 | 8 | 16),
      Self::Index => matches!(bit_depth, 1 | 2 | 4 | 8),
      Self::RGB | Self::YA | Self::RGBA => matches!(bit_depth, 8 | 16),
    }
  }
}
impl TryFrom<u8> for ColorType {
  type Error = XngError;
  #[inline]
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Ok(match value {
      0 => ColorType::Y,
      2 => ColorType::RGB,
      3 => ColorType::Index,
      4 => ColorType::YA,
      6 => ColorType::RGBA,
      _ => return Err(XngError::InvalidColorType(value)),
    })
  }
}

/// Image Header
///
/// Describes the dimensions and pixel layout of the image data. The only
/// compression and filter methods are both method 0, so they're checked when
/// parsing but not stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IHDR {
  /// width in pixels
  pub width: u32,
  /// height in pixels
  pub height: u32,
  /// bits per channel
  pub bit_depth: u8,
  /// pixel color type
  pub color_type: ColorType,
  /// how the image data is interlaced.
  pub interlace_method: InterlaceMethod,
}
impl IHDR {
  /// The number of payload bytes in an IHDR chunk.
  pub const DATA_LEN: usize = 13;

  /// Makes a header, checking that all the fields are legal together.
  #[inline]
  pub const fn new(
    width: u32, height: u32, bit_depth: u8, color_type: ColorType,
    interlace_method: InterlaceMethod,
  ) -> Result<Self, XngError> {
    if width == 0 || height == 0 || width > (i32::MAX as u32) || height > (i32::MAX as u32) {
      return Err(XngError::InvalidDimensions { width, height });
    }
    if !color_type.allows_bit_depth(bit_depth) {
      return Err(XngError::InvalidBitDepth(bit_depth));
    }
    Ok(Self { width, height, bit_depth, color_type, interlace_method })
  }

  /// The header as chunk payload bytes.
  #[inline]
  #[must_use]
  pub const fn to_bytes(&self) -> [u8; 13] {
    let [w0, w1, w2, w3] = self.width.to_be_bytes();
    let [h0, h1, h2, h3] = self.height.to_be_bytes();
    [
      w0,
      w1,
      w2,
      w3,
      h0,
      h1,
      h2,
      h3,
      self.bit_depth,
      self.color_type as u8,
      0,
      0,
      self.interlace_method as u8,
    ]
  }

  /// Bits used by one pixel.
  #[inline]
  #[must_use]
  pub const fn bits_per_pixel(&self) -> usize {
    (self.bit_depth as usize) * self.color_type.channel_count()
  }

  /// The number of bytes that the filter functions treat as one unit.
  ///
  /// Filtering is per byte within a pixel when pixels are more than 1 byte
  /// each, and per byte when pixels are 1 byte or less.
  #[inline]
  #[must_use]
  pub const fn filter_chunk_size(&self) -> usize {
    crate::filter_chunk_size(self.color_type.channel_count(), self.bit_depth)
  }

  /// Bytes in a filter line of the given width: the filter type byte plus the
  /// packed pixel data.
  #[inline]
  #[must_use]
  pub const fn bytes_per_filterline(&self, width: u32) -> usize {
    1 + bytes_per_scanline(width, self.color_type.channel_count(), self.bit_depth)
  }

  /// Gets the exact number of decompressed bytes that the image data must
  /// have, counting every reduced image of an interlaced image.
  ///
  /// ## Failure
  /// * If the size doesn't fit in `usize`.
  pub fn get_zlib_decompression_requirement(&self) -> Result<usize, XngError> {
    let mut total = 0_usize;
    for pass in self.interlace_method.passes() {
      let (width, height) = pass.reduced_dimensions(self.width, self.height);
      if width == 0 || height == 0 {
        continue;
      }
      let bytes_this_image = self
        .bytes_per_filterline(width)
        .checked_mul(height as usize)
        .ok_or(XngError::CheckedMath)?;
      total = total.checked_add(bytes_this_image).ok_or(XngError::CheckedMath)?;
    }
    Ok(total)
  }
}
impl TryFrom<&[u8]> for IHDR {
  type Error = XngError;
  fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
    match *value {
      [w0, w1, w2, w3, h0, h1, h2, h3, bit_depth, color_type, compression_method, filter_method, interlace_method] => {
        if compression_method != 0 {
          return Err(XngError::UnsupportedCompressionMethod(compression_method));
        }
        if filter_method != 0 {
          return Err(XngError::UnsupportedFilterMethod(filter_method));
        }
        Self::new(
          u32::from_be_bytes([w0, w1, w2, w3]),
          u32::from_be_bytes([h0, h1, h2, h3]),
          bit_depth,
          ColorType::try_from(color_type)?,
          InterlaceMethod::try_from(interlace_method)?,
        )
      }
      _ => Err(XngError::InvalidChunkData(ChunkType::IHDR)),
    }
  }
}

#[test]
fn test_ihdr_parse() {
  let bytes = [0, 0, 0, 7, 0, 0, 0, 11, 8, 0, 0, 0, 1];
  let ihdr = IHDR::try_from(&bytes[..]).unwrap();
  assert_eq!(ihdr.width, 7);
  assert_eq!(ihdr.height, 11);
  assert_eq!(ihdr.bit_depth, 8);
  assert_eq!(ihdr.color_type, ColorType::Y);
  assert_eq!(ihdr.interlace_method, InterlaceMethod::Adam7);
  assert_eq!(ihdr.to_bytes(), bytes);

  let with = |i: usize, v: u8| {
    let mut b = bytes;
    b[i] = v;
    IHDR::try_from(&b[..])
  };
  assert_eq!(with(3, 0), Err(XngError::InvalidDimensions { width: 0, height: 11 }));
  assert_eq!(with(4, 0x80), Err(XngError::InvalidDimensions { width: 7, height: 0x8000_000B }));
  assert_eq!(with(8, 3), Err(XngError::InvalidBitDepth(3)));
  assert_eq!(with(9, 1), Err(XngError::InvalidColorType(1)));
  assert_eq!(with(10, 1), Err(XngError::UnsupportedCompressionMethod(1)));
  assert_eq!(with(11, 1), Err(XngError::UnsupportedFilterMethod(1)));
  assert_eq!(with(12, 2), Err(XngError::UnsupportedInterlaceMethod(2)));
  assert_eq!(IHDR::try_from(&bytes[..12]), Err(XngError::InvalidChunkData(ChunkType::IHDR)));
}

#[test]
fn test_color_type_bit_depths() {
  for (ct, ok) in [
    (ColorType::Y, &[1, 2, 4, 8, 16][..]),
    (ColorType::RGB, &[8, 16][..]),
    (ColorType::Index, &[1, 2, 4, 8][..]),
    (ColorType::YA, &[8, 16][..]),
    (ColorType::RGBA, &[8, 16][..]),
  ] {
    for depth in 0..=32_u8 {
      assert_eq!(ct.allows_bit_depth(depth), ok.contains(&depth), "{ct:?} {depth}");
    }
  }
}

#[test]
fn test_zlib_decompression_requirement() {
  let flat = IHDR::new(8, 5, 8, ColorType::Y, InterlaceMethod::None).unwrap();
  assert_eq!(flat.get_zlib_decompression_requirement(), Ok(9 * 5));
  // pass sizes (1,2),(1,2),(2,1),(2,3),(4,3),(3,6),(7,5)
  let adam7 = IHDR::new(7, 11, 8, ColorType::Y, InterlaceMethod::Adam7).unwrap();
  assert_eq!(adam7.get_zlib_decompression_requirement(), Ok(4 + 4 + 3 + 9 + 15 + 24 + 40));
  // 1-bit rows round up to whole bytes
  let bits = IHDR::new(9, 2, 1, ColorType::Index, InterlaceMethod::None).unwrap();
  assert_eq!(bits.get_zlib_decompression_requirement(), Ok(3 * 2));
}
