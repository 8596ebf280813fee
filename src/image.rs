#![forbid(unsafe_code)]

//! Provides heap-allocated image types.
//!
//! Every accessor is bounds checked, and every mutation is range checked
//! against the image's bit depth: a value that doesn't fit is an error, it's
//! never masked or clamped.

use alloc::vec::Vec;

use crate::{check_sample, max_sample, ColorType, XngError, RGBA8};

/// Converts an `(x,y)` position within a given `width` 2D space into a linear
/// index.
///
/// You don't ever need to call this function yourself, but it's how the image
/// containers convert 2d coordinates into index values within their payload
/// vectors.
#[inline]
#[must_use]
pub const fn xy_width_to_index(x: u32, y: u32, width: u32) -> usize {
  (y as usize) * (width as usize) + (x as usize)
}

#[inline]
fn check_dimensions(width: u32, height: u32) -> Result<usize, XngError> {
  if width == 0 || height == 0 || width > (i32::MAX as u32) || height > (i32::MAX as u32) {
    return Err(XngError::InvalidDimensions { width, height });
  }
  (width as usize).checked_mul(height as usize).ok_or(XngError::CheckedMath)
}

#[inline]
fn zeroed_vec<T: Clone + Default>(len: usize) -> Result<Vec<T>, XngError> {
  let mut v = Vec::new();
  v.try_reserve_exact(len)?;
  v.resize(len, T::default());
  Ok(v)
}

/// A direct-color image: greyscale or RGB, with or without alpha.
///
/// All channels share one bit depth, and each sample is stored in a `u16`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bitmap {
  width: u32,
  height: u32,
  color_type: ColorType,
  bit_depth: u8,
  samples: Vec<u16>,
}
impl Bitmap {
  /// Makes a new image with every sample set to 0.
  ///
  /// ## Failure
  /// * Either dimension is 0 or more than `i32::MAX`.
  /// * The color type is [`ColorType::Index`] (use a [`Palmap`]).
  /// * The bit depth isn't allowed with the color type.
  /// * Allocation failure.
  pub fn new(
    width: u32, height: u32, color_type: ColorType, bit_depth: u8,
  ) -> Result<Self, XngError> {
    if color_type == ColorType::Index {
      return Err(XngError::InvalidColorType(color_type as u8));
    }
    if !color_type.allows_bit_depth(bit_depth) {
      return Err(XngError::InvalidBitDepth(bit_depth));
    }
    let pixel_count = check_dimensions(width, height)?;
    let len = pixel_count.checked_mul(color_type.channel_count()).ok_or(XngError::CheckedMath)?;
    Ok(Self { width, height, color_type, bit_depth, samples: zeroed_vec(len)? })
  }

  #[inline]
  #[must_use]
  pub const fn width(&self) -> u32 {
    self.width
  }
  #[inline]
  #[must_use]
  pub const fn height(&self) -> u32 {
    self.height
  }
  #[inline]
  #[must_use]
  pub const fn color_type(&self) -> ColorType {
    self.color_type
  }
  #[inline]
  #[must_use]
  pub const fn bit_depth(&self) -> u8 {
    self.bit_depth
  }

  /// The bit depth of each channel, in channel order.
  ///
  /// Only the first [`channel_count`](ColorType::channel_count) entries are
  /// used, the rest are 0.
  #[inline]
  #[must_use]
  pub fn bit_depths(&self) -> [u8; 4] {
    let mut out = [0; 4];
    out[..self.color_type.channel_count()].fill(self.bit_depth);
    out
  }

  #[inline]
  fn sample_range(&self, x: u32, y: u32) -> Result<core::ops::Range<usize>, XngError> {
    if x < self.width && y < self.height {
      let channels = self.color_type.channel_count();
      let start = xy_width_to_index(x, y, self.width) * channels;
      Ok(start..start + channels)
    } else {
      Err(XngError::OutOfBounds { x, y })
    }
  }

  /// The samples of the pixel at the position, one per channel.
  #[inline]
  pub fn get_samples(&self, x: u32, y: u32) -> Result<&[u16], XngError> {
    let range = self.sample_range(x, y)?;
    Ok(&self.samples[range])
  }

  /// Sets the samples of the pixel at the position.
  ///
  /// ## Failure
  /// * The position is out of bounds.
  /// * `samples` isn't exactly one value per channel.
  /// * Any sample doesn't fit the bit depth. The pixel is unchanged.
  pub fn set_samples(&mut self, x: u32, y: u32, samples: &[u16]) -> Result<(), XngError> {
    let range = self.sample_range(x, y)?;
    if samples.len() != range.len() {
      return Err(XngError::WrongSampleCount { expected: range.len(), given: samples.len() });
    }
    for (channel, value) in samples.iter().copied().enumerate() {
      check_sample(channel, value, self.bit_depth)?;
    }
    self.samples[range].copy_from_slice(samples);
    Ok(())
  }

  /// The pixel at the position as one integer.
  ///
  /// Each channel gets 16 bits, with the first channel in the highest used
  /// bits. An RGB pixel is `0xRRRR_GGGG_BBBB`, a YA pixel is `0xYYYY_AAAA`.
  #[inline]
  pub fn get_pixel(&self, x: u32, y: u32) -> Result<u64, XngError> {
    Ok(self.get_samples(x, y)?.iter().fold(0_u64, |acc, s| (acc << 16) | u64::from(*s)))
  }

  /// Sets the pixel at the position from one integer, laid out as with
  /// [`get_pixel`](Self::get_pixel).
  ///
  /// ## Failure
  /// * The position is out of bounds.
  /// * Any channel doesn't fit the bit depth, or bits are set above the
  ///   highest channel.
  pub fn set_pixel(&mut self, x: u32, y: u32, pixel: u64) -> Result<(), XngError> {
    let channels = self.color_type.channel_count();
    let used_bits = 16 * channels as u32;
    if used_bits < 64 && (pixel >> used_bits) != 0 {
      return Err(XngError::SampleOutOfRange {
        channel: 0,
        value: u16::MAX,
        bit_depth: self.bit_depth,
      });
    }
    let mut samples = [0_u16; 4];
    for (i, s) in samples[..channels].iter_mut().enumerate() {
      *s = (pixel >> (16 * (channels - 1 - i))) as u16;
    }
    self.set_samples(x, y, &samples[..channels])
  }

  /// All samples, row by row, with each pixel's channels together.
  #[inline]
  #[must_use]
  pub fn samples(&self) -> &[u16] {
    &self.samples
  }
}

/// An indexed-color image.
///
/// Each pixel is an index into the palette, and the palette must always be
/// long enough for every index in use.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Palmap {
  width: u32,
  height: u32,
  bit_depth: u8,
  indexes: Vec<u8>,
  palette: Vec<RGBA8>,
}
impl Palmap {
  /// Makes a new image with every index set to 0.
  ///
  /// ## Failure
  /// * Either dimension is 0 or more than `i32::MAX`.
  /// * The bit depth isn't 1, 2, 4, or 8.
  /// * The palette is empty, has more than 256 entries, or has more entries
  ///   than the bit depth can address.
  /// * Allocation failure.
  pub fn new(
    width: u32, height: u32, bit_depth: u8, palette: Vec<RGBA8>,
  ) -> Result<Self, XngError> {
    if !ColorType::Index.allows_bit_depth(bit_depth) {
      return Err(XngError::InvalidBitDepth(bit_depth));
    }
    check_palette_len(palette.len(), bit_depth)?;
    let pixel_count = check_dimensions(width, height)?;
    Ok(Self { width, height, bit_depth, indexes: zeroed_vec(pixel_count)?, palette })
  }

  #[inline]
  #[must_use]
  pub const fn width(&self) -> u32 {
    self.width
  }
  #[inline]
  #[must_use]
  pub const fn height(&self) -> u32 {
    self.height
  }
  #[inline]
  #[must_use]
  pub const fn bit_depth(&self) -> u8 {
    self.bit_depth
  }
  #[inline]
  #[must_use]
  pub fn palette(&self) -> &[RGBA8] {
    &self.palette
  }
  /// All indexes, row by row.
  #[inline]
  #[must_use]
  pub fn indexes(&self) -> &[u8] {
    &self.indexes
  }

  #[inline]
  fn index_of(&self, x: u32, y: u32) -> Result<usize, XngError> {
    if x < self.width && y < self.height {
      Ok(xy_width_to_index(x, y, self.width))
    } else {
      Err(XngError::OutOfBounds { x, y })
    }
  }

  /// The palette index at the position.
  #[inline]
  pub fn get_index(&self, x: u32, y: u32) -> Result<u8, XngError> {
    Ok(self.indexes[self.index_of(x, y)?])
  }

  /// The palette color at the position.
  #[inline]
  pub fn get_color(&self, x: u32, y: u32) -> Result<RGBA8, XngError> {
    let index = self.get_index(x, y)?;
    // every stored index is within the palette
    Ok(self.palette[usize::from(index)])
  }

  /// Sets the palette index at the position.
  ///
  /// ## Failure
  /// * The position is out of bounds.
  /// * The index doesn't fit the bit depth, or isn't less than the palette's
  ///   length.
  pub fn set_index(&mut self, x: u32, y: u32, index: u8) -> Result<(), XngError> {
    let i = self.index_of(x, y)?;
    check_sample(0, u16::from(index), self.bit_depth)?;
    if usize::from(index) >= self.palette.len() {
      return Err(XngError::PaletteIndexOutOfRange { index, palette_len: self.palette.len() });
    }
    self.indexes[i] = index;
    Ok(())
  }

  /// Replaces the palette. The pixel data is unchanged.
  ///
  /// ## Failure
  /// * The new palette's length isn't legal for the bit depth.
  /// * Some pixel uses an index that the new palette doesn't have. The old
  ///   palette is kept.
  pub fn set_palette(&mut self, palette: Vec<RGBA8>) -> Result<(), XngError> {
    check_palette_len(palette.len(), self.bit_depth)?;
    if let Some(index) = self.indexes.iter().copied().max() {
      if usize::from(index) >= palette.len() {
        return Err(XngError::PaletteIndexOutOfRange { index, palette_len: palette.len() });
      }
    }
    self.palette = palette;
    Ok(())
  }
}

/// Checks a palette length against the PNG limits for a bit depth.
pub(crate) fn check_palette_len(len: usize, bit_depth: u8) -> Result<(), XngError> {
  let addressable = usize::from(max_sample(bit_depth)) + 1;
  if len == 0 || len > 256 || len > addressable {
    Err(XngError::InvalidPaletteLength(len))
  } else {
    Ok(())
  }
}

/// Either kind of image.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Image {
  Bitmap(Bitmap),
  Palmap(Palmap),
}
impl Image {
  #[inline]
  #[must_use]
  pub const fn width(&self) -> u32 {
    match self {
      Self::Bitmap(b) => b.width,
      Self::Palmap(p) => p.width,
    }
  }
  #[inline]
  #[must_use]
  pub const fn height(&self) -> u32 {
    match self {
      Self::Bitmap(b) => b.height,
      Self::Palmap(p) => p.height,
    }
  }
  #[inline]
  #[must_use]
  pub const fn color_type(&self) -> ColorType {
    match self {
      Self::Bitmap(b) => b.color_type,
      Self::Palmap(_) => ColorType::Index,
    }
  }
  #[inline]
  #[must_use]
  pub const fn bit_depth(&self) -> u8 {
    match self {
      Self::Bitmap(b) => b.bit_depth,
      Self::Palmap(p) => p.bit_depth,
    }
  }
}
impl From<Bitmap> for Image {
  #[inline]
  fn from(b: Bitmap) -> Self {
    Self::Bitmap(b)
  }
}
impl From<Palmap> for Image {
  #[inline]
  fn from(p: Palmap) -> Self {
    Self::Palmap(p)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use alloc::vec;

  #[test]
  fn test_bitmap_bounds_and_ranges() {
    let mut b = Bitmap::new(3, 2, ColorType::YA, 8).unwrap();
    assert_eq!(b.get_samples(2, 1).unwrap(), &[0, 0]);
    assert_eq!(b.get_samples(3, 0), Err(XngError::OutOfBounds { x: 3, y: 0 }));
    assert_eq!(b.set_samples(0, 2, &[1, 1]), Err(XngError::OutOfBounds { x: 0, y: 2 }));
    assert_eq!(
      b.set_samples(0, 0, &[1, 2, 3]),
      Err(XngError::WrongSampleCount { expected: 2, given: 3 })
    );
    b.set_samples(1, 1, &[255, 7]).unwrap();
    assert_eq!(
      b.set_samples(1, 1, &[9, 256]),
      Err(XngError::SampleOutOfRange { channel: 1, value: 256, bit_depth: 8 })
    );
    // a rejected write leaves the pixel alone
    assert_eq!(b.get_samples(1, 1).unwrap(), &[255, 7]);
    assert_eq!(b.bit_depths(), [8, 8, 0, 0]);
  }

  #[test]
  fn test_bitmap_bit_depth_edges() {
    for d in [1_u8, 2, 4, 8, 16] {
      let mut b = Bitmap::new(1, 1, ColorType::Y, d).unwrap();
      let top = (1_u32 << d) - 1;
      assert!(b.set_samples(0, 0, &[top as u16]).is_ok());
      if d < 16 {
        assert!(b.set_samples(0, 0, &[(top + 1) as u16]).is_err());
      }
      assert_eq!(b.get_samples(0, 0).unwrap(), &[top as u16]);
    }
  }

  #[test]
  fn test_bitmap_new_rejects() {
    assert_eq!(Bitmap::new(0, 1, ColorType::Y, 8), Err(XngError::InvalidDimensions { width: 0, height: 1 }));
    assert_eq!(Bitmap::new(1, 1, ColorType::RGB, 4), Err(XngError::InvalidBitDepth(4)));
    assert_eq!(Bitmap::new(1, 1, ColorType::Index, 8), Err(XngError::InvalidColorType(3)));
  }

  #[test]
  fn test_bitmap_pixel_packing() {
    let mut b = Bitmap::new(2, 2, ColorType::RGBA, 16).unwrap();
    b.set_pixel(1, 0, 0x0001_0002_0003_FFFF).unwrap();
    assert_eq!(b.get_samples(1, 0).unwrap(), &[1, 2, 3, 0xFFFF]);
    assert_eq!(b.get_pixel(1, 0).unwrap(), 0x0001_0002_0003_FFFF);

    let mut b = Bitmap::new(2, 2, ColorType::RGB, 8).unwrap();
    b.set_pixel(0, 1, 0x00FF_0080_0001).unwrap();
    assert_eq!(b.get_samples(0, 1).unwrap(), &[0xFF, 0x80, 0x01]);
    assert!(b.set_pixel(0, 1, 0x0100_0000_0000).is_err());
    assert!(b.set_pixel(0, 1, 0x0001_0000_0000_0000).is_err());
  }

  #[test]
  fn test_palmap_shrink_palette() {
    let palette = vec![RGBA8::default(); 8];
    let mut p = Palmap::new(4, 4, 4, palette).unwrap();
    p.set_index(3, 2, 5).unwrap();
    let before = p.indexes().to_vec();
    // 5 needs at least 6 entries
    for len in [1, 5] {
      assert_eq!(
        p.set_palette(vec![RGBA8::default(); len]),
        Err(XngError::PaletteIndexOutOfRange { index: 5, palette_len: len })
      );
      assert_eq!(p.palette().len(), 8);
    }
    p.set_palette(vec![RGBA8::new(1, 2, 3, 4); 6]).unwrap();
    assert_eq!(p.palette().len(), 6);
    assert_eq!(p.indexes(), &before[..]);
    assert_eq!(p.get_color(3, 2).unwrap(), RGBA8::new(1, 2, 3, 4));
  }

  #[test]
  fn test_palmap_index_rules() {
    let mut p = Palmap::new(2, 1, 2, vec![RGBA8::default(); 3]).unwrap();
    assert_eq!(p.set_index(0, 0, 3), Err(XngError::PaletteIndexOutOfRange { index: 3, palette_len: 3 }));
    assert_eq!(p.set_index(0, 0, 4), Err(XngError::SampleOutOfRange { channel: 0, value: 4, bit_depth: 2 }));
    assert_eq!(p.set_index(2, 0, 0), Err(XngError::OutOfBounds { x: 2, y: 0 }));
    p.set_index(1, 0, 2).unwrap();
    assert_eq!(p.get_index(1, 0), Ok(2));
    // too many entries for the bit depth
    assert_eq!(p.set_palette(vec![RGBA8::default(); 5]), Err(XngError::InvalidPaletteLength(5)));
    assert_eq!(
      Palmap::new(1, 1, 8, vec![]).unwrap_err(),
      XngError::InvalidPaletteLength(0)
    );
    assert_eq!(
      Palmap::new(1, 1, 8, vec![RGBA8::default(); 257]).unwrap_err(),
      XngError::InvalidPaletteLength(257)
    );
  }
}
