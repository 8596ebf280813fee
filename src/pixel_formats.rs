//! Palette entry formats.
//!
//! Image pixels themselves are kept as per-channel samples (see
//! [`Bitmap`](crate::Bitmap)), since they can have any of several bit depths.
//! Palette entries are always 8 bits per channel, so they get plain structs.

use bytemuck::{Pod, Zeroable};

/// An RGB value, 8-bits per channel.
///
/// This is the format of each entry in a `PLTE` chunk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Zeroable, Pod)]
#[repr(C)]
pub struct RGB8 {
  pub r: u8,
  pub g: u8,
  pub b: u8,
}
impl RGB8 {
  /// Makes a new value.
  #[inline]
  #[must_use]
  pub const fn new(r: u8, g: u8, b: u8) -> Self {
    Self { r, g, b }
  }
}

/// An 8-bits per channel RGBA value.
///
/// Palettes of indexed images are lists of these. The alpha comes from the
/// `tRNS` chunk, and is `0xFF` when there isn't one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Zeroable, Pod)]
#[repr(C)]
pub struct RGBA8 {
  pub r: u8,
  pub g: u8,
  pub b: u8,
  pub a: u8,
}
impl RGBA8 {
  /// Makes a new value.
  #[inline]
  #[must_use]
  pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
    Self { r, g, b, a }
  }

  /// The color without its alpha.
  #[inline]
  #[must_use]
  pub const fn rgb(self) -> RGB8 {
    RGB8 { r: self.r, g: self.g, b: self.b }
  }
}
impl From<RGB8> for RGBA8 {
  /// Opaque
  #[inline]
  fn from(RGB8 { r, g, b }: RGB8) -> Self {
    Self { r, g, b, a: 0xFF }
  }
}

#[test]
fn test_palette_entry_layout() {
  let entries = [RGB8::new(1, 2, 3), RGB8::new(4, 5, 6)];
  assert_eq!(bytemuck::cast_slice::<RGB8, u8>(&entries), &[1, 2, 3, 4, 5, 6]);
  assert!(bytemuck::try_cast_slice::<u8, RGB8>(&[1, 2, 3, 4]).is_err());
  assert_eq!(RGBA8::from(RGB8::new(7, 8, 9)), RGBA8::new(7, 8, 9, 0xFF));
  assert_eq!(RGBA8::new(7, 8, 9, 10).rgb(), RGB8::new(7, 8, 9));
}
