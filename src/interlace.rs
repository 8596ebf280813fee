//! Interlacing passes.
//!
//! An interlaced image is stored as seven "reduced" images, each of which is
//! filtered on its own. Within every 8x8 tile of the full image the pixels
//! belong to passes like this:
//!
//! ```text
//! 1 6 4 6 2 6 4 6
//! 7 7 7 7 7 7 7 7
//! 5 6 5 6 5 6 5 6
//! 7 7 7 7 7 7 7 7
//! 3 6 4 6 3 6 4 6
//! 7 7 7 7 7 7 7 7
//! 5 6 5 6 5 6 5 6
//! 7 7 7 7 7 7 7 7
//! ```
//!
//! A non-interlaced image is handled as a single pass that covers every pixel,
//! so the rest of the decoder doesn't need to care which kind it has.

use crate::XngError;

/// One reduced image: the pixels at `offset + n * step` in each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pass {
  pub x_offset: u32,
  pub y_offset: u32,
  pub x_step: u32,
  pub y_step: u32,
}
impl Pass {
  #[inline]
  const fn new(x_offset: u32, y_offset: u32, x_step: u32, y_step: u32) -> Self {
    Self { x_offset, y_offset, x_step, y_step }
  }

  /// Given the dimensions of the full image, computes the size of this
  /// reduced image.
  ///
  /// Either value can be 0 for a small full image, in which case the pass
  /// has no scanlines at all.
  #[inline]
  #[must_use]
  pub const fn reduced_dimensions(&self, full_width: u32, full_height: u32) -> (u32, u32) {
    const fn reduce(full: u32, offset: u32, step: u32) -> u32 {
      if full <= offset {
        0
      } else {
        (full - offset).div_ceil(step)
      }
    }
    (
      reduce(full_width, self.x_offset, self.x_step),
      reduce(full_height, self.y_offset, self.y_step),
    )
  }

  /// Converts a reduced image location into the full image location.
  #[inline]
  #[must_use]
  pub const fn full_position(&self, reduced_x: u32, reduced_y: u32) -> (u32, u32) {
    (reduced_x * self.x_step + self.x_offset, reduced_y * self.y_step + self.y_offset)
  }
}

/// The seven Adam7 passes, in the order they're stored.
pub const ADAM7: [Pass; 7] = [
  Pass::new(0, 0, 8, 8),
  Pass::new(4, 0, 8, 8),
  Pass::new(0, 4, 4, 8),
  Pass::new(2, 0, 4, 4),
  Pass::new(0, 2, 2, 4),
  Pass::new(1, 0, 2, 2),
  Pass::new(0, 1, 1, 2),
];

/// The single pass of a non-interlaced image.
pub const SEQUENTIAL: [Pass; 1] = [Pass::new(0, 0, 1, 1)];

/// How the image data is split into passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum InterlaceMethod {
  /// One pass, every scanline in order.
  #[default]
  None = 0,
  /// Seven passes.
  ///
  /// Lets a partial download show a rough preview, at the cost of compressing
  /// worse. Decoding is supported but the encoder never produces it.
  Adam7 = 1,
}
impl InterlaceMethod {
  /// The passes of this method, in storage order.
  #[inline]
  #[must_use]
  pub const fn passes(self) -> &'static [Pass] {
    match self {
      Self::None => &SEQUENTIAL,
      Self::Adam7 => &ADAM7,
    }
  }
}
impl TryFrom<u8> for InterlaceMethod {
  type Error = XngError;
  #[inline]
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    match value {
      0 => Ok(Self::None),
      1 => Ok(Self::Adam7),
      _ => Err(XngError::UnsupportedInterlaceMethod(value)),
    }
  }
}

#[test]
fn test_adam7_reduced_dimensions() {
  let dims = |w: u32, h: u32, pass: usize| ADAM7[pass].reduced_dimensions(w, h);
  assert!(ADAM7.iter().all(|p| p.reduced_dimensions(0, 0) == (0, 0)));
  // one
  for (w, ex) in (1..=8).zip([1, 1, 1, 1, 1, 1, 1, 1]) {
    assert_eq!(dims(w, 1, 0).0, ex, "failed w:{w}");
  }
  for (h, ex) in (1..=8).zip([1, 1, 1, 1, 1, 1, 1, 1]) {
    assert_eq!(dims(1, h, 0).1, ex, "failed h:{h}");
  }
  // two
  for (w, ex) in (1..=8).zip([0, 0, 0, 0, 1, 1, 1, 1]) {
    assert_eq!(dims(w, 1, 1).0, ex, "failed w:{w}");
  }
  for (h, ex) in (1..=8).zip([1, 1, 1, 1, 1, 1, 1, 1]) {
    assert_eq!(dims(1, h, 1).1, ex, "failed h:{h}");
  }
  // three
  for (w, ex) in (1..=8).zip([1, 1, 1, 1, 2, 2, 2, 2]) {
    assert_eq!(dims(w, 1, 2).0, ex, "failed w: {w}");
  }
  for (h, ex) in (1..=8).zip([0, 0, 0, 0, 1, 1, 1, 1]) {
    assert_eq!(dims(1, h, 2).1, ex, "failed h: {h}");
  }
  // four
  for (w, ex) in (1..=8).zip([0, 0, 1, 1, 1, 1, 2, 2]) {
    assert_eq!(dims(w, 1, 3).0, ex, "failed w: {w}");
  }
  for (h, ex) in (1..=8).zip([1, 1, 1, 1, 2, 2, 2, 2]) {
    assert_eq!(dims(1, h, 3).1, ex, "failed h: {h}");
  }
  // five
  for (w, ex) in (1..=8).zip([1, 1, 2, 2, 3, 3, 4, 4]) {
    assert_eq!(dims(w, 1, 4).0, ex, "failed w: {w}");
  }
  for (h, ex) in (1..=8).zip([0, 0, 1, 1, 1, 1, 2, 2]) {
    assert_eq!(dims(1, h, 4).1, ex, "failed h: {h}");
  }
  // six
  for (w, ex) in (1..=8).zip([0, 1, 1, 2, 2, 3, 3, 4]) {
    assert_eq!(dims(w, 1, 5).0, ex, "failed w: {w}");
  }
  for (h, ex) in (1..=8).zip([1, 1, 2, 2, 3, 3, 4, 4]) {
    assert_eq!(dims(1, h, 5).1, ex, "failed h: {h}");
  }
  // seven
  for (w, ex) in (1..=8).zip([1, 2, 3, 4, 5, 6, 7, 8]) {
    assert_eq!(dims(w, 1, 6).0, ex, "failed w: {w}");
  }
  for (h, ex) in (1..=8).zip([0, 1, 1, 2, 2, 3, 3, 4]) {
    assert_eq!(dims(1, h, 6).1, ex, "failed h: {h}");
  }
  //
  let mut sizes = [(0, 0); 7];
  sizes.iter_mut().zip(ADAM7.iter()).for_each(|(s, p)| *s = p.reduced_dimensions(8, 8));
  assert_eq!(sizes, [(1, 1), (1, 1), (2, 1), (2, 2), (4, 2), (4, 4), (8, 4)]);
  sizes.iter_mut().zip(ADAM7.iter()).for_each(|(s, p)| *s = p.reduced_dimensions(7, 11));
  assert_eq!(sizes, [(1, 2), (1, 2), (2, 1), (2, 3), (4, 3), (3, 6), (7, 5)]);
}

#[test]
fn test_adam7_covers_every_pixel_once() {
  for (w, h) in [(1, 1), (3, 2), (7, 11), (8, 8), (13, 17), (33, 5)] {
    let mut hits = [[0_u8; 40]; 40];
    for pass in ADAM7.iter() {
      let (rw, rh) = pass.reduced_dimensions(w, h);
      for ry in 0..rh {
        for rx in 0..rw {
          let (x, y) = pass.full_position(rx, ry);
          assert!(x < w && y < h, "{pass:?} sent ({rx},{ry}) to ({x},{y})");
          hits[y as usize][x as usize] += 1;
        }
      }
    }
    for y in 0..h as usize {
      for x in 0..w as usize {
        assert_eq!(hits[y][x], 1, "{w}x{h} at ({x},{y})");
      }
    }
  }
}

#[test]
fn test_sequential_is_identity() {
  let [pass] = SEQUENTIAL;
  assert_eq!(pass.reduced_dimensions(19, 3), (19, 3));
  assert_eq!(pass.full_position(5, 2), (5, 2));
  assert_eq!(InterlaceMethod::None.passes().len(), 1);
  assert_eq!(InterlaceMethod::Adam7.passes().len(), 7);
}
