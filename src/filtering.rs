//! Scanline filters.
//!
//! From the PNG standard:
//!
//! > Filters are applied to **bytes**, not to pixels, regardless of the bit
//! > depth or color type of the image.
//!
//! For each byte `x` of a scanline the filters use three neighbor bytes:
//! * `a`: the corresponding byte of the pixel to the left (or the byte to the
//!   left, when pixels are smaller than a byte).
//! * `b`: the byte at the same position in the previous scanline.
//! * `c`: the byte to the left of `b`.
//!
//! Any neighbor that's off the left edge, or above the first scanline of a
//! reduced image, is 0.

use crate::XngError;

/// The per-scanline filter types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum FilterType {
  /// The bytes are stored as-is.
  #[default]
  None = 0,
  /// Predict from `a`.
  Sub = 1,
  /// Predict from `b`.
  Up = 2,
  /// Predict from the floor of the average of `a` and `b`.
  Average = 3,
  /// Predict from whichever of `a`, `b`, or `c` is closest to `a + b - c`.
  Paeth = 4,
}
impl TryFrom<u8> for FilterType {
  type Error = u8;
  /// Gives back the byte if it's not a filter type.
  #[inline]
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Ok(match value {
      0 => Self::None,
      1 => Self::Sub,
      2 => Self::Up,
      3 => Self::Average,
      4 => Self::Paeth,
      _ => return Err(value),
    })
  }
}

/// The Paeth filter function computes a simple linear function of the three
/// neighboring bytes (left `a`, above `b`, upper left `c`).
///
/// The output is the neighbor closest to the computed value.
#[inline]
#[must_use]
pub const fn paeth_predictor(a: u8, b: u8, c: u8) -> u8 {
  // Note: "The calculations within the PaethPredictor function shall be
  // performed exactly, without overflow.", so this uses i32 math, which is wide
  // enough for any u8 inputs.
  let a_ = a as i32;
  let b_ = b as i32;
  let c_ = c as i32;
  let p = a_ + b_ - c_;
  let pa = (p - a_).abs();
  let pb = (p - b_).abs();
  let pc = (p - c_).abs();
  // The order of these tests must not change.
  if pa <= pb && pa <= pc {
    a
  } else if pb <= pc {
    b
  } else {
    c
  }
}

#[inline]
const fn predict(filter: FilterType, a: u8, b: u8, c: u8) -> u8 {
  match filter {
    FilterType::None => 0,
    FilterType::Sub => a,
    FilterType::Up => b,
    FilterType::Average => ((a as u16 + b as u16) / 2) as u8,
    FilterType::Paeth => paeth_predictor(a, b, c),
  }
}

/// Filters one raw byte `x`.
#[inline]
#[must_use]
pub const fn filter_byte(filter: FilterType, x: u8, a: u8, b: u8, c: u8) -> u8 {
  x.wrapping_sub(predict(filter, a, b, c))
}

/// Reconstructs one raw byte from the filtered byte `fx`.
///
/// The `a`, `b`, and `c` values must be *reconstructed* bytes, not filtered
/// ones.
#[inline]
#[must_use]
pub const fn unfilter_byte(filter: FilterType, fx: u8, a: u8, b: u8, c: u8) -> u8 {
  fx.wrapping_add(predict(filter, a, b, c))
}

/// Filters a whole scanline of raw bytes.
///
/// * `filter_chunk_size` is the distance to the `a` byte.
/// * `previous` is the raw previous scanline, or empty for the first scanline
///   of a reduced image.
/// * `out` gets the filtered bytes, and must be the same length as `current`.
///   The filter type byte is *not* written.
///
/// ## Panics
/// * If `out` or a non-empty `previous` is a different length than `current`.
pub fn filter_scanline(
  filter: FilterType, filter_chunk_size: usize, current: &[u8], previous: &[u8], out: &mut [u8],
) {
  assert_eq!(current.len(), out.len());
  assert!(previous.is_empty() || previous.len() == current.len());
  if filter == FilterType::None {
    out.copy_from_slice(current);
    return;
  }
  for (i, (o, x)) in out.iter_mut().zip(current.iter().copied()).enumerate() {
    let a = if i >= filter_chunk_size { current[i - filter_chunk_size] } else { 0 };
    let b = previous.get(i).copied().unwrap_or(0);
    let c = if i >= filter_chunk_size {
      previous.get(i - filter_chunk_size).copied().unwrap_or(0)
    } else {
      0
    };
    *o = filter_byte(filter, x, a, b, c);
  }
}

/// Reverses a filter on a scanline, in place.
///
/// * `filter_chunk_size` is the distance to the `a` byte.
/// * `previous` is the fully reconstructed previous scanline, or empty for the
///   first scanline of a reduced image.
///
/// Each byte depends on the reconstructed byte to its left, so this always
/// proceeds left to right.
///
/// ## Panics
/// * If a non-empty `previous` is a different length than `line`.
pub fn unfilter_scanline(
  filter: FilterType, filter_chunk_size: usize, line: &mut [u8], previous: &[u8],
) {
  assert!(previous.is_empty() || previous.len() == line.len());
  match filter {
    FilterType::None => (),
    FilterType::Up => {
      line.iter_mut().zip(previous.iter().copied()).for_each(|(x, b)| *x = x.wrapping_add(b));
    }
    FilterType::Sub | FilterType::Average | FilterType::Paeth => {
      for i in 0..line.len() {
        let a = if i >= filter_chunk_size { line[i - filter_chunk_size] } else { 0 };
        let b = previous.get(i).copied().unwrap_or(0);
        let c = if i >= filter_chunk_size {
          previous.get(i - filter_chunk_size).copied().unwrap_or(0)
        } else {
          0
        };
        line[i] = unfilter_byte(filter, line[i], a, b, c);
      }
    }
  }
}

/// Splits a filter line into its filter type and pixel bytes.
#[inline]
pub(crate) fn split_filterline(
  filterline: &mut [u8], pass: usize, row: u32,
) -> Result<(FilterType, &mut [u8]), XngError> {
  match filterline.split_first_mut() {
    Some((f, pixels)) => FilterType::try_from(*f)
      .map(|filter| (filter, pixels))
      .map_err(|filter| XngError::UnknownFilterType { pass, row, filter }),
    None => Err(XngError::ImageDataTooShort { pass, row }),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const ALL: [FilterType; 5] =
    [FilterType::None, FilterType::Sub, FilterType::Up, FilterType::Average, FilterType::Paeth];

  #[test]
  fn test_filter_byte_pairs_with_unfilter_byte() {
    // every a,b,c for a spread of x values, then every x for a spread of a,b,c
    let spread = [0_u8, 1, 2, 3, 7, 64, 127, 128, 129, 200, 254, 255];
    for f in ALL {
      for a in 0..=255_u8 {
        for b in spread {
          for c in spread {
            for x in spread {
              let fx = filter_byte(f, x, a, b, c);
              assert_eq!(unfilter_byte(f, fx, a, b, c), x, "{f:?} x:{x} a:{a} b:{b} c:{c}");
            }
          }
        }
      }
      for x in 0..=255_u8 {
        for a in spread {
          for b in spread {
            for c in spread {
              let fx = filter_byte(f, x, a, b, c);
              assert_eq!(unfilter_byte(f, fx, a, b, c), x, "{f:?} x:{x} a:{a} b:{b} c:{c}");
            }
          }
        }
      }
    }
  }

  #[test]
  fn test_paeth_tie_breaks() {
    // p = a + b - c
    assert_eq!(paeth_predictor(0, 0, 0), 0);
    // all distances equal, so `a` wins
    assert_eq!(paeth_predictor(5, 5, 5), 5);
    // p = 10, pa = 0
    assert_eq!(paeth_predictor(10, 7, 7), 10);
    // p = 7, pa = 3, pb = 0
    assert_eq!(paeth_predictor(10, 7, 10), 7);
    // p = 2: pa = 2, pb = 4, pc = 2, so `a` wins the tie with `c`
    assert_eq!(paeth_predictor(0, 6, 4), 0);
    // p = 7: pa = 4, pb = 2, pc = 2, so `b` wins the tie with `c`
    assert_eq!(paeth_predictor(3, 9, 5), 9);
    // p = 50: pa = 50, pb = 40, pc = 10
    assert_eq!(paeth_predictor(100, 10, 60), 60);
  }

  #[test]
  fn test_average_has_no_rounding() {
    assert_eq!(unfilter_byte(FilterType::Average, 0, 255, 254, 0), 254);
    assert_eq!(unfilter_byte(FilterType::Average, 0, 1, 0, 0), 0);
    assert_eq!(unfilter_byte(FilterType::Average, 0, 3, 0, 0), 1);
  }

  #[test]
  fn test_scanline_round_trip() {
    let previous = [3_u8, 200, 17, 99, 0, 255, 128, 64, 1];
    let current = [250_u8, 4, 77, 77, 12, 255, 0, 9, 130];
    for filter_chunk_size in 1..=3 {
      for f in ALL {
        for prev in [&previous[..], &[][..]] {
          let mut filtered = [0_u8; 9];
          filter_scanline(f, filter_chunk_size, &current, prev, &mut filtered);
          unfilter_scanline(f, filter_chunk_size, &mut filtered, prev);
          assert_eq!(filtered, current, "{f:?} size:{filter_chunk_size} prev:{}", prev.len());
        }
      }
    }
  }

  #[test]
  fn test_unknown_filter_type_is_reported() {
    let mut line = [5_u8, 1, 2, 3];
    assert_eq!(
      split_filterline(&mut line, 3, 9).unwrap_err(),
      XngError::UnknownFilterType { pass: 3, row: 9, filter: 5 }
    );
    let mut line = [2_u8, 1, 2, 3];
    let (f, pixels) = split_filterline(&mut line, 0, 0).unwrap();
    assert_eq!(f, FilterType::Up);
    assert_eq!(pixels, &[1, 2, 3]);
  }
}
