//! Moving channel samples in and out of packed scanline bytes.
//!
//! * Bit depths 1, 2, and 4 pack several samples per byte, with the leftmost
//!   sample in the highest bits. The last byte of a scanline can have unused
//!   low bits, which are written as 0 and ignored when read.
//! * Bit depth 8 is one byte per sample.
//! * Bit depth 16 is two big-endian bytes per sample.
//!
//! Samples are always in channel order within a pixel, and pixels are in left
//! to right order within a scanline.

use crate::XngError;

/// The largest sample value a bit depth can hold.
#[inline]
#[must_use]
pub const fn max_sample(bit_depth: u8) -> u16 {
  match bit_depth {
    16 => u16::MAX,
    d if d < 16 => (1_u16 << d) - 1,
    _ => u16::MAX,
  }
}

/// The number of packed bytes in a scanline of `width` pixels, not counting
/// the filter type byte.
#[inline]
#[must_use]
pub const fn bytes_per_scanline(width: u32, channels: usize, bit_depth: u8) -> usize {
  let bits_per_pixel = channels.saturating_mul(bit_depth as usize);
  let bits_per_line = bits_per_pixel.saturating_mul(width as usize);
  (bits_per_line / 8) + (bits_per_line % 8 != 0) as usize
}

/// The distance from a byte to the byte it's filtered against.
///
/// This is the size of a whole pixel when pixels are a byte or more, and 1
/// otherwise.
#[inline]
#[must_use]
pub const fn filter_chunk_size(channels: usize, bit_depth: u8) -> usize {
  let bytes = (channels * bit_depth as usize) / 8;
  if bytes == 0 {
    1
  } else {
    bytes
  }
}

/// Checks that a bit depth is one PNG uses for samples: 1, 2, 4, 8, or 16.
#[inline]
pub const fn check_bit_depth(bit_depth: u8) -> Result<(), XngError> {
  match bit_depth {
    1 | 2 | 4 | 8 | 16 => Ok(()),
    _ => Err(XngError::InvalidBitDepth(bit_depth)),
  }
}

/// Reads the sample with the given index out of packed bytes.
///
/// The bit depth must already be checked.
///
/// ## Panics
/// * If the index is past the end of the bytes.
#[inline]
#[must_use]
pub(crate) fn read_sample(bytes: &[u8], index: usize, bit_depth: u8) -> u16 {
  match bit_depth {
    16 => u16::from_be_bytes([bytes[index * 2], bytes[index * 2 + 1]]),
    8 => u16::from(bytes[index]),
    1 | 2 | 4 => {
      let bit_depth = usize::from(bit_depth);
      let bit_position = index * bit_depth;
      let down_shift = 8 - bit_depth - (bit_position % 8);
      let mask = max_sample(bit_depth as u8);
      (u16::from(bytes[bit_position / 8]) >> down_shift) & mask
    }
    _ => unreachable!("illegal bit depth"),
  }
}

/// Writes a sample with the given index into packed bytes.
///
/// For sub-byte depths the sample's bits are OR-ed into place, so the bytes
/// should start zeroed. Bits above the bit depth are discarded. The bit depth
/// must already be checked.
///
/// ## Panics
/// * If the index is past the end of the bytes.
#[inline]
pub(crate) fn write_sample(bytes: &mut [u8], index: usize, bit_depth: u8, value: u16) {
  match bit_depth {
    16 => {
      let [hi, lo] = value.to_be_bytes();
      bytes[index * 2] = hi;
      bytes[index * 2 + 1] = lo;
    }
    8 => bytes[index] = value as u8,
    1 | 2 | 4 => {
      let bit_depth = usize::from(bit_depth);
      let bit_position = index * bit_depth;
      let up_shift = 8 - bit_depth - (bit_position % 8);
      let bits = (value & max_sample(bit_depth as u8)) as u8;
      bytes[bit_position / 8] |= bits << up_shift;
    }
    _ => unreachable!("illegal bit depth"),
  }
}

/// Checks that a sample fits within the bit depth.
#[inline]
pub const fn check_sample(channel: usize, value: u16, bit_depth: u8) -> Result<(), XngError> {
  if value > max_sample(bit_depth) {
    Err(XngError::SampleOutOfRange { channel, value, bit_depth })
  } else {
    Ok(())
  }
}

/// Packs a row of samples into scanline bytes.
///
/// `samples` holds `channels` samples per pixel, and `out` must be exactly
/// [`bytes_per_scanline`] long for that many pixels.
///
/// ## Failure
/// * The bit depth isn't 1, 2, 4, 8, or 16.
/// * `channels` isn't 1 through 4.
/// * The samples don't divide into whole pixels.
/// * `out` is the wrong length.
/// * Any sample too big for the bit depth. Nothing is clamped.
pub fn pack_row(
  samples: &[u16], channels: usize, bit_depth: u8, out: &mut [u8],
) -> Result<(), XngError> {
  check_bit_depth(bit_depth)?;
  if !(1..=4).contains(&channels) {
    return Err(XngError::InvalidChannelCount(channels));
  }
  if samples.len() % channels != 0 {
    let expected = samples.len().div_ceil(channels) * channels;
    return Err(XngError::WrongSampleCount { expected, given: samples.len() });
  }
  let width = u32::try_from(samples.len() / channels)?;
  let expected = bytes_per_scanline(width, channels, bit_depth);
  if out.len() != expected {
    return Err(XngError::WrongScanlineLength { expected, given: out.len() });
  }
  out.fill(0);
  for (i, value) in samples.iter().copied().enumerate() {
    check_sample(i % channels, value, bit_depth)?;
    write_sample(out, i, bit_depth, value);
  }
  Ok(())
}

/// Unpacks scanline bytes into a row of samples, filling all of `out`.
///
/// Every sample produced is within the bit depth, and padding bits at the end
/// of a sub-byte row are ignored.
///
/// ## Failure
/// * The bit depth isn't 1, 2, 4, 8, or 16.
/// * `bytes` is too short for the number of samples.
pub fn unpack_row(bytes: &[u8], bit_depth: u8, out: &mut [u16]) -> Result<(), XngError> {
  check_bit_depth(bit_depth)?;
  let bits_needed = out.len().checked_mul(usize::from(bit_depth)).ok_or(XngError::CheckedMath)?;
  let expected = bits_needed.div_ceil(8);
  if bytes.len() < expected {
    return Err(XngError::WrongScanlineLength { expected, given: bytes.len() });
  }
  for (i, s) in out.iter_mut().enumerate() {
    *s = read_sample(bytes, i, bit_depth);
  }
  Ok(())
}
