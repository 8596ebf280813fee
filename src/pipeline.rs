//! Moving between decompressed image data and pixel positions.
//!
//! Decompressed image data is a series of reduced images (one, or seven when
//! interlaced), each a series of filter lines: a filter type byte followed by
//! one packed scanline. Every reduced image starts over with no "previous"
//! scanline.

use crate::{filtering::split_filterline, packing::read_sample, unfilter_scanline, XngError, IHDR};

#[cfg(feature = "alloc")]
use crate::{bytes_per_scanline, check_sample, filter_scanline, packing::write_sample, FilterType};
#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// The most channels any color type has.
const MAX_CHANNELS: usize = 4;

/// The header's fields are public, so they might not have been checked.
#[inline]
fn check_header_bit_depth(header: &IHDR) -> Result<(), XngError> {
  if header.color_type.allows_bit_depth(header.bit_depth) {
    Ok(())
  } else {
    Err(XngError::InvalidBitDepth(header.bit_depth))
  }
}

/// Given the `header`, `decompressed` buffer, and a per-pixel `op`, unfilters
/// the data and passes each pixel to the `op` as unfiltering proceeds.
///
/// Each call to the `op` gets `|x, y, samples|`, where `x` and `y` are the
/// position of the pixel within the full image and `samples` has one value
/// per channel of the color type. Every sample is within the bit depth.
///
/// Reduced images are visited in pass order and rows top to bottom. The data
/// is unfiltered in place.
///
/// ## Failure
/// * The header's bit depth isn't allowed with its color type.
/// * The data runs out before the last row of the last non-empty pass.
/// * A filter line has an unknown filter type byte.
/// * There's data left over after the last row.
/// * Any error returned by `op`, which stops the unfiltering immediately.
pub fn unfilter_decompressed_data<F>(
  header: &IHDR, mut decompressed: &mut [u8], mut op: F,
) -> Result<(), XngError>
where
  F: FnMut(u32, u32, &[u16]) -> Result<(), XngError>,
{
  check_header_bit_depth(header)?;
  let filter_chunk_size = header.filter_chunk_size();
  let channels = header.color_type.channel_count();

  for (pass_index, pass) in header.interlace_method.passes().iter().enumerate() {
    let (reduced_width, reduced_height) = pass.reduced_dimensions(header.width, header.height);
    if reduced_width == 0 || reduced_height == 0 {
      // while the full image can't be empty, a reduced image can be.
      continue;
    }
    let bytes_per_filterline = header.bytes_per_filterline(reduced_width);

    let mut previous: &[u8] = &[];
    for reduced_y in 0..reduced_height {
      if decompressed.len() < bytes_per_filterline {
        return Err(XngError::ImageDataTooShort { pass: pass_index, row: reduced_y });
      }
      let (filterline, rest) = core::mem::take(&mut decompressed).split_at_mut(bytes_per_filterline);
      decompressed = rest;
      let (filter, pixels) = split_filterline(filterline, pass_index, reduced_y)?;
      unfilter_scanline(filter, filter_chunk_size, pixels, previous);

      let mut samples = [0_u16; MAX_CHANNELS];
      for reduced_x in 0..reduced_width {
        let first = reduced_x as usize * channels;
        for (c, s) in samples[..channels].iter_mut().enumerate() {
          *s = read_sample(pixels, first + c, header.bit_depth);
        }
        let (x, y) = pass.full_position(reduced_x, reduced_y);
        op(x, y, &samples[..channels])?;
      }
      previous = pixels;
    }
  }

  if decompressed.is_empty() {
    Ok(())
  } else {
    Err(XngError::ImageDataTooLong)
  }
}

/// Builds decompressed image data by asking `source` for each pixel.
///
/// Each call to `source` gets `|x, y, samples|` and must fill `samples` (one
/// per channel) for that position of the full image. Pixels are requested in
/// storage order, so an interlaced header visits each position once per image
/// but not in raster order.
///
/// Every scanline is filtered with `filter`.
///
/// ## Failure
/// * The header's bit depth isn't allowed with its color type.
/// * A sample from `source` doesn't fit the bit depth.
/// * Any error returned by `source`.
/// * Allocation failure.
#[cfg(feature = "alloc")]
pub fn filter_image_data<F>(
  header: &IHDR, filter: FilterType, mut source: F,
) -> Result<Vec<u8>, XngError>
where
  F: FnMut(u32, u32, &mut [u16]) -> Result<(), XngError>,
{
  check_header_bit_depth(header)?;
  let mut out: Vec<u8> = Vec::new();
  out.try_reserve(header.get_zlib_decompression_requirement()?)?;

  let filter_chunk_size = header.filter_chunk_size();
  let channels = header.color_type.channel_count();
  let mut previous: Vec<u8> = Vec::new();
  let mut current: Vec<u8> = Vec::new();

  for pass in header.interlace_method.passes() {
    let (reduced_width, reduced_height) = pass.reduced_dimensions(header.width, header.height);
    if reduced_width == 0 || reduced_height == 0 {
      continue;
    }
    let line_len = bytes_per_scanline(reduced_width, channels, header.bit_depth);
    current.try_reserve(line_len)?;
    previous.clear();

    for reduced_y in 0..reduced_height {
      current.clear();
      current.resize(line_len, 0);
      let mut samples = [0_u16; MAX_CHANNELS];
      for reduced_x in 0..reduced_width {
        let (x, y) = pass.full_position(reduced_x, reduced_y);
        source(x, y, &mut samples[..channels])?;
        let first = reduced_x as usize * channels;
        for (c, s) in samples[..channels].iter().copied().enumerate() {
          check_sample(c, s, header.bit_depth)?;
          write_sample(&mut current, first + c, header.bit_depth, s);
        }
      }
      out.push(filter as u8);
      let start = out.len();
      out.resize(start + line_len, 0);
      filter_scanline(filter, filter_chunk_size, &current, &previous, &mut out[start..]);
      core::mem::swap(&mut previous, &mut current);
    }
  }
  Ok(out)
}
