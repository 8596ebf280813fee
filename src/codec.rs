//! Turning a PNG file's chunks into an [`Image`] and back.
//!
//! This requires the `std` and `miniz_oxide` crate features.
//!
//! Decoding follows these steps:
//!
//! 1. Check the chunk order: `IHDR` first, `IEND` last, an optional `PLTE`
//!    (required for indexed color) and optional `tRNS` before the image data,
//!    and all `IDAT` chunks in one unbroken run.
//! 2. Inflate the concatenated `IDAT` payloads into a buffer of exactly the
//!    size the header calls for, with miniz_oxide's
//!    [`decompress`](miniz_oxide::inflate::core::decompress) fed one chunk at
//!    a time. Nothing may follow the end of the zlib stream.
//! 3. Unfilter, de-interlace, and unpack with
//!    [`unfilter_decompressed_data`], storing each pixel into the image.
//!
//! Encoding never interlaces and always uses filter type None.

use std::io::{Read, Write};

use alloc::vec::Vec;

use miniz_oxide::inflate::{
  core::{decompress, inflate_flags, DecompressorOxide},
  TINFLStatus,
};

use crate::{
  filter_image_data, image::check_palette_len, unfilter_decompressed_data, Bitmap, Chunk,
  ChunkType, ColorType, FilterType, Image, InterlaceMethod, Palmap, Signature, XngError, XngFile,
  IDAT, IEND, IHDR, PLTE, RGB8, RGBA8,
};

/// The largest width or height that [`decode_image`] will allocate for.
pub const MAX_DECODE_DIMENSION: u32 = 17_000;

/// Settings for [`encode_image`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EncodeOptions {
  /// The zlib compression level, 0 (none) to 10 (best, slowest).
  pub compression_level: u8,
  /// The most compressed bytes to put in one `IDAT` chunk. The image data is
  /// split over as many chunks as needed. Must be at least 1.
  pub max_idat_len: usize,
}
impl Default for EncodeOptions {
  #[inline]
  fn default() -> Self {
    Self { compression_level: 6, max_idat_len: 0x8000 }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DataStage {
  Before,
  During,
  After,
}

/// The chunks of a PNG that matter for decoding, with the ordering rules
/// checked.
struct ImageChunks<'a> {
  ihdr: IHDR,
  plte: Option<&'a PLTE>,
  trns: Option<&'a crate::tRNS>,
}

fn collect_image_chunks(file: &XngFile) -> Result<ImageChunks<'_>, XngError> {
  if file.signature != Signature::Png {
    return Err(XngError::NotPngSignature);
  }
  let ihdr = match file.chunks.first() {
    Some(Chunk::IHDR(ihdr)) => *ihdr,
    Some(other) => return Err(XngError::MisplacedChunk(other.chunk_type())),
    None => return Err(XngError::MissingChunk(ChunkType::IHDR)),
  };
  let middle = match file.chunks.last() {
    Some(Chunk::IEND(_)) if file.chunks.len() >= 2 => &file.chunks[1..file.chunks.len() - 1],
    _ => return Err(XngError::MissingChunk(ChunkType::IEND)),
  };

  let mut plte = None;
  let mut trns = None;
  let mut stage = DataStage::Before;
  for chunk in middle {
    match chunk {
      Chunk::IHDR(_) | Chunk::IEND(_) => return Err(XngError::MisplacedChunk(chunk.chunk_type())),
      Chunk::PLTE(p) => {
        if plte.is_some() || trns.is_some() || stage != DataStage::Before {
          return Err(XngError::MisplacedChunk(ChunkType::PLTE));
        }
        plte = Some(p);
      }
      Chunk::tRNS(t) => {
        if trns.is_some() || stage != DataStage::Before {
          return Err(XngError::MisplacedChunk(ChunkType::tRNS));
        }
        trns = Some(t);
      }
      Chunk::IDAT(_) => match stage {
        DataStage::After => return Err(XngError::MisplacedChunk(ChunkType::IDAT)),
        _ => stage = DataStage::During,
      },
      Chunk::Custom(c) => {
        if c.chunk_type.is_critical() {
          return Err(XngError::UnsupportedCriticalChunk(c.chunk_type));
        }
        if stage == DataStage::During {
          stage = DataStage::After;
        }
      }
    }
  }
  if stage == DataStage::Before {
    return Err(XngError::MissingChunk(ChunkType::IDAT));
  }
  match (ihdr.color_type, plte) {
    (ColorType::Index, None) => return Err(XngError::MissingChunk(ChunkType::PLTE)),
    (ColorType::Y | ColorType::YA, Some(_)) => return Err(XngError::MisplacedChunk(ChunkType::PLTE)),
    _ => (),
  }
  Ok(ImageChunks { ihdr, plte, trns })
}

/// Builds the RGBA palette of an indexed image from its `PLTE` and `tRNS`.
fn build_palette(ihdr: &IHDR, plte: &PLTE, trns: Option<&crate::tRNS>) -> Result<Vec<RGBA8>, XngError> {
  let entries = plte.entries();
  check_palette_len(entries.len(), ihdr.bit_depth)?;
  let alphas = trns.map(|t| t.alphas()).unwrap_or(&[]);
  if alphas.len() > entries.len() {
    return Err(XngError::InvalidChunkData(ChunkType::tRNS));
  }
  let mut palette = Vec::new();
  palette.try_reserve_exact(entries.len())?;
  palette.extend(entries.iter().enumerate().map(|(i, rgb)| {
    let mut rgba = RGBA8::from(*rgb);
    if let Some(a) = alphas.get(i) {
      rgba.a = *a;
    }
    rgba
  }));
  Ok(palette)
}

/// Inflates the payloads of every `IDAT` chunk as one zlib stream into `out`,
/// giving the number of bytes written.
///
/// ## Failure
/// * The stream is invalid, or ends before its end marker.
/// * The stream doesn't fit in `out`.
/// * Any compressed bytes follow the end of the stream, in the same chunk or
///   in a later one.
fn inflate_idats(file: &XngFile, out: &mut [u8]) -> Result<usize, XngError> {
  let mut idats = file
    .chunks
    .iter()
    .filter_map(|chunk| match chunk {
      Chunk::IDAT(idat) => Some(idat.data()),
      _ => None,
    })
    .peekable();
  let mut decompressor = DecompressorOxide::new();
  let mut out_pos = 0;
  let mut finished = false;
  while let Some(mut input) = idats.next() {
    if finished {
      if input.is_empty() {
        continue;
      }
      return Err(XngError::TrailingCompressedData);
    }
    let mut flags = inflate_flags::TINFL_FLAG_PARSE_ZLIB_HEADER
      | inflate_flags::TINFL_FLAG_COMPUTE_ADLER32
      | inflate_flags::TINFL_FLAG_USING_NON_WRAPPING_OUTPUT_BUF;
    if idats.peek().is_some() {
      flags |= inflate_flags::TINFL_FLAG_HAS_MORE_INPUT;
    }
    let (status, read, written) = decompress(&mut decompressor, input, out, out_pos, flags);
    out_pos += written;
    input = &input[read..];
    match status {
      TINFLStatus::Done if input.is_empty() => finished = true,
      TINFLStatus::Done => return Err(XngError::TrailingCompressedData),
      TINFLStatus::NeedsMoreInput => (),
      TINFLStatus::HasMoreOutput => return Err(XngError::ImageDataTooLong),
      _ => return Err(XngError::Decompression),
    }
  }
  if finished {
    Ok(out_pos)
  } else {
    Err(XngError::Decompression)
  }
}

/// Decodes the image in a PNG file.
///
/// ## Failure
/// * The file isn't a PNG, or its chunks break the ordering rules.
/// * The width or height is more than [`MAX_DECODE_DIMENSION`].
/// * An unknown critical chunk is present. Unknown ancillary chunks are
///   skipped.
/// * The image data isn't valid zlib, inflates to the wrong size, or has
///   bytes after the end of the zlib stream.
/// * A scanline has an unknown filter type.
/// * An indexed pixel is past the end of the palette.
pub fn decode_image(file: &XngFile) -> Result<Image, XngError> {
  let ImageChunks { ihdr, plte, trns } = collect_image_chunks(file)?;
  if ihdr.width > MAX_DECODE_DIMENSION || ihdr.height > MAX_DECODE_DIMENSION {
    return Err(XngError::DimensionsTooLarge { width: ihdr.width, height: ihdr.height });
  }
  let required = ihdr.get_zlib_decompression_requirement()?;
  log::debug!(
    "decoding {}x{} {:?} image, bit depth {}, {:?} interlace ({} passes), {required} bytes of image data",
    ihdr.width,
    ihdr.height,
    ihdr.color_type,
    ihdr.bit_depth,
    ihdr.interlace_method,
    ihdr.interlace_method.passes().len(),
  );

  // one byte of slack tells "exactly enough" apart from "too much".
  let mut buffer: Vec<u8> = Vec::new();
  let buffer_len = required.checked_add(1).ok_or(XngError::CheckedMath)?;
  buffer.try_reserve_exact(buffer_len)?;
  buffer.resize(buffer_len, 0);
  let produced = inflate_idats(file, &mut buffer)?;
  if produced > required {
    return Err(XngError::ImageDataTooLong);
  }
  let data = &mut buffer[..produced];

  if ihdr.color_type == ColorType::Index {
    let plte = plte.ok_or(XngError::MissingChunk(ChunkType::PLTE))?;
    let palette = build_palette(&ihdr, plte, trns)?;
    let mut palmap = Palmap::new(ihdr.width, ihdr.height, ihdr.bit_depth, palette)?;
    unfilter_decompressed_data(&ihdr, data, |x, y, samples| {
      // samples are within the bit depth, which is at most 8
      palmap.set_index(x, y, samples[0] as u8)
    })?;
    Ok(Image::Palmap(palmap))
  } else {
    if trns.is_some() {
      log::warn!("ignoring tRNS chunk of a {:?} image", ihdr.color_type);
    }
    if plte.is_some() {
      log::debug!("ignoring suggested palette of a {:?} image", ihdr.color_type);
    }
    let mut bitmap = Bitmap::new(ihdr.width, ihdr.height, ihdr.color_type, ihdr.bit_depth)?;
    unfilter_decompressed_data(&ihdr, data, |x, y, samples| bitmap.set_samples(x, y, samples))?;
    Ok(Image::Bitmap(bitmap))
  }
}

/// Encodes an image as a PNG file.
///
/// The chunks are `IHDR`, then `PLTE` and (when any palette entry isn't
/// fully opaque) `tRNS` for indexed images, then one or more `IDAT`, then
/// `IEND`.
///
/// ## Failure
/// * `options.max_idat_len` is 0.
/// * Allocation failure.
pub fn encode_image(image: &Image, options: &EncodeOptions) -> Result<XngFile, XngError> {
  if options.max_idat_len == 0 || options.max_idat_len > (i32::MAX as usize) {
    return Err(XngError::InvalidChunkLength(options.max_idat_len));
  }
  let ihdr = IHDR::new(
    image.width(),
    image.height(),
    image.bit_depth(),
    image.color_type(),
    InterlaceMethod::None,
  )?;
  let mut chunks = Vec::new();
  chunks.push(Chunk::IHDR(ihdr));

  if let Image::Palmap(palmap) = image {
    let rgb: Vec<RGB8> = palmap.palette().iter().map(|rgba| rgba.rgb()).collect();
    chunks.push(Chunk::PLTE(PLTE::new(rgb)?));
    let opaque_tail = palmap.palette().iter().rev().take_while(|rgba| rgba.a == 0xFF).count();
    let alpha_len = palmap.palette().len() - opaque_tail;
    if alpha_len > 0 {
      let alphas = palmap.palette()[..alpha_len].iter().map(|rgba| rgba.a).collect();
      chunks.push(Chunk::tRNS(crate::tRNS::new(alphas)));
    }
  }

  let data = filter_image_data(&ihdr, FilterType::None, |x, y, samples| match image {
    Image::Bitmap(bitmap) => {
      samples.copy_from_slice(bitmap.get_samples(x, y)?);
      Ok(())
    }
    Image::Palmap(palmap) => {
      samples[0] = u16::from(palmap.get_index(x, y)?);
      Ok(())
    }
  })?;
  let compressed =
    miniz_oxide::deflate::compress_to_vec_zlib(&data, options.compression_level.min(10));
  for part in compressed.chunks(options.max_idat_len) {
    let mut v = Vec::new();
    v.try_reserve_exact(part.len())?;
    v.extend_from_slice(part);
    chunks.push(Chunk::IDAT(IDAT::new(v)));
  }
  chunks.push(Chunk::IEND(IEND));
  log::debug!(
    "encoded {}x{} {:?} image, bit depth {}: {} bytes of image data compressed to {}",
    ihdr.width,
    ihdr.height,
    ihdr.color_type,
    ihdr.bit_depth,
    data.len(),
    compressed.len(),
  );
  Ok(XngFile { signature: Signature::Png, chunks })
}

impl Image {
  /// Decodes PNG bytes.
  #[inline]
  pub fn from_png_bytes(bytes: &[u8]) -> Result<Self, XngError> {
    decode_image(&XngFile::from_bytes(bytes)?)
  }

  /// Decodes a PNG from a stream.
  #[inline]
  pub fn read_png<R: Read>(source: R) -> Result<Self, XngError> {
    decode_image(&XngFile::read(source)?)
  }

  /// Encodes the image as PNG bytes with the default options.
  #[inline]
  pub fn to_png_bytes(&self) -> Result<Vec<u8>, XngError> {
    encode_image(self, &EncodeOptions::default())?.to_bytes()
  }

  /// Encodes the image as a PNG into a stream with the default options.
  #[inline]
  pub fn write_png<W: Write>(&self, out: W) -> Result<W, XngError> {
    encode_image(self, &EncodeOptions::default())?.write(out)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{tRNS, CustomChunk, ErrorClass};
  use alloc::vec;

  fn gray_2x2() -> Image {
    let mut b = Bitmap::new(2, 2, ColorType::Y, 8).unwrap();
    b.set_samples(1, 1, &[200]).unwrap();
    Image::Bitmap(b)
  }

  fn idat_of(ihdr: &IHDR, raw: &[u8]) -> Chunk {
    assert_eq!(raw.len(), ihdr.get_zlib_decompression_requirement().unwrap());
    Chunk::IDAT(IDAT::new(miniz_oxide::deflate::compress_to_vec_zlib(raw, 6)))
  }

  #[test]
  fn test_encoded_chunk_layout() {
    let file = encode_image(&gray_2x2(), &EncodeOptions::default()).unwrap();
    let types: Vec<ChunkType> = file.chunks.iter().map(Chunk::chunk_type).collect();
    assert_eq!(types, [ChunkType::IHDR, ChunkType::IDAT, ChunkType::IEND]);
    assert_eq!(file.signature, Signature::Png);
  }

  #[test]
  fn test_encoder_uses_filter_none() {
    let file = encode_image(&gray_2x2(), &EncodeOptions::default()).unwrap();
    let idat = match &file.chunks[1] {
      Chunk::IDAT(idat) => idat.data().to_vec(),
      other => panic!("{other:?}"),
    };
    let raw = miniz_oxide::inflate::decompress_to_vec_zlib(&idat).unwrap();
    assert_eq!(raw, [0, 0, 0, 0, 0, 200]);
  }

  #[test]
  fn test_idat_splitting() {
    let options = EncodeOptions { compression_level: 0, max_idat_len: 5 };
    let file = encode_image(&gray_2x2(), &options).unwrap();
    let idats: Vec<usize> = file
      .chunks
      .iter()
      .filter_map(|c| match c {
        Chunk::IDAT(d) => Some(d.data().len()),
        _ => None,
      })
      .collect();
    assert!(idats.len() > 1);
    assert!(idats.iter().all(|len| *len <= 5));
    assert_eq!(decode_image(&file).unwrap(), gray_2x2());
    assert_eq!(
      encode_image(&gray_2x2(), &EncodeOptions { compression_level: 6, max_idat_len: 0 }),
      Err(XngError::InvalidChunkLength(0))
    );
  }

  #[test]
  fn test_palette_and_transparency_round_trip() {
    let palette = vec![
      RGBA8::new(0, 0, 0, 0),
      RGBA8::new(255, 0, 0, 128),
      RGBA8::new(0, 255, 0, 255),
      RGBA8::new(0, 0, 255, 255),
    ];
    let mut p = Palmap::new(5, 3, 2, palette).unwrap();
    for (i, (x, y)) in [(0, 0), (4, 0), (2, 1), (3, 2), (1, 2)].into_iter().enumerate() {
      p.set_index(x, y, i as u8 % 4).unwrap();
    }
    let image = Image::Palmap(p);
    let file = encode_image(&image, &EncodeOptions::default()).unwrap();
    // trailing opaque entries don't need alpha values
    assert!(file.chunks.contains(&Chunk::tRNS(tRNS::new(vec![0, 128]))));
    let bytes = file.to_bytes().unwrap();
    assert_eq!(Image::from_png_bytes(&bytes).unwrap(), image);
  }

  #[test]
  fn test_opaque_palette_has_no_trns() {
    let p = Palmap::new(1, 1, 8, vec![RGBA8::new(1, 2, 3, 255)]).unwrap();
    let file = encode_image(&Image::Palmap(p), &EncodeOptions::default()).unwrap();
    assert!(!file.chunks.iter().any(|c| c.chunk_type() == ChunkType::tRNS));
  }

  #[test]
  fn test_ordering_rules() {
    let good = encode_image(&gray_2x2(), &EncodeOptions::default()).unwrap();
    let with = |f: fn(&mut Vec<Chunk>)| {
      let mut file = good.clone();
      f(&mut file.chunks);
      decode_image(&file)
    };
    assert!(with(|_| ()).is_ok());
    assert_eq!(with(|c| c.clear()), Err(XngError::MissingChunk(ChunkType::IHDR)));
    assert_eq!(with(|c| drop(c.pop())), Err(XngError::MissingChunk(ChunkType::IEND)));
    assert_eq!(with(|c| drop(c.remove(1))), Err(XngError::MissingChunk(ChunkType::IDAT)));
    assert_eq!(with(|c| c.swap(0, 1)), Err(XngError::MisplacedChunk(ChunkType::IDAT)));
    assert_eq!(
      with(|c| c.insert(1, Chunk::IEND(IEND))),
      Err(XngError::MisplacedChunk(ChunkType::IEND))
    );
    // gray images can't have a palette at all
    assert_eq!(
      with(|c| c.insert(1, Chunk::PLTE(PLTE::new(vec![RGB8::default()]).unwrap()))),
      Err(XngError::MisplacedChunk(ChunkType::PLTE))
    );
    // tRNS after the image data
    assert_eq!(
      with(|c| c.insert(2, Chunk::tRNS(tRNS::new(vec![0, 0])))),
      Err(XngError::MisplacedChunk(ChunkType::tRNS))
    );
    // but before it is fine, and ignored
    assert_eq!(with(|c| c.insert(1, Chunk::tRNS(tRNS::new(vec![0, 0])))), Ok(gray_2x2()));
    fn note() -> Chunk {
      Chunk::Custom(CustomChunk { chunk_type: ChunkType::try_from("noTe").unwrap(), data: vec![] })
    }
    // split IDAT runs
    assert_eq!(
      with(|c| {
        let idat = c[1].clone();
        c.insert(2, note());
        c.insert(3, idat);
      }),
      Err(XngError::MisplacedChunk(ChunkType::IDAT))
    );
    // unknown ancillary chunks are skipped, unknown critical chunks are not
    assert_eq!(with(|c| c.insert(1, note())), Ok(gray_2x2()));
    let crit = ChunkType::try_from("CRIT").unwrap();
    assert_eq!(
      with(|c| {
        let chunk_type = ChunkType::try_from("CRIT").unwrap();
        c.insert(1, Chunk::Custom(CustomChunk { chunk_type, data: vec![] }))
      }),
      Err(XngError::UnsupportedCriticalChunk(crit))
    );
    // only PNG files hold one image
    let mut mng = good.clone();
    mng.signature = Signature::Mng;
    assert_eq!(decode_image(&mng), Err(XngError::NotPngSignature));
  }

  #[test]
  fn test_indexed_needs_palette() {
    let ihdr = IHDR::new(2, 1, 8, ColorType::Index, InterlaceMethod::None).unwrap();
    let file = XngFile {
      signature: Signature::Png,
      chunks: vec![Chunk::IHDR(ihdr), idat_of(&ihdr, &[0, 0, 1]), Chunk::IEND(IEND)],
    };
    assert_eq!(decode_image(&file), Err(XngError::MissingChunk(ChunkType::PLTE)));
  }

  #[test]
  fn test_index_past_palette_end() {
    let ihdr = IHDR::new(2, 1, 8, ColorType::Index, InterlaceMethod::None).unwrap();
    let plte = Chunk::PLTE(PLTE::new(vec![RGB8::default(); 2]).unwrap());
    let file = XngFile {
      signature: Signature::Png,
      chunks: vec![Chunk::IHDR(ihdr), plte, idat_of(&ihdr, &[0, 1, 2]), Chunk::IEND(IEND)],
    };
    let err = decode_image(&file).unwrap_err();
    assert_eq!(err, XngError::PaletteIndexOutOfRange { index: 2, palette_len: 2 });
    assert_eq!(err.class(), ErrorClass::RangeViolation);
  }

  #[test]
  fn test_palette_too_big_for_bit_depth() {
    let ihdr = IHDR::new(1, 1, 1, ColorType::Index, InterlaceMethod::None).unwrap();
    let plte = Chunk::PLTE(PLTE::new(vec![RGB8::default(); 3]).unwrap());
    let file = XngFile {
      signature: Signature::Png,
      chunks: vec![Chunk::IHDR(ihdr), plte, idat_of(&ihdr, &[0, 0]), Chunk::IEND(IEND)],
    };
    assert_eq!(decode_image(&file), Err(XngError::InvalidPaletteLength(3)));
  }

  #[test]
  fn test_wrong_amounts_of_image_data() {
    let ihdr = IHDR::new(3, 2, 8, ColorType::Y, InterlaceMethod::None).unwrap();
    let build = |raw: &[u8]| XngFile {
      signature: Signature::Png,
      chunks: vec![
        Chunk::IHDR(ihdr),
        Chunk::IDAT(IDAT::new(miniz_oxide::deflate::compress_to_vec_zlib(raw, 6))),
        Chunk::IEND(IEND),
      ],
    };
    assert!(decode_image(&build(&[0, 1, 2, 3, 0, 4, 5, 6])).is_ok());
    assert_eq!(decode_image(&build(&[0, 1, 2, 3, 0, 4])), Err(XngError::ImageDataTooShort { pass: 0, row: 1 }));
    assert_eq!(decode_image(&build(&[0, 1, 2, 3, 0, 4, 5, 6, 7])), Err(XngError::ImageDataTooLong));
    assert_eq!(decode_image(&build(&[0; 100])), Err(XngError::ImageDataTooLong));
    let mut garbage = build(&[0; 8]);
    garbage.chunks[1] = Chunk::IDAT(IDAT::new(vec![1, 2, 3, 4, 5]));
    assert_eq!(decode_image(&garbage), Err(XngError::Decompression));
  }

  #[test]
  fn test_nothing_may_follow_the_zlib_stream() {
    let good = encode_image(&gray_2x2(), &EncodeOptions::default()).unwrap();
    // another IDAT after the one holding the whole stream
    let mut extra_chunk = good.clone();
    extra_chunk.chunks.insert(2, Chunk::IDAT(IDAT::new(vec![0xDE, 0xAD, 0xBE, 0xEF])));
    let err = decode_image(&extra_chunk).unwrap_err();
    assert_eq!(err, XngError::TrailingCompressedData);
    assert_eq!(err.class(), ErrorClass::MalformedData);
    // extra bytes at the end of the same IDAT
    let mut extra_bytes = good.clone();
    if let Chunk::IDAT(idat) = &extra_bytes.chunks[1] {
      let mut data = idat.data().to_vec();
      data.push(0);
      extra_bytes.chunks[1] = Chunk::IDAT(IDAT::new(data));
    }
    assert_eq!(decode_image(&extra_bytes), Err(XngError::TrailingCompressedData));
    // empty IDATs carry nothing, so they're fine anywhere in the run
    let mut empty_after = good.clone();
    empty_after.chunks.insert(2, Chunk::IDAT(IDAT::new(vec![])));
    empty_after.chunks.insert(1, Chunk::IDAT(IDAT::new(vec![])));
    assert_eq!(decode_image(&empty_after), Ok(gray_2x2()));
  }

  #[test]
  fn test_huge_dimensions_are_refused_before_allocating() {
    let big = MAX_DECODE_DIMENSION + 1;
    for (width, height) in [(big, 1), (1, big), (i32::MAX as u32, i32::MAX as u32)] {
      let ihdr = IHDR::new(width, height, 16, ColorType::RGBA, InterlaceMethod::None).unwrap();
      let file = XngFile {
        signature: Signature::Png,
        chunks: vec![
          Chunk::IHDR(ihdr),
          Chunk::IDAT(IDAT::new(miniz_oxide::deflate::compress_to_vec_zlib(&[0], 6))),
          Chunk::IEND(IEND),
        ],
      };
      let err = decode_image(&file).unwrap_err();
      assert_eq!(err, XngError::DimensionsTooLarge { width, height });
    }
  }

  #[test]
  fn test_interlaced_decode() {
    // Adam7 data for a 3x3 RGB8 image, with every pixel's channels set to
    // (x, y, x + y)
    let ihdr = IHDR::new(3, 3, 8, ColorType::RGB, InterlaceMethod::Adam7).unwrap();
    let mut raw = Vec::new();
    for pass in ihdr.interlace_method.passes() {
      let (w, h) = pass.reduced_dimensions(3, 3);
      if w == 0 || h == 0 {
        continue;
      }
      for ry in 0..h {
        raw.push(0);
        for rx in 0..w {
          let (x, y) = pass.full_position(rx, ry);
          raw.extend_from_slice(&[x as u8, y as u8, (x + y) as u8]);
        }
      }
    }
    let file = XngFile {
      signature: Signature::Png,
      chunks: vec![Chunk::IHDR(ihdr), idat_of(&ihdr, &raw), Chunk::IEND(IEND)],
    };
    let image = decode_image(&file).unwrap();
    let Image::Bitmap(b) = image else { panic!("not a bitmap") };
    for y in 0..3 {
      for x in 0..3 {
        assert_eq!(b.get_samples(x, y).unwrap(), &[x as u16, y as u16, (x + y) as u16]);
      }
    }
  }

  #[test]
  fn test_stream_helpers() {
    let mut out = Vec::new();
    gray_2x2().write_png(&mut out).unwrap();
    assert_eq!(Image::read_png(&out[..]).unwrap(), gray_2x2());
    assert_eq!(out, gray_2x2().to_png_bytes().unwrap());
  }
}
