use xng::{
  decode_image, encode_image, Bitmap, ColorType, EncodeOptions, ErrorClass, Image, Palmap,
  XngError, XngFile, RGBA8,
};

/// The pixel pattern every corpus image was generated with.
fn corpus_sample(x: u32, y: u32, channel: u32, bit_depth: u8) -> u16 {
  if bit_depth == 16 {
    ((x * 7919 + y * 104729 + channel * 7) % 65536) as u16
  } else {
    ((x * 7 + y * 13 + channel * 29) % (1 << bit_depth)) as u16
  }
}

fn corpus_palette_entry(i: usize, alphas: &[u8]) -> RGBA8 {
  let a = alphas.get(i).copied().unwrap_or(255);
  RGBA8::new(((i * 37) % 256) as u8, ((i * 91) % 256) as u8, ((i * 13) % 256) as u8, a)
}

fn check_corpus_pixels(name: &str, image: &Image) {
  match image {
    Image::Bitmap(b) => {
      for y in 0..b.height() {
        for x in 0..b.width() {
          let samples = b.get_samples(x, y).unwrap();
          for (c, s) in samples.iter().enumerate() {
            assert_eq!(*s, corpus_sample(x, y, c as u32, b.bit_depth()), "{name}: ({x},{y}) channel {c}");
          }
        }
      }
    }
    Image::Palmap(p) => {
      let alphas: &[u8] = if name.contains("trns") { &[0, 64, 128] } else { &[] };
      for (i, entry) in p.palette().iter().enumerate() {
        assert_eq!(*entry, corpus_palette_entry(i, alphas), "{name}: palette entry {i}");
      }
      for y in 0..p.height() {
        for x in 0..p.width() {
          let expected = ((x + y * 3) as usize % p.palette().len()) as u8;
          assert_eq!(p.get_index(x, y).unwrap(), expected, "{name}: ({x},{y})");
        }
      }
    }
  }
}

#[test]
fn test_decode_corpus() {
  let mut decoded = 0;
  for (name, bytes) in super::corpus() {
    if !name.ends_with(".png") || name.starts_with("fail_") {
      continue;
    }
    let image = Image::from_png_bytes(&bytes).unwrap_or_else(|e| panic!("{name}: {e}"));
    check_corpus_pixels(&name, &image);
    // and it survives being written back out (without interlacing or filters)
    let again = Image::from_png_bytes(&image.to_png_bytes().unwrap()).unwrap();
    assert_eq!(again, image, "{name}");
    decoded += 1;
  }
  assert!(decoded >= 9);
}

#[test]
fn test_corpus_headers() {
  let image = Image::from_png_bytes(&std::fs::read("tests/files/rgba8_7x11_adam7.png").unwrap()).unwrap();
  assert_eq!((image.width(), image.height()), (7, 11));
  assert_eq!(image.color_type(), ColorType::RGBA);
  let image = Image::from_png_bytes(&std::fs::read("tests/files/gray2_9x9_adam7.png").unwrap()).unwrap();
  assert_eq!((image.color_type(), image.bit_depth()), (ColorType::Y, 2));
  let image = Image::from_png_bytes(&std::fs::read("tests/files/index4_6x4_trns.png").unwrap()).unwrap();
  assert_eq!((image.color_type(), image.bit_depth()), (ColorType::Index, 4));
}

#[test]
fn test_corpus_failures() {
  let bad_filter = std::fs::read("tests/files/fail_bad_filter.png").unwrap();
  let err = Image::from_png_bytes(&bad_filter).unwrap_err();
  assert_eq!(err, XngError::UnknownFilterType { pass: 0, row: 0, filter: 5 });
  assert_eq!(err.class(), ErrorClass::UnsupportedFeature);

  let bad_crc = std::fs::read("tests/files/fail_bad_crc.png").unwrap();
  assert_eq!(Image::from_png_bytes(&bad_crc).unwrap_err().class(), ErrorClass::ChecksumMismatch);

  let mng = std::fs::read("tests/files/empty.mng").unwrap();
  assert_eq!(Image::from_png_bytes(&mng), Err(XngError::NotPngSignature));
}

const LAYOUTS: &[(ColorType, &[u8])] = &[
  (ColorType::Y, &[1, 2, 4, 8, 16]),
  (ColorType::RGB, &[8, 16]),
  (ColorType::Index, &[1, 2, 4, 8]),
  (ColorType::YA, &[8, 16]),
  (ColorType::RGBA, &[8, 16]),
];

const SIZES: &[(u32, u32)] = &[(1, 1), (7, 11), (9, 3), (17, 2)];

fn random_image(color_type: ColorType, bit_depth: u8, width: u32, height: u32) -> Image {
  let max = u32::from(xng::max_sample(bit_depth));
  let channels = color_type.channel_count();
  let noise = super::rand_bytes((width * height) as usize * channels * 2);
  let mut noise = noise.chunks_exact(2).map(|b| u32::from(u16::from_ne_bytes([b[0], b[1]])));
  if color_type == ColorType::Index {
    let palette_len = (max as usize + 1).min(256);
    let palette: Vec<RGBA8> = super::rand_bytes(palette_len * 4)
      .chunks_exact(4)
      .map(|c| RGBA8::new(c[0], c[1], c[2], c[3]))
      .collect();
    let mut p = Palmap::new(width, height, bit_depth, palette).unwrap();
    for y in 0..height {
      for x in 0..width {
        let index = noise.next().unwrap() % palette_len as u32;
        p.set_index(x, y, index as u8).unwrap();
      }
    }
    Image::Palmap(p)
  } else {
    let mut b = Bitmap::new(width, height, color_type, bit_depth).unwrap();
    let mut samples = vec![0_u16; channels];
    for y in 0..height {
      for x in 0..width {
        for s in samples.iter_mut() {
          *s = (noise.next().unwrap() % (max + 1)) as u16;
        }
        b.set_samples(x, y, &samples).unwrap();
      }
    }
    Image::Bitmap(b)
  }
}

#[test]
fn test_round_trip_every_layout() {
  for (color_type, depths) in LAYOUTS {
    for bit_depth in depths.iter().copied() {
      for (width, height) in SIZES.iter().copied() {
        let image = random_image(*color_type, bit_depth, width, height);
        let bytes = image.to_png_bytes().unwrap();
        let decoded = Image::from_png_bytes(&bytes)
          .unwrap_or_else(|e| panic!("{color_type:?} {bit_depth} {width}x{height}: {e}"));
        assert_eq!(decoded, image, "{color_type:?} {bit_depth} {width}x{height}");
      }
    }
  }
}

#[test]
fn test_sample_range_is_enforced() {
  for (color_type, depths) in LAYOUTS {
    if *color_type == ColorType::Index {
      continue;
    }
    for bit_depth in depths.iter().copied() {
      let mut b = Bitmap::new(2, 2, *color_type, bit_depth).unwrap();
      let channels = color_type.channel_count();
      let top = xng::max_sample(bit_depth);
      b.set_samples(1, 1, &vec![top; channels]).unwrap();
      if bit_depth < 16 {
        let mut samples = vec![0; channels];
        samples[channels - 1] = top + 1;
        let err = b.set_samples(0, 0, &samples).unwrap_err();
        assert_eq!(err.class(), ErrorClass::RangeViolation);
      }
      assert_eq!(
        b.set_samples(2, 0, &vec![0; channels]),
        Err(XngError::OutOfBounds { x: 2, y: 0 })
      );
    }
  }
}

#[test]
fn test_encode_options() {
  let image = random_image(ColorType::RGB, 8, 40, 40);
  let small = EncodeOptions { compression_level: 0, max_idat_len: 100 };
  let file = encode_image(&image, &small).unwrap();
  let idats: Vec<usize> = file
    .chunks
    .iter()
    .filter_map(|c| match c {
      xng::Chunk::IDAT(d) => Some(d.data().len()),
      _ => None,
    })
    .collect();
  // stored deflate can't be smaller than the raw data
  assert!(idats.iter().sum::<usize>() >= 40 * (1 + 40 * 3));
  assert!(idats.iter().all(|len| *len <= 100));
  let bytes = file.to_bytes().unwrap();
  assert_eq!(decode_image(&XngFile::from_bytes(&bytes).unwrap()).unwrap(), image);
}
