use super::*;

/// Transparency
///
/// The meaning of the bytes depends on the image's color type, so they're
/// kept as-is:
/// * greyscale: one `u16` BE, the grey level that's fully transparent.
/// * RGB: three `u16` BE, the color that's fully transparent.
/// * indexed: one alpha byte per palette entry. There can be fewer alpha
///   entries than palette entries (missing entries are fully opaque, `0xFF`).
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(nonstandard_style)]
pub struct tRNS {
  data: Vec<u8>,
}
impl tRNS {
  #[inline]
  #[must_use]
  pub const fn new(data: Vec<u8>) -> Self {
    Self { data }
  }

  #[inline]
  #[must_use]
  pub fn data(&self) -> &[u8] {
    &self.data
  }

  /// The transparent grey level, if the data is the right size for it.
  #[inline]
  #[must_use]
  pub fn to_grayscale(&self) -> Option<u16> {
    match *self.data {
      [y0, y1] => Some(u16::from_be_bytes([y0, y1])),
      _ => None,
    }
  }

  /// The transparent RGB color, if the data is the right size for it.
  #[inline]
  #[must_use]
  pub fn to_rgb(&self) -> Option<[u16; 3]> {
    match *self.data {
      [r0, r1, g0, g1, b0, b1] => Some([
        u16::from_be_bytes([r0, r1]),
        u16::from_be_bytes([g0, g1]),
        u16::from_be_bytes([b0, b1]),
      ]),
      _ => None,
    }
  }

  /// Per-palette-entry alpha values.
  #[inline]
  #[must_use]
  pub fn alphas(&self) -> &[u8] {
    &self.data
  }
}
impl Debug for tRNS {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_tuple("tRNS").field(&&self.data[..self.data.len().min(8)]).field(&self.data.len()).finish()
  }
}
impl ChunkRecord for tRNS {
  const TYPE: ChunkType = ChunkType::tRNS;

  #[inline]
  fn read_from<R: Read>(reader: &mut ChunkReader<R>) -> Result<Self, XngError> {
    reader.read_remaining().map(Self::new)
  }

  #[inline]
  fn data_len(&self) -> usize {
    self.data.len()
  }

  #[inline]
  fn write_fields<W: Write>(&self, writer: &mut ChunkWriter<W>) -> Result<(), XngError> {
    writer.write_all(&self.data)
  }
}

#[test]
fn test_trns_views() {
  let t = tRNS::new(alloc::vec![0x01, 0x02]);
  assert_eq!(t.to_grayscale(), Some(0x0102));
  assert_eq!(t.to_rgb(), None);
  let t = tRNS::new(alloc::vec![0, 1, 0, 2, 0, 3]);
  assert_eq!(t.to_grayscale(), None);
  assert_eq!(t.to_rgb(), Some([1, 2, 3]));
  assert_eq!(t.alphas().len(), 6);
}
