use super::*;

/// Palette
///
/// Palette entries are always RGB. If you want to have a paletted image with
/// transparency then the transparency info goes in a separate [`tRNS`] chunk.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PLTE {
  entries: Vec<RGB8>,
}
impl PLTE {
  /// ## Failure
  /// * There must be 1 to 256 entries.
  #[inline]
  pub fn new(entries: Vec<RGB8>) -> Result<Self, XngError> {
    if entries.is_empty() || entries.len() > 256 {
      Err(XngError::InvalidPaletteLength(entries.len()))
    } else {
      Ok(Self { entries })
    }
  }

  /// Gets the entries as a slice.
  #[inline]
  #[must_use]
  pub fn entries(&self) -> &[RGB8] {
    &self.entries
  }
}
impl Debug for PLTE {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    // currently prints no more than 4 palette entries
    f.debug_tuple("PLTE")
      .field(&&self.entries[..self.entries.len().min(4)])
      .field(&self.entries.len())
      .finish()
  }
}
impl ChunkRecord for PLTE {
  const TYPE: ChunkType = ChunkType::PLTE;

  fn read_from<R: Read>(reader: &mut ChunkReader<R>) -> Result<Self, XngError> {
    let len = reader.remaining();
    if len == 0 || len > 256 * 3 || len % 3 != 0 {
      return Err(XngError::InvalidChunkData(ChunkType::PLTE));
    }
    let bytes = reader.read_remaining()?;
    let entries = bytemuck::try_cast_slice::<u8, RGB8>(&bytes)
      .map_err(|_| XngError::InvalidChunkData(ChunkType::PLTE))?;
    let mut v = Vec::new();
    v.try_reserve_exact(entries.len())?;
    v.extend_from_slice(entries);
    Ok(Self { entries: v })
  }

  #[inline]
  fn data_len(&self) -> usize {
    self.entries.len() * 3
  }

  #[inline]
  fn write_fields<W: Write>(&self, writer: &mut ChunkWriter<W>) -> Result<(), XngError> {
    writer.write_all(bytemuck::cast_slice(&self.entries))
  }
}

#[test]
fn test_plte_lengths() {
  let open = |payload: &[u8]| {
    let bytes = super::frame(ChunkType::PLTE, payload);
    let mut r = ChunkReader::try_open(&bytes[..]).unwrap().unwrap();
    PLTE::read_from(&mut r)
  };
  let plte = open(&[1, 2, 3, 4, 5, 6]).unwrap();
  assert_eq!(plte.entries(), &[RGB8::new(1, 2, 3), RGB8::new(4, 5, 6)]);
  assert_eq!(open(&[]), Err(XngError::InvalidChunkData(ChunkType::PLTE)));
  assert_eq!(open(&[1, 2, 3, 4]), Err(XngError::InvalidChunkData(ChunkType::PLTE)));
  assert_eq!(open(&[0; 257 * 3]), Err(XngError::InvalidChunkData(ChunkType::PLTE)));
  assert!(open(&[0; 256 * 3]).is_ok());
  assert_eq!(PLTE::new(alloc::vec![]), Err(XngError::InvalidPaletteLength(0)));
}
