use super::*;

/// Image Data.
///
/// * Image data is stored with Zlib compression applied.
/// * Images can have more than one IDAT chunk. They should all be stored in a
///   row. Multiple chunks are treated as a single Zlib datastream.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IDAT {
  data: Vec<u8>,
}
impl IDAT {
  #[inline]
  #[must_use]
  pub const fn new(data: Vec<u8>) -> Self {
    Self { data }
  }

  /// This chunk's part of the zlib stream.
  #[inline]
  #[must_use]
  pub fn data(&self) -> &[u8] {
    &self.data
  }
}
impl Debug for IDAT {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_tuple("IDAT").field(&&self.data[..self.data.len().min(12)]).field(&self.data.len()).finish()
  }
}
impl ChunkRecord for IDAT {
  const TYPE: ChunkType = ChunkType::IDAT;

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
