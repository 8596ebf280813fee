use super::*;

/// Any chunk type without its own record.
///
/// The payload is kept byte for byte, so reading and then writing a file
/// preserves chunks that this crate doesn't understand.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CustomChunk {
  pub chunk_type: ChunkType,
  pub data: Vec<u8>,
}
impl Debug for CustomChunk {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("CustomChunk")
      .field("chunk_type", &self.chunk_type)
      .field("data", &(&self.data[..self.data.len().min(12)], self.data.len()))
      .finish()
  }
}
impl CustomChunk {
  /// Reads the rest of an opened chunk.
  #[inline]
  pub fn read_from<R: Read>(reader: &mut ChunkReader<R>) -> Result<Self, XngError> {
    Ok(Self { chunk_type: reader.chunk_type(), data: reader.read_remaining()? })
  }

  /// Writes the whole chunk.
  #[inline]
  pub fn write_chunk<W: Write>(&self, out: W) -> Result<W, XngError> {
    let mut writer = ChunkWriter::begin(out, self.chunk_type, self.data.len())?;
    writer.write_all(&self.data)?;
    writer.finish()
  }
}
