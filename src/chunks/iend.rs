use super::*;

/// Image End. Always has an empty payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IEND;
impl ChunkRecord for IEND {
  const TYPE: ChunkType = ChunkType::IEND;

  #[inline]
  fn read_from<R: Read>(reader: &mut ChunkReader<R>) -> Result<Self, XngError> {
    if reader.remaining() == 0 {
      Ok(IEND)
    } else {
      Err(XngError::InvalidChunkData(ChunkType::IEND))
    }
  }

  #[inline]
  fn data_len(&self) -> usize {
    0
  }

  #[inline]
  fn write_fields<W: Write>(&self, _writer: &mut ChunkWriter<W>) -> Result<(), XngError> {
    Ok(())
  }
}
