use super::*;

impl ChunkRecord for IHDR {
  const TYPE: ChunkType = ChunkType::IHDR;

  fn read_from<R: Read>(reader: &mut ChunkReader<R>) -> Result<Self, XngError> {
    if reader.remaining() != IHDR::DATA_LEN {
      return Err(XngError::InvalidChunkData(ChunkType::IHDR));
    }
    let mut bytes = [0_u8; IHDR::DATA_LEN];
    reader.read_exact(&mut bytes)?;
    IHDR::try_from(&bytes[..])
  }

  #[inline]
  fn data_len(&self) -> usize {
    IHDR::DATA_LEN
  }

  #[inline]
  fn write_fields<W: Write>(&self, writer: &mut ChunkWriter<W>) -> Result<(), XngError> {
    writer.write_all(&self.to_bytes())
  }
}

#[test]
fn test_ihdr_chunk_bytes() {
  use crate::{ColorType, InterlaceMethod};
  let ihdr = IHDR::new(1, 1, 8, ColorType::RGBA, InterlaceMethod::None).unwrap();
  let bytes = ihdr.write_chunk(Vec::new()).unwrap();
  // the IHDR of a 1x1 RGBA8 image, as written by most any encoder
  assert_eq!(
    bytes,
    [
      0, 0, 0, 13, b'I', b'H', b'D', b'R', 0, 0, 0, 1, 0, 0, 0, 1, 8, 6, 0, 0, 0, 0x1F, 0x15,
      0xC4, 0x89
    ]
  );
  let mut r = ChunkReader::try_open(&bytes[..]).unwrap().unwrap();
  assert_eq!(IHDR::read_from(&mut r), Ok(ihdr));
  r.finish().unwrap();
}
