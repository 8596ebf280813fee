use super::*;

use std::io::ErrorKind;

/// Reads the 4 length bytes, telling apart a clean end of stream from a
/// truncated one.
fn read_length_field<R: Read>(source: &mut R) -> Result<Option<[u8; 4]>, XngError> {
  let mut buf = [0_u8; 4];
  let mut filled = 0;
  while filled < buf.len() {
    match source.read(&mut buf[filled..]) {
      Ok(0) if filled == 0 => return Ok(None),
      Ok(0) => return Err(XngError::Truncated),
      Ok(n) => filled += n,
      Err(e) if e.kind() == ErrorKind::Interrupted => continue,
      Err(e) => return Err(e.into()),
    }
  }
  Ok(Some(buf))
}

/// Reads the payload of one chunk, tracking its CRC.
///
/// The reader is opened with [`try_open`](Self::try_open), which consumes
/// the length and type. Payload reads can't go past the declared length. The
/// reader must be [`finish`](Self::finish)ed, which checks that the whole
/// payload was used and then reads and checks the CRC.
pub struct ChunkReader<R> {
  chunk_type: ChunkType,
  declared_len: usize,
  payload: BoundedReader<R>,
  crc: Crc32,
}
impl<R> Debug for ChunkReader<R> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("ChunkReader")
      .field("chunk_type", &self.chunk_type)
      .field("declared_len", &self.declared_len)
      .finish_non_exhaustive()
  }
}
impl<R: Read> ChunkReader<R> {
  /// Starts reading the next chunk from `source`.
  ///
  /// Gives `Ok(None)` if the stream has no bytes left at all.
  ///
  /// ## Failure
  /// * The stream ends within the length or type.
  /// * The length is more than `i32::MAX`.
  /// * The type isn't a legal chunk type.
  pub fn try_open(mut source: R) -> Result<Option<Self>, XngError> {
    let length = match read_length_field(&mut source)? {
      Some(bytes) => u32::from_be_bytes(bytes),
      None => return Ok(None),
    };
    if length > (i32::MAX as u32) {
      return Err(XngError::InvalidChunkLength(length as usize));
    }
    let mut type_bytes = [0_u8; 4];
    source.read_exact(&mut type_bytes)?;
    let chunk_type = ChunkType::new(type_bytes)?;
    let declared_len = length as usize;
    let mut crc = Crc32::new();
    crc.update(&type_bytes);
    Ok(Some(Self { chunk_type, declared_len, payload: BoundedReader::new(source, declared_len), crc }))
  }

  #[inline]
  #[must_use]
  pub const fn chunk_type(&self) -> ChunkType {
    self.chunk_type
  }

  /// The payload length from the chunk's length field.
  #[inline]
  #[must_use]
  pub const fn declared_len(&self) -> usize {
    self.declared_len
  }

  /// Payload bytes not yet read.
  #[inline]
  #[must_use]
  pub const fn remaining(&self) -> usize {
    self.payload.remaining()
  }

  /// Fills `buf` from the payload.
  #[inline]
  pub fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), XngError> {
    self.payload.read_exact(buf)?;
    self.crc.update(buf);
    Ok(())
  }

  #[inline]
  fn read_array<const N: usize>(&mut self) -> Result<[u8; N], XngError> {
    let mut a = [0_u8; N];
    self.read_exact(&mut a)?;
    Ok(a)
  }

  #[inline]
  pub fn read_u8(&mut self) -> Result<u8, XngError> {
    self.read_array::<1>().map(|[b]| b)
  }
  #[inline]
  pub fn read_u16(&mut self) -> Result<u16, XngError> {
    self.read_array().map(u16::from_be_bytes)
  }
  #[inline]
  pub fn read_u32(&mut self) -> Result<u32, XngError> {
    self.read_array().map(u32::from_be_bytes)
  }
  #[inline]
  pub fn read_i32(&mut self) -> Result<i32, XngError> {
    self.read_array().map(i32::from_be_bytes)
  }

  /// Reads the rest of the payload.
  ///
  /// Memory grows with the data actually read, not with the declared length,
  /// so a lying length field can't force a huge allocation up front.
  pub fn read_remaining(&mut self) -> Result<Vec<u8>, XngError> {
    let mut out = Vec::new();
    let mut block = [0_u8; 4096];
    while self.remaining() > 0 {
      let n = self.remaining().min(block.len());
      self.read_exact(&mut block[..n])?;
      out.try_reserve(n)?;
      out.extend_from_slice(&block[..n]);
    }
    Ok(out)
  }

  /// Reads and discards the rest of the payload (still updating the CRC).
  pub fn skip_remaining(&mut self) -> Result<(), XngError> {
    let mut block = [0_u8; 4096];
    while self.remaining() > 0 {
      let n = self.remaining().min(block.len());
      self.read_exact(&mut block[..n])?;
    }
    Ok(())
  }

  /// Reads a string field.
  ///
  /// ## Failure
  /// * With [`StringEnd::Nul`], the payload ends before a 0 byte.
  /// * The bytes aren't valid in the encoding.
  pub fn read_string(&mut self, encoding: TextEncoding, end: StringEnd) -> Result<String, XngError> {
    let bytes = match end {
      StringEnd::ToEnd => self.read_remaining()?,
      StringEnd::Nul => {
        let mut bytes = Vec::new();
        loop {
          if self.remaining() == 0 {
            return Err(XngError::MissingNulTerminator);
          }
          match self.read_u8()? {
            0 => break,
            b => {
              bytes.try_reserve(1)?;
              bytes.push(b);
            }
          }
        }
        bytes
      }
    };
    encoding.decode(bytes)
  }

  /// Ends the chunk: checks that the payload was used up, then reads and
  /// checks the CRC. Gives back the underlying stream, positioned at the next
  /// chunk.
  ///
  /// ## Failure
  /// * Payload bytes are left over.
  /// * The stream ends within the CRC.
  /// * The CRC doesn't match.
  pub fn finish(self) -> Result<R, XngError> {
    let Self { chunk_type, declared_len, payload, crc } = self;
    let mut source = payload.finish()?;
    let mut crc_bytes = [0_u8; 4];
    source.read_exact(&mut crc_bytes)?;
    let declared = u32::from_be_bytes(crc_bytes);
    let actual = crc.finish();
    if declared != actual {
      return Err(XngError::ChecksumMismatch { chunk_type, declared, actual });
    }
    log::trace!("read chunk {chunk_type} ({declared_len} bytes, CRC {actual:#010X})");
    Ok(source)
  }
}
