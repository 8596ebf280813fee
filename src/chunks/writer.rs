use super::*;

/// Writes one chunk, computing its CRC as the payload goes by.
///
/// The length and type are written by [`begin`](Self::begin). After that the
/// payload writes must add up to exactly the declared length, and then
/// [`finish`](Self::finish) writes the CRC.
pub struct ChunkWriter<W> {
  chunk_type: ChunkType,
  declared_len: usize,
  payload: BoundedWriter<W>,
  crc: Crc32,
}
impl<W> Debug for ChunkWriter<W> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("ChunkWriter")
      .field("chunk_type", &self.chunk_type)
      .field("declared_len", &self.declared_len)
      .finish_non_exhaustive()
  }
}
impl<W: Write> ChunkWriter<W> {
  /// Writes the length and type, and opens the payload.
  ///
  /// ## Failure
  /// * `declared_len` is more than `i32::MAX`. Nothing is written.
  /// * The underlying writer fails.
  pub fn begin(mut out: W, chunk_type: ChunkType, declared_len: usize) -> Result<Self, XngError> {
    let length = match u32::try_from(declared_len) {
      Ok(length) if length <= (i32::MAX as u32) => length,
      _ => return Err(XngError::InvalidChunkLength(declared_len)),
    };
    let type_bytes = chunk_type.to_bytes();
    out.write_all(&length.to_be_bytes())?;
    out.write_all(&type_bytes)?;
    let mut crc = Crc32::new();
    crc.update(&type_bytes);
    Ok(Self { chunk_type, declared_len, payload: BoundedWriter::new(out, declared_len), crc })
  }

  #[inline]
  #[must_use]
  pub const fn chunk_type(&self) -> ChunkType {
    self.chunk_type
  }

  /// Payload bytes still owed.
  #[inline]
  #[must_use]
  pub const fn remaining(&self) -> usize {
    self.payload.remaining()
  }

  /// Writes payload bytes.
  #[inline]
  pub fn write_all(&mut self, bytes: &[u8]) -> Result<(), XngError> {
    self.payload.write_all(bytes)?;
    self.crc.update(bytes);
    Ok(())
  }

  #[inline]
  pub fn write_u8(&mut self, u: u8) -> Result<(), XngError> {
    self.write_all(&[u])
  }
  #[inline]
  pub fn write_u16(&mut self, u: u16) -> Result<(), XngError> {
    self.write_all(&u.to_be_bytes())
  }
  #[inline]
  pub fn write_u32(&mut self, u: u32) -> Result<(), XngError> {
    self.write_all(&u.to_be_bytes())
  }
  #[inline]
  pub fn write_i32(&mut self, i: i32) -> Result<(), XngError> {
    self.write_all(&i.to_be_bytes())
  }

  /// Writes a string field, which takes [`string_field_len`] bytes.
  ///
  /// ## Failure
  /// * `s` has characters the encoding can't store.
  /// * With [`StringEnd::Nul`], `s` contains a NUL.
  pub fn write_string(&mut self, s: &str, encoding: TextEncoding, end: StringEnd) -> Result<(), XngError> {
    let len = encoding.encoded_len(s)?;
    if end == StringEnd::Nul && s.contains('\0') {
      return Err(XngError::InvalidText);
    }
    if len + end.terminator_len() > self.remaining() {
      return Err(XngError::BudgetExceeded {
        requested: len + end.terminator_len(),
        remaining: self.remaining(),
      });
    }
    match encoding {
      TextEncoding::Utf8 | TextEncoding::Ascii => self.write_all(s.as_bytes())?,
      // every char was checked to fit in a byte
      TextEncoding::Latin1 => {
        for c in s.chars() {
          self.write_u8(u32::from(c) as u8)?;
        }
      }
    }
    if end == StringEnd::Nul {
      self.write_u8(0)?;
    }
    Ok(())
  }

  /// Ends the chunk by writing the CRC, and gives back the underlying writer.
  ///
  /// ## Failure
  /// * Fewer payload bytes were written than declared.
  pub fn finish(self) -> Result<W, XngError> {
    let Self { chunk_type, declared_len, payload, crc } = self;
    let mut out = payload.finish()?;
    let crc = crc.finish();
    out.write_all(&crc.to_be_bytes())?;
    log::trace!("wrote chunk {chunk_type} ({declared_len} bytes, CRC {crc:#010X})");
    Ok(out)
  }
}
