use super::*;

/// A parsed chunk.
///
/// Chunk types with a record get their own variant, and everything else is
/// kept as a [`CustomChunk`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[allow(nonstandard_style)]
pub enum Chunk {
  /// Image Header
  IHDR(IHDR),
  /// Palette
  PLTE(PLTE),
  /// Transparency
  tRNS(tRNS),
  /// Image Data
  IDAT(IDAT),
  /// Image End
  IEND(IEND),
  /// Anything else
  Custom(CustomChunk),
}
impl Chunk {
  /// Decodes the payload of an opened chunk and finishes the reader,
  /// giving back the underlying stream.
  ///
  /// ## Failure
  /// * The CRC doesn't match. This takes priority over a record failing to
  ///   parse, since bad data can't be trusted to give a meaningful error.
  /// * The record for this chunk type rejects the payload.
  /// * The record doesn't use exactly the declared payload.
  pub fn read<R: Read>(mut reader: ChunkReader<R>) -> Result<(Self, R), XngError> {
    match Self::read_payload(&mut reader) {
      Ok(chunk) => {
        let source = reader.finish()?;
        Ok((chunk, source))
      }
      Err(e) => {
        reader.skip_remaining()?;
        reader.finish()?;
        Err(e)
      }
    }
  }

  fn read_payload<R: Read>(reader: &mut ChunkReader<R>) -> Result<Self, XngError> {
    Ok(match reader.chunk_type() {
      ChunkType::IHDR => Self::IHDR(IHDR::read_from(reader)?),
      ChunkType::PLTE => Self::PLTE(PLTE::read_from(reader)?),
      ChunkType::tRNS => Self::tRNS(tRNS::read_from(reader)?),
      ChunkType::IDAT => Self::IDAT(IDAT::read_from(reader)?),
      ChunkType::IEND => Self::IEND(IEND::read_from(reader)?),
      _ => Self::Custom(CustomChunk::read_from(reader)?),
    })
  }

  /// The type this chunk is stored as.
  #[inline]
  #[must_use]
  pub const fn chunk_type(&self) -> ChunkType {
    match self {
      Self::IHDR(_) => IHDR::TYPE,
      Self::PLTE(_) => PLTE::TYPE,
      Self::tRNS(_) => tRNS::TYPE,
      Self::IDAT(_) => IDAT::TYPE,
      Self::IEND(_) => IEND::TYPE,
      Self::Custom(c) => c.chunk_type,
    }
  }

  /// Writes the whole chunk.
  pub fn write_to<W: Write>(&self, out: W) -> Result<W, XngError> {
    match self {
      Self::IHDR(ihdr) => ihdr.write_chunk(out),
      Self::PLTE(plte) => plte.write_chunk(out),
      Self::tRNS(trns) => trns.write_chunk(out),
      Self::IDAT(idat) => idat.write_chunk(out),
      Self::IEND(iend) => iend.write_chunk(out),
      Self::Custom(custom) => custom.write_chunk(out),
    }
  }
}
