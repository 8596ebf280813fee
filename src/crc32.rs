//! The CRC-32 used by chunk trailers.
//!
//! The checksum covers the chunk type bytes and the payload bytes, but not the
//! length field.

const CRC_TABLE: [u32; 256] = make_crc_table();

const fn make_crc_table() -> [u32; 256] {
  let mut out = [0; 256];
  let mut n = 0;
  while n < 256 {
    let mut c = n as u32;
    let mut k = 0;
    while k < 8 {
      if (c & 1) != 0 {
        c = 0xEDB8_8320_u32 ^ (c >> 1);
      } else {
        c >>= 1;
      }
      //
      k += 1;
    }
    out[n] = c;
    //
    n += 1;
  }
  out
}

/// A running CRC-32 computation.
///
/// Feed it bytes with [`update`](Crc32::update) as they go by, then call
/// [`finish`](Crc32::finish) to get the final value. Finishing doesn't consume
/// the accumulator, so a partial value can be inspected at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Crc32 {
  state: u32,
}
impl Default for Crc32 {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}
impl Crc32 {
  /// A fresh accumulator that hasn't seen any bytes.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self { state: u32::MAX }
  }

  /// Adds more bytes to the checksum.
  #[inline]
  pub fn update(&mut self, bytes: &[u8]) {
    let mut crc = self.state;
    for byte in bytes.iter().copied() {
      let i = (crc ^ u32::from(byte)) as u8 as usize;
      crc = CRC_TABLE[i] ^ (crc >> 8);
    }
    self.state = crc;
  }

  /// The checksum of all bytes seen so far.
  #[inline]
  #[must_use]
  pub const fn finish(&self) -> u32 {
    self.state ^ u32::MAX
  }
}

/// Computes the CRC-32 of a chunk type followed by its payload.
#[inline]
#[must_use]
pub fn png_crc(chunk_type: [u8; 4], data: &[u8]) -> u32 {
  let mut crc = Crc32::new();
  crc.update(&chunk_type);
  crc.update(data);
  crc.finish()
}

#[test]
fn test_crc32_known_values() {
  // the standard check value for this CRC
  let mut crc = Crc32::new();
  crc.update(b"123456789");
  assert_eq!(crc.finish(), 0xCBF4_3926);

  assert_eq!(Crc32::new().finish(), 0);

  // the trailer of every empty IEND chunk
  assert_eq!(png_crc(*b"IEND", &[]), 0xAE42_6082);
}

#[test]
fn test_crc32_split_updates_match() {
  let data = b"IHDR\x00\x00\x00\x01\x00\x00\x00\x01\x08\x00\x00\x00\x00";
  let mut whole = Crc32::new();
  whole.update(data);
  for split in 0..data.len() {
    let mut parts = Crc32::new();
    parts.update(&data[..split]);
    parts.update(&data[split..]);
    assert_eq!(parts.finish(), whole.finish(), "split at {split}");
  }
}

#[test]
fn test_crc32_default_is_fresh() {
  let mut crc = Crc32::default();
  assert_eq!(crc, Crc32::new());
  crc.update(b"IEND");
  assert_eq!(crc.finish(), 0xAE42_6082);
}
