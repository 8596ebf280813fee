use walkdir::WalkDir;
use xng::{Chunk, ChunkType, ErrorClass, Signature, XngError, XngFile};

#[test]
fn test_XngFile_read_no_panics() {
  // read ALL files in the test folder, even non-image files shouldn't panic.
  for entry in WalkDir::new("tests/").into_iter().filter_map(|e| e.ok()) {
    println!("{}", entry.path().display());
    let v = match std::fs::read(entry.path()) {
      Ok(v) => v,
      Err(e) => {
        println!("Error reading file: {e:?}");
        continue;
      }
    };
    let _ = XngFile::from_bytes(&v);
  }
  // even totally random data should never panic the reader!
  for _ in 0..10 {
    let v = super::rand_bytes(1024);
    let _ = XngFile::from_bytes(&v);
    // and neither should random data after a good signature
    let mut signed = Signature::PNG_BYTES.to_vec();
    signed.extend_from_slice(&v);
    assert!(XngFile::from_bytes(&signed).is_err());
  }
}

#[test]
fn test_corpus_round_trips_byte_for_byte() {
  for (name, bytes) in super::corpus() {
    if name.starts_with("fail_") {
      continue;
    }
    let file = XngFile::from_bytes(&bytes).unwrap_or_else(|e| panic!("{name}: {e}"));
    assert_eq!(file.to_bytes().unwrap(), bytes, "{name}");
    assert_eq!(file.chunks.last().map(Chunk::chunk_type).map(|t| t.is_critical()), Some(true), "{name}");
  }
}

#[test]
fn test_every_bit_flip_is_detected() {
  let bytes = std::fs::read("tests/files/gray1_5x3.png").unwrap();
  for i in 0..bytes.len() {
    for bit in 0..8 {
      let mut flipped = bytes.clone();
      flipped[i] ^= 1 << bit;
      let err = XngFile::from_bytes(&flipped).unwrap_err();
      if i < 8 {
        assert_eq!(err, XngError::UnrecognizedSignature);
      }
    }
  }
}

#[test]
fn test_damaged_files() {
  let bad_crc = std::fs::read("tests/files/fail_bad_crc.png").unwrap();
  let err = XngFile::from_bytes(&bad_crc).unwrap_err();
  assert!(matches!(err, XngError::ChecksumMismatch { chunk_type: ChunkType::IHDR, .. }), "{err:?}");
  assert_eq!(err.class(), ErrorClass::ChecksumMismatch);

  let truncated = std::fs::read("tests/files/fail_truncated.png").unwrap();
  assert_eq!(XngFile::from_bytes(&truncated), Err(XngError::Truncated));
}

#[test]
fn test_mng_container() {
  let bytes = std::fs::read("tests/files/empty.mng").unwrap();
  let file = XngFile::from_bytes(&bytes).unwrap();
  assert_eq!(file.signature, Signature::Mng);
  let types: Vec<String> = file.chunks.iter().map(|c| c.chunk_type().to_string()).collect();
  assert_eq!(types, ["MHDR", "MEND"]);
  match &file.chunks[0] {
    Chunk::Custom(c) => assert_eq!(c.data.len(), 28),
    other => panic!("{other:?}"),
  }
}

#[test]
fn test_streamed_write_then_read() {
  let bytes = std::fs::read("tests/files/index1_9x2_split.png").unwrap();
  let file = XngFile::read(std::io::Cursor::new(&bytes)).unwrap();
  let idat_count = file.chunks.iter().filter(|c| c.chunk_type() == ChunkType::IDAT).count();
  assert!(idat_count > 1);
  let mut out = Vec::new();
  file.write(&mut out).unwrap();
  assert_eq!(out, bytes);
}
