#![allow(bad_style)]

mod codec;
mod container;

use std::path::PathBuf;

fn rand_bytes(count: usize) -> Vec<u8> {
  let mut buffer = vec![0; count];
  getrandom::getrandom(&mut buffer).unwrap();
  buffer
}

/// Every file of the sample corpus, with its name.
fn corpus() -> Vec<(String, Vec<u8>)> {
  let mut out = Vec::new();
  for entry in walkdir::WalkDir::new("tests/files").sort_by_file_name() {
    let entry = entry.unwrap();
    if !entry.file_type().is_file() {
      continue;
    }
    let path: PathBuf = entry.path().to_path_buf();
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    out.push((name, std::fs::read(&path).unwrap()));
  }
  assert!(!out.is_empty(), "no sample files found");
  out
}
