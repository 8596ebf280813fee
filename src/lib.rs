#![no_std]
#![cfg_attr(docs_rs, feature(doc_cfg))]

//! A crate for the PNG family of chunk containers.
//!
//! PNG, MNG, and JNG files all share one container format: an 8-byte
//! signature followed by a sequence of length-prefixed, CRC-checked chunks.
//! This crate reads and writes that container, and also does the pixel side
//! of PNG: filtering, Adam7 interlacing, and sample packing.
//!
//! ## Layers
//! * [`Crc32`] and [`ChunkType`] are the basic building blocks.
//! * [`BoundedReader`] and [`BoundedWriter`] limit how many bytes pass
//!   through them, and are what a chunk payload is moved through.
//! * [`ChunkReader`] and [`ChunkWriter`] handle the framing of one chunk, and
//!   [`Chunk::read`] dispatches on the type to a [`ChunkRecord`].
//! * [`XngFile`] is a whole file as a signature and chunk list.
//! * The filtering, interlacing, and packing functions work on plain slices
//!   and don't allocate, and [`unfilter_decompressed_data`] ties them
//!   together.
//! * [`Image`] holds decoded pixels, and [`decode_image`] / [`encode_image`]
//!   convert between it and a PNG file.
//!
//! ## Features
//! * `alloc`: the [`Image`] types and [`filter_image_data`].
//! * `std`: everything that involves a stream (all of the chunk and file
//!   types). Implies `alloc`.
//! * `miniz_oxide`: zlib support, needed by [`decode_image`] and
//!   [`encode_image`] (along with `std`).
//!
//! The default features are `std` and `miniz_oxide`.

#[cfg(feature = "alloc")]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

#[cfg(target_pointer_width = "16")]
compile_error!("this crate assumes 32-bit or bigger pointers!");

mod error;
pub use error::*;

mod crc32;
pub use crc32::*;

mod chunk_type;
pub use chunk_type::*;

mod header;
pub use header::*;

mod interlace;
pub use interlace::*;

mod filtering;
pub use filtering::*;

mod packing;
pub use packing::*;

mod pipeline;
pub use pipeline::*;

pub mod pixel_formats;
pub use pixel_formats::*;

#[cfg(feature = "alloc")]
#[cfg_attr(docs_rs, doc(cfg(feature = "alloc")))]
mod image;
#[cfg(feature = "alloc")]
pub use image::*;

#[cfg(feature = "std")]
#[cfg_attr(docs_rs, doc(cfg(feature = "std")))]
mod bounded;
#[cfg(feature = "std")]
pub use bounded::*;

#[cfg(feature = "std")]
#[cfg_attr(docs_rs, doc(cfg(feature = "std")))]
pub mod chunks;
#[cfg(feature = "std")]
pub use chunks::*;

#[cfg(feature = "std")]
#[cfg_attr(docs_rs, doc(cfg(feature = "std")))]
mod container;
#[cfg(feature = "std")]
pub use container::*;

#[cfg(all(feature = "std", feature = "miniz_oxide"))]
#[cfg_attr(docs_rs, doc(cfg(all(feature = "std", feature = "miniz_oxide"))))]
mod codec;
#[cfg(all(feature = "std", feature = "miniz_oxide"))]
pub use codec::*;
