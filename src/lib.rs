//! A WebAssembly binary module decoder.
//!
//! The decoder consumes a Wasm binary from any sequential byte source and
//! materializes a [`module::Module`] whose storage lives in a caller-provided
//! [`bumpalo::Bump`] arena. Dropping the arena releases every decoded byte in
//! one step.
//!
//! ```
//! use bumpalo::Bump;
//!
//! let wasm = [0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00];
//! let arena = Bump::new();
//! let module = wasmdec::fmt::binary::from_slice(&arena, &wasm).unwrap();
//! assert!(module.func_tys().is_empty());
//! ```

#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

pub mod fmt;
pub mod module;
