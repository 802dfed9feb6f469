//! # extract-require
//!
//! Reads a program's source text, finds the module references passed to
//! `require(...)` calls and reports them as a JSON array of strings.
//!
//! The finding step is a pluggable [`ReferenceFinder`]; the crate ships a
//! tree-sitter backed implementation for JavaScript, TypeScript and TSX.
//!
//! ```text
//! stdin ──► read_source ──► ReferenceFinder ──► encode_payload ──► stdout
//!           (all bytes)     (called once)       (JSON array)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use extract_require::{run, JavaScriptRequireFinder};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut finder = JavaScriptRequireFinder::new()?;
//!     let mut input: &[u8] = b"const fs = require('fs');";
//!     let mut output = Vec::new();
//!
//!     run(&mut input, &mut output, &mut finder).await?;
//!     assert_eq!(output, br#"["fs"]"#);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

#[cfg(feature = "mimalloc")]
#[global_allocator]
static ALLOC: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod core {
    //! Extraction service, configuration and error types.

    pub mod config;
    pub mod errors;
    pub mod extract;
}

pub mod lang;

pub use crate::core::config::{ConfigOverrides, ExtractConfig, DEFAULT_REQUIRE_WORD};
pub use crate::core::errors::{ExtractError, Result};
pub use crate::core::extract::{encode_payload, read_source, run, run_with_shape, PayloadShape};
pub use crate::lang::{JavaScriptRequireFinder, ModuleReferences, ReferenceFinder};
