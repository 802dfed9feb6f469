//! The extraction service: read all source text, find references once,
//! write one JSON payload.
//!
//! Output is all-or-nothing. Nothing touches the output stream until both the
//! read and the finder have succeeded, so a failed run never leaves partial
//! JSON behind.

use serde::Serialize;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::core::errors::{ExtractError, Result};
use crate::lang::common::{ModuleReferences, ReferenceFinder};

#[cfg(test)]
#[path = "extract_tests.rs"]
mod tests;

/// Shape of the JSON written to the output stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PayloadShape {
    /// A bare array of module names: `["fs","path"]`
    #[default]
    Strings,
    /// An object that also carries dynamic arguments:
    /// `{"strings":[...],"expressions":[...]}`
    WithExpressions,
}

impl PayloadShape {
    /// Pick the shape from the `include_expressions` setting
    pub fn from_include_expressions(include_expressions: bool) -> Self {
        if include_expressions {
            Self::WithExpressions
        } else {
            Self::Strings
        }
    }
}

/// Read `input` to end-of-stream, find its module references and write them
/// to `output` as a JSON array of strings, then shut `output` down.
pub async fn run<R, W, F>(input: &mut R, output: &mut W, finder: &mut F) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
    F: ReferenceFinder + ?Sized,
{
    run_with_shape(input, output, finder, PayloadShape::Strings).await
}

/// [`run`] with an explicit payload shape.
pub async fn run_with_shape<R, W, F>(
    input: &mut R,
    output: &mut W,
    finder: &mut F,
    shape: PayloadShape,
) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
    F: ReferenceFinder + ?Sized,
{
    let source = read_source(input).await?;
    let references = finder.find_references(&source)?;
    let payload = encode_payload(&references, shape)?;

    output
        .write_all(&payload)
        .await
        .map_err(|e| ExtractError::io("Failed to write references", e))?;
    output
        .flush()
        .await
        .map_err(|e| ExtractError::io("Failed to flush output", e))?;
    output
        .shutdown()
        .await
        .map_err(|e| ExtractError::io("Failed to close output", e))?;

    tracing::debug!(bytes = payload.len(), "payload written");
    Ok(())
}

/// Accumulate the whole input stream and decode it as UTF-8.
///
/// Decoding happens once, after end-of-stream, so chunk boundaries that split
/// a multi-byte character cannot affect the result. Invalid sequences are
/// replaced with U+FFFD.
pub async fn read_source<R>(input: &mut R) -> Result<String>
where
    R: AsyncRead + Unpin,
{
    let mut buffer = Vec::new();
    input
        .read_to_end(&mut buffer)
        .await
        .map_err(|e| ExtractError::io("Failed to read source text", e))?;

    tracing::debug!(bytes = buffer.len(), "source text read");

    match String::from_utf8(buffer) {
        Ok(source) => Ok(source),
        Err(err) => {
            tracing::warn!(
                valid_up_to = err.utf8_error().valid_up_to(),
                "source text is not valid UTF-8, replacing invalid sequences"
            );
            Ok(String::from_utf8_lossy(err.as_bytes()).into_owned())
        }
    }
}

/// Serialize references in the requested shape.
pub fn encode_payload(references: &ModuleReferences, shape: PayloadShape) -> Result<Vec<u8>> {
    match shape {
        PayloadShape::Strings => to_json(&references.strings),
        PayloadShape::WithExpressions => to_json(references),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}
