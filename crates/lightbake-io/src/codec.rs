// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Raw attribute buffer files.
//!
//! A buffer file is a bare little-endian array of 4-byte elements with no
//! header and no length prefix; the element count is the file size over 4.
//! Writes go straight to the destination. A failed write leaves the file in
//! an undefined state and callers needing atomicity write to a temporary path
//! and rename.

use std::fs;
use std::path::Path;

use lightbake_core::mesh::{AttributeBuffer, AttributeRole, Element};
use lightbake_core::MeshError;

use crate::error::CodecError;

/// Decodes a buffer of `role` from raw bytes.
pub fn decode_bytes<T: Element>(
    role: AttributeRole,
    bytes: &[u8],
) -> Result<AttributeBuffer<T>, MeshError> {
    AttributeBuffer::from_le_bytes(role, bytes)
}

/// Reads the buffer file at `path` as a buffer of `role`.
///
/// Fails with [`MeshError::MalformedBuffer`] when the file size is not a
/// multiple of the element size, or when the element count is not a multiple
/// of the role's stride.
pub fn decode<T: Element>(
    path: impl AsRef<Path>,
    role: AttributeRole,
) -> Result<AttributeBuffer<T>, CodecError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| CodecError::io(path, e))?;
    let buffer = decode_bytes(role, &bytes)?;
    log::trace!(
        "Decoded {} ({} elements) from '{}'",
        role,
        buffer.element_count(),
        path.display()
    );
    Ok(buffer)
}

/// Writes `buffer` to `path`, replacing any existing file.
pub fn encode<T: Element>(
    path: impl AsRef<Path>,
    buffer: &AttributeBuffer<T>,
) -> Result<(), CodecError> {
    let path = path.as_ref();
    fs::write(path, buffer.to_le_bytes()).map_err(|e| CodecError::io(path, e))
}
