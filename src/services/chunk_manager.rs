//! Chunk planning for streamed upload bodies.
//!
//! Each queued payload is sent as a sequence of fixed-size body frames so that
//! progress can be reported as bytes leave the client.
//! Pure computation, no file I/O is performed.

use crate::models::upload::Chunk;

/// Plan the frame layout for a payload of the given size.
///
/// A zero-sized payload has no frames. A zero `chunk_size` is treated as one
/// frame covering the whole payload.
pub fn plan_chunks(payload_size: u64, chunk_size: u64) -> Vec<Chunk> {
    if payload_size == 0 {
        return Vec::new();
    }
    let chunk_size = if chunk_size == 0 {
        payload_size
    } else {
        chunk_size
    };

    let mut chunks = Vec::new();
    let mut offset: u64 = 0;
    let mut chunk_index: u32 = 0;

    while offset < payload_size {
        let size = std::cmp::min(chunk_size, payload_size - offset);
        chunks.push(Chunk {
            chunk_index,
            offset,
            size,
        });
        offset += size;
        chunk_index += 1;
    }

    chunks
}
