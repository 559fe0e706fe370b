/// SharedArrayBuffer layout.
/// Must stay in sync with TypeScript `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 12 floats]
/// [Vectors: max_vector_vertices × 6 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written once into the header at init.
/// TypeScript reads them from the header to compute offsets dynamically.

use crate::api::game::GameConfig;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 12;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_PROTOCOL_VERSION: usize = 2;
pub const HEADER_WORLD_WIDTH: usize = 3;
pub const HEADER_WORLD_HEIGHT: usize = 4;
pub const HEADER_MAX_VECTOR_VERTICES: usize = 5;
pub const HEADER_VECTOR_VERTEX_COUNT: usize = 6;
pub const HEADER_MAX_EVENTS: usize = 7;
pub const HEADER_EVENT_COUNT: usize = 8;
// 9..12 reserved

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per vector vertex: x, y, r, g, b, a (wire format, never changes).
pub const VECTOR_VERTEX_FLOATS: usize = 6;

/// Floats per game event: kind, a, b, c (wire format, never changes).
pub const EVENT_FLOATS: usize = 4;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_vector_vertices: usize,
    pub max_events: usize,

    pub vector_data_floats: usize,
    pub event_data_floats: usize,

    /// Offset (in floats) where vector data begins.
    pub vector_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    pub buffer_total_floats: usize,
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(max_vector_vertices: usize, max_events: usize) -> Self {
        let vector_data_floats = max_vector_vertices * VECTOR_VERTEX_FLOATS;
        let event_data_floats = max_events * EVENT_FLOATS;

        let vector_data_offset = HEADER_FLOATS;
        let event_data_offset = vector_data_offset + vector_data_floats;

        let buffer_total_floats = event_data_offset + event_data_floats;

        Self {
            max_vector_vertices,
            max_events,
            vector_data_floats,
            event_data_floats,
            vector_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_vector_vertices, config.max_events)
    }

    /// Fill the static header fields (everything except the per-frame counts).
    pub fn write_header(&self, config: &GameConfig, header: &mut [f32; HEADER_FLOATS]) {
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_WORLD_WIDTH] = config.world_width;
        header[HEADER_WORLD_HEIGHT] = config.world_height;
        header[HEADER_MAX_VECTOR_VERTICES] = self.max_vector_vertices as f32;
        header[HEADER_MAX_EVENTS] = self.max_events as f32;
    }
}

impl Default for ProtocolLayout {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}
