//! Binary level format.
//!
//! The format is positional, little-endian, with no magic number, version
//! field, or checksum — two leading count bytes fully describe the layout:
//!
//! ```text
//! offset 0: u8 vertex_count
//! offset 1: u8 edge_count
//! vertex_count records of 10 bytes:
//!   i32 x, i32 y, i8 energy, u8 flags (bit2=start, bit1=end, bit0=double)
//! edge_count records of 3 bytes:
//!   u8 a, u8 b, u8 direction_code (0=undirected, 1=a->b, 2=b->a)
//! ```
//!
//! `decode` reads exactly the declared records and nothing more; trailing
//! bytes are ignored. It performs no semantic validation — see
//! `Graph::validate` for the strict pass.

use super::edge::{Direction, Edge, EdgeId};
use super::error::{GraphError, Result};
use super::model::Graph;
use super::vertex::{Vertex, VertexId};

const FLAG_START: u8 = 1 << 2;
const FLAG_END: u8 = 1 << 1;
const FLAG_DOUBLE: u8 = 1;

/// Byte cursor over the level data.
struct Reader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let remaining = self.bytes.len() - self.offset;
        if remaining < len {
            return Err(GraphError::Truncated {
                offset: self.offset,
                needed: len - remaining,
            });
        }
        let slice = &self.bytes[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn read_i8(&mut self) -> Result<i8> {
        Ok(self.take(1)?[0] as i8)
    }

    fn read_i32(&mut self) -> Result<i32> {
        let bytes = self.take(4)?;
        Ok(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

impl Graph {
    /// Decode a level from its binary representation.
    ///
    /// Fails with `GraphError::Truncated` if the stream ends before all
    /// declared fields are read and `GraphError::InvalidDirection` for an
    /// unknown direction code; a partially populated graph is never
    /// returned.
    pub fn decode(bytes: &[u8]) -> Result<Graph> {
        let mut reader = Reader::new(bytes);

        let vertex_count = reader.read_u8()?;
        let edge_count = reader.read_u8()?;

        let mut vertices = Vec::with_capacity(vertex_count as usize);
        for i in 0..vertex_count {
            let x = reader.read_i32()?;
            let y = reader.read_i32()?;
            let energy = reader.read_i8()?;
            let flags = reader.read_u8()?;
            vertices.push(Vertex {
                id: VertexId::new(i),
                x,
                y,
                energy,
                is_start: flags & FLAG_START != 0,
                is_end: flags & FLAG_END != 0,
                double_visit: flags & FLAG_DOUBLE != 0,
            });
        }

        let mut edges = Vec::with_capacity(edge_count as usize);
        for i in 0..edge_count {
            let id = EdgeId::new(i);
            let a = VertexId::new(reader.read_u8()?);
            let b = VertexId::new(reader.read_u8()?);
            let code = reader.read_u8()?;
            let direction = Direction::from_code(code)
                .ok_or(GraphError::InvalidDirection { edge: id, code })?;
            edges.push(Edge { id, a, b, direction });
        }

        Ok(Graph::from_parts(vertices, edges))
    }

    /// Encode the graph back to the binary level format.
    ///
    /// Inverse of `decode` for any graph within the format limits (the
    /// level editor writes files through exactly this layout).
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        debug_assert!(self.vertex_count() <= super::vertex::MAX_VERTICES);
        debug_assert!(self.edge_count() <= super::edge::MAX_EDGES);

        let mut out = Vec::with_capacity(2 + self.vertex_count() * 10 + self.edge_count() * 3);
        out.push(self.vertex_count() as u8);
        out.push(self.edge_count() as u8);

        for vertex in self.vertices() {
            out.extend_from_slice(&vertex.x.to_le_bytes());
            out.extend_from_slice(&vertex.y.to_le_bytes());
            out.push(vertex.energy as u8);
            let mut flags = 0;
            if vertex.is_start {
                flags |= FLAG_START;
            }
            if vertex.is_end {
                flags |= FLAG_END;
            }
            if vertex.double_visit {
                flags |= FLAG_DOUBLE;
            }
            out.push(flags);
        }

        for edge in self.edges() {
            out.push(edge.a.0);
            out.push(edge.b.0);
            out.push(edge.direction.code());
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_empty_graph() {
        let graph = Graph::decode(&[0, 0]).unwrap();
        assert_eq!(graph.vertex_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_decode_rejects_empty_buffer() {
        assert_eq!(
            Graph::decode(&[]),
            Err(GraphError::Truncated { offset: 0, needed: 1 })
        );
    }

    #[test]
    fn test_decode_little_endian_positions() {
        let mut bytes = vec![1, 0];
        bytes.extend_from_slice(&0x0102_0304i32.to_le_bytes());
        bytes.extend_from_slice(&0x7fff_ffffi32.to_le_bytes());
        bytes.push(0xfe); // energy -2
        bytes.push(0);

        let graph = Graph::decode(&bytes).unwrap();
        let vertex = graph.vertices()[0];
        assert_eq!(vertex.x, 0x0102_0304);
        assert_eq!(vertex.y, i32::MAX);
        assert_eq!(vertex.energy, -2);
    }

    #[test]
    fn test_decode_flag_bits() {
        let mut bytes = vec![3, 0];
        for flags in [FLAG_START, FLAG_END, FLAG_DOUBLE] {
            bytes.extend_from_slice(&[0; 9]);
            bytes.push(flags);
        }

        let graph = Graph::decode(&bytes).unwrap();
        assert!(graph.vertices()[0].is_start);
        assert!(graph.vertices()[1].is_end);
        assert!(graph.vertices()[2].double_visit);
        assert_eq!(graph.start(), Some(VertexId::new(0)));
        assert_eq!(graph.end(), Some(VertexId::new(1)));
    }

    #[test]
    fn test_decode_invalid_direction() {
        let bytes = [0, 1, 0, 1, 3];
        assert_eq!(
            Graph::decode(&bytes),
            Err(GraphError::InvalidDirection { edge: EdgeId::new(0), code: 3 })
        );
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        let graph = Graph::decode(&[0, 0, 0xde, 0xad]).unwrap();
        assert_eq!(graph.vertex_count(), 0);
    }

    #[test]
    fn test_decode_semantic_garbage_is_accepted() {
        // Dangling endpoints are validate()'s concern, not decode's.
        let bytes = [0, 1, 7, 9, 0];
        let graph = Graph::decode(&bytes).unwrap();
        assert_eq!(graph.edges()[0].a, VertexId::new(7));
        assert!(graph.validate().is_err());
    }
}
