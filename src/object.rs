//! PDF objects as the writer builds them, before serialization.

use std::collections::HashMap;

/// PDF object representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// Null object
    Null,
    /// Boolean value
    Boolean(bool),
    /// Integer value
    Integer(i64),
    /// Real (floating-point) value
    Real(f64),
    /// String (byte array)
    String(Vec<u8>),
    /// Name (starting with /)
    Name(String),
    /// Array of objects
    Array(Vec<Object>),
    /// Dictionary (key-value pairs)
    Dictionary(HashMap<String, Object>),
    /// Stream (dictionary + data)
    Stream {
        /// Stream dictionary
        dict: HashMap<String, Object>,
        /// Stream data
        data: bytes::Bytes,
    },
    /// Indirect object reference
    Reference(ObjectRef),
}

/// Reference to an indirect object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectRef {
    /// Object number
    pub id: u32,
    /// Generation number
    pub gen: u16,
}

impl ObjectRef {
    /// Create a new object reference.
    pub fn new(id: u32, gen: u16) -> Self {
        Self { id, gen }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_equality_compares_data() {
        let a = Object::Stream {
            dict: HashMap::new(),
            data: bytes::Bytes::from_static(b"q Q"),
        };
        let b = Object::Stream {
            dict: HashMap::new(),
            data: bytes::Bytes::from(b"q Q".to_vec()),
        };
        assert_eq!(a, b);
        assert_ne!(Object::Reference(ObjectRef::new(3, 0)), Object::Integer(3));
    }
}
