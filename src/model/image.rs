use lopdf::{Object, Stream};

/// How an image stream is currently encoded, derived from its `/Filter`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageEncoding {
    /// `/DCTDecode`, already lossy
    Jpeg,
    /// `/FlateDecode`
    Flate,
    /// No filter at all
    Raw,
    /// Anything else (JPX, CCITT, JBIG2, filter chains)
    Other(String),
}

impl ImageEncoding {
    pub fn from_stream(stream: &Stream) -> Self {
        let filters = filter_names(stream);
        match filters.as_slice() {
            [] => ImageEncoding::Raw,
            [single] if single == "DCTDecode" => ImageEncoding::Jpeg,
            [single] if single == "FlateDecode" => ImageEncoding::Flate,
            _ => ImageEncoding::Other(filters.join(",")),
        }
    }

    pub fn is_jpeg(&self) -> bool {
        matches!(self, ImageEncoding::Jpeg)
    }
}

/// Dimensions, encoding and stored size of an image XObject.
#[derive(Debug, Clone)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub encoding: ImageEncoding,
    /// Size of the stored (encoded) stream content in bytes
    pub stored_len: usize,
}

impl ImageInfo {
    pub fn from_stream(stream: &Stream) -> Self {
        Self {
            width: dict_u32(stream, b"Width"),
            height: dict_u32(stream, b"Height"),
            encoding: ImageEncoding::from_stream(stream),
            stored_len: stream.content.len(),
        }
    }
}

/// Filter names applied to a stream, in decode order.
pub fn filter_names(stream: &Stream) -> Vec<String> {
    match stream.dict.get(b"Filter") {
        Ok(Object::Name(name)) => vec![String::from_utf8_lossy(name).into_owned()],
        Ok(Object::Array(filters)) => filters
            .iter()
            .filter_map(|f| match f {
                Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn dict_u32(stream: &Stream, key: &[u8]) -> u32 {
    match stream.dict.get(key) {
        // Anything not a positive u32 counts as missing
        Ok(Object::Integer(n)) if *n > 0 => u32::try_from(*n).unwrap_or(0),
        _ => 0,
    }
}
