use bytes::Bytes;

/// A resume file selected for screening, held in memory until the batch runs.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub name: String,
    pub bytes: Bytes,
}

impl UploadedDocument {
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn byte_size(&self) -> usize {
        self.bytes.len()
    }
}
