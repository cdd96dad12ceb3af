use crc32fast::Hasher;
use std::collections::HashSet;

/// Stable id of a document, derived from its path.
///
/// `/drawing.svg` and `file:///drawing.svg` name the same document.
pub fn get_document_id(path: &str) -> String {
    let path = path.strip_prefix("file://").unwrap_or(path);

    let mut hasher = Hasher::new();
    hasher.update(b"file://");
    hasher.update(path.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Hands out element ids for one document.
///
/// Ids written in the markup are reserved first; generated ids take the form
/// `<document-id>-<n>`, numbered in document order, skipping any reserved id.
#[derive(Debug, Clone)]
pub struct IDGenerator {
    seed: String,
    count: u32,
    reserved: HashSet<String>,
}

impl IDGenerator {
    pub fn new(path: &str) -> Self {
        Self::from_seed(get_document_id(path))
    }

    pub fn from_seed(seed: String) -> Self {
        Self {
            seed,
            count: 0,
            reserved: HashSet::new(),
        }
    }

    /// Claim an explicit id. Returns `false` if it was already claimed.
    pub fn reserve(&mut self, id: &str) -> bool {
        self.reserved.insert(id.to_string())
    }

    /// Next generated id not claimed by the markup
    pub fn new_id(&mut self) -> String {
        loop {
            self.count += 1;
            let id = format!("{}-{}", self.seed, self.count);
            if !self.reserved.contains(&id) {
                return id;
            }
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_id_is_stable_per_path() {
        assert_eq!(get_document_id("/drawing.svg"), get_document_id("/drawing.svg"));
        assert_ne!(get_document_id("/drawing.svg"), get_document_id("/icons.svg"));
        assert_eq!(
            get_document_id("/drawing.svg"),
            get_document_id("file:///drawing.svg")
        );
    }

    #[test]
    fn test_generated_ids_skip_reserved() {
        let mut ids = IDGenerator::from_seed("abc".to_string());
        assert!(ids.reserve("abc-2"));
        assert!(!ids.reserve("abc-2"));

        assert_eq!(ids.new_id(), "abc-1");
        assert_eq!(ids.new_id(), "abc-3");
        assert_eq!(ids.seed(), "abc");
    }
}
