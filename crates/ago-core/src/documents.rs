use serde::{Deserialize, Serialize};

use crate::words::{DocumentId, null_as_default};

/// Ids below this are reserved (0 is the dictionary)
pub const RESERVED_DOCUMENTS: DocumentId = 1;

fn first_document_id() -> DocumentId {
    RESERVED_DOCUMENTS
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Id")]
    pub id: DocumentId,
}

/// Ingested documents and the next id to hand out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentList {
    #[serde(rename = "Docs", default, deserialize_with = "null_as_default")]
    documents: Vec<Document>,
    #[serde(rename = "Next_id", default = "first_document_id")]
    next_id: DocumentId,
}

impl Default for DocumentList {
    fn default() -> Self {
        Self {
            documents: Vec::new(),
            next_id: first_document_id(),
        }
    }
}

impl DocumentList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn get(&self, id: DocumentId) -> Option<&Document> {
        self.documents.iter().find(|doc| doc.id == id)
    }

    /// Id the next pushed document will get
    pub fn next_id(&self) -> DocumentId {
        self.next_id.max(RESERVED_DOCUMENTS)
    }

    /// Append a document under the next id
    pub fn push(&mut self, name: String) -> Document {
        let id = self.next_id();
        self.next_id = id + 1;
        let document = Document { name, id };
        self.documents.push(document.clone());
        document
    }

    pub fn remove(&mut self, id: DocumentId) -> Option<Document> {
        let idx = self.documents.iter().position(|doc| doc.id == id)?;
        Some(self.documents.remove(idx))
    }
}
