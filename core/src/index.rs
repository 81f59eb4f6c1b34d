use serde::{Deserialize, Serialize};

pub type TermId = u32;

/// A record in the corpus. Only `content` is tokenized; the other fields ride along.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub author: String,
    pub content: String,
}

impl Document {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self { id: id.into(), title: title.into(), author: author.into(), content: content.into() }
    }
}

/// Ordered documents. Position is the identity used for tie-breaking; ids may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Corpus {
    documents: Vec<Document>,
}

impl Corpus {
    pub fn new(documents: Vec<Document>) -> Self { Self { documents } }

    pub fn documents(&self) -> &[Document] { &self.documents }

    pub fn get(&self, position: usize) -> Option<&Document> { self.documents.get(position) }

    pub fn len(&self) -> usize { self.documents.len() }

    pub fn is_empty(&self) -> bool { self.documents.is_empty() }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> { self.documents.iter() }
}

impl From<Vec<Document>> for Corpus {
    fn from(documents: Vec<Document>) -> Self { Self::new(documents) }
}

impl FromIterator<Document> for Corpus {
    fn from_iter<I: IntoIterator<Item = Document>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter { self.documents.iter() }
}

/// A matched document and its cosine score, borrowed from the caller's corpus.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredResult<'a> {
    /// Position of the document in the corpus it was ranked from.
    pub position: usize,
    #[serde(flatten)]
    pub document: &'a Document,
    pub score: f64,
}
