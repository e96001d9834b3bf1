mod directory;
mod sink;
mod tree;
mod upload;

pub use directory::DirectorySink;
pub use sink::{put_many, DocumentSink};
pub use tree::{ArtifactTree, Document, JSON_CONTENT_TYPE};
pub use upload::HttpPutSink;

#[cfg(test)]
pub(crate) use sink::testing;
