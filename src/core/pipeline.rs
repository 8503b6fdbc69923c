//! Aggregation pipeline execution.
//!
//! A [`Pipeline`] is an ordered list of stage documents. The runner hands it
//! to an [`AggregateStore`] untouched and returns a lazy [`ResultStream`] over
//! whatever the store emits. Stage semantics are the store's business.

use mongodb::bson::Document;

use crate::error::{Error, Result};
use crate::utils::validation;

/// Lazy, one-shot sequence of result documents.
pub type DocumentCursor<'a> = Box<dyn Iterator<Item = Result<Document>> + 'a>;

/// Anything that can evaluate an aggregation pipeline against a collection.
pub trait AggregateStore {
    fn aggregate(&self, collection: &str, stages: &[Document]) -> Result<DocumentCursor<'_>>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pipeline {
    stages: Vec<Document>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage. Stages run in insertion order.
    pub fn stage(mut self, stage: Document) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn stages(&self) -> &[Document] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Leading operator of each stage, e.g. `$match`.
    pub fn operators(&self) -> Vec<&str> {
        self.stages
            .iter()
            .filter_map(|stage| stage.keys().next().map(String::as_str))
            .collect()
    }
}

impl From<Vec<Document>> for Pipeline {
    fn from(stages: Vec<Document>) -> Self {
        Self { stages }
    }
}

/// Result documents of a single pipeline submission.
///
/// Ends after the store's cursor is exhausted or after the first error.
pub struct ResultStream<'a> {
    collection: String,
    cursor: DocumentCursor<'a>,
    yielded: usize,
    finished: bool,
}

impl<'a> ResultStream<'a> {
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Documents yielded so far.
    pub fn yielded(&self) -> usize {
        self.yielded
    }
}

impl Iterator for ResultStream<'_> {
    type Item = Result<Document>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.cursor.next() {
            Some(Ok(doc)) => {
                self.yielded += 1;
                Some(Ok(doc))
            }
            Some(Err(err)) => {
                self.finished = true;
                Some(Err(err))
            }
            None => {
                self.finished = true;
                log_status!(
                    "pipeline",
                    "{}: {} document(s)",
                    self.collection,
                    self.yielded
                );
                None
            }
        }
    }
}

/// Submit `pipeline` against `collection` and return its lazy results.
///
/// Every call is a fresh evaluation; nothing is cached between calls.
pub fn run<'a, S>(store: &'a S, collection: &str, pipeline: &Pipeline) -> Result<ResultStream<'a>>
where
    S: AggregateStore + ?Sized,
{
    let collection =
        validation::require_non_empty(collection, "collection", "Collection name is required")?;

    log_status!(
        "pipeline",
        "{}: [{}]",
        collection,
        pipeline.operators().join(", ")
    );

    let cursor = store.aggregate(collection, pipeline.stages())?;

    Ok(ResultStream {
        collection: collection.to_string(),
        cursor,
        yielded: 0,
        finished: false,
    })
}

/// Submit a pipeline whose caller needs at least one document back.
///
/// Returns the first document, or `store.empty_result` when there is none.
pub fn run_single<S>(store: &S, collection: &str, pipeline: &Pipeline) -> Result<Document>
where
    S: AggregateStore + ?Sized,
{
    let mut stream = run(store, collection, pipeline)?;
    match stream.next() {
        Some(result) => result,
        None => Err(Error::store_empty_result(stream.collection())),
    }
}
