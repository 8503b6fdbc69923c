#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use mflix::pipeline::{AggregateStore, DocumentCursor};
use mflix::{Error, Result};
use mongodb::bson::Document;

#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub collection: String,
    pub stages: Vec<Document>,
}

/// In-memory store that replays canned results per collection.
///
/// It never evaluates stages; tests provide what the server would return.
#[derive(Default)]
pub struct FakeStore {
    responses: HashMap<String, Vec<Result<Document>>>,
    submit_error: Option<Error>,
    submissions: RefCell<Vec<Submission>>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, collection: &str, docs: Vec<Document>) -> Self {
        self.responses
            .insert(collection.to_string(), docs.into_iter().map(Ok).collect());
        self
    }

    /// Results that fail part-way through iteration.
    pub fn with_items(mut self, collection: &str, items: Vec<Result<Document>>) -> Self {
        self.responses.insert(collection.to_string(), items);
        self
    }

    /// Fail every submission with `err`.
    pub fn failing(mut self, err: Error) -> Self {
        self.submit_error = Some(err);
        self
    }

    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions.borrow().clone()
    }
}

impl AggregateStore for FakeStore {
    fn aggregate(&self, collection: &str, stages: &[Document]) -> Result<DocumentCursor<'_>> {
        self.submissions.borrow_mut().push(Submission {
            collection: collection.to_string(),
            stages: stages.to_vec(),
        });

        if let Some(err) = &self.submit_error {
            return Err(err.clone());
        }

        let items = self.responses.get(collection).cloned().unwrap_or_default();
        Ok(Box::new(items.into_iter()))
    }
}
