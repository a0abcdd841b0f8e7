use serde::{Deserialize, Serialize};

use crate::encoder::Word;

/// An assembled instruction at its word address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub address: u32,
    pub word: Word,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Record {
    /// `ORG` passthrough; `source` keeps the address text as written.
    Org { address: u32, source: String },
    Word(Entry),
}

/// Output of one assembly run, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryImage {
    records: Vec<Record>,
}

impl MemoryImage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn entries(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.records.iter().filter_map(|r| match r {
            Record::Word(e) => Some(e),
            Record::Org { .. } => None,
        })
    }

    pub fn len(&self) -> usize {
        self.entries().count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }

    /// Word stored at `address`; a later entry at the same address wins.
    pub fn word_at(&self, address: u32) -> Option<Word> {
        self.entries()
            .filter(|e| e.address == address)
            .last()
            .map(|e| e.word)
    }

    /// Runs of entries with consecutive addresses, as `(start, entries)`.
    pub fn segments(&self) -> Vec<(u32, Vec<&Entry>)> {
        let mut out: Vec<(u32, Vec<&Entry>)> = Vec::new();
        for e in self.entries() {
            match out.last_mut() {
                Some((start, run)) if start.wrapping_add(run.len() as u32) == e.address => {
                    run.push(e);
                    continue;
                }
                _ => {}
            }
            out.push((e.address, vec![e]));
        }
        out
    }
}
