//! Entry table for storing and looking up messages and terms.

use std::collections::HashMap;

use crate::parser::ast::{Message, Term};

/// Messages and terms of one locale, keyed by id.
///
/// Messages and terms live in separate namespaces: `hello` and `-hello` never
/// collide. Inserting an id that is already present replaces the earlier
/// entry (last write wins).
#[derive(Debug, Default)]
pub struct EntryTable {
    messages: HashMap<String, Message>,
    terms: HashMap<String, Term>,
}

impl EntryTable {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a message by id.
    pub fn message(&self, id: &str) -> Option<&Message> {
        self.messages.get(id)
    }

    /// Get a term by id, without the leading `-`.
    pub fn term(&self, id: &str) -> Option<&Term> {
        self.terms.get(id)
    }

    /// Insert a message, returning the one it replaced.
    pub fn insert_message(&mut self, message: Message) -> Option<Message> {
        self.messages.insert(message.id.name.clone(), message)
    }

    /// Insert a term, returning the one it replaced.
    pub fn insert_term(&mut self, term: Term) -> Option<Term> {
        self.terms.insert(term.id.name.clone(), term)
    }

    /// All message ids, sorted.
    pub fn message_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.messages.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}
