//! Parser registry.
//!
//! Maps parser names to instances so callers can look parsers up by
//! configuration string. Unknown names are a configuration error
//! ([`DomainError::UnknownParser`]), not a parse failure.

use super::outcome::ParseResult;
use super::problem::ProblemStatementParser;
use super::steps::StepOutputParser;
use crate::core::error::DomainError;
use std::collections::HashMap;

/// Object-safe parsing contract shared by all registered parsers.
pub trait Parser: Send + Sync {
    fn parse(&self, text: &str) -> ParseResult;
}

impl Parser for ProblemStatementParser {
    fn parse(&self, text: &str) -> ParseResult {
        ProblemStatementParser::parse(self, text)
    }
}

impl Parser for StepOutputParser {
    fn parse(&self, text: &str) -> ParseResult {
        StepOutputParser::parse(self, text)
    }
}

/// Registry of named parsers.
pub struct ParserFactory {
    parsers: HashMap<String, Box<dyn Parser>>,
}

impl ParserFactory {
    /// Empty registry. Use [`ParserFactory::default`] for the standard set.
    pub fn new() -> Self {
        Self {
            parsers: HashMap::new(),
        }
    }

    pub fn register(&mut self, name: impl Into<String>, parser: Box<dyn Parser>) {
        self.parsers.insert(name.into(), parser);
    }

    pub fn get(&self, name: &str) -> Result<&dyn Parser, DomainError> {
        self.parsers
            .get(name)
            .map(|p| p.as_ref())
            .ok_or_else(|| DomainError::UnknownParser(name.to_string()))
    }

    /// Registered parser names, sorted for stable output.
    pub fn available_parsers(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.parsers.keys().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names
    }
}

impl Default for ParserFactory {
    fn default() -> Self {
        let mut factory = Self::new();
        factory.register("problem_statement", Box::new(ProblemStatementParser::new()));
        factory.register("step_output", Box::new(StepOutputParser::new()));
        factory
    }
}
