//! Scripted operator

use picks_resolve::services::{DecisionProvider, NoMatchAction};
use picks_resolve::{CandidateRecord, ResolveError, ResolveResult};
use std::collections::VecDeque;

/// Decision provider answering from queued scripts
///
/// Running out of script is reported as a closed prompt, the same way
/// the console reports end of input.
#[derive(Debug, Default)]
pub struct ScriptedDecisions {
    choices: VecDeque<usize>,
    no_match: VecDeque<NoMatchAction>,
    confirms: VecDeque<bool>,
    /// Queries the operator was asked to disambiguate, in order
    pub asked: Vec<String>,
    /// Queries reported as having no match, in order
    pub no_match_queries: Vec<String>,
}

impl ScriptedDecisions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a 0-based candidate choice
    pub fn then_choose(mut self, index: usize) -> Self {
        self.choices.push_back(index);
        self
    }

    pub fn then_no_match(mut self, action: NoMatchAction) -> Self {
        self.no_match.push_back(action);
        self
    }

    pub fn then_confirm(mut self, answer: bool) -> Self {
        self.confirms.push_back(answer);
        self
    }
}

impl DecisionProvider for ScriptedDecisions {
    fn choose_candidate(&mut self, query: &str, _candidates: &[CandidateRecord]) -> ResolveResult<usize> {
        self.asked.push(query.to_string());
        self.choices
            .pop_front()
            .ok_or_else(|| ResolveError::PromptClosed(format!("no scripted choice for '{}'", query)))
    }

    fn on_no_match(&mut self, query: &str) -> ResolveResult<NoMatchAction> {
        self.no_match_queries.push(query.to_string());
        self.no_match
            .pop_front()
            .ok_or_else(|| ResolveError::PromptClosed(format!("no scripted no-match action for '{}'", query)))
    }

    fn confirm(&mut self, message: &str) -> ResolveResult<bool> {
        self.confirms
            .pop_front()
            .ok_or_else(|| ResolveError::PromptClosed(format!("no scripted answer to '{}'", message)))
    }
}
