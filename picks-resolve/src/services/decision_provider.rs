//! Human Disambiguator
//!
//! Operator decisions are behind the [`DecisionProvider`] trait so the
//! orchestrator can run against a terminal or against scripted answers.
//! [`ConsoleDecisionProvider`] reads from any `BufRead` and writes to any
//! `Write`; production wires it to stdin/stdout.

use crate::error::{ResolveError, ResolveResult};
use crate::models::CandidateRecord;
use std::io::{self, BufRead, Write};

/// What to do with a query that has no candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoMatchAction {
    /// Leave the query out and continue the batch
    Skip,
    /// Stop the whole batch
    Abort,
}

/// Source of operator decisions
///
/// Calls are synchronous and may block indefinitely.
pub trait DecisionProvider {
    /// Pick one of `candidates` (non-empty); returns a 0-based index
    fn choose_candidate(&mut self, query: &str, candidates: &[CandidateRecord]) -> ResolveResult<usize>;

    /// Decide whether a query without candidates is skipped or aborts the batch
    fn on_no_match(&mut self, query: &str) -> ResolveResult<NoMatchAction>;

    /// Yes/no question
    fn confirm(&mut self, message: &str) -> ResolveResult<bool>;
}

/// Ask the operator to choose among ambiguous candidates
///
/// Returns the chosen record. An out-of-range index from the provider is
/// rejected rather than trusted.
pub fn ask_human<D: DecisionProvider + ?Sized>(
    decisions: &mut D,
    query: &str,
    candidates: &[CandidateRecord],
) -> ResolveResult<CandidateRecord> {
    if candidates.is_empty() {
        return Err(ResolveError::InvalidInput(format!(
            "No candidates to choose from for '{}'",
            query
        )));
    }

    let index = decisions.choose_candidate(query, candidates)?;
    candidates.get(index).cloned().ok_or_else(|| {
        ResolveError::InvalidInput(format!(
            "Choice {} out of range for {} candidates",
            index + 1,
            candidates.len()
        ))
    })
}

/// Terminal-style decision provider
pub struct ConsoleDecisionProvider<R, W> {
    input: R,
    output: W,
    /// `None` re-prompts until a valid answer or end of input
    max_attempts: Option<usize>,
}

impl ConsoleDecisionProvider<io::StdinLock<'static>, io::Stdout> {
    /// Provider bound to the process stdin/stdout
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleDecisionProvider<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            max_attempts: None,
        }
    }

    /// Give up with `PromptClosed` after `attempts` invalid answers
    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    /// Consume the provider, returning the output sink
    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `prompt` and read one trimmed line; `None` at end of input
    fn read_answer(&mut self, prompt: &str) -> ResolveResult<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Re-prompt until `parse` accepts an answer
    fn ask<T>(
        &mut self,
        preamble: Option<&str>,
        prompt: &str,
        mut parse: impl FnMut(&str) -> Option<T>,
    ) -> ResolveResult<T> {
        let mut attempts = 0usize;
        loop {
            if let Some(limit) = self.max_attempts {
                if attempts >= limit {
                    return Err(ResolveError::PromptClosed(format!(
                        "no valid answer after {} attempts",
                        limit
                    )));
                }
            }
            attempts += 1;

            if let Some(text) = preamble {
                writeln!(self.output, "{}", text)?;
            }

            let answer = self
                .read_answer(prompt)?
                .ok_or_else(|| ResolveError::PromptClosed("end of input".to_string()))?;

            if let Some(value) = parse(&answer) {
                return Ok(value);
            }
        }
    }
}

impl<R: BufRead, W: Write> DecisionProvider for ConsoleDecisionProvider<R, W> {
    fn choose_candidate(&mut self, query: &str, candidates: &[CandidateRecord]) -> ResolveResult<usize> {
        writeln!(
            self.output,
            "Found {} good results for '{}'",
            candidates.len(),
            query
        )?;
        for (i, book) in candidates.iter().enumerate() {
            writeln!(self.output, "{}. {} (by {})", i + 1, book.title(), book.author())?;
        }

        let count = candidates.len();
        self.ask(None, "Which is the right one? ", |answer| {
            match answer.parse::<usize>() {
                Ok(n) if (1..=count).contains(&n) => Some(n - 1),
                _ => None,
            }
        })
    }

    fn on_no_match(&mut self, query: &str) -> ResolveResult<NoMatchAction> {
        writeln!(self.output, "WARNING: no results for query '{}'", query)?;
        writeln!(self.output, "Possible typo?")?;

        let skip = self.confirm("Skip (no exits the program)")?;
        Ok(if skip { NoMatchAction::Skip } else { NoMatchAction::Abort })
    }

    fn confirm(&mut self, message: &str) -> ResolveResult<bool> {
        self.ask(Some(message), "y/n > ", |answer| match answer.to_lowercase().as_str() {
            "y" => Some(true),
            "n" => Some(false),
            _ => None,
        })
    }
}
