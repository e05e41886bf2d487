//! Data filters applied to each command as it is drained
//!
//! A filter may rewrite a command, skip it (by returning `Ok(None)` or a blank
//! command), or fail. Failures propagate out of `Feeder::next`.

use crate::feeder::error::{FeederError, FeederResult};
use crate::feeder::item::Context;
use std::marker::PhantomData;

/// Per-command transformation strategy, fixed when the feeder is constructed
pub trait DataFilter<C> {
    fn filter(&mut self, command: C, context: &Context) -> FeederResult<Option<C>>;
}

impl<C, F> DataFilter<C> for F
where
    F: FnMut(C, &Context) -> FeederResult<Option<C>>,
{
    fn filter(&mut self, command: C, context: &Context) -> FeederResult<Option<C>> {
        self(command, context)
    }
}

/// Adapter for filters that cannot fail
pub struct InfallibleFilter<C, F> {
    func: F,
    _command: PhantomData<fn(C) -> C>,
}

impl<C, F> InfallibleFilter<C, F>
where
    F: FnMut(C, &Context) -> Option<C>,
{
    pub fn new(func: F) -> Self {
        Self {
            func,
            _command: PhantomData,
        }
    }
}

impl<C, F> DataFilter<C> for InfallibleFilter<C, F>
where
    F: FnMut(C, &Context) -> Option<C>,
{
    fn filter(&mut self, command: C, context: &Context) -> FeederResult<Option<C>> {
        Ok((self.func)(command, context))
    }
}

/// Settings for [`LineFilter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFilterConfig {
    /// Remove `;` end-of-line comments and `( ... )` inline comments
    pub strip_comments: bool,
    pub trim: bool,
    pub uppercase: bool,
}

impl Default for LineFilterConfig {
    fn default() -> Self {
        Self {
            strip_comments: true,
            trim: true,
            uppercase: false,
        }
    }
}

/// Filter for text instructions, one line per command
///
/// Lines reduced to nothing are returned as blank and skipped by the feeder.
#[derive(Debug, Clone, Default)]
pub struct LineFilter {
    config: LineFilterConfig,
}

impl LineFilter {
    pub fn new(config: LineFilterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LineFilterConfig {
        &self.config
    }

    /// Apply the configured transformations to a single line
    pub fn apply(&self, line: &str) -> FeederResult<String> {
        let mut out = if self.config.strip_comments {
            strip_comments(line)?
        } else {
            line.to_string()
        };

        if self.config.trim {
            out = out.trim().to_string();
        }
        if self.config.uppercase {
            out = out.to_uppercase();
        }
        Ok(out)
    }
}

impl DataFilter<String> for LineFilter {
    fn filter(&mut self, command: String, _context: &Context) -> FeederResult<Option<String>> {
        let filtered = self.apply(&command)?;
        if filtered.is_empty() {
            log::trace!("Line filter reduced '{}' to a blank line", command);
        }
        Ok(Some(filtered))
    }
}

fn strip_comments(line: &str) -> FeederResult<String> {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            ';' => break,
            '(' => {
                // Inline comments do not nest
                if !chars.by_ref().any(|c| c == ')') {
                    return Err(FeederError::filter(line, "unterminated '(' comment"));
                }
            }
            _ => out.push(c),
        }
    }
    Ok(out)
}
