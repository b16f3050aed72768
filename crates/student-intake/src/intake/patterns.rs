use std::ops::ControlFlow;

use chrono::NaiveDate;
use regex::{Regex, RegexBuilder};

use super::dates::try_parse_date;

/// List items this long are treated as a captured paragraph, not a name.
pub const MAX_LIST_ITEM_CHARS: usize = 100;

/// A case-insensitive label pattern and the capture group holding its value.
#[derive(Debug, Clone)]
pub struct LabelPattern {
    regex: Regex,
    value_group: usize,
}

impl LabelPattern {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Self::with_value_group(pattern, 1)
    }

    pub fn with_value_group(pattern: &str, value_group: usize) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self { regex, value_group })
    }

    /// Value captured by the first match, if that match populated a
    /// non-empty value group.
    pub fn capture<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.regex
            .captures(text)
            .and_then(|captures| captures.get(self.value_group))
            .map(|value| value.as_str())
            .filter(|value| !value.is_empty())
    }
}

/// Label patterns ordered from most specific to most generic.
#[derive(Debug, Clone)]
pub struct LabelChain {
    labels: Vec<LabelPattern>,
}

impl LabelChain {
    pub fn new(patterns: &[&str]) -> Result<Self, regex::Error> {
        let labels = patterns
            .iter()
            .map(|pattern| LabelPattern::new(pattern))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { labels })
    }

    pub fn with_value_group(patterns: &[&str], value_group: usize) -> Result<Self, regex::Error> {
        let labels = patterns
            .iter()
            .map(|pattern| LabelPattern::with_value_group(pattern, value_group))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { labels })
    }

    /// Walks the chain in priority order, handing every captured value to
    /// `step`. `Break` ends the walk with its payload, `Continue` moves on to
    /// the next label.
    pub fn evaluate<'t, T>(
        &self,
        text: &'t str,
        mut step: impl FnMut(&'t str) -> ControlFlow<Option<T>>,
    ) -> Option<T> {
        for label in &self.labels {
            let Some(captured) = label.capture(text) else {
                continue;
            };
            if let ControlFlow::Break(value) = step(captured) {
                return value;
            }
        }
        None
    }
}

/// First label that matches decides the value; a blank capture means absent.
pub fn extract_field(text: &str, chain: &LabelChain) -> Option<String> {
    chain.evaluate(text, |captured| {
        let trimmed = captured.trim();
        ControlFlow::Break((!trimmed.is_empty()).then(|| trimmed.to_string()))
    })
}

/// Splits the value captured by `label` on `,` and `;`.
pub fn extract_array(text: &str, label: &LabelPattern) -> Vec<String> {
    label.capture(text).map(split_list).unwrap_or_default()
}

/// Like [`extract_field`], but a capture that does not parse as a date hands
/// over to the next label.
pub fn extract_date(text: &str, chain: &LabelChain) -> Option<NaiveDate> {
    chain.evaluate(text, |captured| match try_parse_date(captured) {
        Some(date) => ControlFlow::Break(Some(date)),
        None => ControlFlow::Continue(()),
    })
}

/// List capture for labels with a singular/plural marker group ahead of the
/// list body. Oversized items are dropped and the first label yielding at
/// least one item wins.
pub fn extract_discriminated_list(text: &str, chain: &LabelChain) -> Vec<String> {
    chain
        .evaluate(text, |body| {
            let items: Vec<String> = split_list(body)
                .into_iter()
                .filter(|item| item.chars().count() < MAX_LIST_ITEM_CHARS)
                .collect();
            if items.is_empty() {
                ControlFlow::Continue(())
            } else {
                ControlFlow::Break(Some(items))
            }
        })
        .unwrap_or_default()
}

fn split_list(captured: &str) -> Vec<String> {
    captured
        .split([',', ';'])
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
