//! Output formatting for ensure command results.

use super::execute::EnsureResult;
use crate::output::Outputable;

impl Outputable for EnsureResult {
    fn to_table(&self) -> String {
        let state = if self.created { "created" } else { "already exists" };
        format!("{} '{}' {}", capitalize(&self.kind), self.name, state)
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
