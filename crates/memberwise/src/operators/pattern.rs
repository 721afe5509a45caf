//! Regular expression operator.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

use parking_lot::Mutex;
use regex::Regex;
use tracing::warn;

use super::Operator;
use crate::access::Inspect;
use crate::foundation::Value;

const CACHE_CAPACITY: usize = 64;

static PATTERNS: LazyLock<Mutex<HashMap<String, Regex>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

fn compiled(pattern: &str) -> Option<Regex> {
    let mut cache = PATTERNS.lock();
    if let Some(regex) = cache.get(pattern) {
        return Some(regex.clone());
    }
    match Regex::new(pattern) {
        Ok(regex) => {
            if cache.len() >= CACHE_CAPACITY {
                cache.clear();
            }
            cache.insert(pattern.to_owned(), regex.clone());
            Some(regex)
        }
        Err(error) => {
            warn!(pattern, %error, "Invalid pattern in matches operator");
            None
        }
    }
}

/// String member matches the regular expression given as operand.
///
/// Non-string members and invalid patterns never match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Matches;

impl Operator for Matches {
    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed("matches")
    }

    fn check(&self, lhs: &dyn Inspect, rhs: &Value) -> bool {
        let (Value::Str(text), Some(pattern)) = (lhs.value(), rhs.as_str()) else {
            return false;
        };
        compiled(pattern).is_some_and(|regex| regex.is_match(&text))
    }

    fn description(&self) -> Cow<'static, str> {
        Cow::Borrowed("must match pattern")
    }

    fn negated_description(&self) -> Cow<'static, str> {
        Cow::Borrowed("must not match pattern")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_strings_only() {
        let pattern = Value::from(r"^\d{3}-\d{4}$");
        assert!(Matches.check(&"555-1234".to_owned(), &pattern));
        assert!(!Matches.check(&"5551234".to_owned(), &pattern));
        assert!(!Matches.check(&5_551_234, &pattern));
    }

    #[test]
    fn invalid_pattern_never_matches() {
        assert!(!Matches.check(&"(".to_owned(), &Value::from("(")));
    }
}
