//! Per-theme iteration with a selectable failure policy.
//!
//! By default every stage is fail-fast: the first failing theme aborts the
//! run and its error is returned unchanged. With `keep_going` each theme's
//! failure is recorded and the loop moves on; the caller reports the
//! successes and then turns the failures into [`Error::Themes`].
//!
//! Either way, output already written for earlier themes stays on disk.

use crate::error::{Error, ThemeFailure};
use crate::types::ThemeRecord;

/// Successes and isolated failures of one stage.
#[derive(Debug)]
pub struct Outcome<T> {
    pub done: Vec<T>,
    pub failures: Vec<ThemeFailure>,
}

impl<T> Default for Outcome<T> {
    fn default() -> Self {
        Self {
            done: Vec::new(),
            failures: Vec::new(),
        }
    }
}

impl<T> Outcome<T> {
    /// An outcome with only successes.
    pub fn succeeded(done: Vec<T>) -> Self {
        Self {
            done,
            failures: Vec::new(),
        }
    }

    /// Pair already-computed results with their themes, in order.
    pub fn from_results<E: Into<Error>>(
        themes: &[ThemeRecord],
        results: Vec<Result<T, E>>,
    ) -> Self {
        let mut outcome = Self::default();
        for (theme, result) in themes.iter().zip(results) {
            match result {
                Ok(value) => outcome.done.push(value),
                Err(err) => outcome.record(theme, err.into()),
            }
        }
        outcome
    }

    fn record(&mut self, theme: &ThemeRecord, error: Error) {
        log::error!("{}: {}", theme.name, error);
        self.failures.push(ThemeFailure {
            theme: theme.name.clone(),
            error,
        });
    }

    /// Fold another stage's failures into this one.
    pub fn absorb_failures(&mut self, failures: Vec<ThemeFailure>) {
        self.failures.extend(failures);
    }

    /// `Ok` with the successes when nothing failed.
    pub fn finish(self) -> Result<Vec<T>, Error> {
        if self.failures.is_empty() {
            Ok(self.done)
        } else {
            Err(Error::Themes(self.failures))
        }
    }
}

/// Pair each theme with its 1-based position in the config.
pub fn numbered(themes: &[ThemeRecord]) -> impl Iterator<Item = (usize, &ThemeRecord)> {
    themes.iter().enumerate().map(|(i, theme)| (i + 1, theme))
}

/// Run `f` for each theme in order.
///
/// Fail-fast returns the first error as-is. With `keep_going` failures are
/// collected into the outcome instead.
pub fn run_each<'a, T, I, F>(items: I, keep_going: bool, mut f: F) -> Result<Outcome<T>, Error>
where
    I: IntoIterator<Item = (usize, &'a ThemeRecord)>,
    F: FnMut(usize, &ThemeRecord) -> Result<T, Error>,
{
    let mut outcome = Outcome::default();
    for (position, theme) in items {
        match f(position, theme) {
            Ok(value) => outcome.done.push(value),
            Err(err) if keep_going => outcome.record(theme, err),
            Err(err) => return Err(err),
        }
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;

    fn themes() -> Vec<ThemeRecord> {
        vec![
            ThemeRecord::new("a", ""),
            ThemeRecord::new("b", ""),
            ThemeRecord::new("c", ""),
        ]
    }

    fn fail_on_b(_: usize, theme: &ThemeRecord) -> Result<String, Error> {
        if theme.name == "b" {
            Err(ConfigError::Validation("boom".into()).into())
        } else {
            Ok(theme.name.clone())
        }
    }

    #[test]
    fn numbered_is_one_based() {
        let themes = themes();
        let positions: Vec<usize> = numbered(&themes).map(|(i, _)| i).collect();
        assert_eq!(positions, vec![1, 2, 3]);
    }

    #[test]
    fn fail_fast_stops_at_first_error() {
        let themes = themes();
        let mut seen = Vec::new();
        let result = run_each(numbered(&themes), false, |i, t| {
            seen.push(i);
            fail_on_b(i, t)
        });
        assert!(matches!(result, Err(Error::Config(_))));
        assert_eq!(seen, vec![1, 2]);
    }

    #[test]
    fn keep_going_isolates_failures() {
        let themes = themes();
        let outcome = run_each(numbered(&themes), true, fail_on_b).unwrap();
        assert_eq!(outcome.done, vec!["a", "c"]);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].theme, "b");
        assert!(matches!(outcome.finish(), Err(Error::Themes(f)) if f.len() == 1));
    }

    #[test]
    fn all_success_finishes_ok() {
        let themes = themes();
        let outcome = run_each(numbered(&themes), true, |_, t| Ok(t.name.clone())).unwrap();
        assert!(outcome.failures.is_empty());
        assert_eq!(outcome.finish().unwrap().len(), 3);
    }

    #[test]
    fn from_results_pairs_in_order() {
        let themes = themes();
        let results: Vec<Result<u32, ConfigError>> = vec![
            Ok(1),
            Ok(2),
            Err(ConfigError::Validation("c broke".into())),
        ];
        let outcome = Outcome::from_results(&themes, results);
        assert_eq!(outcome.done, vec![1, 2]);
        assert_eq!(outcome.failures[0].theme, "c");
    }
}
