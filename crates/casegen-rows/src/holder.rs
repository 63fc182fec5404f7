//! Deduplicating row holder
//!
//! Provides [`RowHolder`], the insertion-ordered store of test cases and their
//! materialized rows for one data source.

use crate::row::Row;
use casegen_model::{ArgsCode, TestData};
use casegen_source::DataSource;
use indexmap::IndexMap;
use std::sync::Arc;

/// Ordered set of test cases with their rows
///
/// Cases are keyed by value: adding a case equal to one already held is a
/// silent no-op. Each held case is materialized exactly once, at insertion,
/// under the holder's args code.
///
/// Not synchronized; use one holder from one generation sequence at a time.
///
/// # Example
/// ```
/// use casegen_model::{ArgsCode, TestData};
/// use casegen_rows::RowHolder;
///
/// let mut holder = RowHolder::new(ArgsCode::Properties);
/// assert!(holder.add(TestData::new("a>b", "true").with_arg(1).with_arg(2)));
/// assert!(!holder.add(TestData::new("a>b", "true").with_arg(1).with_arg(2)));
///
/// assert_eq!(holder.rows(None).len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct RowHolder {
    args_code: ArgsCode,
    include_expected: bool,
    rows: IndexMap<Arc<TestData>, Row>,
}

impl RowHolder {
    /// Create empty holder
    #[must_use]
    pub fn new(args_code: ArgsCode) -> Self {
        Self {
            args_code,
            include_expected: true,
            rows: IndexMap::new(),
        }
    }

    /// Create empty holder with the source's default settings
    ///
    /// Overrides active on the source are not captured; they apply per call
    /// through [`rows_for_source`](Self::rows_for_source).
    #[must_use]
    pub fn for_source(source: &DataSource) -> Self {
        Self::new(source.default_args_code()).with_include_expected(source.include_expected())
    }

    /// With expected-value inclusion; rebuilds held rows if it changes
    #[must_use]
    pub fn with_include_expected(mut self, include_expected: bool) -> Self {
        if include_expected != self.include_expected {
            self.include_expected = include_expected;
            for (data, row) in &mut self.rows {
                *row = Row::new(Arc::clone(data), self.args_code, include_expected);
            }
        }
        self
    }

    /// Args code rows are stored under
    #[inline]
    #[must_use]
    pub fn args_code(&self) -> ArgsCode {
        self.args_code
    }

    /// Whether returns/throws cases emit their expected value
    #[inline]
    #[must_use]
    pub fn include_expected(&self) -> bool {
        self.include_expected
    }

    /// Number of held cases
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if no case is held
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Add a case
    ///
    /// Returns `false`, leaving the holder unchanged, if an equal case is
    /// already held.
    pub fn add(&mut self, data: TestData) -> bool {
        self.add_shared(Arc::new(data))
    }

    /// Add a shared case
    ///
    /// Same as [`add`](Self::add); the instance is kept so `Instance` rows
    /// hand back this exact object.
    pub fn add_shared(&mut self, data: Arc<TestData>) -> bool {
        if self.rows.contains_key(&*data) {
            tracing::trace!(case = %data, "ignored duplicate test case");
            return false;
        }
        let row = Row::new(Arc::clone(&data), self.args_code, self.include_expected);
        self.rows.insert(data, row);
        true
    }

    /// Add several cases in order
    ///
    /// Returns the number actually inserted.
    pub fn add_range<I>(&mut self, cases: I) -> usize
    where
        I: IntoIterator<Item = TestData>,
    {
        let mut inserted = 0;
        for data in cases {
            if self.add(data) {
                inserted += 1;
            }
        }
        tracing::debug!(inserted, total = self.len(), "added test cases");
        inserted
    }

    /// Check if an equal case is held
    #[inline]
    #[must_use]
    pub fn contains(&self, data: &TestData) -> bool {
        self.rows.contains_key(data)
    }

    /// Held cases in insertion order
    pub fn test_data(&self) -> impl Iterator<Item = &Arc<TestData>> + '_ {
        self.rows.keys()
    }

    /// Stored rows in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Row> + '_ {
        self.rows.values()
    }

    /// Rows in insertion order
    ///
    /// With `Some(code)` differing from the holder's own, rows are rebuilt
    /// under `code` for this call only; stored rows are not touched.
    #[must_use]
    pub fn rows(&self, args_code: Option<ArgsCode>) -> Vec<Row> {
        match args_code {
            Some(code) if code != self.args_code => {
                tracing::debug!(
                    stored = %self.args_code,
                    requested = %code,
                    rows = self.len(),
                    "rebuilding rows under override"
                );
                self.iter().map(|row| row.with_args_code(code)).collect()
            }
            _ => self.iter().cloned().collect(),
        }
    }

    /// Rows under the source's effective args code
    ///
    /// Inside a scope opened with
    /// [`DataSource::run_with_override`] the override applies.
    #[must_use]
    pub fn rows_for_source(&self, source: &DataSource) -> Vec<Row> {
        self.rows(Some(source.args_code()))
    }

    /// New holder with the same cases under another args code
    ///
    /// Case instances are shared with this holder.
    #[must_use]
    pub fn with_args_code(&self, args_code: ArgsCode) -> Self {
        let rows = self
            .rows
            .iter()
            .map(|(data, row)| (Arc::clone(data), row.with_args_code(args_code)))
            .collect();
        Self {
            args_code,
            include_expected: self.include_expected,
            rows,
        }
    }

    /// Remove all cases
    #[inline]
    pub fn clear(&mut self) {
        self.rows.clear();
    }
}

impl Default for RowHolder {
    fn default() -> Self {
        Self::new(ArgsCode::default())
    }
}

impl Extend<TestData> for RowHolder {
    fn extend<I: IntoIterator<Item = TestData>>(&mut self, iter: I) {
        self.add_range(iter);
    }
}

impl FromIterator<TestData> for RowHolder {
    fn from_iter<I: IntoIterator<Item = TestData>>(iter: I) -> Self {
        let mut holder = Self::default();
        holder.add_range(iter);
        holder
    }
}

impl<'a> IntoIterator for &'a RowHolder {
    type Item = &'a Row;
    type IntoIter = indexmap::map::Values<'a, Arc<TestData>, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casegen_model::{Arg, ExpectedError, Param};
    use pretty_assertions::assert_eq;

    fn compare(a: i32, b: i32) -> TestData {
        TestData::new(format!("{a}>{b}"), (a > b).to_string()).with_arg(a).with_arg(b)
    }

    #[test]
    fn duplicate_add_is_noop() {
        let mut holder = RowHolder::new(ArgsCode::Instance);

        assert!(holder.add(compare(2, 1)));
        assert!(!holder.add(compare(2, 1)));
        assert_eq!(holder.len(), 1);
        assert_eq!(holder.rows(None).len(), 1);
    }

    #[test]
    fn definition_is_part_of_identity() {
        let mut holder = RowHolder::new(ArgsCode::Instance);
        holder.add(TestData::new("first", "r").with_arg(1));
        holder.add(TestData::new("second", "r").with_arg(1));
        assert_eq!(holder.len(), 2);
    }

    #[test]
    fn insertion_order_preserved() {
        let mut holder = RowHolder::new(ArgsCode::Properties);
        let inserted =
            holder.add_range([compare(3, 1), compare(1, 3), compare(3, 1), compare(2, 2)]);

        assert_eq!(inserted, 3);
        let labels: Vec<String> = holder.iter().map(Row::test_case_name).collect();
        assert_eq!(labels, vec!["3>1 => true", "1>3 => false", "2>2 => false"]);
    }

    #[test]
    fn instance_rows_keep_shared_object() {
        let mut holder = RowHolder::new(ArgsCode::Instance);
        let data = Arc::new(compare(5, 4));
        holder.add_shared(Arc::clone(&data));

        let rows = holder.rows(None);
        assert!(rows[0].params()[0].is_same_instance(&data));
    }

    #[test]
    fn override_does_not_mutate_stored_rows() {
        let mut holder = RowHolder::new(ArgsCode::Instance);
        holder.add(compare(2, 1));

        let flat = holder.rows(Some(ArgsCode::Properties));
        assert_eq!(
            flat[0].params(),
            &[
                Param::Value(Arg::from("2>1 => true")),
                Param::Value(Arg::Int(2)),
                Param::Value(Arg::Int(1)),
            ]
        );
        assert_eq!(holder.args_code(), ArgsCode::Instance);
        assert_eq!(holder.rows(None)[0].args_code(), ArgsCode::Instance);
    }

    #[test]
    fn include_expected_toggle_rebuilds_rows() {
        let mut holder = RowHolder::new(ArgsCode::Properties);
        holder.add(TestData::throws("bad", ExpectedError::new("Invalid")).with_arg(1));
        assert_eq!(holder.rows(None)[0].params().len(), 3);

        let holder = holder.with_include_expected(false);
        assert_eq!(holder.rows(None)[0].params().len(), 2);
    }

    #[test]
    fn with_args_code_shares_cases() {
        let mut holder = RowHolder::new(ArgsCode::Instance);
        holder.add(compare(1, 0));

        let flat = holder.with_args_code(ArgsCode::Properties);
        assert_eq!(flat.args_code(), ArgsCode::Properties);
        let original = holder.test_data().next().unwrap();
        let shared = flat.test_data().next().unwrap();
        assert!(Arc::ptr_eq(original, shared));
    }

    #[test]
    fn contains_and_clear() {
        let mut holder: RowHolder = vec![compare(1, 2)].into_iter().collect();
        assert!(holder.contains(&compare(1, 2)));
        assert!(!holder.contains(&compare(2, 1)));

        holder.clear();
        assert!(holder.is_empty());
    }

    #[test]
    fn extend_deduplicates() {
        let mut holder = RowHolder::default();
        holder.extend([compare(1, 1), compare(1, 1)]);
        assert_eq!((&holder).into_iter().count(), 1);
    }
}
