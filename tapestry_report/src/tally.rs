use crate::message::AssertionResult;

/// Aggregated counters and failure records for one test file.
#[derive(Debug, Clone, Default)]
pub struct FileTally {
    file: String,
    success: usize,
    failure: usize,
    skip: usize,
    path: Vec<String>,
    failures: Vec<Failure>,
}

/// A failed assertion with the nesting path that led to it.
///
/// The first path element is the file itself.
#[derive(Debug, Clone)]
pub struct Failure {
    pub path: Vec<String>,
    pub assertion: AssertionResult,
}

impl FileTally {
    pub fn new(file: impl Into<String>) -> Self {
        let file = file.into();
        Self {
            path: vec![file.clone()],
            file,
            ..Self::default()
        }
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn success(&self) -> usize {
        self.success
    }

    pub fn failure(&self) -> usize {
        self.failure
    }

    pub fn skip(&self) -> usize {
        self.skip
    }

    pub fn total(&self) -> usize {
        self.success + self.failure + self.skip
    }

    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// Push a nested test description onto the current path.
    pub fn go_in(&mut self, description: impl Into<String>) {
        self.path.push(description.into());
    }

    /// Pop the innermost nested test description.
    pub fn go_out(&mut self) {
        self.path.pop();
    }

    /// Count an assertion; failures snapshot the current nesting path.
    pub fn record(&mut self, assertion: AssertionResult) {
        if !assertion.pass {
            self.failure += 1;
            self.failures.push(Failure {
                path: self.path.clone(),
                assertion,
            });
        } else if assertion.skip {
            self.skip += 1;
        } else {
            self.success += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FileTally;
    use crate::message::AssertionResult;

    fn passing() -> AssertionResult {
        AssertionResult {
            pass: true,
            operator: Some("ok".to_string()),
            ..AssertionResult::default()
        }
    }

    fn failing() -> AssertionResult {
        AssertionResult {
            pass: false,
            operator: Some("equal".to_string()),
            ..AssertionResult::default()
        }
    }

    #[test]
    fn counters_partition_by_outcome() {
        let mut tally = FileTally::new("spec/math.js");
        tally.record(passing());
        tally.record(failing());
        tally.record(AssertionResult {
            pass: true,
            skip: true,
            ..AssertionResult::default()
        });

        assert_eq!(tally.success(), 1);
        assert_eq!(tally.failure(), 1);
        assert_eq!(tally.skip(), 1);
        assert_eq!(tally.total(), 3);
    }

    #[test]
    fn failures_snapshot_the_nesting_path() {
        let mut tally = FileTally::new("spec/math.js");
        tally.go_in("addition");
        tally.go_in("integers");
        tally.record(failing());
        tally.go_out();
        tally.record(failing());

        assert_eq!(
            tally.failures()[0].path,
            vec!["spec/math.js", "addition", "integers"]
        );
        assert_eq!(tally.failures()[1].path, vec!["spec/math.js", "addition"]);
    }
}
