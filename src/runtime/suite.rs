use crate::clients::{ScenarioRegistry, Thunk};
use tracing::{error, info, info_span, warn, Instrument};

/// Result of one scenario run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Failed(String),
}

/// Per-label results of [`Suite::run`], in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuiteReport {
    pub outcomes: Vec<(String, Outcome)>,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| *o == Outcome::Passed)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// First outcome recorded under `label`.
    pub fn outcome(&self, label: &str) -> Option<&Outcome> {
        self.outcomes
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, o)| o)
    }
}

/// In-process test runner.
///
/// Collects registered scenarios and runs them one at a time, in registration
/// order. Each scenario runs in its own Tokio task so a panicking body is
/// reported as a failure instead of taking the suite down.
///
/// Labels are only unique within one `generate` call. Generating for two
/// resource types with the same user registers the same labels twice; both
/// run and both appear in the report, but [`SuiteReport::outcome`] returns
/// the first.
///
/// # Example
///
/// ```ignore
/// let mut suite = Suite::new();
/// binder.generate(&mut suite, Post::default().into(), alice, &CrudOptions::default());
///
/// let report = suite.run().await;
/// assert!(report.is_success());
/// ```
#[derive(Default)]
pub struct Suite {
    scenarios: Vec<(String, Thunk)>,
}

impl Suite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.scenarios.iter().map(|(l, _)| l.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Runs every registered scenario sequentially.
    pub async fn run(self) -> SuiteReport {
        info!(count = self.scenarios.len(), "Running suite");
        let mut report = SuiteReport::default();

        for (label, thunk) in self.scenarios {
            let span = info_span!("run", label = %label);
            let outcome = match tokio::spawn(thunk().instrument(span)).await {
                Ok(Ok(())) => {
                    info!(label = %label, "Passed");
                    Outcome::Passed
                }
                Ok(Err(e)) => {
                    warn!(label = %label, error = %e, "Failed");
                    Outcome::Failed(e.to_string())
                }
                Err(e) => {
                    error!(label = %label, error = %e, "Scenario task failed");
                    Outcome::Failed(format!("scenario task failed: {e}"))
                }
            };
            report.outcomes.push((label, outcome));
        }

        info!(passed = report.passed(), failed = report.failed(), "Suite finished");
        report
    }
}

impl ScenarioRegistry for Suite {
    fn register_scenario(&mut self, label: String, thunk: Thunk) {
        if self.scenarios.iter().any(|(l, _)| *l == label) {
            warn!(label = %label, "Duplicate scenario label");
        }
        self.scenarios.push((label, thunk));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{ScenarioFuture, ScenarioResult};
    use crate::error::BoxError;

    fn thunk(result: Result<(), &'static str>) -> Thunk {
        Box::new(move || -> ScenarioFuture { Box::pin(async move { result.map_err(BoxError::from) }) })
    }

    fn explode() -> ScenarioResult {
        panic!("boom")
    }

    #[tokio::test]
    async fn test_reports_each_label() {
        let mut suite = Suite::new();
        suite.register_scenario("ok".into(), thunk(Ok(())));
        suite.register_scenario("bad".into(), thunk(Err("expected a form")));
        suite.register_scenario(
            "boom".into(),
            Box::new(|| -> ScenarioFuture { Box::pin(async { explode() }) }),
        );
        assert_eq!(suite.labels(), vec!["ok", "bad", "boom"]);

        let report = suite.run().await;

        assert_eq!(report.passed(), 1);
        assert_eq!(report.failed(), 2);
        assert_eq!(report.outcome("ok"), Some(&Outcome::Passed));
        assert_eq!(
            report.outcome("bad"),
            Some(&Outcome::Failed("expected a form".into()))
        );
        assert!(matches!(report.outcome("boom"), Some(Outcome::Failed(_))));
    }

    #[tokio::test]
    async fn test_duplicate_labels_are_all_run() {
        let mut suite = Suite::new();
        suite.register_scenario("test_bot: #show a@b.c".into(), thunk(Ok(())));
        suite.register_scenario("test_bot: #show a@b.c".into(), thunk(Err("missing link")));
        assert_eq!(suite.len(), 2);

        let report = suite.run().await;

        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.outcome("test_bot: #show a@b.c"), Some(&Outcome::Passed));
    }
}
