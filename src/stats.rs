//! Descriptive statistics and group comparison tests.

use std::collections::BTreeMap;
use std::fmt;

use statrs::distribution::{ContinuousCDF, FisherSnedecor, StudentsT};
use statrs::statistics::{Data, Median, Statistics};

// ---------------------------------------------------------------------------
// Comparison tests
// ---------------------------------------------------------------------------

/// Test statistic with its p-value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestOutcome {
    pub statistic: f64,
    pub p_value: f64,
}

/// The comparative tests the report can run. Implementations must follow the
/// conventional formulas; degenerate inputs may produce `NaN`.
pub trait ComparisonTests {
    /// Two-sided independent two-sample t-test.
    fn two_sample(&self, a: &[f64], b: &[f64]) -> TestOutcome;
    /// One-way ANOVA across all groups.
    fn one_way_anova(&self, groups: &[&[f64]]) -> TestOutcome;
}

/// Pooled-variance Student's t-test and one-way ANOVA, with p-values from
/// `statrs` distributions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassicTests;

impl ComparisonTests for ClassicTests {
    fn two_sample(&self, a: &[f64], b: &[f64]) -> TestOutcome {
        let (n1, n2) = (a.len() as f64, b.len() as f64);
        let df = n1 + n2 - 2.0;

        let pooled = ((n1 - 1.0) * sample_variance(a) + (n2 - 1.0) * sample_variance(b)) / df;
        let std_error = (pooled * (1.0 / n1 + 1.0 / n2)).sqrt();
        let statistic = (a.iter().mean() - b.iter().mean()) / std_error;

        // Calculate two-sided p-value
        let p_value = match StudentsT::new(0.0, 1.0, df) {
            Ok(t_dist) if !statistic.is_nan() => 2.0 * t_dist.sf(statistic.abs()),
            _ => f64::NAN,
        };

        TestOutcome { statistic, p_value }
    }

    fn one_way_anova(&self, groups: &[&[f64]]) -> TestOutcome {
        let total_n: usize = groups.iter().map(|g| g.len()).sum();
        let grand_mean = groups.iter().flat_map(|g| g.iter()).mean();

        let mut ss_between = 0.0;
        let mut ss_within = 0.0;
        for group in groups {
            let group_mean = group.iter().mean();
            ss_between += group.len() as f64 * (group_mean - grand_mean).powi(2);
            ss_within += group.iter().map(|x| (x - group_mean).powi(2)).sum::<f64>();
        }

        let df_between = groups.len() as f64 - 1.0;
        let df_within = total_n as f64 - groups.len() as f64;
        let statistic = (ss_between / df_between) / (ss_within / df_within);

        let p_value = match FisherSnedecor::new(df_between, df_within) {
            Ok(f_dist) if !statistic.is_nan() => f_dist.sf(statistic),
            _ => f64::NAN,
        };

        TestOutcome { statistic, p_value }
    }
}

fn sample_variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    values.iter().variance()
}

// ---------------------------------------------------------------------------
// Descriptive summary
// ---------------------------------------------------------------------------

/// Per-group descriptive statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSummary {
    pub group: u32,
    pub n: usize,
    pub mean: f64,
    /// Sample standard deviation; `None` for fewer than two values.
    pub std_dev: Option<f64>,
    pub median: f64,
}

impl GroupSummary {
    pub fn of(group: u32, values: &[f64]) -> Self {
        let std_dev = (values.len() >= 2).then(|| values.iter().std_dev());
        Self {
            group,
            n: values.len(),
            mean: values.iter().mean(),
            std_dev,
            median: Data::new(values.to_vec()).median(),
        }
    }
}

impl fmt::Display for GroupSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let std_dev = self
            .std_dev
            .map_or_else(|| "n/a".to_string(), |s| format!("{s:.3}"));
        write!(
            f,
            "Group {}: Mean = {:.3}, Standard Deviation = {std_dev}, Median = {:.3}",
            self.group, self.mean, self.median
        )
    }
}

/// Which comparative test was run, with its result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Comparison {
    /// Only one group: nothing to compare.
    SingleGroup,
    TTest(TestOutcome),
    Anova(TestOutcome),
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comparison::SingleGroup => write!(f, "Only one group found; no comparative test performed."),
            Comparison::TTest(t) => write!(
                f,
                "T-Test: T-statistic = {}, P-value = {}",
                t.statistic, t.p_value
            ),
            Comparison::Anova(a) => write!(
                f,
                "ANOVA: F-statistic = {}, P-value = {}",
                a.statistic, a.p_value
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// The full statistical report: one summary per group plus the comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsReport {
    pub summaries: Vec<GroupSummary>,
    pub comparison: Comparison,
}

impl StatisticsReport {
    pub fn lines(&self) -> Vec<String> {
        self.summaries
            .iter()
            .map(ToString::to_string)
            .chain(std::iter::once(self.comparison.to_string()))
            .collect()
    }
}

impl fmt::Display for StatisticsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}

/// Summarise every group and run the test that fits the group count:
/// none for one group, a t-test for two, ANOVA for more.
///
/// Groups must be non-empty; callers validate the assignment first.
pub fn analyse(groups: &BTreeMap<u32, Vec<f64>>, tests: &dyn ComparisonTests) -> StatisticsReport {
    let summaries = groups
        .iter()
        .map(|(g, values)| GroupSummary::of(*g, values))
        .collect();

    let sets: Vec<&[f64]> = groups.values().map(Vec::as_slice).collect();
    let comparison = match sets.as_slice() {
        [] | [_] => Comparison::SingleGroup,
        [a, b] => Comparison::TTest(tests.two_sample(a, b)),
        _ => Comparison::Anova(tests.one_way_anova(&sets)),
    };

    StatisticsReport {
        summaries,
        comparison,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALUES: [f64; 10] = [
        -15.316, -14.457, -20.1, -18.3, -16.75, -22.4, -19.05, -17.6, -21.2, -13.9,
    ];

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn single_group_report() {
        let groups = BTreeMap::from([(1, VALUES.to_vec())]);
        let report = analyse(&groups, &ClassicTests);
        let text = report.to_string();

        assert_eq!(report.comparison, Comparison::SingleGroup);
        assert_eq!(
            report.lines()[0],
            "Group 1: Mean = -17.907, Standard Deviation = 2.856, Median = -17.950"
        );
        assert!(text.contains("no comparative test"));
        assert_eq!(report.lines().len(), 2);
    }

    #[test]
    fn two_groups_run_pooled_t_test() {
        let groups = BTreeMap::from([(1, VALUES[..5].to_vec()), (2, VALUES[5..].to_vec())]);
        let report = analyse(&groups, &ClassicTests);

        let Comparison::TTest(t) = report.comparison else {
            panic!("expected a t-test, got {:?}", report.comparison);
        };
        assert!(close(t.statistic, 1.024495063, 1e-8));
        assert!(close(t.p_value, 0.335579289, 1e-6));
        assert_eq!(
            report.lines()[1],
            "Group 2: Mean = -18.830, Standard Deviation = 3.325, Median = -19.050"
        );
        assert!(report.lines()[2].starts_with("T-Test: T-statistic = 1.02449"));
    }

    #[test]
    fn three_groups_run_anova() {
        let groups = BTreeMap::from([
            (1, VALUES[..3].to_vec()),
            (2, VALUES[3..6].to_vec()),
            (3, VALUES[6..].to_vec()),
        ]);
        let report = analyse(&groups, &ClassicTests);

        let Comparison::Anova(a) = report.comparison else {
            panic!("expected ANOVA, got {:?}", report.comparison);
        };
        assert!(close(a.statistic, 0.524993852, 1e-8));
        assert!(close(a.p_value, 0.613140326, 1e-6));
        assert_eq!(report.summaries.len(), 3);
        assert!(report.to_string().contains("ANOVA: F-statistic = 0.52499"));
    }

    #[test]
    fn textbook_t_test() {
        let t = ClassicTests.two_sample(&[1.0, 2.0, 3.0, 4.0, 5.0], &[3.0, 4.0, 5.0, 6.0, 7.0]);
        assert!(close(t.statistic, -2.0, 1e-12));
        assert!(close(t.p_value, 0.080516238, 1e-6));
    }

    #[test]
    fn textbook_anova() {
        let a = ClassicTests.one_way_anova(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], &[7.0, 8.0, 9.0]]);
        assert!(close(a.statistic, 27.0, 1e-9));
        assert!(close(a.p_value, 0.001, 1e-6));
    }

    #[test]
    fn single_value_group_has_no_std_dev() {
        let summary = GroupSummary::of(3, &[-12.0]);
        assert_eq!(summary.std_dev, None);
        assert_eq!(
            summary.to_string(),
            "Group 3: Mean = -12.000, Standard Deviation = n/a, Median = -12.000"
        );
    }

    #[test]
    fn t_test_without_degrees_of_freedom_is_nan() {
        let t = ClassicTests.two_sample(&[1.0], &[2.0]);
        assert!(t.p_value.is_nan());
    }

    /// Stand-in implementation to check the report delegates to the plugged tests.
    struct FixedTests;

    impl ComparisonTests for FixedTests {
        fn two_sample(&self, _: &[f64], _: &[f64]) -> TestOutcome {
            TestOutcome { statistic: 1.5, p_value: 0.25 }
        }
        fn one_way_anova(&self, _: &[&[f64]]) -> TestOutcome {
            TestOutcome { statistic: 4.0, p_value: 0.5 }
        }
    }

    #[test]
    fn comparison_is_pluggable() {
        let groups = BTreeMap::from([(1, vec![1.0, 2.0]), (2, vec![3.0, 4.0])]);
        let report = analyse(&groups, &FixedTests);
        assert_eq!(
            report.lines().last().unwrap(),
            "T-Test: T-statistic = 1.5, P-value = 0.25"
        );
    }
}
