//! The operator-driven analysis workflow.
//!
//! Each public method is one step of the session: load → species search →
//! statistics → plot. Every prompt may be declined, which ends the current
//! step and hands control back to the caller. Errors are returned to the
//! caller, which reports them and carries on.

use crate::chart::{Chart, ChartRenderer};
use crate::data::grouping::{normalize_group_count, GroupAssignment};
use crate::error::{Error, Result};
use crate::state::Session;
use crate::stats::{analyse, ClassicTests, ComparisonTests, StatisticsReport};
use crate::ui::prompt::Prompter;

const MENU: &str = "1) Load isotopic data  2) Search species  3) Statistical analysis  4) Plot data  5) Quit";

/// A session together with the front end that drives it.
pub struct Workflow<P, R> {
    pub session: Session,
    pub prompter: P,
    pub renderer: R,
    tests: Box<dyn ComparisonTests>,
}

impl<P: Prompter, R: ChartRenderer> Workflow<P, R> {
    pub fn new(session: Session, prompter: P, renderer: R) -> Self {
        Self {
            session,
            prompter,
            renderer,
            tests: Box::new(ClassicTests),
        }
    }

    /// Swap in a different implementation of the comparative tests.
    pub fn with_tests(mut self, tests: Box<dyn ComparisonTests>) -> Self {
        self.tests = tests;
        self
    }

    // -----------------------------------------------------------------------
    // Menu loop
    // -----------------------------------------------------------------------

    /// Offer the four entry points until the operator quits.
    pub fn run(&mut self) {
        self.prompter
            .show_info("Info", "Please load the isotopic data file");
        if let Err(e) = self.session.load_reference_table() {
            self.prompter.show_error("Error", &e.to_string());
        }

        loop {
            let outcome = match self.prompter.ask_integer("Isotopic Data Analysis", MENU) {
                Some(1) => self.load_isotopic_data().map(drop),
                Some(2) => self.search_species(),
                Some(3) => self.statistical_analysis().map(drop),
                Some(4) => self.plot_data().map(drop),
                Some(5) | None => break,
                Some(other) => {
                    self.prompter
                        .show_warning("Menu", &format!("No menu entry {other}."));
                    Ok(())
                }
            };
            self.report(outcome);
        }
    }

    fn report(&mut self, outcome: Result<()>) {
        if let Err(e) = outcome {
            log::error!("{e}");
            let title = match &e {
                Error::NoData => "Warning",
                _ => "Error",
            };
            self.prompter.show_error(title, &e.to_string());
        }
    }

    // -----------------------------------------------------------------------
    // Load
    // -----------------------------------------------------------------------

    /// Pick an analyzer export, calibrate it and show the corrected values.
    /// Returns `false` when the operator cancels the file selection.
    pub fn load_isotopic_data(&mut self) -> Result<bool> {
        let Some(path) = self.prompter.pick_file("Select Isotopic Data CSV File") else {
            return Ok(false);
        };

        let samples = self.session.load_measurements(&path)?;
        let lines: Vec<String> = samples.iter().map(ToString::to_string).collect();
        self.prompter.show_info(
            "Carbon Isotope Composition Report",
            &lines.join("\n"),
        );
        self.prompter.show_info(
            "Info",
            "Processed isotopic data and calculated adjusted delta values.",
        );
        self.prompter
            .show_info("Info", "Please enter the plant species in the provided field");
        Ok(true)
    }

    // -----------------------------------------------------------------------
    // Species search
    // -----------------------------------------------------------------------

    /// Look species up until the operator stops, then move on to the
    /// statistical analysis.
    pub fn search_species(&mut self) -> Result<()> {
        if !self.session.has_reference_table() {
            self.prompter.show_warning(
                "Warning",
                "Species data not loaded; every species will be reported as not found.",
            );
        }

        loop {
            let Some(name) = self.prompter.ask_string("Species", "Enter Plant Species:") else {
                return Ok(());
            };

            match self.session.lookup_species(&name) {
                Ok(result) => {
                    if let Some(v) = result.outcome.value().filter(|_| !result.cached) {
                        log::info!("'{}' literature leaf delta 13C value is: {v}", result.species);
                    }
                    self.prompter.show_info("Result", &result.to_string());
                }
                Err(Error::EmptySpeciesName) => {
                    self.prompter
                        .show_info("Info", &Error::EmptySpeciesName.to_string());
                    return Ok(());
                }
                Err(e) => return Err(e),
            }

            if !self
                .prompter
                .ask_yes_no("Search Another", "Do you want to search for another species?")
            {
                return self.ask_for_statistical_analysis();
            }
        }
    }

    // -----------------------------------------------------------------------
    // Statistics
    // -----------------------------------------------------------------------

    /// Offer the statistical analysis and, if it produced a report, the plot.
    pub fn ask_for_statistical_analysis(&mut self) -> Result<()> {
        if self.session.samples().is_empty() {
            self.prompter.show_warning(
                "Warning",
                "No isotopic data available for statistical analysis.",
            );
            return Ok(());
        }

        if !self.prompter.ask_yes_no(
            "Statistical Analysis",
            "Do you want to perform statistical analysis?",
        ) {
            return Ok(());
        }

        if let Some((grouping, _)) = self.statistical_analysis()? {
            self.offer_to_plot(Some(grouping))?;
        }
        Ok(())
    }

    /// Group the samples and build the statistical report.
    ///
    /// `Ok(None)` when the operator cancels the group count. A group left
    /// empty discards the whole analysis with
    /// [`Error::InsufficientGroupData`].
    pub fn statistical_analysis(&mut self) -> Result<Option<(GroupAssignment, StatisticsReport)>> {
        if self.session.samples().is_empty() {
            return Err(Error::NoData);
        }

        let Some(count) = self
            .prompter
            .ask_integer("Number of Groups", "How many groups does your data have?")
        else {
            return Ok(None);
        };

        let grouping = self.build_grouping(count)?;
        let report = analyse(&grouping.values(self.session.samples()), self.tests.as_ref());

        log::info!("Statistical report:\n{report}");
        self.prompter
            .show_info("Statistical Analysis", &report.to_string());

        self.session.grouping = Some(grouping.clone());
        self.session.report = Some(report.clone());
        Ok(Some((grouping, report)))
    }

    /// Turn an operator-supplied group count into a validated assignment.
    fn build_grouping(&mut self, count: i64) -> Result<GroupAssignment> {
        let groups = normalize_group_count(count)?;
        // More groups than samples always leaves one empty.
        if groups as usize > self.session.samples().len() {
            log::warn!(
                "{groups} groups requested for {} samples",
                self.session.samples().len()
            );
            return Err(Error::InsufficientGroupData);
        }
        let grouping = if groups == 1 {
            GroupAssignment::single(self.session.samples().len())
        } else {
            self.assign_groups(groups)
        };
        grouping.validate()?;
        Ok(grouping)
    }

    /// Ask for each sample's group in input order. Out-of-range answers are
    /// rejected and asked again; a cancelled answer leaves the sample out.
    fn assign_groups(&mut self, groups: u32) -> GroupAssignment {
        let ids: Vec<String> = self
            .session
            .samples()
            .iter()
            .map(|s| s.sample_id.clone())
            .collect();

        let mut grouping = GroupAssignment::with_groups(groups);
        for (index, id) in ids.iter().enumerate() {
            let message = format!("Enter the group number for Sample {id}:");
            loop {
                let Some(group) = self.prompter.ask_integer("Group Assignment", &message) else {
                    log::warn!("Sample {id} left unassigned");
                    break;
                };
                match grouping.assign(group, index) {
                    Ok(()) => break,
                    Err(e) => {
                        log::warn!("Sample {id}: {e}");
                        self.prompter.show_warning("Group Assignment", &e.to_string());
                    }
                }
            }
        }
        grouping
    }

    // -----------------------------------------------------------------------
    // Plot
    // -----------------------------------------------------------------------

    /// Plot after a statistical analysis, reusing its grouping.
    /// Returns whether a chart was rendered.
    pub fn offer_to_plot(&mut self, grouping: Option<GroupAssignment>) -> Result<bool> {
        if !self
            .prompter
            .ask_yes_no("Plot Data", "Do you want to plot the data?")
        {
            return Ok(false);
        }
        let include_references = self.ask_include_references();
        self.render(include_references, grouping.as_ref())?;
        Ok(true)
    }

    /// Stand-alone plot. Uses the grouping of the last analysis when there is
    /// one, otherwise asks for a grouping first. A cancelled group count
    /// plots everything as one group.
    pub fn plot_data(&mut self) -> Result<bool> {
        if self.session.samples().is_empty() {
            return Err(Error::NoData);
        }

        let include_references = self.ask_include_references();
        let grouping = match self.session.grouping.clone() {
            Some(grouping) => grouping,
            None => {
                let count = self
                    .prompter
                    .ask_integer("Number of Groups", "How many groups do you have?")
                    .unwrap_or(0);
                self.build_grouping(count)?
            }
        };

        self.render(include_references, Some(&grouping))?;
        Ok(true)
    }

    fn ask_include_references(&mut self) -> bool {
        self.session.species().has_resolved_values()
            && self.prompter.ask_yes_no(
                "Include Delta 13C",
                "Do you want to include the leaf delta 13C value from the database in the plotting?",
            )
    }

    fn render(&mut self, include_references: bool, grouping: Option<&GroupAssignment>) -> Result<()> {
        let names = if self
            .prompter
            .ask_yes_no("Sample Names", "Do you want to give the samples names?")
        {
            let ids: Vec<String> = self
                .session
                .samples()
                .iter()
                .map(|s| s.sample_id.clone())
                .collect();
            let names: Vec<Option<String>> = ids
                .iter()
                .map(|id| {
                    self.prompter
                        .ask_string("Sample Name", &format!("Enter name for sample {id}:"))
                })
                .collect();
            Some(names)
        } else {
            None
        };

        let references = if include_references {
            self.session.species().resolved_values()
        } else {
            Vec::new()
        };

        let chart = Chart::build(
            self.session.samples(),
            names.as_deref(),
            &references,
            grouping,
        );
        log::info!(
            "Rendering {} bars with {} reference lines",
            chart.bars.len(),
            chart.reference_lines.len()
        );
        self.renderer.render(&chart)
    }
}
