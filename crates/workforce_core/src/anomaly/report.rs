//! Human-readable anomaly report.

use std::fmt::{Display, Formatter};

/// One titled block of report lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSection {
    pub heading: String,
    pub lines: Vec<String>,
}

impl ReportSection {
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            lines: Vec::new(),
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Free-text report for a human reviewer. Findings are informational only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnomalyReport {
    pub sections: Vec<ReportSection>,
}

impl AnomalyReport {
    /// Total number of finding lines across all sections.
    pub fn line_count(&self) -> usize {
        self.sections.iter().map(|section| section.lines.len()).sum()
    }

    pub fn section(&self, heading_prefix: &str) -> Option<&ReportSection> {
        self.sections
            .iter()
            .find(|section| section.heading.starts_with(heading_prefix))
    }
}

impl Display for AnomalyReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, section) in self.sections.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}", section.heading)?;
            for line in &section.lines {
                writeln!(f, "{line}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{AnomalyReport, ReportSection};

    #[test]
    fn renders_sections_separated_by_blank_lines() {
        let mut first = ReportSection::new("First:");
        first.push("a");
        let mut second = ReportSection::new("Second:");
        second.push("b");
        second.push("c");
        let report = AnomalyReport {
            sections: vec![first, second],
        };

        assert_eq!(report.to_string(), "First:\na\n\nSecond:\nb\nc\n");
        assert_eq!(report.line_count(), 3);
        assert!(report.section("Sec").is_some());
    }
}
