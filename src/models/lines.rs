//! Line-by-line export of the worksheets.
//!
//! A renderer filling a fixed-layout form needs each worksheet line with a
//! mother, father and combined cell, and needs to know which cells are blank
//! rather than zero. [`WorksheetLine`] carries `Option<Decimal>` cells for
//! exactly that reason.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::round_to_cents;

use super::{
    CreditLines, FinalResult, Parent, ParentAllocation, PerChildResult, WorksheetCResult,
};

/// One printed line of a worksheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorksheetLine {
    /// Line number as printed on the form (e.g. "7" or "2.3").
    pub line: String,
    /// Line caption.
    pub label: String,
    /// Mother's cell; `None` means leave blank.
    pub mother: Option<Decimal>,
    /// Father's cell; `None` means leave blank.
    pub father: Option<Decimal>,
    /// Combined cell; `None` means leave blank.
    pub combined: Option<Decimal>,
}

impl WorksheetLine {
    fn new(line: impl Into<String>, label: &str) -> Self {
        Self {
            line: line.into(),
            label: label.to_string(),
            mother: None,
            father: None,
            combined: None,
        }
    }

    fn parents(mut self, mother: Option<Decimal>, father: Option<Decimal>) -> Self {
        self.mother = mother;
        self.father = father;
        self
    }

    fn both(self, mother: Decimal, father: Decimal) -> Self {
        self.parents(Some(mother), Some(father))
    }

    fn combined(mut self, value: Decimal) -> Self {
        self.combined = Some(value);
        self
    }
}

impl FinalResult {
    /// Returns Worksheet A lines 1 through 24.
    ///
    /// SOLA lines (13-15) are blank for a parent whose minimum floor governs.
    ///
    /// # Example
    ///
    /// ```
    /// use guideline_engine::calculation::calculate_guideline;
    /// use guideline_engine::config::statutory_schedule;
    /// use guideline_engine::models::{GuidelineInput, SupplementalExpenses};
    /// use rust_decimal::Decimal;
    ///
    /// let input = GuidelineInput {
    ///     mother_gross_annual: Decimal::from(60000),
    ///     mother_deductions_annual: Decimal::from(8000),
    ///     father_gross_annual: Decimal::from(40000),
    ///     father_deductions_annual: Decimal::from(5000),
    ///     number_of_children: 1,
    ///     supplemental_expenses: SupplementalExpenses::default(),
    ///     parenting_schedule: vec![],
    /// };
    /// let result = calculate_guideline(&input, statutory_schedule());
    /// let lines = result.worksheet_a_lines();
    /// assert_eq!(lines.len(), 24);
    /// assert_eq!(lines[0].mother, Some(Decimal::from(60000)));
    /// ```
    pub fn worksheet_a_lines(&self) -> Vec<WorksheetLine> {
        let mother = &self.worksheets.mother;
        let father = &self.worksheets.father;
        let combined = &self.worksheets.combined;
        let sola = |allocation: &ParentAllocation| allocation.sola.clone();
        let (mother_sola, father_sola) = (sola(&combined.mother), sola(&combined.father));
        let sola_total = match (&mother_sola, &father_sola) {
            (None, None) => None,
            _ => Some(combined.mother.sola_amount() + combined.father.sola_amount()),
        };

        let mut lines = vec![
            WorksheetLine::new("1", "Gross income").both(mother.total_income, father.total_income),
            WorksheetLine::new("2", "Allowable deductions")
                .both(mother.total_deductions, father.total_deductions),
            WorksheetLine::new("3", "Income after deductions")
                .both(mother.income_after_deductions, father.income_after_deductions),
            WorksheetLine::new("4", "Personal allowance")
                .both(mother.personal_allowance, father.personal_allowance),
            WorksheetLine::new("5", "Income available for support").both(
                mother.income_available_for_support,
                father.income_available_for_support,
            ),
            WorksheetLine::new("6", "Minimum floor").both(mother.minimum_floor, father.minimum_floor),
            WorksheetLine::new("7", "Greater of line 5 or line 6")
                .both(mother.line_seven, father.line_seven)
                .combined(combined.combined_line_seven),
            WorksheetLine::new("8", "Percentage share of combined line 7")
                .both(combined.mother.share, combined.father.share),
            WorksheetLine::new("9", "Primary allowance").combined(combined.primary_allowance),
            WorksheetLine::new("10", "Share of primary allowance")
                .both(combined.mother.primary_share, combined.father.primary_share),
            WorksheetLine::new("11", "Supplemental expenses").combined(combined.total_supplements),
            WorksheetLine::new("12", "Share of supplemental expenses")
                .both(combined.mother.supplement_share, combined.father.supplement_share),
            WorksheetLine::new("13", "Income available for SOLA").parents(
                mother_sola.as_ref().map(|s| s.income_for_sola),
                father_sola.as_ref().map(|s| s.income_for_sola),
            ),
            WorksheetLine::new("14", "SOLA factor").parents(
                mother_sola.as_ref().map(|s| s.sola_factor),
                father_sola.as_ref().map(|s| s.sola_factor),
            ),
            WorksheetLine::new("15", "SOLA amount").parents(
                mother_sola.as_ref().map(|s| s.sola_amount),
                father_sola.as_ref().map(|s| s.sola_amount),
            ),
            WorksheetLine::new("16", "Total support need").combined(combined.total_support_need),
            WorksheetLine::new("17", "Gross annual obligation")
                .both(combined.mother.gross_obligation, combined.father.gross_obligation),
            WorksheetLine::new("18", "Credit for supplements paid directly")
                .both(combined.mother.credit, combined.father.credit),
            WorksheetLine::new("19", "Net annual obligation").both(
                combined.mother.net_annual_obligation,
                combined.father.net_annual_obligation,
            ),
            WorksheetLine::new("20", "Base obligation per child").both(
                round_to_cents(combined.base_obligation_per_child(Parent::Mother)),
                round_to_cents(combined.base_obligation_per_child(Parent::Father)),
            ),
            WorksheetLine::new("21", "Annual obligation after parenting time")
                .both(self.mother_totals.annual, self.father_totals.annual),
            WorksheetLine::new("22", "Monthly obligation after parenting time")
                .both(self.mother_totals.monthly, self.father_totals.monthly),
            WorksheetLine::new("23", "Net annual transfer").combined(self.total_annual_transfer),
            WorksheetLine::new("24", "Net monthly transfer").combined(self.total_monthly_transfer),
        ];

        if let Some(total) = sola_total {
            lines[14].combined = Some(total);
        }
        lines
    }

    /// Returns Worksheet C lines; a parent's cells are blank when Worksheet C
    /// was not needed for that parent.
    pub fn worksheet_c_lines(&self) -> Vec<WorksheetLine> {
        let mother = self.worksheets.mother.worksheet_c.as_ref();
        let father = self.worksheets.father.worksheet_c.as_ref();
        let cell = |f: fn(&WorksheetCResult) -> Decimal| (mother.map(f), father.map(f));

        let rows: [(&str, &str, fn(&WorksheetCResult) -> Decimal); 5] = [
            ("1", "Income after deductions", |c| c.income_after_deductions),
            ("2", "Personal allowance", |c| c.personal_allowance),
            ("3", "Ratio of line 1 to line 2", |c| c.ratio),
            ("4", "Minimum support percentage", |c| c.multiplier),
            ("5", "Minimum support", |c| c.minimum_support),
        ];

        rows.into_iter()
            .map(|(line, label, f)| {
                let (m, fa) = cell(f);
                WorksheetLine::new(line, label).parents(m, fa)
            })
            .collect()
    }

    /// Returns Worksheet B lines for every child, numbered `<child>.<line>`.
    ///
    /// Credit lines are blank for children decided by the majority-time rule.
    pub fn worksheet_b_lines(&self) -> Vec<WorksheetLine> {
        self.children.iter().flat_map(child_lines).collect()
    }
}

fn credit_cell(
    child: &PerChildResult,
    parent: Parent,
    f: fn(&CreditLines) -> Decimal,
) -> Option<Decimal> {
    child.shared_parenting.as_ref().map(|shared| match parent {
        Parent::Mother => f(&shared.mother),
        Parent::Father => f(&shared.father),
    })
}

fn child_lines(child: &PerChildResult) -> Vec<WorksheetLine> {
    let n = child.child_index;

    vec![
        WorksheetLine::new(format!("{n}.1"), "Annual overnights").both(
            Decimal::from(child.mother_overnights),
            Decimal::from(child.father_overnights),
        ),
        WorksheetLine::new(format!("{n}.2"), "Base obligation for this child")
            .both(child.mother_base_obligation, child.father_base_obligation),
        WorksheetLine::new(format!("{n}.3"), "Overnights above threshold").parents(
            credit_cell(child, Parent::Mother, |c| Decimal::from(c.excess_overnights)),
            credit_cell(child, Parent::Father, |c| Decimal::from(c.excess_overnights)),
        ),
        WorksheetLine::new(format!("{n}.4"), "Shared-parenting credit").parents(
            credit_cell(child, Parent::Mother, |c| c.credited_amount),
            credit_cell(child, Parent::Father, |c| c.credited_amount),
        ),
        WorksheetLine::new(format!("{n}.5"), "Adjusted obligation").parents(
            credit_cell(child, Parent::Mother, |c| c.adjusted_obligation),
            credit_cell(child, Parent::Father, |c| c.adjusted_obligation),
        ),
        WorksheetLine::new(format!("{n}.6"), "Annual amount owed")
            .both(child.mother_annual, child.father_annual),
        WorksheetLine::new(format!("{n}.7"), "Monthly amount owed")
            .both(child.mother_monthly, child.father_monthly),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::calculate_guideline;
    use crate::config::statutory_schedule;
    use crate::models::{GuidelineInput, OvernightSplit, SupplementalExpenses};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn input(mother_gross: &str, father_gross: &str, schedule: Vec<OvernightSplit>) -> GuidelineInput {
        GuidelineInput {
            mother_gross_annual: dec(mother_gross),
            mother_deductions_annual: Decimal::ZERO,
            father_gross_annual: dec(father_gross),
            father_deductions_annual: Decimal::ZERO,
            number_of_children: schedule.len().max(1) as u32,
            supplemental_expenses: SupplementalExpenses::default(),
            parenting_schedule: schedule,
        }
    }

    #[test]
    fn test_worksheet_a_has_twenty_four_lines_in_order() {
        let result = calculate_guideline(
            &input("60000", "40000", vec![OvernightSplit::new(365, 0)]),
            statutory_schedule(),
        );
        let lines = result.worksheet_a_lines();

        assert_eq!(lines.len(), 24);
        for (i, line) in lines.iter().enumerate() {
            assert_eq!(line.line, (i + 1).to_string());
        }
        assert_eq!(lines[6].combined, Some(result.worksheets.combined.combined_line_seven));
    }

    #[test]
    fn test_sola_lines_blank_when_floor_governs() {
        // Father at 22000: available 1655, floor 2640, so the floor governs.
        let result = calculate_guideline(
            &input("80000", "22000", vec![OvernightSplit::new(365, 0)]),
            statutory_schedule(),
        );
        assert!(result.worksheets.father.floor_governs());

        let lines = result.worksheet_a_lines();
        assert!(lines[12].mother.is_some());
        assert_eq!(lines[12].father, None);
        assert_eq!(lines[13].father, None);
        assert_eq!(lines[14].father, None);
    }

    #[test]
    fn test_worksheet_c_lines_blank_for_parent_without_worksheet_c() {
        let result = calculate_guideline(
            &input("60000", "10000", vec![OvernightSplit::new(365, 0)]),
            statutory_schedule(),
        );
        let lines = result.worksheet_c_lines();

        assert_eq!(lines.len(), 5);
        assert!(lines.iter().all(|line| line.mother.is_none()));
        assert_eq!(lines[0].father, Some(dec("10000")));
    }

    #[test]
    fn test_worksheet_b_credit_lines_blank_for_majority_time() {
        let result = calculate_guideline(
            &input(
                "60000",
                "40000",
                vec![OvernightSplit::new(365, 0), OvernightSplit::new(150, 215)],
            ),
            statutory_schedule(),
        );
        let lines = result.worksheet_b_lines();

        assert_eq!(lines.len(), 14);
        assert_eq!(lines[0].line, "1.1");
        assert_eq!(lines[2].mother, None);
        assert_eq!(lines[9].line, "2.3");
        assert_eq!(lines[9].mother, Some(dec("40")));
        assert_eq!(lines[9].father, Some(dec("105")));
    }
}
