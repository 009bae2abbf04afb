//! Totals across children and the net payer.

use rust_decimal::Decimal;

use crate::models::{AuditStep, Parent, ParentTotals, Payer, PerChildResult};

use super::rounding::{round_to_cents, round_to_unit};

/// The net transfer between parents.
#[derive(Debug, Clone)]
pub struct AggregateCalculation {
    /// Parent with the strictly larger monthly total, or `Payer::Neither`.
    pub payer: Payer,
    /// Net annual transfer.
    pub total_annual_transfer: Decimal,
    /// Net monthly transfer.
    pub total_monthly_transfer: Decimal,
    /// The mother's totals across children.
    pub mother_totals: ParentTotals,
    /// The father's totals across children.
    pub father_totals: ParentTotals,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Sums the per-child amounts owed by `parent`.
pub fn parent_totals(children: &[PerChildResult], parent: Parent) -> ParentTotals {
    let annual = children.iter().map(|c| c.annual(parent)).sum::<Decimal>();
    let monthly = children.iter().map(|c| c.monthly(parent)).sum::<Decimal>();
    ParentTotals {
        annual: round_to_unit(annual),
        monthly: round_to_cents(monthly),
    }
}

/// Nets the parents' totals into a single transfer.
///
/// The payer is whoever owes the larger monthly total; the monthly transfer
/// is the difference, and the annual transfer is twelve times that.
///
/// # Examples
///
/// ```
/// use guideline_engine::calculation::aggregate_children;
/// use guideline_engine::models::Payer;
///
/// let result = aggregate_children(&[], 1);
/// assert_eq!(result.payer, Payer::Neither);
/// assert!(result.total_monthly_transfer.is_zero());
/// ```
pub fn aggregate_children(children: &[PerChildResult], step_number: u32) -> AggregateCalculation {
    let mother_totals = parent_totals(children, Parent::Mother);
    let father_totals = parent_totals(children, Parent::Father);

    let (payer, difference) = if mother_totals.monthly > father_totals.monthly {
        (Payer::Mother, mother_totals.monthly - father_totals.monthly)
    } else if father_totals.monthly > mother_totals.monthly {
        (Payer::Father, father_totals.monthly - mother_totals.monthly)
    } else {
        (Payer::Neither, Decimal::ZERO)
    };

    let total_monthly_transfer = round_to_cents(difference);
    let total_annual_transfer = round_to_unit(total_monthly_transfer * Decimal::from(12));

    let reasoning = match payer {
        Payer::Neither => "Monthly totals are equal; no transfer".to_string(),
        _ => format!(
            "Mother owes {} and father owes {} monthly; net {} per month, {} per year",
            mother_totals.monthly,
            father_totals.monthly,
            total_monthly_transfer,
            total_annual_transfer
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "net_transfer".to_string(),
        rule_name: "Net Transfer Between Parents".to_string(),
        worksheet_ref: "Worksheet A, lines 21-24".to_string(),
        input: serde_json::json!({
            "children": children.len(),
            "mother_monthly": mother_totals.monthly.to_string(),
            "father_monthly": father_totals.monthly.to_string(),
        }),
        output: serde_json::json!({
            "payer": payer,
            "total_monthly_transfer": total_monthly_transfer.to_string(),
            "total_annual_transfer": total_annual_transfer.to_string(),
        }),
        reasoning,
    };

    AggregateCalculation {
        payer,
        total_annual_transfer,
        total_monthly_transfer,
        mother_totals,
        father_totals,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ParentingTimeMethod, ScheduleSource};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn child(index: u32, mother: &str, father: &str) -> PerChildResult {
        let mother_annual = round_to_cents(dec(mother));
        let father_annual = round_to_cents(dec(father));
        PerChildResult {
            child_index: index,
            mother_overnights: 0,
            father_overnights: 0,
            schedule_source: ScheduleSource::Supplied,
            method: ParentingTimeMethod::MajorityTime,
            mother_base_obligation: mother_annual,
            father_base_obligation: father_annual,
            shared_parenting: None,
            mother_annual,
            father_annual,
            mother_monthly: round_to_cents(mother_annual / dec("12")),
            father_monthly: round_to_cents(father_annual / dec("12")),
        }
    }

    #[test]
    fn test_single_payer() {
        let result = aggregate_children(&[child(1, "0", "4528")], 10);

        assert_eq!(result.payer, Payer::Father);
        assert_eq!(result.father_totals.annual, dec("4528"));
        assert_eq!(result.father_totals.monthly, dec("377.33"));
        assert_eq!(result.total_monthly_transfer, dec("377.33"));
        // 377.33 x 12 = 4527.96
        assert_eq!(result.total_annual_transfer, dec("4528"));
        assert_eq!(result.audit_step.step_number, 10);
    }

    #[test]
    fn test_opposing_children_net_out() {
        let children = [child(1, "0", "3000"), child(2, "1200", "0")];
        let result = aggregate_children(&children, 1);

        assert_eq!(result.mother_totals.monthly, dec("100.00"));
        assert_eq!(result.father_totals.monthly, dec("250.00"));
        assert_eq!(result.payer, Payer::Father);
        assert_eq!(result.total_monthly_transfer, dec("150.00"));
        assert_eq!(result.total_annual_transfer, dec("1800"));
    }

    #[test]
    fn test_equal_totals_have_no_payer() {
        let children = [child(1, "2400", "0"), child(2, "0", "2400")];
        let result = aggregate_children(&children, 1);

        assert_eq!(result.payer, Payer::Neither);
        assert_eq!(result.total_monthly_transfer, Decimal::ZERO);
        assert_eq!(result.total_annual_transfer, Decimal::ZERO);
        assert!(result.audit_step.reasoning.contains("no transfer"));
    }

    #[test]
    fn test_annual_totals_round_to_whole_units() {
        let children = [
            child(1, "3260.33", "0"),
            child(2, "3260.33", "0"),
            child(3, "3260.33", "0"),
        ];
        let totals = parent_totals(&children, Parent::Mother);
        // 9780.99 rounds to 9781
        assert_eq!(totals.annual, dec("9781"));
        // 271.69 x 3
        assert_eq!(totals.monthly, dec("815.07"));
    }
}
