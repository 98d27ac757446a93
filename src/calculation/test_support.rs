//! Rule fixtures for calculator unit tests.

use chrono::NaiveDate;

use crate::config::RuleBook;
use crate::models::{Jurisdiction, RuleType, TaxRule};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn rule(
    jurisdiction: Jurisdiction,
    code: &str,
    rule_type: RuleType,
    rate_value: i64,
    valid_from: NaiveDate,
    valid_to: Option<NaiveDate>,
) -> TaxRule {
    TaxRule {
        jurisdiction,
        code: code.to_string(),
        rule_type,
        rate_value,
        description: None,
        valid_from,
        valid_to,
    }
}

/// The example rule data set, including the July 2025 FBIH reform.
pub(crate) fn example_rules() -> RuleBook {
    use Jurisdiction::{Bd, Fbih, Rs};
    use RuleType::{Contribution, Deduction, Limit, Tax};

    let start = date(2020, 1, 1);
    let pre_reform_end = Some(date(2025, 6, 30));
    let reform = date(2025, 7, 1);

    let mut rules = Vec::new();
    for (from, to, pio_on, health_on) in [
        (start, pre_reform_end, 600, 400),
        (reform, None, 250, 200),
    ] {
        rules.push(rule(Fbih, "PIO_FROM", Contribution, 1_700, from, to));
        rules.push(rule(Fbih, "HEALTH_FROM", Contribution, 1_250, from, to));
        rules.push(rule(Fbih, "UNEMPLOYMENT_FROM", Contribution, 150, from, to));
        rules.push(rule(Fbih, "PIO_ON", Contribution, pio_on, from, to));
        rules.push(rule(Fbih, "HEALTH_ON", Contribution, health_on, from, to));
        rules.push(rule(Fbih, "UNEMPLOYMENT_ON", Contribution, 50, from, to));
    }
    rules.extend([
        rule(Fbih, "INCOME_TAX", Tax, 1_000, start, None),
        rule(Fbih, "PERSONAL_DEDUCTION", Deduction, 30_000, start, None),
        rule(Fbih, "MEAL_DAILY_LIMIT", Limit, 1_000, start, None),
        rule(Rs, "PIO", Contribution, 1_850, start, None),
        rule(Rs, "HEALTH", Contribution, 1_200, start, None),
        rule(Rs, "CHILD_PROTECTION", Contribution, 170, start, None),
        rule(Rs, "UNEMPLOYMENT", Contribution, 60, start, None),
        rule(Rs, "INCOME_TAX", Tax, 800, start, None),
        rule(Rs, "PERSONAL_DEDUCTION", Deduction, 8_333, start, None),
        rule(Rs, "SENIORITY_RATE", Contribution, 30, start, None),
        rule(Bd, "HEALTH", Contribution, 1_200, start, None),
        rule(Bd, "UNEMPLOYMENT", Contribution, 150, start, None),
        rule(Bd, "INCOME_TAX", Tax, 1_000, start, None),
        rule(Bd, "PERSONAL_DEDUCTION", Deduction, 30_000, start, None),
    ]);

    RuleBook::new(rules)
}

/// The example rule data set without one rule code.
pub(crate) fn example_rules_without(jurisdiction: Jurisdiction, code: &str) -> RuleBook {
    let all = example_rules();
    let rules = Jurisdiction::ALL
        .iter()
        .flat_map(|&j| all.rules_for(j))
        .filter(|r| !(r.jurisdiction == jurisdiction && r.code == code))
        .cloned()
        .collect();
    RuleBook::new(rules)
}
