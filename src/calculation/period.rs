//! Pay period batch processing.
//!
//! A period run calculates every active employee of a tenant for one payroll
//! month and returns the payroll items for the caller to persist. Records are
//! read through the [`PayrollDirectory`] contract so the same processor runs
//! against a database snapshot or an in-memory fixture.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::engine::calculate_payroll;
use super::seniority::seniority_hundredths;
use crate::config::{BatchSettings, FailurePolicy, RuleResolver};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    CalculationInput, Contract, Employee, EmployeeSummary, PayrollItem, PayrollRun, Tenant,
};

/// Read access to the records a period run needs.
pub trait PayrollDirectory: Send + Sync {
    /// Returns a payroll run by id.
    fn payroll_run(&self, run_id: &str) -> Option<PayrollRun>;

    /// Returns a tenant by id.
    fn tenant(&self, tenant_id: &str) -> Option<Tenant>;

    /// Returns the active employees of a tenant, in processing order.
    fn active_employees(&self, tenant_id: &str) -> Vec<Employee>;

    /// Returns the employee's active contract, if any.
    fn active_contract(&self, employee_id: &str) -> Option<Contract>;
}

/// A directory held entirely in memory.
///
/// Employees are processed in the order they were added.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryDirectory {
    /// Known tenants.
    #[serde(default)]
    pub tenants: Vec<Tenant>,
    /// Known payroll runs.
    #[serde(default)]
    pub payroll_runs: Vec<PayrollRun>,
    /// Employees of all tenants.
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// Contracts of all employees.
    #[serde(default)]
    pub contracts: Vec<Contract>,
}

impl PayrollDirectory for InMemoryDirectory {
    fn payroll_run(&self, run_id: &str) -> Option<PayrollRun> {
        self.payroll_runs.iter().find(|r| r.id == run_id).cloned()
    }

    fn tenant(&self, tenant_id: &str) -> Option<Tenant> {
        self.tenants.iter().find(|t| t.id == tenant_id).cloned()
    }

    fn active_employees(&self, tenant_id: &str) -> Vec<Employee> {
        self.employees
            .iter()
            .filter(|e| e.tenant_id == tenant_id && e.is_active)
            .cloned()
            .collect()
    }

    fn active_contract(&self, employee_id: &str) -> Option<Contract> {
        // With several active contracts, the most recently started one wins.
        self.contracts
            .iter()
            .filter(|c| c.employee_id == employee_id && c.is_active)
            .max_by_key(|c| c.start_date)
            .cloned()
    }
}

/// Why an employee produced no payroll item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// The employee has no active contract.
    NoActiveContract,
    /// The calculation failed and the run is configured to continue.
    CalculationFailed {
        /// The error message.
        message: String,
    },
}

/// An employee left out of a period run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedEmployee {
    /// The employee left out.
    pub employee_id: String,
    /// Why.
    pub reason: SkipReason,
}

/// The result of processing one pay period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRunOutcome {
    /// The run processed.
    pub payroll_run_id: String,
    /// The date rules were resolved at (first of the payroll month).
    pub effective_date: NaiveDate,
    /// Number of employees calculated.
    pub processed_count: usize,
    /// One summary line per calculated employee.
    pub results: Vec<EmployeeSummary>,
    /// The full payroll items, in the same order as `results`.
    pub items: Vec<PayrollItem>,
    /// Employees without a payroll item.
    pub skipped: Vec<SkippedEmployee>,
}

/// Calculates every active employee of a tenant for one payroll run.
///
/// Rules are resolved as of the first day of the run's month, with the
/// tenant's jurisdiction. Each employee is calculated with their own tax
/// factor and their active contract's gross and pension fund; seniority is
/// derived from the contract's tenure start and previous years. Employees
/// without an active contract are recorded in `skipped`.
///
/// # Errors
///
/// - `PeriodNotFound` if the run does not exist or belongs to another tenant
/// - `OrganizationNotFound` if the tenant does not exist
/// - `InvalidInput` if the run's month is not 1..=12
/// - with [`FailurePolicy::Abort`], the first per-employee calculation error
pub fn process_period<D, R>(
    run_id: &str,
    tenant_id: &str,
    directory: &D,
    rules: &R,
    settings: &BatchSettings,
) -> EngineResult<PeriodRunOutcome>
where
    D: PayrollDirectory + ?Sized,
    R: RuleResolver + ?Sized,
{
    let run = directory
        .payroll_run(run_id)
        .filter(|run| run.tenant_id == tenant_id)
        .ok_or_else(|| EngineError::PeriodNotFound {
            run_id: run_id.to_string(),
        })?;

    let tenant = directory
        .tenant(tenant_id)
        .ok_or_else(|| EngineError::OrganizationNotFound {
            tenant_id: tenant_id.to_string(),
        })?;

    let effective_date = run.effective_date()?;
    let employees = directory.active_employees(tenant_id);

    info!(
        run_id,
        tenant_id,
        jurisdiction = %tenant.jurisdiction,
        %effective_date,
        employee_count = employees.len(),
        "Processing payroll run"
    );

    let mut results = Vec::with_capacity(employees.len());
    let mut items = Vec::with_capacity(employees.len());
    let mut skipped = Vec::new();

    for employee in &employees {
        let Some(contract) = directory.active_contract(&employee.id) else {
            warn!(run_id, employee_id = %employee.id, "Skipping employee without active contract");
            skipped.push(SkippedEmployee {
                employee_id: employee.id.clone(),
                reason: SkipReason::NoActiveContract,
            });
            continue;
        };

        let calculated = seniority_hundredths(
            contract.tenure_start_date,
            contract.previous_tenure_years,
            effective_date,
        )
        .and_then(|seniority| {
            let mut input =
                CalculationInput::new(tenant.jurisdiction, contract.gross_amount, effective_date)
                    .with_seniority(seniority)
                    .with_tax_factor(employee.tax_factor)
                    .with_work_days(settings.work_days);
            input.pension_fund_choice = contract.pension_fund_choice;
            Ok((seniority, calculate_payroll(&input, rules)?))
        });

        let (seniority, result) = match calculated {
            Ok(calculated) => calculated,
            Err(error) => match settings.failure_policy {
                FailurePolicy::Abort => return Err(error),
                FailurePolicy::Skip => {
                    warn!(
                        run_id,
                        employee_id = %employee.id,
                        error = %error,
                        "Skipping employee after calculation failure"
                    );
                    skipped.push(SkippedEmployee {
                        employee_id: employee.id.clone(),
                        reason: SkipReason::CalculationFailed {
                            message: error.to_string(),
                        },
                    });
                    continue;
                }
            },
        };

        results.push(EmployeeSummary {
            employee_id: employee.id.clone(),
            employee_name: employee.display_name(),
            net_amount: result.net_amount,
        });
        items.push(PayrollItem::from_result(
            &run.id,
            &employee.id,
            &contract.id,
            contract.gross_amount,
            settings.work_days,
            seniority,
            result,
        ));
    }

    info!(
        run_id,
        processed_count = items.len(),
        skipped_count = skipped.len(),
        "Finished payroll run"
    );

    Ok(PeriodRunOutcome {
        payroll_run_id: run.id,
        effective_date,
        processed_count: items.len(),
        results,
        items,
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::test_support::example_rules;
    use crate::models::{ContractType, ContributionCode, Jurisdiction, PensionFundChoice};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn employee(id: &str, tenant_id: &str, first: &str, last: &str) -> Employee {
        Employee {
            id: id.to_string(),
            tenant_id: tenant_id.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            tax_factor: 100,
            is_active: true,
        }
    }

    fn contract(id: &str, employee_id: &str, gross: i64, tenure_start: NaiveDate) -> Contract {
        Contract {
            id: id.to_string(),
            employee_id: employee_id.to_string(),
            contract_type: ContractType::Indefinite,
            gross_amount: gross,
            start_date: tenure_start,
            end_date: None,
            pension_fund_choice: None,
            tenure_start_date: tenure_start,
            previous_tenure_years: 0,
            is_active: true,
        }
    }

    fn directory(jurisdiction: Jurisdiction) -> InMemoryDirectory {
        InMemoryDirectory {
            tenants: vec![Tenant {
                id: "tenant_1".to_string(),
                name: "Test d.o.o.".to_string(),
                jurisdiction,
            }],
            payroll_runs: vec![PayrollRun {
                id: "run_2024_01".to_string(),
                tenant_id: "tenant_1".to_string(),
                month: 1,
                year: 2024,
                payment_date: None,
            }],
            employees: vec![
                employee("emp_001", "tenant_1", "Amra", "Hodzic"),
                employee("emp_002", "tenant_1", "Marko", "Petrovic"),
            ],
            contracts: vec![
                contract("c_001", "emp_001", 200_000, date(2024, 1, 1)),
                contract("c_002", "emp_002", 100_000, date(2024, 1, 1)),
            ],
        }
    }

    fn process(directory: &InMemoryDirectory) -> EngineResult<PeriodRunOutcome> {
        process_period(
            "run_2024_01",
            "tenant_1",
            directory,
            &example_rules(),
            &BatchSettings::default(),
        )
    }

    #[test]
    fn test_processes_all_active_employees() {
        let outcome = process(&directory(Jurisdiction::Fbih)).unwrap();

        assert_eq!(outcome.processed_count, 2);
        assert_eq!(outcome.effective_date, date(2024, 1, 1));
        assert_eq!(outcome.results[0].employee_name, "Amra Hodzic");
        assert_eq!(outcome.results[0].net_amount, 127_200);
        assert_eq!(outcome.results[1].net_amount, 65_100);
        assert!(outcome.skipped.is_empty());

        let item = &outcome.items[0];
        assert_eq!(item.payroll_run_id, "run_2024_01");
        assert_eq!(item.contract_id, "c_001");
        assert_eq!(item.input_gross, 200_000);
        assert_eq!(item.work_days, 22);
        assert_eq!(item.total_cost, 221_000);
    }

    #[test]
    fn test_employee_without_contract_is_skipped() {
        let mut dir = directory(Jurisdiction::Fbih);
        dir.contracts[1].is_active = false;

        let outcome = process(&dir).unwrap();

        assert_eq!(outcome.processed_count, 1);
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].employee_id, "emp_002");
        assert_eq!(outcome.skipped[0].reason, SkipReason::NoActiveContract);
    }

    #[test]
    fn test_inactive_employees_are_not_processed() {
        let mut dir = directory(Jurisdiction::Fbih);
        dir.employees[0].is_active = false;

        let outcome = process(&dir).unwrap();
        assert_eq!(outcome.processed_count, 1);
        assert_eq!(outcome.results[0].employee_id, "emp_002");
    }

    #[test]
    fn test_rs_seniority_comes_from_tenure() {
        let mut dir = directory(Jurisdiction::Rs);
        // 2019-01-01..2024-01-01 is 1826 days: 5 whole years
        dir.contracts[0].tenure_start_date = date(2019, 1, 1);

        let outcome = process(&dir).unwrap();
        let item = &outcome.items[0];

        assert_eq!(item.seniority_hundredths, 500);
        assert_eq!(item.calculated_gross, 203_000);
        assert_eq!(
            item.contributions_breakdown.get(&ContributionCode::Seniority),
            Some(&3_000)
        );
        assert_eq!(item.net_amount, 126_169);
    }

    #[test]
    fn test_missing_run_is_period_not_found() {
        let dir = directory(Jurisdiction::Fbih);
        let result = process_period(
            "run_missing",
            "tenant_1",
            &dir,
            &example_rules(),
            &BatchSettings::default(),
        );

        assert!(matches!(result, Err(EngineError::PeriodNotFound { .. })));
    }

    #[test]
    fn test_run_of_other_tenant_is_period_not_found() {
        let mut dir = directory(Jurisdiction::Fbih);
        dir.payroll_runs[0].tenant_id = "tenant_2".to_string();

        assert!(matches!(process(&dir), Err(EngineError::PeriodNotFound { .. })));
    }

    #[test]
    fn test_missing_tenant_is_organization_not_found() {
        let mut dir = directory(Jurisdiction::Fbih);
        dir.tenants.clear();

        match process(&dir) {
            Err(EngineError::OrganizationNotFound { tenant_id }) => {
                assert_eq!(tenant_id, "tenant_1")
            }
            other => panic!("Expected OrganizationNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_bd_without_choice_aborts_by_default() {
        let dir = directory(Jurisdiction::Bd);
        assert!(matches!(process(&dir), Err(EngineError::MissingPensionChoice)));
    }

    #[test]
    fn test_skip_policy_continues_after_failure() {
        let mut dir = directory(Jurisdiction::Bd);
        dir.contracts[1].pension_fund_choice = Some(PensionFundChoice::RsFund);

        let settings = BatchSettings {
            failure_policy: FailurePolicy::Skip,
            ..BatchSettings::default()
        };
        let outcome =
            process_period("run_2024_01", "tenant_1", &dir, &example_rules(), &settings).unwrap();

        assert_eq!(outcome.processed_count, 1);
        assert_eq!(outcome.results[0].employee_id, "emp_002");
        assert!(matches!(
            outcome.skipped[0].reason,
            SkipReason::CalculationFailed { .. }
        ));
    }

    #[test]
    fn test_latest_active_contract_wins() {
        let mut dir = directory(Jurisdiction::Fbih);
        dir.contracts[1].start_date = date(2022, 1, 1);
        let mut raise = contract("c_003", "emp_002", 200_000, date(2022, 1, 1));
        raise.start_date = date(2023, 12, 1);
        dir.contracts.push(raise);

        let outcome = process(&dir).unwrap();
        assert_eq!(outcome.items[1].contract_id, "c_003");
        assert_eq!(outcome.items[1].net_amount, 127_200);
    }

    #[test]
    fn test_seniority_overflow_follows_failure_policy() {
        let mut dir = directory(Jurisdiction::Rs);
        dir.contracts[0].previous_tenure_years = i64::MAX / 10;

        assert!(matches!(process(&dir), Err(EngineError::CalculationError { .. })));

        let settings = BatchSettings {
            failure_policy: FailurePolicy::Skip,
            ..BatchSettings::default()
        };
        let outcome =
            process_period("run_2024_01", "tenant_1", &dir, &example_rules(), &settings).unwrap();

        assert_eq!(outcome.processed_count, 1);
        assert_eq!(outcome.skipped[0].employee_id, "emp_001");
        assert!(matches!(
            outcome.skipped[0].reason,
            SkipReason::CalculationFailed { .. }
        ));
    }
}
