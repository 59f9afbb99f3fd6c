//! Recurring expense schedules
//!
//! Occurrences are computed from the schedule's start date and an
//! occurrence index, never from the previous occurrence, so a schedule
//! anchored on the 31st returns to the 31st after passing through a
//! short month.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{GroupId, MemberId, Money, RecurringExpenseId};
use core_kernel::temporal::add_months_clamped;
use crate::error::ExpenseError;
use crate::expense::{Expense, ExpenseCategory};

/// How often a recurring expense repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Returns the `n`th occurrence of a schedule starting on `anchor`
    ///
    /// Occurrence 0 is the anchor itself. Month-end days are clamped.
    pub fn occurrence(&self, anchor: NaiveDate, n: u32) -> Option<NaiveDate> {
        match self {
            Frequency::Daily => anchor.checked_add_days(Days::new(u64::from(n))),
            Frequency::Weekly => anchor.checked_add_days(Days::new(u64::from(n) * 7)),
            Frequency::Monthly => add_months_clamped(anchor, n),
            Frequency::Yearly => add_months_clamped(anchor, n.checked_mul(12)?),
        }
    }

    /// Returns the occurrence after `date` for a schedule anchored on `date`
    pub fn advance(&self, date: NaiveDate) -> Option<NaiveDate> {
        self.occurrence(date, 1)
    }
}

/// A template that generates expenses on a schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringExpense {
    pub id: RecurringExpenseId,
    pub group_id: Option<GroupId>,
    pub payer: MemberId,
    pub amount: Money,
    pub description: String,
    pub category: ExpenseCategory,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    /// Last day on which an occurrence may fall
    pub end_date: Option<NaiveDate>,
    pub active: bool,
    /// Number of occurrences already generated
    generated: u32,
}

impl RecurringExpense {
    /// Creates a new schedule
    ///
    /// # Errors
    ///
    /// - `NonPositiveAmount` / `EmptyDescription` as for `Expense::new`
    /// - `InvalidSchedule` if `end_date` is before `start_date`
    pub fn new(
        payer: MemberId,
        amount: Money,
        description: impl Into<String>,
        category: ExpenseCategory,
        frequency: Frequency,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> Result<Self, ExpenseError> {
        if !amount.is_positive() {
            return Err(ExpenseError::NonPositiveAmount(amount.to_string()));
        }
        let description = description.into().trim().to_string();
        if description.is_empty() {
            return Err(ExpenseError::EmptyDescription);
        }
        if let Some(end) = end_date {
            if end < start_date {
                return Err(ExpenseError::InvalidSchedule(format!(
                    "end date {} is before start date {}",
                    end, start_date
                )));
            }
        }

        Ok(Self {
            id: RecurringExpenseId::new_v7(),
            group_id: None,
            payer,
            amount,
            description,
            category,
            frequency,
            start_date,
            end_date,
            active: true,
            generated: 0,
        })
    }

    /// Attaches the schedule to a group
    pub fn with_group(mut self, group_id: GroupId) -> Self {
        self.group_id = Some(group_id);
        self
    }

    /// Next date an expense will be generated, if the schedule has not ended
    pub fn next_due(&self) -> Option<NaiveDate> {
        let next = self.frequency.occurrence(self.start_date, self.generated)?;
        match self.end_date {
            Some(end) if next > end => None,
            _ => Some(next),
        }
    }

    pub fn generated_count(&self) -> u32 {
        self.generated
    }

    /// All not-yet-generated occurrences on or before `as_of`
    ///
    /// Paused schedules have no due dates.
    pub fn due_dates(&self, as_of: NaiveDate) -> Vec<NaiveDate> {
        if !self.active {
            return Vec::new();
        }

        let mut dates = Vec::new();
        let mut index = self.generated;
        while let Some(date) = self.frequency.occurrence(self.start_date, index) {
            if date > as_of || self.end_date.is_some_and(|end| date > end) {
                break;
            }
            dates.push(date);
            index += 1;
        }
        dates
    }

    /// Materialises every due occurrence up to `as_of` as an `Expense`
    ///
    /// The schedule advances past the generated occurrences, so calling
    /// this twice with the same `as_of` yields nothing the second time.
    pub fn generate_due(&mut self, as_of: NaiveDate) -> Result<Vec<Expense>, ExpenseError> {
        let dates = self.due_dates(as_of);
        let mut expenses = Vec::with_capacity(dates.len());

        for date in dates {
            let mut expense = Expense::new(
                self.payer,
                self.amount,
                self.description.clone(),
                self.category,
                date,
            )?;
            expense.group_id = self.group_id;
            expense.recurring_id = Some(self.id);
            expenses.push(expense);
            self.generated += 1;
        }

        debug!(
            recurring_id = %self.id,
            generated = expenses.len(),
            "Generated recurring expenses"
        );
        Ok(expenses)
    }

    /// Stops generating expenses until resumed
    pub fn pause(&mut self) {
        self.active = false;
    }

    /// Resumes generation
    ///
    /// Occurrences missed while paused are skipped, not back-filled.
    pub fn resume(&mut self, today: NaiveDate) {
        while let Some(date) = self.frequency.occurrence(self.start_date, self.generated) {
            if date >= today {
                break;
            }
            self.generated += 1;
        }
        self.active = true;
    }
}
