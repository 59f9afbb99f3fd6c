//! Tests for domain_expense

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{Currency, GroupId, MemberId, Money, MoneyError, Rate, YearMonth};
use domain_expense::{
    Budget, BudgetScope, BudgetStatus, Expense, ExpenseCategory, ExpenseError, Frequency,
    RecurringExpense,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn php(amount: rust_decimal::Decimal) -> Money {
    Money::new(amount, Currency::PHP)
}

// ============================================================================
// Expense Tests
// ============================================================================

mod expense_tests {
    use super::*;

    #[test]
    fn test_negative_amount_rejected() {
        let result = Expense::new(
            MemberId::new(),
            php(dec!(-5)),
            "Refund",
            ExpenseCategory::Other,
            date(2024, 5, 1),
        );
        assert!(matches!(result, Err(ExpenseError::NonPositiveAmount(_))));
    }

    #[test]
    fn test_blank_description_rejected() {
        let result = Expense::new(
            MemberId::new(),
            php(dec!(5)),
            "   ",
            ExpenseCategory::Other,
            date(2024, 5, 1),
        );
        assert_eq!(result.unwrap_err(), ExpenseError::EmptyDescription);
    }

    #[test]
    fn test_with_group_marks_shared() {
        let group = GroupId::new();
        let expense = Expense::new(
            MemberId::new(),
            php(dec!(1200)),
            "Groceries",
            ExpenseCategory::Food,
            date(2024, 5, 1),
        )
        .unwrap()
        .with_group(group);

        assert!(expense.is_shared());
        assert_eq!(expense.group_id, Some(group));
    }

    #[test]
    fn test_category_serializes_snake_case() {
        let json = serde_json::to_string(&ExpenseCategory::Healthcare).unwrap();
        assert_eq!(json, "\"healthcare\"");
        assert_eq!(ExpenseCategory::default(), ExpenseCategory::Other);
        assert_eq!(ExpenseCategory::ALL.len(), 9);
    }
}

// ============================================================================
// Recurring Expense Tests
// ============================================================================

mod recurring_tests {
    use super::*;

    fn rent(start: NaiveDate, end: Option<NaiveDate>) -> RecurringExpense {
        RecurringExpense::new(
            MemberId::new(),
            php(dec!(15000)),
            "Rent",
            ExpenseCategory::Housing,
            Frequency::Monthly,
            start,
            end,
        )
        .unwrap()
    }

    #[test]
    fn test_first_occurrence_is_start_date() {
        let schedule = rent(date(2024, 1, 15), None);
        assert_eq!(schedule.next_due(), Some(date(2024, 1, 15)));
        assert!(schedule.due_dates(date(2024, 1, 14)).is_empty());
    }

    #[test]
    fn test_due_dates_up_to_as_of() {
        let schedule = rent(date(2024, 1, 31), None);
        let due = schedule.due_dates(date(2024, 4, 30));
        assert_eq!(
            due,
            vec![date(2024, 1, 31), date(2024, 2, 29), date(2024, 3, 31), date(2024, 4, 30)]
        );
    }

    #[test]
    fn test_end_date_caps_occurrences() {
        let schedule = rent(date(2024, 1, 1), Some(date(2024, 2, 15)));
        let due = schedule.due_dates(date(2024, 12, 31));
        assert_eq!(due, vec![date(2024, 1, 1), date(2024, 2, 1)]);
    }

    #[test]
    fn test_generate_due_advances_schedule() {
        let group = GroupId::new();
        let mut schedule = rent(date(2024, 1, 1), None).with_group(group);

        let first = schedule.generate_due(date(2024, 3, 1)).unwrap();
        assert_eq!(first.len(), 3);
        assert!(first.iter().all(|e| e.recurring_id == Some(schedule.id)));
        assert!(first.iter().all(|e| e.group_id == Some(group)));
        assert_eq!(schedule.generated_count(), 3);
        assert_eq!(schedule.next_due(), Some(date(2024, 4, 1)));

        let again = schedule.generate_due(date(2024, 3, 1)).unwrap();
        assert!(again.is_empty());
    }

    #[test]
    fn test_next_due_none_after_end() {
        let mut schedule = rent(date(2024, 1, 1), Some(date(2024, 1, 31)));
        schedule.generate_due(date(2024, 6, 1)).unwrap();
        assert_eq!(schedule.next_due(), None);
    }

    #[test]
    fn test_paused_schedule_generates_nothing() {
        let mut schedule = rent(date(2024, 1, 1), None);
        schedule.pause();
        assert!(schedule.generate_due(date(2024, 6, 1)).unwrap().is_empty());
    }

    #[test]
    fn test_resume_skips_missed_occurrences() {
        let mut schedule = rent(date(2024, 1, 1), None);
        schedule.generate_due(date(2024, 1, 1)).unwrap();
        schedule.pause();

        schedule.resume(date(2024, 4, 10));
        assert_eq!(schedule.next_due(), Some(date(2024, 5, 1)));
        assert_eq!(
            schedule.due_dates(date(2024, 5, 1)),
            vec![date(2024, 5, 1)]
        );
    }

    #[test]
    fn test_weekly_and_daily_frequencies() {
        let start = date(2024, 2, 26);
        assert_eq!(Frequency::Weekly.occurrence(start, 1), Some(date(2024, 3, 4)));
        assert_eq!(Frequency::Daily.occurrence(start, 4), Some(date(2024, 3, 1)));
    }
}

// ============================================================================
// Budget Tests
// ============================================================================

mod budget_tests {
    use super::*;

    fn may() -> YearMonth {
        YearMonth::new(2024, 5).unwrap()
    }

    fn spend(payer: MemberId, amount: rust_decimal::Decimal, category: ExpenseCategory, on: NaiveDate) -> Expense {
        Expense::new(payer, php(amount), "Spend", category, on).unwrap()
    }

    #[test]
    fn test_under_budget() {
        let member = MemberId::new();
        let budget = Budget::new(BudgetScope::Member(member), php(dec!(10000)), may());
        let expenses = vec![spend(member, dec!(2500), ExpenseCategory::Food, date(2024, 5, 3))];

        let usage = budget.evaluate(&expenses).unwrap();
        assert_eq!(usage.spent.amount(), dec!(2500));
        assert_eq!(usage.remaining.amount(), dec!(7500));
        assert_eq!(usage.utilisation_pct, dec!(25));
        assert_eq!(usage.status, BudgetStatus::UnderBudget);
    }

    #[test]
    fn test_near_limit_at_threshold() {
        let member = MemberId::new();
        let budget = Budget::new(BudgetScope::Member(member), php(dec!(10000)), may());
        let expenses = vec![spend(member, dec!(8000), ExpenseCategory::Food, date(2024, 5, 3))];

        assert_eq!(budget.evaluate(&expenses).unwrap().status, BudgetStatus::NearLimit);
    }

    #[test]
    fn test_custom_threshold() {
        let member = MemberId::new();
        let budget = Budget::new(BudgetScope::Member(member), php(dec!(10000)), may())
            .with_alert_threshold(Rate::from_percentage(dec!(50)));
        let expenses = vec![spend(member, dec!(5000), ExpenseCategory::Food, date(2024, 5, 3))];

        assert_eq!(budget.evaluate(&expenses).unwrap().status, BudgetStatus::NearLimit);
    }

    #[test]
    fn test_over_budget_has_negative_remaining() {
        let member = MemberId::new();
        let budget = Budget::new(BudgetScope::Member(member), php(dec!(1000)), may());
        let expenses = vec![spend(member, dec!(1250), ExpenseCategory::Food, date(2024, 5, 3))];

        let usage = budget.evaluate(&expenses).unwrap();
        assert_eq!(usage.status, BudgetStatus::OverBudget);
        assert_eq!(usage.remaining.amount(), dec!(-250));
        assert_eq!(usage.utilisation_pct, dec!(125));
    }

    #[test]
    fn test_ignores_other_months_members_and_categories() {
        let member = MemberId::new();
        let budget = Budget::new(BudgetScope::Member(member), php(dec!(1000)), may())
            .for_category(ExpenseCategory::Food);
        let expenses = vec![
            spend(member, dec!(100), ExpenseCategory::Food, date(2024, 5, 31)),
            spend(member, dec!(900), ExpenseCategory::Food, date(2024, 6, 1)),
            spend(member, dec!(900), ExpenseCategory::Shopping, date(2024, 5, 10)),
            spend(MemberId::new(), dec!(900), ExpenseCategory::Food, date(2024, 5, 10)),
        ];

        let usage = budget.evaluate(&expenses).unwrap();
        assert_eq!(usage.expense_count, 1);
        assert_eq!(usage.spent.amount(), dec!(100));
    }

    #[test]
    fn test_totals_past_decimal_range_are_an_error() {
        let member = MemberId::new();
        let budget = Budget::new(BudgetScope::Member(member), php(dec!(1000)), may());
        let expenses = vec![
            spend(member, Decimal::MAX, ExpenseCategory::Food, date(2024, 5, 3)),
            spend(member, Decimal::MAX, ExpenseCategory::Food, date(2024, 5, 4)),
        ];

        assert!(matches!(
            budget.evaluate(&expenses),
            Err(ExpenseError::Money(MoneyError::Overflow))
        ));
    }

    #[test]
    fn test_group_scope_counts_group_expenses() {
        let group = GroupId::new();
        let budget = Budget::new(BudgetScope::Group(group), php(dec!(5000)), may());
        let expenses = vec![
            spend(MemberId::new(), dec!(1000), ExpenseCategory::Food, date(2024, 5, 2)).with_group(group),
            spend(MemberId::new(), dec!(2000), ExpenseCategory::Food, date(2024, 5, 2)).with_group(group),
            spend(MemberId::new(), dec!(4000), ExpenseCategory::Food, date(2024, 5, 2)),
        ];

        assert_eq!(budget.evaluate(&expenses).unwrap().spent.amount(), dec!(3000));
    }

    #[test]
    fn test_currency_mismatch_is_an_error() {
        let member = MemberId::new();
        let budget = Budget::new(BudgetScope::Member(member), php(dec!(1000)), may());
        let expenses = vec![Expense::new(
            member,
            Money::new(dec!(10), Currency::USD),
            "Online",
            ExpenseCategory::Shopping,
            date(2024, 5, 2),
        )
        .unwrap()];

        assert!(matches!(budget.evaluate(&expenses), Err(ExpenseError::Money(_))));
    }

    #[test]
    fn test_empty_month_is_under_budget() {
        let budget = Budget::new(BudgetScope::Member(MemberId::new()), php(dec!(1000)), may());
        let usage = budget.evaluate(&[]).unwrap();
        assert!(usage.spent.is_zero());
        assert_eq!(usage.status, BudgetStatus::UnderBudget);
    }
}
