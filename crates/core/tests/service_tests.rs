// ═══════════════════════════════════════════════════════════════════
// Service Tests — odd validator, PlanService (generate / update),
// SummaryService
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use bet_tracker_core::errors::{ConfigError, CoreError, OddError};
use bet_tracker_core::models::config::PlanConfig;
use bet_tracker_core::models::plan::PlanEntry;
use bet_tracker_core::services::odd_validator::{validate_odd, MAX_ODD, MIN_ODD};
use bet_tracker_core::services::plan_service::{predicted_profit, PlanService, MAX_PLAN_DAYS};
use bet_tracker_core::services::summary_service::SummaryService;

fn make_date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn make_config(start: NaiveDate, end: NaiveDate) -> PlanConfig {
    PlanConfig::new(start, end, dec!(1000), dec!(100), dec!(1.15))
}

/// Plan of `days` days starting 2025-01-01 with the default numbers.
fn make_plan(days: u32) -> Vec<PlanEntry> {
    let start = make_date(2025, 1, 1);
    let end = start + chrono::Days::new(u64::from(days) - 1);
    PlanService::new().generate(&make_config(start, end)).unwrap()
}

fn update(plan: &mut [PlanEntry], index: usize, profit: Option<Decimal>, is_win: bool) {
    PlanService::new()
        .update(plan, index, profit, is_win, dec!(100), dec!(1.15))
        .unwrap();
}

fn assert_chained(plan: &[PlanEntry]) {
    for pair in plan.windows(2) {
        assert_eq!(pair[1].initial_bankroll, pair[0].final_bankroll);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Odd validator
// ═══════════════════════════════════════════════════════════════════

mod odd_validation {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        assert_eq!(validate_odd(MIN_ODD), Ok(()));
        assert_eq!(validate_odd(MAX_ODD), Ok(()));
        assert_eq!(validate_odd(dec!(1.15)), Ok(()));
    }

    #[test]
    fn bound_constants() {
        assert_eq!(MIN_ODD, dec!(1.10));
        assert_eq!(MAX_ODD, dec!(1.20));
    }

    #[test]
    fn below_band_is_too_low() {
        assert_eq!(validate_odd(dec!(1.09)), Err(OddError::TooLow));
        assert_eq!(validate_odd(dec!(1.0999)), Err(OddError::TooLow));
        assert_eq!(validate_odd(Decimal::ZERO), Err(OddError::TooLow));
    }

    #[test]
    fn above_band_is_too_high() {
        assert_eq!(validate_odd(dec!(1.21)), Err(OddError::TooHigh));
        assert_eq!(validate_odd(dec!(1.2001)), Err(OddError::TooHigh));
        assert_eq!(validate_odd(dec!(3.5)), Err(OddError::TooHigh));
    }
}

// ═══════════════════════════════════════════════════════════════════
// PlanService — generate
// ═══════════════════════════════════════════════════════════════════

mod plan_generate {
    use super::*;

    #[test]
    fn single_day_plan() {
        let d = make_date(2025, 3, 10);
        let plan = PlanService::new().generate(&make_config(d, d)).unwrap();

        assert_eq!(plan.len(), 1);
        let e = &plan[0];
        assert_eq!(e.date, d);
        assert_eq!(e.staked_value, dec!(100));
        assert_eq!(e.predicted_profit, dec!(15));
        assert_eq!(e.initial_bankroll, dec!(1000));
        assert_eq!(e.final_bankroll, dec!(1015));
        assert!(!e.is_locked);
        assert_eq!(e.actual_profit, None);
        assert!(!e.is_win);
    }

    #[test]
    fn two_day_compounding() {
        let plan = make_plan(2);

        let day1 = &plan[1];
        assert_eq!(day1.staked_value, dec!(115));
        assert_eq!(day1.predicted_profit, dec!(17.25));
        assert_eq!(day1.initial_bankroll, dec!(1015));
        assert_eq!(day1.final_bankroll, dec!(1032.25));
        assert!(day1.is_locked);
    }

    #[test]
    fn third_day_compounds_on_predicted_profit() {
        let plan = make_plan(3);

        let day2 = &plan[2];
        assert_eq!(day2.staked_value, dec!(117.25));
        assert_eq!(day2.predicted_profit, dec!(17.5875));
        assert_eq!(day2.initial_bankroll, dec!(1032.25));
        assert_eq!(day2.final_bankroll, dec!(1049.8375));
    }

    #[test]
    fn only_first_day_unlocked() {
        let plan = make_plan(10);
        assert!(!plan[0].is_locked);
        assert!(plan[1..].iter().all(|e| e.is_locked));
    }

    #[test]
    fn chaining_invariant_holds_over_a_long_plan() {
        let plan = make_plan(365);
        assert_eq!(plan.len(), 365);
        assert_chained(&plan);
        for e in &plan {
            assert_eq!(e.final_bankroll, e.initial_bankroll + e.predicted_profit);
            assert_eq!(Some(e.predicted_profit), predicted_profit(e.staked_value, dec!(1.15)));
        }
    }

    #[test]
    fn one_entry_per_day_across_month_end() {
        let plan = PlanService::new()
            .generate(&make_config(make_date(2025, 3, 29), make_date(2025, 4, 1)))
            .unwrap();

        let dates: Vec<String> = plan.iter().map(|e| e.formatted_date()).collect();
        assert_eq!(dates, vec!["29/03/2025", "30/03/2025", "31/03/2025", "01/04/2025"]);
    }

    #[test]
    fn includes_leap_day() {
        let plan = PlanService::new()
            .generate(&make_config(make_date(2024, 2, 28), make_date(2024, 3, 1)))
            .unwrap();

        assert_eq!(plan.len(), 3);
        assert_eq!(plan[1].formatted_date(), "29/02/2024");
    }

    #[test]
    fn dates_strictly_ascending() {
        let plan = make_plan(40);
        for pair in plan.windows(2) {
            assert_eq!(pair[1].date, pair[0].date.succ_opt().unwrap());
        }
    }

    #[test]
    fn odd_at_bounds_is_accepted() {
        let d = make_date(2025, 1, 1);
        let mut config = make_config(d, d);
        config.fixed_odd = dec!(1.10);
        let plan = PlanService::new().generate(&config).unwrap();
        assert_eq!(plan[0].predicted_profit, dec!(10));

        config.fixed_odd = dec!(1.20);
        let plan = PlanService::new().generate(&config).unwrap();
        assert_eq!(plan[0].predicted_profit, dec!(20));
    }

    #[test]
    fn predicted_profit_is_rounded_to_eight_places() {
        assert_eq!(predicted_profit(dec!(0.000000033), dec!(1.15)), Some(dec!(0.00000000)));
        assert_eq!(predicted_profit(dec!(0.00000005), dec!(1.10)), Some(dec!(0.00000001)));
        assert_eq!(predicted_profit(dec!(33.33), dec!(1.15)), Some(dec!(4.9995)));
    }

    #[test]
    fn predicted_profit_overflow_is_none() {
        assert_eq!(predicted_profit(Decimal::MAX, dec!(3)), None);
    }

    #[test]
    fn maximum_span_is_allowed() {
        let start = make_date(2025, 1, 1);
        let end = start + chrono::Days::new(MAX_PLAN_DAYS as u64 - 1);
        let plan = PlanService::new().generate(&make_config(start, end)).unwrap();
        assert_eq!(plan.len(), MAX_PLAN_DAYS as usize);
    }
}

// ═══════════════════════════════════════════════════════════════════
// PlanService — config rejection
// ═══════════════════════════════════════════════════════════════════

mod plan_generate_errors {
    use super::*;

    fn generate(config: &PlanConfig) -> CoreError {
        PlanService::new().generate(config).unwrap_err()
    }

    #[test]
    fn odd_too_low() {
        let d = make_date(2025, 1, 1);
        let mut config = make_config(d, d);
        config.fixed_odd = dec!(1.05);
        assert!(matches!(generate(&config), CoreError::Odd(OddError::TooLow)));
    }

    #[test]
    fn odd_too_high() {
        let d = make_date(2025, 1, 1);
        let mut config = make_config(d, d);
        config.fixed_odd = dec!(1.25);
        assert!(matches!(generate(&config), CoreError::Odd(OddError::TooHigh)));
    }

    #[test]
    fn bankroll_too_large_overflows() {
        let d = make_date(2025, 1, 1);
        let mut config = make_config(d, d);
        config.initial_bankroll = Decimal::MAX;
        assert!(matches!(generate(&config), CoreError::AmountOverflow(0)));
    }

    #[test]
    fn odd_checked_before_missing_fields() {
        let mut config = make_config(make_date(2025, 1, 1), make_date(2025, 1, 2));
        config.end_date = None;
        config.fixed_odd = dec!(2);
        assert!(matches!(generate(&config), CoreError::Odd(OddError::TooHigh)));
    }

    #[test]
    fn missing_start_date() {
        let mut config = make_config(make_date(2025, 1, 1), make_date(2025, 1, 2));
        config.start_date = None;
        assert!(matches!(
            generate(&config),
            CoreError::Config(ConfigError::MissingField { field: "start_date" })
        ));
    }

    #[test]
    fn missing_end_date() {
        let mut config = make_config(make_date(2025, 1, 1), make_date(2025, 1, 2));
        config.end_date = None;
        assert!(matches!(
            generate(&config),
            CoreError::Config(ConfigError::MissingField { field: "end_date" })
        ));
    }

    #[test]
    fn zero_bankroll_is_missing() {
        let mut config = make_config(make_date(2025, 1, 1), make_date(2025, 1, 2));
        config.initial_bankroll = Decimal::ZERO;
        assert!(matches!(
            generate(&config),
            CoreError::Config(ConfigError::MissingField { field: "initial_bankroll" })
        ));
    }

    #[test]
    fn zero_stake_is_missing() {
        let mut config = make_config(make_date(2025, 1, 1), make_date(2025, 1, 2));
        config.base_stake = Decimal::ZERO;
        assert!(matches!(
            generate(&config),
            CoreError::Config(ConfigError::MissingField { field: "base_stake" })
        ));
    }

    #[test]
    fn negative_stake_rejected() {
        let mut config = make_config(make_date(2025, 1, 1), make_date(2025, 1, 2));
        config.base_stake = dec!(-5);
        assert!(matches!(
            generate(&config),
            CoreError::Config(ConfigError::NonPositiveAmount { field: "base_stake" })
        ));
    }

    #[test]
    fn inverted_date_range() {
        let config = make_config(make_date(2025, 2, 1), make_date(2025, 1, 31));
        assert!(matches!(
            generate(&config),
            CoreError::Config(ConfigError::InvertedDateRange)
        ));
    }

    #[test]
    fn range_too_long() {
        let start = make_date(2025, 1, 1);
        let end = start + chrono::Days::new(MAX_PLAN_DAYS as u64);
        match generate(&make_config(start, end)) {
            CoreError::Config(ConfigError::RangeTooLong { days, max }) => {
                assert_eq!(days, MAX_PLAN_DAYS + 1);
                assert_eq!(max, MAX_PLAN_DAYS);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// PlanService — update (recalculation)
// ═══════════════════════════════════════════════════════════════════

mod plan_update {
    use super::*;

    #[test]
    fn recorded_win_repairs_downstream() {
        let mut plan = make_plan(3);
        update(&mut plan, 0, Some(dec!(20)), true);

        assert_eq!(plan[0].actual_profit, Some(dec!(20)));
        assert!(plan[0].is_win);
        assert_eq!(plan[0].final_bankroll, dec!(1020));

        assert_eq!(plan[1].initial_bankroll, dec!(1020));
        assert_eq!(plan[1].staked_value, dec!(120));
        assert_eq!(plan[1].predicted_profit, dec!(18));
        assert_eq!(plan[1].final_bankroll, dec!(1038));

        assert_eq!(plan[2].initial_bankroll, dec!(1038));
        assert_eq!(plan[2].staked_value, dec!(118));
        assert_eq!(plan[2].predicted_profit, dec!(17.7));
        assert_eq!(plan[2].final_bankroll, dec!(1055.7));
        assert_chained(&plan);
    }

    #[test]
    fn recording_unlocks_only_the_next_day() {
        let mut plan = make_plan(3);
        update(&mut plan, 0, Some(dec!(20)), true);

        assert!(!plan[1].is_locked);
        assert!(plan[2].is_locked);
    }

    #[test]
    fn unlock_is_permanent() {
        let mut plan = make_plan(3);
        update(&mut plan, 0, Some(dec!(20)), true);
        update(&mut plan, 0, None, false);

        assert!(!plan[1].is_locked);
        assert_eq!(plan[0].actual_profit, None);
    }

    #[test]
    fn absent_outcome_does_not_unlock() {
        let mut plan = make_plan(3);
        update(&mut plan, 0, None, false);
        assert!(plan[1].is_locked);
    }

    #[test]
    fn edited_entry_defaults_absent_outcome_to_zero() {
        let mut plan = make_plan(3);
        update(&mut plan, 0, None, false);

        assert_eq!(plan[0].final_bankroll, plan[0].initial_bankroll);
        assert_eq!(plan[0].final_bankroll, dec!(1000));
    }

    #[test]
    fn downstream_entries_default_absent_outcome_to_prediction() {
        let mut plan = make_plan(3);
        update(&mut plan, 0, None, false);

        // Day 1 carries day 0's prediction into its stake and its own
        // prediction into its final bankroll, unlike the edited day.
        assert_eq!(plan[1].initial_bankroll, dec!(1000));
        assert_eq!(plan[1].staked_value, dec!(115));
        assert_eq!(plan[1].final_bankroll, dec!(1017.25));
    }

    #[test]
    fn loss_shrinks_next_stake() {
        let mut plan = make_plan(2);
        update(&mut plan, 0, Some(dec!(-100)), false);

        assert_eq!(plan[0].final_bankroll, dec!(900));
        assert_eq!(plan[1].staked_value, Decimal::ZERO);
        assert_eq!(plan[1].predicted_profit, Decimal::ZERO);
        assert_eq!(plan[1].final_bankroll, dec!(900));
    }

    #[test]
    fn downstream_recorded_outcomes_are_kept() {
        let mut plan = make_plan(3);
        update(&mut plan, 0, Some(dec!(20)), true);
        update(&mut plan, 1, Some(dec!(30)), true);
        update(&mut plan, 0, Some(dec!(10)), true);

        assert_eq!(plan[1].actual_profit, Some(dec!(30)));
        assert_eq!(plan[1].initial_bankroll, dec!(1010));
        assert_eq!(plan[1].staked_value, dec!(110));
        assert_eq!(plan[1].predicted_profit, dec!(16.5));
        assert_eq!(plan[1].final_bankroll, dec!(1040));
        assert_eq!(plan[2].staked_value, dec!(130));
        assert_chained(&plan);
    }

    #[test]
    fn is_idempotent() {
        let mut plan = make_plan(10);
        update(&mut plan, 3, Some(dec!(12.5)), true);
        let first = plan.clone();
        update(&mut plan, 3, Some(dec!(12.5)), true);
        assert_eq!(plan, first);
    }

    #[test]
    fn leaves_earlier_entries_untouched() {
        let mut plan = make_plan(6);
        update(&mut plan, 0, Some(dec!(15)), true);
        update(&mut plan, 1, Some(dec!(-40)), false);
        let before = plan[..3].to_vec();

        update(&mut plan, 3, Some(dec!(7)), true);
        assert_eq!(&plan[..3], before.as_slice());
    }

    #[test]
    fn last_entry_update_touches_nothing_else() {
        let mut plan = make_plan(4);
        let before = plan[..3].to_vec();
        update(&mut plan, 3, Some(dec!(5)), true);

        assert_eq!(&plan[..3], before.as_slice());
        assert_eq!(plan[3].final_bankroll, plan[3].initial_bankroll + dec!(5));
    }

    #[test]
    fn uses_supplied_stake_and_odd() {
        let mut plan = make_plan(2);
        PlanService::new()
            .update(&mut plan, 0, Some(dec!(20)), true, dec!(50), dec!(1.20))
            .unwrap();
        assert_eq!(plan[1].staked_value, dec!(70));
        assert_eq!(plan[1].predicted_profit, dec!(14));
    }

    #[test]
    fn chain_holds_after_many_edits() {
        let mut plan = make_plan(30);
        for (i, profit) in [(0, dec!(15)), (1, dec!(-115)), (2, dec!(0)), (3, dec!(17.1))] {
            update(&mut plan, i, Some(profit), profit > Decimal::ZERO);
        }
        assert_chained(&plan);
        assert!(!plan[4].is_locked);
        assert!(plan[5].is_locked);
    }

    #[test]
    fn overflowing_outcome_leaves_plan_untouched() {
        let mut plan = make_plan(3);
        let before = plan.clone();
        let err = PlanService::new()
            .update(&mut plan, 0, Some(Decimal::MAX), true, dec!(100), dec!(1.15))
            .unwrap_err();

        assert!(matches!(err, CoreError::AmountOverflow(0)));
        assert_eq!(plan, before);
    }

    #[test]
    fn overflow_downstream_reports_that_entry() {
        // Day 0 still fits; day 1 cannot add its carried profit.
        let mut plan = make_plan(3);
        let before = plan.clone();
        let huge = Decimal::MAX - dec!(2000);
        let err = PlanService::new()
            .update(&mut plan, 0, Some(huge), true, dec!(100), dec!(1.15))
            .unwrap_err();

        assert!(matches!(err, CoreError::AmountOverflow(1)));
        assert_eq!(plan, before);
    }

    #[test]
    fn large_negative_outcome_is_accepted() {
        let mut plan = make_plan(2);
        update(&mut plan, 0, Some(dec!(-1000000)), false);
        assert_eq!(plan[0].final_bankroll, dec!(-999000));
        assert_chained(&plan);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn index_out_of_bounds_panics() {
        let mut plan = make_plan(3);
        update(&mut plan, 3, Some(dec!(1)), true);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn empty_plan_panics() {
        let mut plan: Vec<PlanEntry> = Vec::new();
        update(&mut plan, 0, None, false);
    }
}

// ═══════════════════════════════════════════════════════════════════
// SummaryService
// ═══════════════════════════════════════════════════════════════════

mod summary {
    use super::*;

    #[test]
    fn empty_plan_has_no_summary() {
        let err = SummaryService::new().summarize(&[]).unwrap_err();
        assert!(matches!(err, CoreError::NoPlan));
    }

    #[test]
    fn fresh_plan_summary() {
        let plan = make_plan(2);
        let s = SummaryService::new().summarize(&plan).unwrap();

        assert_eq!(s.days_planned, 2);
        assert_eq!(s.days_recorded, 0);
        assert_eq!(s.last_recorded_index, None);
        assert_eq!(s.starting_bankroll, dec!(1000));
        assert_eq!(s.current_bankroll, dec!(1000));
        assert_eq!(s.projected_final_bankroll, dec!(1032.25));
        assert_eq!(s.total_predicted_profit, dec!(32.25));
        assert_eq!(s.total_actual_profit, Decimal::ZERO);
        assert_eq!(s.projected_return_pct, dec!(3.23));
    }

    #[test]
    fn summary_after_win_and_loss() {
        let mut plan = make_plan(3);
        update(&mut plan, 0, Some(dec!(20)), true);
        update(&mut plan, 1, Some(dec!(-50)), false);

        let s = SummaryService::new().summarize(&plan).unwrap();
        assert_eq!(s.days_recorded, 2);
        assert_eq!(s.wins, 1);
        assert_eq!(s.losses, 1);
        assert_eq!(s.last_recorded_index, Some(1));
        assert_eq!(s.current_bankroll, dec!(970));
        assert_eq!(s.total_actual_profit, dec!(-30));
        assert_eq!(s.projected_final_bankroll, dec!(977.5));
        assert_eq!(s.total_predicted_profit, dec!(40.5));
        assert_eq!(s.projected_return_pct, dec!(-2.25));
    }

    #[test]
    fn overflowing_totals_are_an_error() {
        let mut plan = make_plan(2);
        plan[0].actual_profit = Some(Decimal::MAX);
        plan[1].actual_profit = Some(Decimal::MAX);

        let err = SummaryService::new().summarize(&plan).unwrap_err();
        assert!(matches!(err, CoreError::AmountOverflow(1)));
    }
}
