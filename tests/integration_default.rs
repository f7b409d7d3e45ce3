//! Integration tests for full-year reservoir simulations.

mod common;

use solar_pump_sim::sim::kpi::DEFICIT_TOLERANCE_L;
use solar_pump_sim::sim::simulate;
use solar_pump_sim::sim::sweep::capacity_sweep;

#[test]
fn full_run_produces_complete_calendar() {
    let r = simulate(&common::flat_config(5000.0, 2000.0));
    assert_eq!(r.hours.len(), 8760);
    assert_eq!(r.days.len(), 365);
    assert_eq!(r.months.len(), 12);
    let days: usize = r.months.iter().map(|m| m.days).sum();
    assert_eq!(days, 365);
}

#[test]
fn flat_profile_pumps_26000_litres_per_day() {
    let r = simulate(&common::flat_config(5000.0, 2000.0));
    for d in &r.days {
        assert!(
            (d.pumped_l - 26_000.0).abs() < 1e-6,
            "day {} pumped {}",
            d.day_of_year,
            d.pumped_l
        );
    }
    assert!((r.year.pumped_l - 365.0 * 26_000.0).abs() < 1e-3);
}

#[test]
fn small_demand_is_met_after_the_first_night() {
    let r = simulate(&common::flat_config(5000.0, 2000.0));
    let first_night = 6.0 * 2000.0 / 24.0;

    // Tank starts empty, so hours 0-5 of 1 January are short.
    assert!((r.days[0].deficit_l - first_night).abs() < 1e-6);
    assert!(r.days[1..].iter().all(|d| d.deficit_l <= DEFICIT_TOLERANCE_L));
    assert_eq!(r.year.days_not_served, 1);
    assert!((r.year.deficit_l - first_night).abs() < 1e-6);
    assert!(r.year.overflow_l > 0.0);
    assert!(r.days[1].overflow_l > 0.0);
}

#[test]
fn large_demand_is_met_after_the_first_night() {
    let r = simulate(&common::flat_config(5000.0, 10_000.0));
    let first_night = 6.0 * 10_000.0 / 24.0;

    assert!((r.days[0].deficit_l - first_night).abs() < 1e-6);
    assert!(r.days[1..].iter().all(|d| d.served));
    assert_eq!(r.year.days_not_served, 1);
    assert_eq!(r.unserved_days().count(), 1);
    for m in &r.months[1..] {
        assert_eq!(m.deficit_l, 0.0);
        assert_eq!(m.reliability_pct, 100.0);
    }
}

#[test]
fn zero_profile_serves_no_day() {
    let r = simulate(&common::zero_config(5000.0, 2000.0));
    assert_eq!(r.year.days_not_served, 365);
    assert_eq!(r.year.reliability_pct, 0.0);
    assert_eq!(r.year.pumped_l, 0.0);
    assert!((r.year.deficit_l - r.year.demand_l).abs() < 1e-6);
    assert!(r.months.iter().all(|m| m.reliability_pct == 0.0));
}

#[test]
fn volumes_are_never_negative() {
    for (tank, demand) in [(0.0, 3000.0), (5000.0, 2000.0), (2500.0, 40_000.0)] {
        let r = simulate(&common::flat_config(tank, demand));
        for h in &r.hours {
            assert!(h.pumped_l >= 0.0);
            assert!(h.deficit_l >= 0.0);
            assert!(h.overflow_l >= 0.0);
            assert!(h.stored_l >= 0.0 && h.stored_l <= tank + 1e-9);
        }
        for d in &r.days {
            assert!(d.delivered_l >= 0.0 && d.delivered_l <= d.demand_l + 1e-9);
        }
    }
}

#[test]
fn reliability_is_bounded_and_100_only_without_deficit() {
    for (tank, demand) in [(0.0, 0.0), (0.0, 3000.0), (5000.0, 2000.0), (1000.0, 60_000.0)] {
        let r = simulate(&common::flat_config(tank, demand));
        let rel = r.year.reliability_pct;
        assert!((0.0..=100.0).contains(&rel));
        assert_eq!(rel == 100.0, r.year.deficit_l == 0.0, "tank {tank} demand {demand}");
    }
}

#[test]
fn identical_inputs_give_identical_results() {
    let cfg = common::flat_config(3000.0, 7000.0);
    let a = simulate(&cfg);
    let b = simulate(&cfg);
    assert_eq!(a.year.deficit_l, b.year.deficit_l);
    assert_eq!(a.year.overflow_l, b.year.overflow_l);
    assert_eq!(a.year.final_stored_l, b.year.final_stored_l);
    assert!(a.hours.iter().zip(&b.hours).all(|(x, y)| x.stored_l == y.stored_l));
}

#[test]
fn sweep_matches_individual_runs() {
    let base = common::flat_config(0.0, 10_000.0);
    let caps = [0.0, 2000.0, 5000.0];
    let points = capacity_sweep(&base, &caps).expect("valid capacities");
    for (p, &c) in points.iter().zip(&caps) {
        let single = simulate(&common::flat_config(c, 10_000.0));
        assert_eq!(p.tank_capacity_l, c);
        assert_eq!(p.year.days_not_served, single.year.days_not_served);
        assert_eq!(p.year.deficit_l, single.year.deficit_l);
    }
    // No storage: every night is short.
    assert_eq!(points[0].year.days_not_served, 365);
    assert_eq!(points[2].year.days_not_served, 1);
}
