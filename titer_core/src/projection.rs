//! Projection engine: superposition of per-dose decay into a level curve.
//!
//! Doses act independently and additively; the total level at any instant
//! is the sum of each dose's residual amount. No saturation or interaction
//! modeling, matching the single-exponential elimination model.

use crate::decay;
use crate::types::{DoseEvent, ProjectionPoint};
use chrono::{DateTime, Duration, Utc};

/// Project the summed active level of one compound's events at each
/// query instant.
///
/// The output has the same length and order as `time_points`, which may
/// be irregular or unsorted. An empty event set yields an all-zero curve.
/// All events are assumed to share one compound; callers project each
/// compound separately.
pub fn project(
    events: &[DoseEvent],
    half_life_days: f64,
    time_points: &[DateTime<Utc>],
) -> Vec<ProjectionPoint> {
    time_points
        .iter()
        .map(|&at| ProjectionPoint {
            at,
            level_mg: events
                .iter()
                .map(|event| decay::level_at(event.dose_mg, event.taken_at, half_life_days, at))
                .sum(),
        })
        .collect()
}

/// Evenly sampled query grid around `now`.
///
/// This is display policy, not part of the projection contract:
/// [`project`] accepts any time points. The defaults (30 days back and
/// forward at 6-hour steps) come from configuration.
pub fn sample_window(
    now: DateTime<Utc>,
    days_back: i64,
    days_forward: i64,
    step_hours: i64,
) -> Vec<DateTime<Utc>> {
    let step = Duration::hours(step_hours.max(1));
    let end = now + Duration::days(days_forward);

    let mut points = Vec::new();
    let mut at = now - Duration::days(days_back);
    while at <= end {
        points.push(at);
        at += step;
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
    }

    fn event(dose_mg: f64, taken_at: DateTime<Utc>) -> DoseEvent {
        DoseEvent {
            id: Uuid::new_v4(),
            compound: "test-e".into(),
            dose_mg,
            taken_at,
        }
    }

    #[test]
    fn test_empty_events_yield_zero_curve() {
        let points: Vec<_> = (0..10i64).map(|d| t0() + Duration::days(d)).collect();
        let curve = project(&[], 5.0, &points);

        assert_eq!(curve.len(), points.len());
        for (point, at) in curve.iter().zip(&points) {
            assert_eq!(point.at, *at);
            assert_eq!(point.level_mg, 0.0);
        }
    }

    #[test]
    fn test_single_event_reduces_to_decay_curve() {
        let e = event(150.0, t0());
        let points: Vec<_> = (0..20i64).map(|h| t0() + Duration::hours(h * 7)).collect();

        let curve = project(&[e.clone()], 3.0, &points);
        for point in &curve {
            let expected = decay::level_at(e.dose_mg, e.taken_at, 3.0, point.at);
            assert_eq!(point.level_mg, expected);
        }
    }

    #[test]
    fn test_superposition() {
        let e1 = event(120.0, t0());
        let e2 = event(80.0, t0() + Duration::days(3));
        let points: Vec<_> = (0..30i64).map(|d| t0() + Duration::days(d)).collect();

        let combined = project(&[e1.clone(), e2.clone()], 4.0, &points);
        let alone1 = project(&[e1], 4.0, &points);
        let alone2 = project(&[e2], 4.0, &points);

        for i in 0..points.len() {
            let sum = alone1[i].level_mg + alone2[i].level_mg;
            assert!((combined[i].level_mg - sum).abs() < 1e-9);
        }
    }

    #[test]
    fn test_irregular_unsorted_time_points() {
        let e = event(100.0, t0());
        let points = vec![
            t0() + Duration::days(7),
            t0() - Duration::hours(3),
            t0() + Duration::minutes(90),
            t0(),
        ];

        let curve = project(&[e], 2.0, &points);
        assert_eq!(curve.len(), 4);
        // Order preserved, values positionally correct
        assert_eq!(curve[1].level_mg, 0.0);
        assert_eq!(curve[3].level_mg, 100.0);
        assert!(curve[0].level_mg < curve[2].level_mg);
    }

    #[test]
    fn test_200mg_half_life_five_days() {
        let e = event(200.0, t0());
        let points = vec![t0() + Duration::days(5), t0() + Duration::days(10)];

        let curve = project(&[e], 5.0, &points);
        assert!((curve[0].level_mg - 100.0).abs() < 0.5);
        assert!((curve[1].level_mg - 50.0).abs() < 0.5);
    }

    #[test]
    fn test_two_doses_coincident_sample() {
        // Two 100mg doses two days apart, half-life 2 days: at the second
        // dose instant the first has halved, so the total is 150mg.
        let e1 = event(100.0, t0());
        let e2 = event(100.0, t0() + Duration::days(2));

        let curve = project(&[e1, e2], 2.0, &[t0() + Duration::days(2)]);
        assert!((curve[0].level_mg - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_future_dose_contributes_nothing_before_its_time() {
        let future = event(500.0, t0() + Duration::days(10));
        let curve = project(&[future], 5.0, &[t0(), t0() + Duration::days(9)]);

        assert_eq!(curve[0].level_mg, 0.0);
        assert_eq!(curve[1].level_mg, 0.0);
    }

    #[test]
    fn test_sample_window_span_and_step() {
        let points = sample_window(t0(), 30, 30, 6);

        // 60 days at 4 samples/day, inclusive of both ends
        assert_eq!(points.len(), 241);
        assert_eq!(points[0], t0() - Duration::days(30));
        assert_eq!(*points.last().unwrap(), t0() + Duration::days(30));
        for pair in points.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::hours(6));
        }
    }

    #[test]
    fn test_sample_window_clamps_degenerate_step() {
        let points = sample_window(t0(), 0, 1, 0);
        assert_eq!(points.len(), 25);
    }
}
