use approx::assert_relative_eq;

use crate::time::{Time, SECONDS_PER_DAY, SECONDS_PER_YEAR};

#[test]
fn day_and_year_conversions() {
    assert_relative_eq!(Time::from_days(1.0).to_seconds(), SECONDS_PER_DAY);
    assert_relative_eq!(Time::from_seconds(SECONDS_PER_DAY).to_days(), 1.0);
    assert_relative_eq!(Time::from_years(1.0).to_days(), 365.25);
}

#[test]
fn step_count_from_ratio() {
    let span = Time::from_days(50.0);
    let tau = Time::from_days(0.25);
    assert_relative_eq!(span / tau, 200.0);

    let sum = tau + tau;
    assert_relative_eq!(sum.to_days(), 0.5);
    assert_relative_eq!((span - sum).to_days(), 49.5);
    assert_relative_eq!((tau * 4.0).to_days(), 1.0);
    assert_relative_eq!((span / 2.0).to_days(), 25.0);
    assert_relative_eq!(SECONDS_PER_YEAR / SECONDS_PER_DAY, 365.25);
}
