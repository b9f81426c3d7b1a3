use approx::assert_relative_eq;

use crate::frequency::{Frequency, HERTZ_PER_KEV};

#[test]
fn kev_to_hertz() {
    assert_relative_eq!(Frequency::from_kev(1.0).to_hertz(), HERTZ_PER_KEV);
    assert_relative_eq!(Frequency::from_hertz(HERTZ_PER_KEV * 12.0).to_kev(), 12.0);
}

#[test]
fn band_ratio() {
    let low = Frequency::from_kev(1.0);
    let high = Frequency::from_kev(12.0);
    assert_relative_eq!(high / low, 12.0);
    assert_relative_eq!((low * 3.0).to_kev(), 3.0);
}
