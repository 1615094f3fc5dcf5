#[macro_use]
mod macros;

pub mod energy;
pub mod power;
pub mod time;

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use approx::assert_abs_diff_eq;

    use super::{energy::KilowattHours, power::Kilowatts, time::Hours};

    #[test]
    fn display_uses_fixed_precision() {
        assert_eq!(KilowattHours(9.849).to_string(), "9.8 kWh");
        assert_eq!(KilowattHours(9.86).to_string(), "9.9 kWh");
        assert_eq!(Kilowatts(0.1).to_string(), "0.100 kW");
        assert_eq!(Hours(10.0).to_string(), "10.0 h");
    }

    #[test]
    fn debug_omits_the_space() {
        assert_eq!(format!("{:?}", KilowattHours(2.5)), "2.5kWh");
    }

    #[test]
    fn ordering_is_total() {
        assert_eq!(KilowattHours(1.0).cmp(&KilowattHours(2.0)), Ordering::Less);
        assert_eq!(KilowattHours(f64::NAN).cmp(&KilowattHours(f64::NAN)), Ordering::Equal);
        assert!(KilowattHours(f64::NAN) > KilowattHours(f64::INFINITY));
    }

    #[test]
    fn sum_and_scale() {
        let total: KilowattHours = [KilowattHours(2.8), KilowattHours(7.0)].into_iter().sum();
        assert_abs_diff_eq!((total * 2.0).0, 19.6, epsilon = 1e-9);
    }

    #[test]
    fn parse_from_str() {
        assert_eq!("0.5".parse::<Kilowatts>().unwrap(), Kilowatts(0.5));
        assert!("half".parse::<Kilowatts>().is_err());
    }
}
