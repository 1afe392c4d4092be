use hifitime::{Epoch, TimeScale};

use crate::constants::{JulianCentury, JulianDay, DAYS_PER_CENTURY, JDTOMJD, JD_J2000, MJD};
use crate::orrery_errors::OrreryError;

/// Calendar date and time in the UTC scale, as exchanged with external consumers.
///
/// The simulation core itself only ever manipulates Julian Day numbers; this
/// struct exists for the boundary conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

/// Transformation from a calendar date (UTC) to a Julian Day number
///
/// Argument
/// --------
/// * `date`: the calendar date to convert
///
/// Return
/// ------
/// * the Julian Day number of the given instant, or an error for an invalid date
pub fn calendar_to_jd(date: &CalendarDate) -> Result<JulianDay, OrreryError> {
    let epoch = Epoch::maybe_from_gregorian(
        date.year,
        date.month,
        date.day,
        date.hour,
        date.minute,
        date.second,
        0,
        TimeScale::UTC,
    )
    .map_err(|e| OrreryError::InvalidDate(format!("{date:?}: {e}")))?;
    Ok(epoch.to_jde_utc_days())
}

/// Transformation from a Julian Day number to a calendar date (UTC)
///
/// Argument
/// --------
/// * `jd`: the Julian Day number
///
/// Return
/// ------
/// * the calendar date of the given instant, truncated to whole seconds
pub fn jd_to_calendar(jd: JulianDay) -> CalendarDate {
    let epoch = Epoch::from_jde_utc(jd);
    let (year, month, day, hour, minute, second, _nanos) = epoch.to_gregorian_utc();
    CalendarDate {
        year,
        month,
        day,
        hour,
        minute,
        second,
    }
}

/// Transformation from Julian Date (JD) to Modified Julian Date (MJD)
pub fn jd_to_mjd(jd: JulianDay) -> MJD {
    jd - JDTOMJD
}

/// Transformation from Modified Julian Date (MJD) to Julian Date (JD)
pub fn mjd_to_jd(mjd: MJD) -> JulianDay {
    mjd + JDTOMJD
}

/// Julian centuries elapsed since the J2000.0 epoch.
///
/// This is the time argument of the secular element rates and of the lunar
/// fundamental arguments: `T = (JD − 2451545.0) / 36525`.
pub fn julian_centuries(jd: JulianDay) -> JulianCentury {
    (jd - JD_J2000) / DAYS_PER_CENTURY
}

#[cfg(test)]
mod time_test {
    use super::*;

    #[test]
    fn test_j2000_centuries() {
        assert_eq!(julian_centuries(JD_J2000), 0.0);
        assert_eq!(julian_centuries(JD_J2000 + DAYS_PER_CENTURY), 1.0);
        assert_eq!(julian_centuries(JD_J2000 - DAYS_PER_CENTURY), -1.0);
    }

    #[test]
    fn test_calendar_to_jd() {
        // J2000.0 is 2000-01-01 12:00:00 TT; in UTC the JD differs by the
        // 64.184 s TT-UTC offset, so compare against the UTC noon JD instead.
        let date = CalendarDate {
            year: 2000,
            month: 1,
            day: 1,
            hour: 12,
            minute: 0,
            second: 0,
        };
        let jd = calendar_to_jd(&date).unwrap();
        assert!((jd - 2_451_545.0).abs() < 1e-9);
    }

    #[test]
    fn test_calendar_round_trip() {
        let date = CalendarDate {
            year: 2024,
            month: 7,
            day: 15,
            hour: 3,
            minute: 42,
            second: 57,
        };
        let jd = calendar_to_jd(&date).unwrap();
        let back = jd_to_calendar(jd);
        assert_eq!(date, back);
    }

    #[test]
    fn test_jd_mjd_round_trip() {
        let jd = 2_459_215.5;
        assert_eq!(jd_to_mjd(jd), 59_215.0);
        assert_eq!(mjd_to_jd(jd_to_mjd(jd)), jd);
    }

    #[test]
    fn test_invalid_date() {
        let date = CalendarDate {
            year: 2024,
            month: 13,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
        };
        assert!(calendar_to_jd(&date).is_err());
    }
}
