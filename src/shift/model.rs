//! Day-dependent shift windows
//!
//! Normal days run three staggered ten-hour shifts. The special weekday runs
//! every shift on the same long window.

use crate::types::{ShiftWindow, ShiftWindows};
use chrono::{Datelike, NaiveDate, Weekday};

/// The one weekday with the uniform schedule
pub const SPECIAL_WEEKDAY: Weekday = Weekday::Thu;

const SPECIAL_DAY_WINDOWS: ShiftWindows = ShiftWindows {
    opening: ShiftWindow::new(9.0, 19.0),
    mid: ShiftWindow::new(9.0, 19.0),
    close: ShiftWindow::new(9.0, 19.0),
};

const NORMAL_DAY_WINDOWS: ShiftWindows = ShiftWindows {
    opening: ShiftWindow::new(8.0, 18.0),
    mid: ShiftWindow::new(9.0, 19.0),
    close: ShiftWindow::new(10.0, 20.0),
};

/// Whether `date` falls on the special weekday
pub fn is_special_day(date: NaiveDate) -> bool {
    date.weekday() == SPECIAL_WEEKDAY
}

/// Shift windows for a day type
pub fn get_shift_windows(is_special_day: bool) -> ShiftWindows {
    if is_special_day {
        SPECIAL_DAY_WINDOWS
    } else {
        NORMAL_DAY_WINDOWS
    }
}

/// Convenience: windows for a concrete date
pub fn shift_windows_for(date: NaiveDate) -> ShiftWindows {
    get_shift_windows(is_special_day(date))
}
