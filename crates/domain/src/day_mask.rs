use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Bitfield of weekdays on which a digest may fire.
///
/// Bit order is the contract for the whole scheduler: bit 0 is Monday,
/// bit 6 is Sunday, matching `Weekday::num_days_from_monday`. So
/// Monday = 1, Tuesday = 2, Wednesday = 4 and so on. The value 0 is
/// special and means "deliver instantly on arrival", never batched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayMask(u8);

impl DayMask {
    pub const INSTANT: DayMask = DayMask(0);
    pub const EVERY_DAY: DayMask = DayMask(0b0111_1111);

    pub fn new(bits: u8) -> Self {
        Self(bits & Self::EVERY_DAY.0)
    }

    pub fn from_weekdays(weekdays: &[Weekday]) -> Self {
        let mut bits = 0;
        for wday in weekdays {
            bits |= 1 << wday.num_days_from_monday();
        }
        Self(bits)
    }

    pub fn bits(&self) -> u8 {
        self.0
    }

    pub fn is_instant(&self) -> bool {
        self.0 == 0
    }

    pub fn contains(&self, weekday: Weekday) -> bool {
        self.0 & (1 << weekday.num_days_from_monday()) != 0
    }
}

impl Default for DayMask {
    fn default() -> Self {
        Self::INSTANT
    }
}
