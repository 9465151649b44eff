use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Day of the week. Simulated day 0 is always a Monday.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Weekday {
    #[strum(to_string = "Monday", serialize = "mon")]
    Monday,
    #[strum(to_string = "Tuesday", serialize = "tue")]
    Tuesday,
    #[strum(to_string = "Wednesday", serialize = "wed")]
    Wednesday,
    #[strum(to_string = "Thursday", serialize = "thu")]
    Thursday,
    #[strum(to_string = "Friday", serialize = "fri")]
    Friday,
    #[strum(to_string = "Saturday", serialize = "sat")]
    Saturday,
    #[strum(to_string = "Sunday", serialize = "sun")]
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Weekday of a zero-based simulated day (`day mod 7`).
    pub fn from_day_index(day: u32) -> Self {
        Self::ALL[(day % 7) as usize]
    }

    /// 0 = Monday .. 6 = Sunday
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_weekend(self) -> bool {
        matches!(self, Weekday::Saturday | Weekday::Sunday)
    }
}
