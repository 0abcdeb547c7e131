use std::{
    fmt::Display,
    ops::{Add, Sub},
};

use chrono::{DateTime, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

pub const MINUTES_PER_DAY: u16 = 24 * 60;
pub const WINDOW_RADIUS: u16 = 60;

/// Formats tried in order when a timestamp carries no offset.
/// `%.f` also matches an absent fraction.
const NAIVE_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M",
];

/// A clock minute in `[0, 1439]`, ignoring the date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct MinuteOfDay(u16);

impl TryFrom<u16> for MinuteOfDay {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("{value} is not a minute of the day"))
    }
}

impl From<MinuteOfDay> for u16 {
    fn from(value: MinuteOfDay) -> Self {
        value.0
    }
}

/// Wrapping minute arithmetic around midnight.
impl Add<u16> for MinuteOfDay {
    type Output = Self;

    fn add(self, rhs: u16) -> Self::Output {
        Self(((self.0 as u32 + rhs as u32) % MINUTES_PER_DAY as u32) as u16)
    }
}

impl Sub<u16> for MinuteOfDay {
    type Output = Self;

    fn sub(self, rhs: u16) -> Self::Output {
        let rhs = rhs % MINUTES_PER_DAY;
        Self((self.0 + MINUTES_PER_DAY - rhs) % MINUTES_PER_DAY)
    }
}

impl Display for MinuteOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hm_string())
    }
}

impl MinuteOfDay {
    pub const MIDNIGHT: Self = Self(0);
    pub const LAST: Self = Self(MINUTES_PER_DAY - 1);

    pub const fn new(minute: u16) -> Option<Self> {
        if minute < MINUTES_PER_DAY {
            Some(Self(minute))
        } else {
            None
        }
    }

    /// `hour * 60 + minute` of the wall clock. Seconds are dropped.
    pub fn from_datetime(datetime: &NaiveDateTime) -> Self {
        Self((datetime.hour() * 60 + datetime.minute()) as u16)
    }

    pub const fn as_minutes(&self) -> u16 {
        self.0
    }

    pub const fn as_index(&self) -> usize {
        self.0 as usize
    }

    pub fn to_hm_string(&self) -> String {
        format!("{:02}:{:02}", self.0 / 60, self.0 % 60)
    }

    pub fn from_hm(time: &str) -> Option<Self> {
        let mut split = time.split(':');
        let hours: u16 = split.next()?.parse().ok()?;
        let minutes: u16 = split.next()?.parse().ok()?;
        if split.next().is_some() || hours >= 24 || minutes >= 60 {
            return None;
        }
        Some(Self(hours * 60 + minutes))
    }
}

/// Parses a trip timestamp. Offsets are not converted, the wall clock of the
/// stated offset is kept.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.naive_local());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// Which part of the day counts towards station traffic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TimeFilter {
    #[default]
    Any,
    /// Half-open window `[center - 60, center + 60)`, wrapping at midnight.
    Around(MinuteOfDay),
}

impl Display for TimeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeFilter::Any => write!(f, "any time"),
            TimeFilter::Around(minute) => write!(f, "{minute}"),
        }
    }
}

impl From<MinuteOfDay> for TimeFilter {
    fn from(value: MinuteOfDay) -> Self {
        Self::Around(value)
    }
}

impl TimeFilter {
    pub const SLIDER_ANY: i32 = -1;

    /// Slider values are `-1` for any time and `0..=1439` otherwise.
    pub fn from_slider(value: i32) -> Option<Self> {
        if value == Self::SLIDER_ANY {
            return Some(Self::Any);
        }
        let minute = u16::try_from(value).ok()?;
        MinuteOfDay::new(minute).map(Self::Around)
    }

    pub fn to_slider(&self) -> i32 {
        match self {
            TimeFilter::Any => Self::SLIDER_ANY,
            TimeFilter::Around(minute) => minute.as_minutes() as i32,
        }
    }

    pub fn center(&self) -> Option<MinuteOfDay> {
        match self {
            TimeFilter::Any => None,
            TimeFilter::Around(minute) => Some(*minute),
        }
    }
}

#[test]
fn parse_unparse_1() {
    let time = "00:00";
    let minute = MinuteOfDay::from_hm(time).unwrap();
    assert_eq!(time, minute.to_hm_string())
}

#[test]
fn parse_unparse_2() {
    let time = "11:40";
    let minute = MinuteOfDay::from_hm(time).unwrap();
    assert_eq!(minute.as_minutes(), 700);
    assert_eq!(time, minute.to_hm_string())
}

#[test]
fn parse_unparse_3() {
    let time = "23:59";
    let minute = MinuteOfDay::from_hm(time).unwrap();
    assert_eq!(minute, MinuteOfDay::LAST);
    assert_eq!(time, minute.to_hm_string())
}

#[test]
fn invalid_hm() {
    assert!(MinuteOfDay::from_hm("24:00").is_none());
    assert!(MinuteOfDay::from_hm("12:60").is_none());
    assert!(MinuteOfDay::from_hm("12").is_none());
    assert!(MinuteOfDay::from_hm("12:00:00").is_none());
}

#[test]
fn wrapping_arithmetic() {
    assert_eq!(MinuteOfDay::MIDNIGHT - 60, MinuteOfDay::new(1380).unwrap());
    assert_eq!(MinuteOfDay::LAST + 60, MinuteOfDay::new(59).unwrap());
    assert_eq!(MinuteOfDay::new(700).unwrap() + 60, MinuteOfDay::new(760).unwrap());
}
