use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserCounts {
    pub total: i64,
    pub banned: i64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VenueCounts {
    pub total: i64,
    pub approved: i64,
    pub pending: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: i64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingCounts {
    pub total: i64,
    /// Ascending by date; days without bookings are omitted.
    pub trend: Vec<DailyCount>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminStats {
    pub users: UserCounts,
    pub venues: VenueCounts,
    pub bookings: BookingCounts,
}

pub const TREND_DAYS: i64 = 7;

/// Start of the trend window: midnight UTC six days before `now`.
pub fn trend_since(now: DateTime<Utc>) -> DateTime<Utc> {
    let first_day = now.date_naive() - Duration::days(TREND_DAYS - 1);
    Utc.from_utc_datetime(&first_day.and_time(NaiveTime::default()))
}
