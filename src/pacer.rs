use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use chrono_tz::{Tz, US::Central};
use regex::Regex;

pub const RUNNING_HOURS_START: u32 = 20;
pub const RUNNING_HOURS_END: u32 = 4;

static NO_DOCKET_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(There are )?(P|p)roceedings for case .{1,50} (but none satisfy the selection criteria|are not available)",
    )
    .expect("valid no-docket regex")
});

static MEMBER_CASES_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Member cases: <table [\s\S]+?</table>").expect("valid member cases regex")
});

pub const PAGES: [&str; 6] = [
    "query",
    "login",
    "logout",
    "docket",
    "doc_link",
    "possible_case",
];

pub fn base_url(court: &str) -> String {
    if court == "psc" {
        "https://dcecf.psc.uscourts.gov/".to_string()
    } else {
        format!("https://ecf.{court}.uscourts.gov/")
    }
}

pub fn pacer_url(court: &str, page: &str) -> Option<String> {
    let path = match page {
        "query" => "cgi-bin/iquery.pl",
        "login" => "cgi-bin/login.pl",
        "logout" => "cgi-bin/login.pl?logout",
        "docket" => "cgi-bin/DktRpt.pl",
        "doc_link" => "doc1",
        "possible_case" => "cgi-bin/possible_case_numbers.pl",
        _ => return None,
    };
    Some(format!("{}{path}", base_url(court)))
}

pub fn remap_short_date(raw: &str) -> Option<String> {
    let mut parts = raw.trim().split('/');
    let (month, day, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    Some(format!("20{year}-{month}-{day}"))
}

pub fn query_filed_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let rest = raw.strip_prefix("filed").unwrap_or(raw).trim_start();
    let filed = rest.split(" closed").next().unwrap_or(rest);
    remap_short_date(filed)
}

pub fn query_terminated_date(raw: &str) -> Option<String> {
    let (_, closed) = raw.split_once(" closed ")?;
    remap_short_date(closed)
}

pub fn has_no_docket(page: &str) -> bool {
    NO_DOCKET_REGEX.is_match(page)
}

pub fn member_list_span(page: &str) -> Option<(usize, usize)> {
    MEMBER_CASES_REGEX
        .find(page)
        .map(|found| (found.start(), found.end()))
}

pub fn central_time(now: DateTime<Utc>) -> DateTime<Tz> {
    now.with_timezone(&Central)
}

// Blocked hours run from `start - 1` down to `end` inclusive, so the default
// 20/4 window allows 20:00 through 03:59.
pub fn within_running_hours(hour: u32, start: u32, end: u32) -> bool {
    let (hour, start, end) = (i64::from(hour), i64::from(start), i64::from(end));
    !(hour <= start - 1 && hour > end - 1)
}
