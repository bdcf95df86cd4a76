use time::OffsetDateTime;
use time::macros::format_description;
use anyhow::Result;

pub fn format_date_time() -> Result<String> {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    Ok(now.format(&format)?)
}

pub fn unix_timestamp() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}
