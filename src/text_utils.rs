use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DATE_REGEX: Regex = Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap();
}

pub fn is_date_format(buf: &str) -> bool {
    DATE_REGEX.is_match(buf)
}

/// Parses a `YYYY-MM-DD` calendar date. Out-of-range days such as `2024-02-30` are rejected.
pub fn parse_date(buf: &str) -> Result<NaiveDate, String> {
    if !is_date_format(buf) {
        return Err(format!("Unable to parse date {}", buf));
    }

    match NaiveDate::parse_from_str(buf, "%Y-%m-%d") {
        Ok(d) => Ok(d),
        Err(_) => Err(format!("Invalid calendar date {}", buf)),
    }
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Minutes needed to read `text`, rounded up.
pub fn reading_time(text: &str, words_per_minute: u32) -> u32 {
    let wpm = words_per_minute.max(1) as usize;
    word_count(text).div_ceil(wpm) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        let date = parse_date("2017-09-10").unwrap();
        assert_eq!(format_date(&date), "2017-09-10");

        assert!(parse_date("2017-9-10").is_err());
        assert!(parse_date("2017-09-10 10:42:32").is_err());
        assert!(parse_date("2023-02-29").is_err());
        assert!(parse_date("2024-02-29").is_ok());
        assert!(parse_date("2024-13-01").is_err());

        assert!(is_date_format("2024-03-01"));
        assert!(!is_date_format("２０２４-０３-０１"));
        assert_eq!(parse_date("２０２４-０３-０１").unwrap_err(), "Unable to parse date ２０２４-０３-０１");
    }

    #[test]
    fn test_reading_time() {
        assert_eq!(reading_time("", 200), 0);
        assert_eq!(reading_time("one two three", 200), 1);

        let words = vec!["word"; 401].join(" ");
        assert_eq!(reading_time(&words, 200), 3);
        assert_eq!(reading_time(&words, 0), 401);
    }
}
