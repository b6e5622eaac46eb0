//! `date-time`, the quoted `INTERNALDATE` format.

use abnf_core::{is_digit, streaming::{dquote, sp}};
use chrono::{DateTime as ChronoDateTime, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use nom::{
    branch::alt,
    bytes::streaming::{tag, take_while_m_n},
    character::streaming::char,
    combinator::{map, map_res},
    sequence::{delimited, preceded, tuple},
};

use crate::decode::{invalid_date, IMAPResult};

/// ```abnf
/// date-time = DQUOTE date-day-fixed "-" date-month "-" date-year SP time SP zone DQUOTE
/// ```
pub(crate) fn date_time(input: &[u8]) -> IMAPResult<ChronoDateTime<FixedOffset>> {
    let mut parser = delimited(
        dquote,
        tuple((
            date_day_fixed,
            tag(b"-"),
            date_month,
            tag(b"-"),
            date_year,
            sp,
            time,
            sp,
            zone,
        )),
        dquote,
    );

    let (remaining, (d, _, m, _, y, _, time, _, zone)) = parser(input)?;

    let date = NaiveDate::from_ymd_opt(y.into(), m.into(), d.into());

    match (date, time, zone) {
        (Some(date), Some(time), Some(zone)) => {
            let local = NaiveDateTime::new(date, time);
            match zone.from_local_datetime(&local) {
                LocalResult::Single(dt) => Ok((remaining, dt)),
                _ => invalid_date(input),
            }
        }
        _ => invalid_date(input),
    }
}

/// `date-day-fixed = (SP DIGIT) / 2DIGIT`
fn date_day_fixed(input: &[u8]) -> IMAPResult<u8> {
    alt((
        map(preceded(sp, take_while_m_n(1, 1, is_digit)), |bytes: &[u8]| {
            bytes[0] - b'0'
        }),
        digit_2,
    ))(input)
}

/// `date-month = "Jan" / "Feb" / ... / "Dec"`
fn date_month(input: &[u8]) -> IMAPResult<u8> {
    use nom::{bytes::streaming::tag_no_case, combinator::value};
    alt((
        value(1, tag_no_case(b"Jan")),
        value(2, tag_no_case(b"Feb")),
        value(3, tag_no_case(b"Mar")),
        value(4, tag_no_case(b"Apr")),
        value(5, tag_no_case(b"May")),
        value(6, tag_no_case(b"Jun")),
        value(7, tag_no_case(b"Jul")),
        value(8, tag_no_case(b"Aug")),
        value(9, tag_no_case(b"Sep")),
        value(10, tag_no_case(b"Oct")),
        value(11, tag_no_case(b"Nov")),
        value(12, tag_no_case(b"Dec")),
    ))(input)
}

/// `date-year = 4DIGIT`
fn date_year(input: &[u8]) -> IMAPResult<u16> {
    digit_4(input)
}

/// `time = 2DIGIT ":" 2DIGIT ":" 2DIGIT`
fn time(input: &[u8]) -> IMAPResult<Option<NaiveTime>> {
    let (remaining, (h, _, m, _, s)) = tuple((digit_2, tag(b":"), digit_2, tag(b":"), digit_2))(input)?;
    Ok((remaining, NaiveTime::from_hms_opt(h.into(), m.into(), s.into())))
}

/// `zone = ("+" / "-") 4DIGIT`
fn zone(input: &[u8]) -> IMAPResult<Option<FixedOffset>> {
    let (remaining, (sign, hh, mm)) = tuple((alt((char('+'), char('-'))), digit_2, digit_2))(input)?;
    let offset = 3600 * (hh as i32) + 60 * (mm as i32);
    let zone = match sign {
        '+' => FixedOffset::east_opt(offset),
        '-' => FixedOffset::west_opt(offset),
        _ => unreachable!(),
    };
    Ok((remaining, zone))
}

fn digit_2(input: &[u8]) -> IMAPResult<u8> {
    map_res(take_while_m_n(2, 2, is_digit), |bytes: &[u8]| {
        std::str::from_utf8(bytes).unwrap().parse::<u8>()
    })(input)
}

fn digit_4(input: &[u8]) -> IMAPResult<u16> {
    map_res(take_while_m_n(4, 4, is_digit), |bytes: &[u8]| {
        std::str::from_utf8(bytes).unwrap().parse::<u16>()
    })(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_time() {
        let (rem, val) = date_time(b"\"07-Feb-1994 21:52:25 -0800\"xxx").unwrap();
        assert_eq!(rem, b"xxx");
        assert_eq!(
            val,
            ChronoDateTime::parse_from_rfc2822("Mon, 7 Feb 1994 21:52:25 -0800 (PST)").unwrap()
        );
    }

    #[test]
    fn test_date_day_fixed_single_digit() {
        let (rem, val) = date_time(b"\" 7-Feb-1994 21:52:25 -0800\"xxx").unwrap();
        assert_eq!(rem, b"xxx");
        assert_eq!(val.format("%d").to_string(), "07");
    }
}
