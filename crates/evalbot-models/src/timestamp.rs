use time::OffsetDateTime;

/// Drop sub-microsecond precision, which Postgres does not store.
pub fn truncate_to_micros(value: OffsetDateTime) -> OffsetDateTime {
    value
        .replace_nanosecond(value.nanosecond() / 1_000 * 1_000)
        .unwrap_or(value)
}

/// Current UTC time, microsecond precision.
pub fn now_utc_micros() -> OffsetDateTime {
    truncate_to_micros(OffsetDateTime::now_utc())
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn truncate() {
        let value = datetime!(2024-03-01 10:00:00.123456789 UTC);
        assert_eq!(
            truncate_to_micros(value),
            datetime!(2024-03-01 10:00:00.123456 UTC)
        );
    }
}
