use chrono::{DateTime, Utc};

#[must_use]
pub fn format_created(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use learn_core::time::fixed_now;

    #[test]
    fn formats_to_minutes() {
        assert_eq!(format_created(fixed_now()), "2023-11-14 22:13");
    }
}
