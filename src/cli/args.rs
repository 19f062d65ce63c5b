use std::collections::HashMap;

use chrono::{Local, NaiveDate};

use crate::errors::AppError;

/// Positional arguments plus `--flag value` and bare `--switch` options.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ParsedArgs<'a> {
    pub positionals: Vec<&'a str>,
    values: HashMap<&'static str, &'a str>,
    switches: Vec<&'static str>,
}

impl<'a> ParsedArgs<'a> {
    /// Splits `args` using the accepted option names. Unknown `--options` and
    /// value options without a value are usage errors.
    pub fn parse(
        args: &[&'a str],
        value_flags: &[&'static str],
        switch_flags: &[&'static str],
    ) -> Result<Self, AppError> {
        let mut parsed = ParsedArgs::default();
        let mut iter = args.iter().copied();
        while let Some(arg) = iter.next() {
            if let Some(flag) = value_flags.iter().copied().find(|flag| *flag == arg) {
                let value = iter
                    .next()
                    .ok_or_else(|| AppError::Usage(format!("{} expects a value", flag)))?;
                parsed.values.insert(flag, value);
            } else if let Some(flag) = switch_flags.iter().copied().find(|flag| *flag == arg) {
                parsed.switches.push(flag);
            } else if arg.starts_with("--") && arg.len() > 2 {
                return Err(AppError::Usage(format!("unknown option `{}`", arg)));
            } else {
                parsed.positionals.push(arg);
            }
        }
        Ok(parsed)
    }

    pub fn value(&self, flag: &str) -> Option<&'a str> {
        self.values.get(flag).copied()
    }

    pub fn has(&self, flag: &str) -> bool {
        self.switches.contains(&flag)
    }
}

/// Whole Rupiah. `.` and `_` are accepted as thousands separators.
pub fn parse_amount(input: &str) -> Result<u64, AppError> {
    let digits: String = input.chars().filter(|ch| *ch != '.' && *ch != '_').collect();
    if digits.is_empty() || !digits.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(AppError::InvalidArgument(format!(
            "amount `{}` must be a whole number of Rupiah",
            input
        )));
    }
    digits
        .parse::<u64>()
        .map_err(|_| AppError::InvalidArgument(format!("amount `{}` is too large", input)))
}

/// `YYYY-MM-DD` or `today`.
pub fn parse_date(input: &str) -> Result<NaiveDate, AppError> {
    if input.eq_ignore_ascii_case("today") {
        return Ok(Local::now().date_naive());
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| {
        AppError::InvalidArgument(format!("date `{}` must use the YYYY-MM-DD format", input))
    })
}
