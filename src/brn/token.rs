//! Parameter tokens.
//!
//! Rename parameters may contain the special tokens `@date` and `@time`,
//! which expand to the current local date and time. Every other token is
//! taken literally.

use chrono::NaiveDateTime;

pub(crate) const DATE_TOKEN: &str = "@date";
pub(crate) const TIME_TOKEN: &str = "@time";

// dd-mm-yyyy
const DATE_FORMAT: &str = "%d-%m-%Y";
// HH-MM-SS, 24 hour clock
const TIME_FORMAT: &str = "%H-%M-%S";

/// Source of the current moment for token expansion.
pub(crate) trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Reads the process's local wall clock.
pub(crate) struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// Always answers with the same moment.
#[cfg(test)]
pub(crate) struct FixedClock(pub(crate) NaiveDateTime);

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[derive(Debug, PartialEq)]
pub(crate) enum ParameterToken<'a> {
    Date,
    Time,
    Literal(&'a str),
}

impl<'a> ParameterToken<'a> {
    pub(crate) fn parse(token: &'a str) -> ParameterToken<'a> {
        match token {
            DATE_TOKEN => ParameterToken::Date,
            TIME_TOKEN => ParameterToken::Time,
            literal => ParameterToken::Literal(literal),
        }
    }

    pub(crate) fn expand(&self, clock: &dyn Clock) -> String {
        match self {
            ParameterToken::Date => clock.now().format(DATE_FORMAT).to_string(),
            ParameterToken::Time => clock.now().format(TIME_FORMAT).to_string(),
            ParameterToken::Literal(literal) => literal.to_string(),
        }
    }
}

/// Returns true if the argument looks like an option rather than a value.
/// A lone `-` is a value.
pub(crate) fn is_flag(arg: &str) -> bool {
    arg.starts_with('-') && arg != "-"
}

/// Expands a single token.
pub(crate) fn format(clock: &dyn Clock, token: &str) -> String {
    ParameterToken::parse(token).expand(clock)
}

/// Builds the parameter of the option found at `index`.
///
/// All the values following the option up to the next option are expanded
/// one by one and concatenated, so `a @date b` becomes `a16-10-2026b`.
/// The concatenation is then expanded once more as a whole.
pub(crate) fn build_parameter(clock: &dyn Clock, args: &[String], index: usize) -> String {
    let parameter: String = args
        .iter()
        .skip(index + 1)
        .take_while(|arg| !is_flag(arg))
        .map(|arg| format(clock, arg))
        .collect();
    format(clock, &parameter)
}
