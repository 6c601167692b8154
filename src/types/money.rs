use crate::types::errors::MoneyError;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::iter::Sum;
use std::ops::{AddAssign, SubAssign};
use std::str::FromStr;
use tracing::error;

pub const CURRENCY_SYMBOL: &str = "฿";

const SYMBOL_ALIASES: [&str; 2] = [CURRENCY_SYMBOL, "THB"];
const DECIMAL_PLACES: u32 = 2;
const SCALE: i64 = 10i64.pow(DECIMAL_PLACES);

/// An exact currency amount held as integer minor units (satang).
///
/// Formatting with the currency symbol and thousands separators only happens
/// in `Display`/`Serialize`; arithmetic never touches the formatted form.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_minor_units(units: i64) -> Self {
        Money(units)
    }

    pub fn from_major(major: i64) -> Option<Self> {
        major.checked_mul(SCALE).map(Money)
    }

    /// Converts a server-side decimal, rounding half away from zero to satang.
    pub fn from_decimal(value: Decimal) -> Result<Self, MoneyError> {
        let rounded = value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);

        rounded.checked_mul(Decimal::from(SCALE))
            .and_then(|scaled| scaled.to_i64())
            .map(Money)
            .ok_or(MoneyError::Overflow)
    }

    pub fn minor_units(&self) -> i64 {
        self.0
    }

    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, DECIMAL_PLACES)
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }
}

impl AddAssign<Money> for Money {
    fn add_assign(&mut self, rhs: Money) {
        if let Some(new_val) = self.checked_add(rhs) {
            self.0 = new_val.0;
        } else {
            error!("Money AddAssign error: Overflow")
        }
    }
}

impl SubAssign<Money> for Money {
    fn sub_assign(&mut self, rhs: Money) {
        if let Some(new_val) = self.checked_sub(rhs) {
            self.0 = new_val.0;
        } else {
            error!("Money SubAssign error: Overflow")
        }
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        let mut total = Money::ZERO;

        for amount in iter {
            total += amount;
        }

        total
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    grouped
}

fn strip_symbol(value: &str) -> &str {
    SYMBOL_ALIASES.iter()
        .find_map(|symbol| value.strip_prefix(symbol))
        .unwrap_or(value)
        .trim_start()
}

impl Display for Money {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let integer = abs / SCALE as u64;
        let fraction = abs % SCALE as u64;

        write!(formatter, "{}{}{}", sign, CURRENCY_SYMBOL, group_thousands(integer))?;

        if fraction != 0 {
            write!(formatter, ".{:0width$}", fraction, width = DECIMAL_PLACES as usize)?;
        }

        Ok(())
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    /// Accepts plain (`1200`, `-5.5`) and formatted (`฿1,200.50`, `-฿500`) amounts.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = strip_symbol(value.trim());

        let (is_negative, unsigned) = match value.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, value.strip_prefix('+').unwrap_or(value))
        };

        let digits: String = strip_symbol(unsigned).chars().filter(|c| *c != ',').collect();

        if digits.is_empty() {
            return Err(MoneyError::InvalidFormat("Value has no digits".to_string()));
        }

        let (integer_part, fraction_part) = match digits.split_once('.') {
            Some((integer, fraction)) => (integer, fraction),
            None => (digits.as_str(), "")
        };

        if integer_part.is_empty() || !integer_part.chars().all(|c| c.is_ascii_digit()) {
            return Err(MoneyError::InvalidFormat(format!("Value has an invalid integer part: '{integer_part}'")));
        }

        if !fraction_part.chars().all(|c| c.is_ascii_digit()) {
            return Err(MoneyError::InvalidFormat(format!("Value has an invalid fraction part: '{fraction_part}'")));
        }

        if fraction_part.len() > DECIMAL_PLACES as usize {
            return Err(MoneyError::InvalidFormat("Value has too many decimal places".to_string()));
        }

        let integer: i64 = integer_part.parse().map_err(|_| MoneyError::Overflow)?;
        let fraction: i64 = if fraction_part.is_empty() {
            0
        } else {
            format!("{:0<width$}", fraction_part, width = DECIMAL_PLACES as usize)
                .parse()
                .map_err(|_| MoneyError::Overflow)?
        };

        let units = integer.checked_mul(SCALE)
            .and_then(|v| v.checked_add(fraction))
            .ok_or(MoneyError::Overflow)?;

        Ok(Money(if is_negative { -units } else { units }))
    }
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

struct MoneyVisitor;

impl de::Visitor<'_> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("a number or a currency formatted string")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Money, E> {
        Money::from_major(value).ok_or_else(|| E::custom(MoneyError::Overflow))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Money, E> {
        i64::try_from(value).ok()
            .and_then(Money::from_major)
            .ok_or_else(|| E::custom(MoneyError::Overflow))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Money, E> {
        let decimal = Decimal::from_f64(value)
            .ok_or_else(|| E::custom(MoneyError::InvalidFormat(format!("Value {value} is not representable"))))?;

        Money::from_decimal(decimal).map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Money, E> {
        Money::from_str(value).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(MoneyVisitor)
    }
}
