//! Amounts are kept as integer cents everywhere inside the crate and only become
//! decimal numbers on the JSON wire.

/// Largest amount a single transaction may carry: one trillion currency units.
pub const MAX_AMOUNT_CENTS: i64 = 100_000_000_000_000;

/// Convert a decimal currency amount to cents, rounding to the nearest cent.
///
/// Returns `None` for non-finite amounts and for amounts whose cents do not fit
/// in an `i64`.
pub fn from_decimal(amount: f64) -> Option<i64> {
    let cents = (amount * 100.0).round();
    // `i64::MAX as f64` rounds up to 2^63, which is itself out of range.
    if cents.is_finite() && cents >= i64::MIN as f64 && cents < i64::MAX as f64 {
        Some(cents as i64)
    } else {
        None
    }
}

pub fn to_decimal(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Serde adapter for an `i64` cents field that is a decimal number on the wire.
///
/// Use with `#[serde(with = "crate::money::cents")]`.
pub mod cents {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(cents: &i64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(super::to_decimal(*cents))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let amount = f64::deserialize(deserializer)?;
        super::from_decimal(amount)
            .ok_or_else(|| serde::de::Error::custom("amount is out of range"))
    }
}

/// Serde adapter for twelve monthly cents values, one per calendar month.
pub mod monthly_cents {
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(months: &[i64; 12], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(months.len()))?;
        for cents in months {
            seq.serialize_element(&super::to_decimal(*cents))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<[i64; 12], D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = Vec::<f64>::deserialize(deserializer)?;
        if values.len() != 12 {
            return Err(serde::de::Error::invalid_length(
                values.len(),
                &"twelve monthly values",
            ));
        }

        let mut months = [0; 12];
        for (slot, amount) in months.iter_mut().zip(values) {
            *slot = super::from_decimal(amount)
                .ok_or_else(|| serde::de::Error::custom("amount is out of range"))?;
        }
        Ok(months)
    }
}
