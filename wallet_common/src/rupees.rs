//! Serde adapter for fields that carry rupee amounts over the API.
//!
//! Clients send amounts the way users type them: `"500"`, `"12.50"` or a bare JSON number. Amounts go back out as
//! JSON numbers in rupees (`500`, `12.5`), so the same field reads the same in both directions. Use it with
//! `#[serde(with = "wallet_common::rupees")]` on a [`Paise`] field.
use serde::{de, Deserialize, Deserializer, Serializer};

use crate::Paise;

#[derive(Deserialize)]
#[serde(untagged)]
enum RupeeValue {
    Whole(u64),
    Decimal(f64),
    Text(String),
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Paise, D::Error>
where D: Deserializer<'de> {
    let result = match RupeeValue::deserialize(deserializer)? {
        RupeeValue::Whole(v) => i64::try_from(v)
            .ok()
            .and_then(|v| v.checked_mul(crate::PAISE_PER_RUPEE))
            .map(Paise::from)
            .ok_or_else(|| format!("{v} rupees is too large")),
        RupeeValue::Decimal(v) => format!("{v}").parse::<Paise>().map_err(|e| e.to_string()),
        RupeeValue::Text(s) => s.parse::<Paise>().map_err(|e| e.to_string()),
    };
    result.map_err(de::Error::custom)
}

pub fn serialize<S>(value: &Paise, serializer: S) -> Result<S::Ok, S::Error>
where S: Serializer {
    let paise = value.value();
    if paise % crate::PAISE_PER_RUPEE == 0 {
        serializer.serialize_i64(paise / crate::PAISE_PER_RUPEE)
    } else {
        serializer.serialize_f64(value.to_rupees())
    }
}
