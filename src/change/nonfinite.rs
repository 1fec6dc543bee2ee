// Serde representation for `f64` fields that may be NaN or infinite
//
// JSON has no literal for non-finite numbers and serde_json writes them as
// `null`, which cannot be read back into an `f64`. Finite values stay plain
// numbers; the others are written as "NaN", "inf" or "-inf".
//
// Usage: `#[serde(with = "crate::change::nonfinite")]` on the field.

use serde::de::{self, Deserializer, Unexpected};
use serde::{Deserialize, Serializer};

pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else if value.is_nan() {
        serializer.serialize_str("NaN")
    } else if value.is_sign_positive() {
        serializer.serialize_str("inf")
    } else {
        serializer.serialize_str("-inf")
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Repr {
    Number(f64),
    Text(String),
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Repr::deserialize(deserializer)? {
        Repr::Number(value) => Ok(value),
        Repr::Text(text) => match text.as_str() {
            "NaN" => Ok(f64::NAN),
            "inf" => Ok(f64::INFINITY),
            "-inf" => Ok(f64::NEG_INFINITY),
            other => Err(de::Error::invalid_value(
                Unexpected::Str(other),
                &"a number, \"NaN\", \"inf\" or \"-inf\"",
            )),
        },
    }
}
