use std::fmt;

use serde::{
    Deserialize, Deserializer,
    de::{Error, IgnoredAny, MapAccess, SeqAccess, Visitor},
};
use serde_with::DeserializeAs;

/// Any JSON value reduced to the scalar it carries.
///
/// The berth plan source is loosely typed, the same field can arrive as a number, a string or
/// null depending on the record. Arrays and objects are treated as missing values.
#[derive(Debug, Clone, PartialEq)]
enum Scalar {
    Missing,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Scalar {
    fn into_string(self) -> Option<String> {
        match self {
            Scalar::Missing => None,
            Scalar::Bool(v) => Some(v.to_string()),
            Scalar::Int(v) => Some(v.to_string()),
            Scalar::Float(v) => Some(v.to_string()),
            Scalar::Str(v) => Some(v),
        }
    }

    fn into_f64(self) -> Option<f64> {
        match self {
            Scalar::Int(v) => Some(v as f64),
            Scalar::Float(v) if v.is_finite() => Some(v),
            Scalar::Str(v) => v
                .trim()
                .replacen(',', ".", 1)
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite()),
            Scalar::Float(_) | Scalar::Missing | Scalar::Bool(_) => None,
        }
    }

    fn into_i64(self) -> Option<i64> {
        match self {
            Scalar::Int(v) => Some(v),
            Scalar::Float(v) if v.is_finite() && v.fract() == 0.0 => Some(v as i64),
            Scalar::Str(v) => v.trim().parse().ok(),
            Scalar::Float(_) | Scalar::Missing | Scalar::Bool(_) => None,
        }
    }

    fn is_truthy_flag(&self) -> bool {
        // The API sends the flag as the string "1". Numeric 1 and JSON true are accepted as the
        // same flag, any other value including the string "true" is unset.
        match self {
            Scalar::Bool(v) => *v,
            Scalar::Int(v) => *v == 1,
            Scalar::Str(v) => v.trim() == "1",
            Scalar::Float(_) | Scalar::Missing => false,
        }
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Helper;

        impl<'de> Visitor<'de> for Helper {
            type Value = Scalar;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("any value")
            }

            fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
            where
                E: Error,
            {
                Ok(Scalar::Bool(v))
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: Error,
            {
                Ok(Scalar::Int(v))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: Error,
            {
                Ok(i64::try_from(v)
                    .map(Scalar::Int)
                    .unwrap_or(Scalar::Float(v as f64)))
            }

            fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
            where
                E: Error,
            {
                Ok(Scalar::Float(v))
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: Error,
            {
                Ok(Scalar::Str(v.to_owned()))
            }

            fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
            where
                E: Error,
            {
                Ok(Scalar::Str(v))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: Error,
            {
                Ok(Scalar::Missing)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: Error,
            {
                Ok(Scalar::Missing)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Scalar::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                while seq.next_element::<IgnoredAny>()?.is_some() {}
                Ok(Scalar::Missing)
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
                Ok(Scalar::Missing)
            }
        }

        deserializer.deserialize_any(Helper)
    }
}

/// Renders any scalar as text, null and nested values become `None`.
pub struct LenientString;

impl<'de> DeserializeAs<'de, Option<String>> for LenientString {
    fn deserialize_as<D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Scalar::deserialize(deserializer)?.into_string())
    }
}

/// Numbers and numeric strings (with `.` or `,` as decimal separator), anything else is `None`.
pub struct LenientFloat;

impl<'de> DeserializeAs<'de, Option<f64>> for LenientFloat {
    fn deserialize_as<D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Scalar::deserialize(deserializer)?.into_f64())
    }
}

/// Integers, integral floats and integer strings, anything else is `None`.
pub struct LenientInt;

impl<'de> DeserializeAs<'de, Option<i64>> for LenientInt {
    fn deserialize_as<D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Scalar::deserialize(deserializer)?.into_i64())
    }
}

/// `"1"`, `1` and `true` are set, every other value is unset.
pub struct OneFlag;

impl<'de> DeserializeAs<'de, bool> for OneFlag {
    fn deserialize_as<D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Scalar::deserialize(deserializer)?.is_truthy_flag())
    }
}
