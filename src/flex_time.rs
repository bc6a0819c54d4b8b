use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A match start time as the API sends it: epoch milliseconds, an ISO-8601
/// string, or nothing at all.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MatchTime {
    Millis(i64),
    Text(String),
    #[default]
    Unknown,
}

impl MatchTime {
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        MatchTime::Millis(dt.timestamp_millis())
    }

    /// Resolve to a UTC instant. Unparseable text yields `None`.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            MatchTime::Millis(ms) => Utc.timestamp_millis_opt(*ms).single(),
            MatchTime::Text(s) => {
                if let Ok(ms) = s.trim().parse::<i64>() {
                    return Utc.timestamp_millis_opt(ms).single();
                }
                DateTime::parse_from_rfc3339(s.trim())
                    .ok()
                    .map(|dt| dt.with_timezone(&Utc))
            }
            MatchTime::Unknown => None,
        }
    }

    pub fn as_millis(&self) -> Option<i64> {
        self.to_datetime().map(|dt| dt.timestamp_millis())
    }

    pub fn is_known(&self) -> bool {
        self.to_datetime().is_some()
    }
}

impl fmt::Display for MatchTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchTime::Millis(n) => write!(f, "{}", n),
            MatchTime::Text(s) => write!(f, "{}", s),
            MatchTime::Unknown => write!(f, "unknown"),
        }
    }
}

impl Serialize for MatchTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            MatchTime::Millis(n) => serializer.serialize_i64(*n),
            MatchTime::Text(s) => serializer.serialize_str(s),
            MatchTime::Unknown => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for MatchTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct MatchTimeVisitor;

        impl<'de> Visitor<'de> for MatchTimeVisitor {
            type Value = MatchTime;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("epoch milliseconds, a date string, or null")
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(MatchTime::Millis(v))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(MatchTime::Millis(v as i64))
            }

            fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(MatchTime::Millis(v as i64))
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if v.trim().is_empty() {
                    Ok(MatchTime::Unknown)
                } else {
                    Ok(MatchTime::Text(v.to_string()))
                }
            }

            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(MatchTime::Unknown)
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(MatchTime::Unknown)
            }
        }

        deserializer.deserialize_any(MatchTimeVisitor)
    }
}

/// Deserialize an identifier that may arrive as a string or a number.
pub fn deserialize_flex_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Treat an explicit `null` like a missing field.
pub fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Same as [`deserialize_flex_string`] but keeps absence as `None`.
pub fn deserialize_flex_option_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = deserialize_flex_string(deserializer)?;
    Ok(if s.is_empty() { None } else { Some(s) })
}
