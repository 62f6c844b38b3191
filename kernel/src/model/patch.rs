use serde::{Deserialize, Deserializer};

/// A request field that distinguishes "not sent" from an explicit `null`.
///
/// Deserialize with `#[serde(default)]`: an absent field stays `Missing`,
/// a JSON `null` becomes `Null`, anything else becomes `Value`. Only
/// non-`Missing` fields end up in a changeset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    Missing,
    Null,
    Value(T),
}

impl<T> Patch<T> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Patch::Missing)
    }
}

// Manual impl: `Missing` must be the default even when `T` itself has no
// `Default`.
impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Missing
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Patch::Value(value),
            None => Patch::Null,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default)]
        title: Patch<String>,
        #[serde(default)]
        max_participants: Patch<i32>,
    }

    #[test]
    fn absent_field_is_missing() {
        let probe: Probe = serde_json::from_str("{}").unwrap();
        assert_eq!(probe.title, Patch::Missing);
        assert_eq!(probe.max_participants, Patch::Missing);
    }

    #[test]
    fn explicit_null_is_distinct_from_absent() {
        let probe: Probe = serde_json::from_str(r#"{"max_participants": null}"#).unwrap();
        assert_eq!(probe.title, Patch::Missing);
        assert_eq!(probe.max_participants, Patch::Null);
    }

    #[test]
    fn value_is_carried() {
        let probe: Probe =
            serde_json::from_str(r#"{"title": "spring cup", "max_participants": 16}"#).unwrap();
        assert_eq!(probe.title, Patch::Value("spring cup".into()));
        assert_eq!(probe.max_participants, Patch::Value(16));
    }
}
