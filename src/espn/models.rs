//! Payload shapes returned by the ESPN core API injury endpoints.

use serde::Deserialize;
use serde_json::Value;

use crate::espn::reference::{Reference, id_from_raw};

/// Team-level injury endpoint: a page of pointers to injury detail objects.
///
/// `GET .../teams/{id}/injuries` → `{"count": 3, "items": [{"$ref": "..."}]}`
///
/// Items stay raw so one malformed pointer costs only itself.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamInjuryList {
    #[serde(default)]
    items: Value,
}

impl TeamInjuryList {
    /// Listed items, well-formed or not. Anything but an array reads as empty.
    pub fn items(&self) -> &[Value] {
        self.items.as_array().map(Vec::as_slice).unwrap_or_default()
    }

    /// Items that carry a usable absolute `$ref`; the rest are skipped.
    pub fn references(&self) -> Vec<Reference> {
        self.items()
            .iter()
            .filter_map(|item| Reference::deserialize(item).ok())
            .collect()
    }
}

/// A single injury detail object, kept as raw JSON.
///
/// Fields are read through accessors that return `None` on any shape
/// surprise (missing key, wrong type), so one odd field never costs the
/// whole record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct InjuryDetail(Value);

impl InjuryDetail {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn raw(&self) -> &Value {
        &self.0
    }

    fn str_at(&self, pointer: &str) -> Option<&str> {
        self.0.pointer(pointer).and_then(Value::as_str)
    }

    /// Injury sub-object. ESPN calls it `details`; some payloads use `injury`.
    fn details(&self) -> Option<&Value> {
        ["details", "injury"]
            .into_iter()
            .find_map(|key| self.0.get(key).filter(|v| v.is_object()))
    }

    fn detail_str(&self, key: &str) -> Option<&str> {
        self.details()?.get(key)?.as_str()
    }

    /// Raw `athlete.$ref` URL.
    pub fn athlete_ref(&self) -> Option<&str> {
        self.str_at("/athlete/$ref")
    }

    /// Athlete identifier carried by `athlete.$ref`.
    pub fn athlete_id(&self) -> Option<&str> {
        self.athlete_ref().map(id_from_raw).filter(|id| !id.is_empty())
    }

    pub fn position(&self) -> Option<&str> {
        self.str_at("/athlete/position/abbreviation")
    }

    /// Source injury id; ESPN sends it as a string but numbers are tolerated.
    pub fn id(&self) -> Option<String> {
        match self.0.get("id")? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<&str> {
        self.str_at("/status")
    }

    pub fn injury_type(&self) -> Option<&str> {
        self.detail_str("type")
    }

    pub fn location(&self) -> Option<&str> {
        self.detail_str("location")
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail_str("detail")
    }

    pub fn side(&self) -> Option<&str> {
        self.detail_str("side")
    }

    pub fn return_date(&self) -> Option<&str> {
        self.detail_str("returnDate")
    }

    pub fn fantasy_status(&self) -> Option<&str> {
        self.details()?
            .pointer("/fantasyStatus/description")?
            .as_str()
    }

    pub fn short_comment(&self) -> Option<&str> {
        self.str_at("/shortComment")
    }

    pub fn long_comment(&self) -> Option<&str> {
        self.str_at("/longComment")
    }

    pub fn date(&self) -> Option<&str> {
        self.str_at("/date")
    }
}
