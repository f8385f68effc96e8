use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::DispatchError;

/// Search strategy used when a request does not name one.
pub const DEFAULT_SEARCH_TYPE: &str = "direct";

/// One analysis request, as sent by the client.
///
/// Field names follow the wire format (`algorithmName`, `dataFeatures`, ...).
/// Optional keys default; missing required keys fail parsing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Request {
    #[serde(rename = "sessionkey")]
    pub session_key: String,

    /// Free-form hyperparameters for the selected routine.
    pub parameters: Map<String, Value>,

    /// Downsample size. `false` on the wire means no downsampling.
    #[serde(deserialize_with = "downsample_size")]
    pub downsampled: Option<usize>,

    #[serde(rename = "algorithmName")]
    pub algorithm_name: String,

    /// Routine family. Kept as sent; parsed at dispatch.
    #[serde(rename = "algorithmType")]
    pub algorithm_type: String,

    #[serde(rename = "dataFeatures")]
    pub data_features: Vec<String>,

    /// Subset names; only the first is used.
    #[serde(rename = "dataSelections")]
    pub data_selections: Vec<String>,

    #[serde(rename = "excludeDataSelections", default)]
    pub exclude_data_selections: bool,

    /// Feature holding supervised labels.
    #[serde(rename = "labelName", default)]
    pub label_name: Option<String>,

    #[serde(default)]
    pub cross_val: Option<Value>,

    #[serde(default = "default_search_type")]
    pub search_type: String,

    #[serde(default)]
    pub scoring: Option<String>,

    #[serde(rename = "activeLabels", default)]
    pub active_labels: Option<Value>,
}

fn default_search_type() -> String {
    DEFAULT_SEARCH_TYPE.to_string()
}

/// Accepts `false`/`null` (no downsampling), a non-negative integer, or an
/// integer string.
fn downsample_size<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Flag(bool),
        Count(u64),
        Text(String),
        Null(()),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Flag(false) | Raw::Null(()) => Ok(None),
        Raw::Flag(true) => Err(de::Error::custom("downsampled must be false or a sample count")),
        Raw::Count(n) => usize::try_from(n).map(Some).map_err(de::Error::custom),
        Raw::Text(s) => s
            .trim()
            .parse::<usize>()
            .map(Some)
            .map_err(|e| de::Error::custom(format!("downsampled {s:?}: {e}"))),
    }
}

impl Request {
    /// Builds a request with every optional field at its default.
    pub fn new(
        algorithm_type: impl Into<String>,
        algorithm_name: impl Into<String>,
        features: Vec<String>,
    ) -> Self {
        Self {
            session_key: String::new(),
            parameters: Map::new(),
            downsampled: None,
            algorithm_name: algorithm_name.into(),
            algorithm_type: algorithm_type.into(),
            data_features: features,
            data_selections: Vec::new(),
            exclude_data_selections: false,
            label_name: None,
            cross_val: None,
            search_type: default_search_type(),
            scoring: None,
            active_labels: None,
        }
    }

    /// Parses the wire mapping.
    pub fn from_value(msg: &Value) -> Result<Self, DispatchError> {
        Request::deserialize(msg).map_err(|e| DispatchError::MalformedRequest(e.to_string()))
    }

    /// The subset selection in effect, if any.
    pub fn subset_name(&self) -> Option<&str> {
        self.data_selections.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base() -> Value {
        json!({
            "sessionkey": "s1",
            "parameters": {"k": 3},
            "downsampled": false,
            "algorithmName": "kmeans",
            "algorithmType": "clustering",
            "dataFeatures": ["x", "y"],
            "dataSelections": [],
        })
    }

    #[test]
    fn optional_keys_default() {
        let r = Request::from_value(&base()).unwrap();
        assert_eq!(r.session_key, "s1");
        assert_eq!(r.parameters["k"], json!(3));
        assert_eq!(r.downsampled, None);
        assert_eq!(r.search_type, "direct");
        assert!(!r.exclude_data_selections);
        assert!(r.label_name.is_none());
        assert!(r.cross_val.is_none());
        assert!(r.scoring.is_none());
        assert!(r.active_labels.is_none());
        assert_eq!(r.subset_name(), None);
    }

    #[test]
    fn optional_keys_parsed() {
        let mut msg = base();
        let obj = msg.as_object_mut().unwrap();
        obj.insert("dataSelections".into(), json!(["sel_a", "sel_b"]));
        obj.insert("excludeDataSelections".into(), json!(true));
        obj.insert("labelName".into(), json!("truth"));
        obj.insert("cross_val".into(), json!(5));
        obj.insert("search_type".into(), json!("grid"));
        obj.insert("scoring".into(), json!("accuracy"));
        obj.insert("activeLabels".into(), json!(["a"]));

        let r = Request::from_value(&msg).unwrap();
        assert_eq!(r.subset_name(), Some("sel_a"));
        assert!(r.exclude_data_selections);
        assert_eq!(r.label_name.as_deref(), Some("truth"));
        assert_eq!(r.cross_val, Some(json!(5)));
        assert_eq!(r.search_type, "grid");
        assert_eq!(r.scoring.as_deref(), Some("accuracy"));
        assert_eq!(r.active_labels, Some(json!(["a"])));
    }

    #[test]
    fn downsample_forms() {
        for (raw, want) in [
            (json!(false), None),
            (json!(null), None),
            (json!(250), Some(250)),
            (json!("40"), Some(40)),
        ] {
            let mut msg = base();
            msg["downsampled"] = raw.clone();
            let r = Request::from_value(&msg).unwrap();
            assert_eq!(r.downsampled, want, "raw {raw}");
        }

        for bad in [json!(true), json!("lots"), json!(-3)] {
            let mut msg = base();
            msg["downsampled"] = bad.clone();
            assert!(Request::from_value(&msg).is_err(), "raw {bad}");
        }
    }

    #[test]
    fn missing_required_key_is_malformed() {
        let mut msg = base();
        msg.as_object_mut().unwrap().remove("algorithmType");
        let err = Request::from_value(&msg).unwrap_err();
        assert!(matches!(err, DispatchError::MalformedRequest(ref m) if m.contains("algorithmType")));

        let mut msg = base();
        msg.as_object_mut().unwrap().remove("downsampled");
        assert!(Request::from_value(&msg).is_err());
    }

    #[test]
    fn new_matches_wire_defaults() {
        let built = Request::new("clustering", "kmeans", vec!["x".into(), "y".into()]);
        let mut parsed = Request::from_value(&base()).unwrap();
        parsed.session_key.clear();
        parsed.parameters.clear();
        assert_eq!(built, parsed);
    }
}
