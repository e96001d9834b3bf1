use serde::Serialize;
use serde_json::Value;

use crate::core::records::Side;

/// Launcher descriptor published next to a loader jar.
///
/// Kept as the upstream document so it can be republished untouched; the
/// accessors below read the parts launch profiles are built from:
///
/// ```json
/// {
///   "mainClass": { "client": "...", "server": "..." },
///   "libraries": { "common": [...], "client": [...], "server": [...] }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LauncherMeta(Value);

impl LauncherMeta {
    /// Check the document has the shape profiles are built from.
    ///
    /// `libraries.common` must be an array; side lists are optional but must
    /// be arrays when present. `mainClass` is either one string or an object
    /// naming a class for every side.
    pub fn from_value(value: Value) -> Result<Self, String> {
        let libraries = value
            .get("libraries")
            .and_then(Value::as_object)
            .ok_or("missing \"libraries\" object")?;

        if !libraries.get("common").is_some_and(Value::is_array) {
            return Err("missing \"libraries.common\" array".to_string());
        }

        for side in Side::ALL {
            if let Some(list) = libraries.get(side.as_str()) {
                if !list.is_array() {
                    return Err(format!("\"libraries.{}\" is not an array", side.as_str()));
                }
            }
        }

        match value.get("mainClass") {
            Some(Value::String(_)) => {}
            Some(Value::Object(by_side)) => {
                for side in Side::ALL {
                    if !by_side.get(side.as_str()).is_some_and(Value::is_string) {
                        return Err(format!("missing \"mainClass.{}\" string", side.as_str()));
                    }
                }
            }
            Some(_) => return Err("\"mainClass\" is neither a string nor an object".to_string()),
            None => return Err("missing \"mainClass\"".to_string()),
        }

        Ok(Self(value))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    fn library_list(&self, key: &str) -> &[Value] {
        self.0
            .get("libraries")
            .and_then(|libs| libs.get(key))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn common_libraries(&self) -> &[Value] {
        self.library_list("common")
    }

    /// Empty when the descriptor has no list for `side`.
    pub fn side_libraries(&self, side: Side) -> &[Value] {
        self.library_list(side.as_str())
    }

    /// Only per-side `mainClass` objects yield a value; a single string is
    /// not applied to either side. Validation guarantees both sides exist.
    pub fn main_class(&self, side: Side) -> Option<&str> {
        self.0
            .get("mainClass")
            .and_then(Value::as_object)
            .and_then(|by_side| by_side.get(side.as_str()))
            .and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_side_specific_parts() {
        let meta = LauncherMeta::from_value(json!({
            "version": 1,
            "libraries": {
                "common": [{"name": "org.ow2.asm:asm:9.3"}],
                "client": [{"name": "client:lib:1"}]
            },
            "mainClass": {"client": "org.quiltmc.loader.impl.launch.knot.KnotClient", "server": "Server"}
        }))
        .unwrap();

        assert_eq!(meta.common_libraries().len(), 1);
        assert_eq!(meta.side_libraries(Side::Client).len(), 1);
        assert!(meta.side_libraries(Side::Server).is_empty());
        assert_eq!(
            meta.main_class(Side::Client),
            Some("org.quiltmc.loader.impl.launch.knot.KnotClient")
        );
    }

    #[test]
    fn single_main_class_is_not_applied() {
        let meta = LauncherMeta::from_value(json!({
            "libraries": {"common": []},
            "mainClass": "net.fabricmc.loader.launch.knot.KnotClient"
        }))
        .unwrap();

        assert_eq!(meta.main_class(Side::Client), None);
        assert_eq!(meta.main_class(Side::Server), None);
    }

    #[test]
    fn rejects_descriptor_without_common_libraries() {
        assert!(LauncherMeta::from_value(json!({"libraries": {}})).is_err());
        assert!(LauncherMeta::from_value(json!({"mainClass": "x"})).is_err());
        assert!(LauncherMeta::from_value(json!({
            "libraries": {"common": [], "server": {"name": "x"}}
        }))
        .is_err());
    }

    #[test]
    fn rejects_descriptor_without_main_class() {
        let err = LauncherMeta::from_value(json!({"libraries": {"common": []}})).unwrap_err();
        assert!(err.contains("mainClass"));
    }

    #[test]
    fn rejects_main_class_missing_a_side() {
        let err = LauncherMeta::from_value(json!({
            "libraries": {"common": []},
            "mainClass": {"client": "Client"}
        }))
        .unwrap_err();
        assert!(err.contains("mainClass.server"));

        assert!(LauncherMeta::from_value(json!({
            "libraries": {"common": []},
            "mainClass": {"client": "Client", "server": 3}
        }))
        .is_err());
        assert!(LauncherMeta::from_value(json!({
            "libraries": {"common": []},
            "mainClass": ["Client"]
        }))
        .is_err());
    }

    #[test]
    fn serializes_as_upstream_document() {
        let value = json!({"version": 2, "libraries": {"common": []}, "mainClass": "Knot"});
        let meta = LauncherMeta::from_value(value.clone()).unwrap();
        assert_eq!(serde_json::to_value(&meta).unwrap(), value);
    }
}
