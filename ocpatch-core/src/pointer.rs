use std::fmt;

use serde_json::Value;

use crate::error::ConfigError;

/// A slash-delimited path into a JSON document, e.g. `/data/foo`.
///
/// Unlike RFC 6901 pointers, segments are used verbatim (no `~0`/`~1`
/// unescaping) and trailing slashes are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pointer {
    raw: String,
}

/// Result of looking up a [`Pointer`] in a document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution<'a> {
    Found(&'a Value),
    Absent,
}

impl Resolution<'_> {
    /// The found value, for reporting. `None` when absent.
    pub fn reported(&self) -> Option<Value> {
        match self {
            Resolution::Found(v) => Some((*v).clone()),
            Resolution::Absent => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Resolution::Absent)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// The document itself is not an object, e.g. an HTML error page or an
    /// empty body. Says nothing about the path.
    #[error("response body is a JSON {found}, not an object")]
    NotADocument { found: &'static str },
    #[error("failed to translate path {path:?}: segment {segment:?} indexes into a JSON {found}, which is not an object; check the path")]
    NotAContainer {
        path: String,
        segment: String,
        found: &'static str,
    },
}

impl Pointer {
    /// Parse a path that must start with `/`.
    pub fn parse(raw: &str) -> Result<Pointer, ConfigError> {
        if !raw.starts_with('/') {
            return Err(ConfigError::RelativePath(raw.to_string()));
        }
        Ok(Pointer {
            raw: raw.to_string(),
        })
    }

    /// Accept any path. Only used where the path is informational (`get`).
    pub fn lenient(raw: &str) -> Pointer {
        Pointer {
            raw: raw.to_string(),
        }
    }

    /// The path as given by the user.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The path as sent in the `path`/`from` field of a patch.
    pub fn wire_path(&self) -> &str {
        self.raw.trim_end_matches('/')
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        // The part before the leading slash is dropped, whatever it is.
        self.wire_path().split('/').skip(1)
    }

    pub fn resolve<'v>(&self, root: &'v Value) -> Result<Resolution<'v>, PathError> {
        let mut current = root;
        for (depth, segment) in self.segments().enumerate() {
            match current {
                Value::Object(map) => match map.get(segment) {
                    Some(next) => current = next,
                    None => return Ok(Resolution::Absent),
                },
                other if depth == 0 => {
                    return Err(PathError::NotADocument {
                        found: json_type_name(other),
                    })
                }
                other => {
                    return Err(PathError::NotAContainer {
                        path: self.raw.clone(),
                        segment: segment.to_string(),
                        found: json_type_name(other),
                    })
                }
            }
        }
        Ok(Resolution::Found(current))
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc() -> Value {
        json!({
            "kind": "ConfigMap",
            "metadata": { "name": "cm1", "labels": { "app": "web" } },
            "data": { "k": "old", "0": "zero", "nested": { "deep": [1, 2] } },
            "items": ["a", "b"],
        })
    }

    #[test]
    fn test_parse_requires_leading_slash() {
        assert!(Pointer::parse("/data/k").is_ok());
        assert!(Pointer::parse("/").is_ok());
        match Pointer::parse("data/k") {
            Err(ConfigError::RelativePath(p)) => assert_eq!(p, "data/k"),
            other => panic!("unexpected: {:?}", other),
        }
        assert!(Pointer::parse("").is_err());
    }

    #[test]
    fn test_segments() {
        let p = Pointer::parse("/data/foo").unwrap();
        assert_eq!(p.segments().collect::<Vec<_>>(), vec!["data", "foo"]);
        let p = Pointer::parse("/data/foo//").unwrap();
        assert_eq!(p.segments().collect::<Vec<_>>(), vec!["data", "foo"]);
        let p = Pointer::parse("/data//foo").unwrap();
        assert_eq!(p.segments().collect::<Vec<_>>(), vec!["data", "", "foo"]);
        let p = Pointer::parse("/").unwrap();
        assert_eq!(p.segments().count(), 0);
    }

    #[test]
    fn test_wire_path_strips_trailing_slash() {
        assert_eq!(Pointer::parse("/data/k/").unwrap().wire_path(), "/data/k");
        assert_eq!(Pointer::parse("/data/k").unwrap().wire_path(), "/data/k");
        assert_eq!(Pointer::parse("/data/k/").unwrap().as_str(), "/data/k/");
    }

    #[test]
    fn test_resolve_found() {
        let d = doc();
        let r = Pointer::parse("/data/k").unwrap().resolve(&d).unwrap();
        assert_eq!(r, Resolution::Found(&json!("old")));
        let r = Pointer::parse("/metadata/labels/").unwrap().resolve(&d).unwrap();
        assert_eq!(r, Resolution::Found(&json!({ "app": "web" })));
        let r = Pointer::parse("/data/nested/deep").unwrap().resolve(&d).unwrap();
        assert_eq!(r, Resolution::Found(&json!([1, 2])));
    }

    #[test]
    fn test_resolve_root() {
        let d = doc();
        assert_eq!(Pointer::parse("/").unwrap().resolve(&d).unwrap(), Resolution::Found(&d));
    }

    #[test]
    fn test_numeric_segment_is_a_key() {
        let d = doc();
        let r = Pointer::parse("/data/0").unwrap().resolve(&d).unwrap();
        assert_eq!(r, Resolution::Found(&json!("zero")));
    }

    #[test]
    fn test_resolve_absent() {
        let d = doc();
        for p in ["/data/missing", "/nope", "/nope/deeper/still", "/metadata/labels/tier"] {
            let r = Pointer::parse(p).unwrap().resolve(&d).unwrap();
            assert!(r.is_absent(), "{} should be absent", p);
            assert_eq!(r.reported(), None);
        }
    }

    #[test]
    fn test_resolve_through_scalar_is_an_error() {
        let d = doc();
        let e = Pointer::parse("/data/k/x").unwrap().resolve(&d).unwrap_err();
        assert_eq!(
            e,
            PathError::NotAContainer {
                path: "/data/k/x".to_string(),
                segment: "x".to_string(),
                found: "string",
            }
        );
    }

    #[test]
    fn test_resolve_into_array_is_an_error() {
        let d = doc();
        let e = Pointer::parse("/items/0").unwrap().resolve(&d).unwrap_err();
        match e {
            PathError::NotAContainer { found, segment, .. } => {
                assert_eq!(found, "array");
                assert_eq!(segment, "0");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_resolve_in_non_object_body() {
        let p = Pointer::parse("/data/k").unwrap();
        assert_eq!(
            p.resolve(&Value::Null).unwrap_err(),
            PathError::NotADocument { found: "null" }
        );
        assert_eq!(
            p.resolve(&json!("<html>unavailable</html>")).unwrap_err(),
            PathError::NotADocument { found: "string" }
        );
        // The root itself is always there.
        let root = Pointer::parse("/").unwrap();
        assert_eq!(root.resolve(&Value::Null).unwrap(), Resolution::Found(&Value::Null));
    }

    #[test]
    fn test_lenient_pointer_drops_first_segment() {
        let d = doc();
        let p = Pointer::lenient("");
        assert_eq!(p.resolve(&d).unwrap(), Resolution::Found(&d));
    }
}
