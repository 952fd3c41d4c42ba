//! Default-merge normalization of loaded section records.
//!
//! Records arrive from storage in several historical shapes: keys may be missing, carry the
//! wrong JSON type, or use retired column names. [`normalize`] reconciles such a record against
//! a section's canonical defaults object and never fails. The result always has exactly the
//! key set of the defaults.
//!
//! [`normalize_section`] is the typed entry point used by the loader: it applies the legacy
//! column aliases, normalizes, and then materializes the typed section (which assigns identity
//! tokens to every list record).

use crate::schema::{defaults, Section};
use serde_json::{Map, Value};

/// Merges `incoming` against `defaults`.
///
/// Per key of `defaults`:
/// - boolean default: `true` only if the incoming value is exactly JSON `true`;
/// - list default: the incoming value verbatim if it is an array, otherwise the default list;
/// - scalar default: the incoming value rendered as text, or `""` when absent or null.
///
/// Keys of `incoming` that `defaults` does not know are dropped. A non-object `incoming`
/// yields `defaults` unchanged.
pub fn normalize(incoming: &Value, defaults: &Map<String, Value>) -> Map<String, Value> {
    let Some(incoming) = incoming.as_object() else {
        if !incoming.is_null() {
            tracing::debug!("incoming section is not an object; using defaults");
        }
        return defaults.clone();
    };

    for key in incoming.keys().filter(|k| !defaults.contains_key(*k)) {
        tracing::debug!(key = %key, "dropping field unknown to the section defaults");
    }

    defaults
        .iter()
        .map(|(key, default)| {
            let value = incoming.get(key);
            let merged = match default {
                Value::Bool(_) => Value::Bool(matches!(value, Some(Value::Bool(true)))),
                Value::Array(_) => match value {
                    Some(Value::Array(list)) => Value::Array(list.clone()),
                    _ => default.clone(),
                },
                _ => Value::String(value.map(scalar_text).unwrap_or_default()),
            };
            (key.clone(), merged)
        })
        .collect()
}

/// Copies values stored under retired column names onto their canonical keys.
///
/// A canonical key that is already present wins over its alias.
pub fn with_legacy_aliases(incoming: &Value, aliases: &[(&str, &str)]) -> Value {
    let Some(object) = incoming.as_object() else {
        return incoming.clone();
    };

    let mut object = object.clone();
    for (canonical, legacy) in aliases {
        if object.contains_key(*canonical) {
            continue;
        }
        if let Some(value) = object.get(*legacy).cloned() {
            tracing::debug!(from = %legacy, to = %canonical, "mapping legacy column");
            object.insert((*canonical).to_owned(), value);
        }
    }
    Value::Object(object)
}

/// Normalizes `incoming` into the typed section `S`.
///
/// Materializing the typed section assigns identity tokens to list records that arrive
/// without a valid one, and seeds lists whose gating flag is stored as set.
pub fn normalize_section<S: Section>(incoming: &Value) -> S {
    let aliased = with_legacy_aliases(incoming, S::KIND.aliases());
    let normalized = normalize(&aliased, defaults(S::KIND));

    match serde_json::from_value::<S>(Value::Object(normalized)) {
        Ok(mut section) => {
            section.seed_flagged_lists();
            section
        }
        Err(e) => {
            tracing::warn!(section = S::KIND.key(), error = %e, "normalized section did not deserialize; using defaults");
            S::default()
        }
    }
}

/// Renders a JSON scalar as the text the typed model stores.
///
/// Strings are kept verbatim and numbers use their decimal text. Arrays of scalars (the
/// historical multi-select shape) are joined with `", "`. Everything else renders as `""`.
pub(crate) fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .filter(|item| matches!(item, Value::String(_) | Value::Number(_)))
            .map(scalar_text)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Null | Value::Bool(_) | Value::Object(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NonPathologicalBackground, PathologicalBackground};
    use crate::schema::SectionKind;
    use serde_json::json;

    fn sample_defaults() -> Map<String, Value> {
        let Value::Object(map) = json!({
            "name": "",
            "active": false,
            "items": [{ "kind": "" }],
        }) else {
            unreachable!("literal is an object");
        };
        map
    }

    #[test]
    fn booleans_require_exact_true() {
        let defaults = sample_defaults();
        for truthy in [json!("true"), json!(1), json!("yes"), json!([true])] {
            let merged = normalize(&json!({ "active": truthy }), &defaults);
            assert_eq!(merged["active"], json!(false));
        }
        let merged = normalize(&json!({ "active": true }), &defaults);
        assert_eq!(merged["active"], json!(true));
    }

    #[test]
    fn lists_are_kept_only_when_arrays() {
        let defaults = sample_defaults();

        let merged = normalize(&json!({ "items": "[{\"kind\":\"x\"}]" }), &defaults);
        assert_eq!(merged["items"], json!([{ "kind": "" }]));

        let merged = normalize(&json!({ "items": [1, "junk"] }), &defaults);
        assert_eq!(merged["items"], json!([1, "junk"]));
    }

    #[test]
    fn scalars_are_rendered_as_text() {
        let defaults = sample_defaults();
        assert_eq!(normalize(&json!({ "name": null }), &defaults)["name"], json!(""));
        assert_eq!(normalize(&json!({ "name": 42 }), &defaults)["name"], json!("42"));
        assert_eq!(
            normalize(&json!({ "name": ["Español", "Náhuatl"] }), &defaults)["name"],
            json!("Español, Náhuatl")
        );
        assert_eq!(normalize(&json!({ "name": true }), &defaults)["name"], json!(""));
    }

    #[test]
    fn unknown_keys_are_dropped_and_key_set_is_kept() {
        let defaults = sample_defaults();
        let merged = normalize(&json!({ "surprise": 1, "name": "Ana" }), &defaults);

        let keys: Vec<_> = merged.keys().cloned().collect();
        let expected: Vec<_> = defaults.keys().cloned().collect();
        assert_eq!(keys, expected);
        assert_eq!(merged["name"], json!("Ana"));
    }

    #[test]
    fn non_object_input_yields_defaults() {
        let defaults = sample_defaults();
        for input in [Value::Null, json!("x"), json!(3), json!([1, 2])] {
            assert_eq!(normalize(&input, &defaults), defaults);
        }
    }

    #[test]
    fn every_section_keeps_exact_key_set_and_types() {
        let noisy = json!({
            "sex": 1,
            "tattoos": "true",
            "economic_activities": { "not": "a list" },
            "hereditary_selections": "none",
            "unexpected_column": "x",
        });

        for kind in SectionKind::ALL {
            let section_defaults = defaults(kind);
            let merged = normalize(&noisy, section_defaults);

            assert_eq!(merged.len(), section_defaults.len(), "{}", kind.key());
            for (key, default) in section_defaults {
                let value = &merged[key];
                let same_type = matches!(
                    (default, value),
                    (Value::Bool(_), Value::Bool(_))
                        | (Value::Array(_), Value::Array(_))
                        | (Value::String(_), Value::String(_))
                );
                assert!(same_type, "{}.{} changed type", kind.key(), key);
            }
        }
    }

    #[test]
    fn normalizing_defaults_is_identity() {
        for kind in SectionKind::ALL {
            let section_defaults = defaults(kind);
            let merged = normalize(&Value::Object(section_defaults.clone()), section_defaults);
            assert_eq!(&merged, section_defaults, "{}", kind.key());
        }
    }

    #[test]
    fn legacy_aliases_fill_missing_canonical_keys() {
        let aliased = with_legacy_aliases(
            &json!({ "tattoos_bool": true, "piercings": false, "piercings_bool": true }),
            &[("tattoos", "tattoos_bool"), ("piercings", "piercings_bool")],
        );
        assert_eq!(aliased["tattoos"], json!(true));
        assert_eq!(aliased["piercings"], json!(false));
    }

    #[test]
    fn stored_flags_seed_their_empty_lists() {
        let pathological: PathologicalBackground = normalize_section(&json!({
            "takes_medications": true,
            "has_transfusions": true,
            "transfusions": [{ "date": "2019", "reason": "Cirugía" }],
        }));
        assert_eq!(pathological.medications.len(), 1);
        assert_eq!(pathological.transfusions.len(), 1);
        assert!(pathological.personal_diseases.is_empty());

        let non_pathological: NonPathologicalBackground =
            normalize_section(&json!({ "does_exercise": true }));
        assert_eq!(non_pathological.exercise_activities.len(), 1);

        let idle: NonPathologicalBackground = normalize_section(&json!({ "does_exercise": false }));
        assert!(idle.exercise_activities.is_empty());
    }
}
