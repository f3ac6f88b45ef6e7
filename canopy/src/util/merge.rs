//! Plan/remote merge
//!
//! After a create or update the dashboard echoes the object back, but many
//! endpoints leave optional fields out of the response (or return them
//! zeroed) even when they were just set. Merging the fetched object over
//! the planned one lets plan-supplied values survive a silent API.
//!
//! The merge works on `serde_json::Value` so one implementation serves
//! every endpoint struct; callers round-trip their typed struct through
//! `serde_json::to_value`/`from_value` around it.

use serde_json::Value;

/// The remote "didn't say anything" values: JSON null, empty string, zero,
/// false, and empty containers. A remote response can therefore never force
/// a field back to its zero value; that asymmetry is inherent to the rule.
pub fn is_unset(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(entries) => entries.is_empty(),
    }
}

/// Field-wise overlay of `remote` onto `plan`. Set remote fields win;
/// unset remote fields keep the planned value; objects merge recursively;
/// arrays are replaced wholesale. On a shape mismatch the set remote value
/// is returned unchanged rather than raising an error.
pub fn merge_remote_into_plan(plan: &Value, remote: &Value) -> Value {
    match (plan, remote) {
        (Value::Object(planned), Value::Object(fetched)) => {
            let mut merged = serde_json::Map::new();
            for (key, plan_value) in planned {
                let value = match fetched.get(key) {
                    Some(remote_value) => merge_remote_into_plan(plan_value, remote_value),
                    None => plan_value.clone(),
                };
                merged.insert(key.clone(), value);
            }
            for (key, remote_value) in fetched {
                if !planned.contains_key(key) {
                    merged.insert(key.clone(), remote_value.clone());
                }
            }
            Value::Object(merged)
        }
        _ => {
            if is_unset(remote) {
                plan.clone()
            } else {
                remote.clone()
            }
        }
    }
}

/// Like [`merge_remote_into_plan`], but the result only carries paths the
/// plan knows about; remote-only fields are dropped. Used where state must
/// not grow attributes the schema never declared.
pub fn merge_known_paths(plan: &Value, remote: &Value) -> Value {
    match (plan, remote) {
        (Value::Object(planned), Value::Object(fetched)) => {
            let mut merged = serde_json::Map::new();
            for (key, plan_value) in planned {
                let value = match fetched.get(key) {
                    Some(remote_value) => merge_known_paths(plan_value, remote_value),
                    None => plan_value.clone(),
                };
                merged.insert(key.clone(), value);
            }
            Value::Object(merged)
        }
        _ => {
            if is_unset(remote) {
                plan.clone()
            } else {
                remote.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plan_values_survive_unset_remote_fields() {
        let plan = json!({"name": "corp-wifi", "psk": "hunter22", "vlan": 100});
        let remote = json!({"name": "corp-wifi", "psk": null, "vlan": 0});

        let merged = merge_remote_into_plan(&plan, &remote);

        assert_eq!(merged["psk"], "hunter22");
        assert_eq!(merged["vlan"], 100);
    }

    #[test]
    fn plan_values_survive_absent_remote_fields() {
        let plan = json!({"name": "corp-wifi", "bandSelection": "5 GHz band only"});
        let remote = json!({"name": "corp-wifi"});

        let merged = merge_remote_into_plan(&plan, &remote);

        assert_eq!(merged["bandSelection"], "5 GHz band only");
    }

    #[test]
    fn set_remote_fields_overwrite_plan() {
        let plan = json!({"name": "old-name", "enabled": false});
        let remote = json!({"name": "renamed-by-api", "enabled": true});

        let merged = merge_remote_into_plan(&plan, &remote);

        assert_eq!(merged["name"], "renamed-by-api");
        assert_eq!(merged["enabled"], true);
    }

    #[test]
    fn remote_only_fields_are_kept() {
        let plan = json!({"name": "net-1"});
        let remote = json!({"name": "net-1", "url": "https://dashboard.canopy.net/n/1"});

        let merged = merge_remote_into_plan(&plan, &remote);

        assert_eq!(merged["url"], "https://dashboard.canopy.net/n/1");
    }

    #[test]
    fn nested_objects_merge_recursively() {
        let plan = json!({"api": {"enabled": true, "key": "planned"}});
        let remote = json!({"api": {"enabled": true, "key": ""}});

        let merged = merge_remote_into_plan(&plan, &remote);

        assert_eq!(merged["api"]["key"], "planned");
    }

    #[test]
    fn arrays_are_replaced_wholesale() {
        let plan = json!({"tags": ["a", "b"]});
        let remote = json!({"tags": ["c"]});

        let merged = merge_remote_into_plan(&plan, &remote);

        assert_eq!(merged["tags"], json!(["c"]));
    }

    #[test]
    fn empty_remote_array_keeps_planned_one() {
        let plan = json!({"tags": ["a", "b"]});
        let remote = json!({"tags": []});

        let merged = merge_remote_into_plan(&plan, &remote);

        assert_eq!(merged["tags"], json!(["a", "b"]));
    }

    #[test]
    fn shape_mismatch_lets_set_remote_win() {
        let plan = json!({"radius": {"host": "10.0.0.1"}});
        let remote = json!({"radius": "disabled"});

        let merged = merge_remote_into_plan(&plan, &remote);

        assert_eq!(merged["radius"], "disabled");
    }

    #[test]
    fn known_paths_drops_remote_only_fields() {
        let plan = json!({"name": "net-1", "notes": null});
        let remote = json!({"name": "net-1", "notes": "set remotely", "url": "https://x"});

        let merged = merge_known_paths(&plan, &remote);

        assert_eq!(merged["notes"], "set remotely");
        assert!(merged.get("url").is_none());
    }

    #[test]
    fn known_paths_keeps_plan_on_unset_remote() {
        let plan = json!({"vlan": 100});
        let remote = json!({"vlan": 0});

        let merged = merge_known_paths(&plan, &remote);

        assert_eq!(merged["vlan"], 100);
    }
}
