//! Unused-key guard for the alarm file.
//!
//! The loader only reads `cloudwatch_alarm_list`. Anything else in the file is
//! almost always a typo (`cloudwatch_alarms_list`, wrong indentation, ...), so
//! the loader reports every leaf that sits outside a consumed prefix and the
//! CLI logs them as warnings.

use serde_json::Value;

/// JSON-pointer prefixes the loader actually reads.
pub const CONSUMED_POINTERS: &[&str] = &["/cloudwatch_alarm_list"];

/// Sorted, de-duplicated leaf pointers of `doc` not covered by
/// [`CONSUMED_POINTERS`].
pub fn unused_leaf_pointers(doc: &Value) -> Vec<String> {
    let mut leaves = Vec::new();
    collect_leaf_pointers(doc, "", &mut leaves);

    let mut unused: Vec<String> = leaves
        .into_iter()
        .filter(|leaf| !CONSUMED_POINTERS.iter().any(|p| is_prefix_pointer(p, leaf)))
        .collect();

    unused.sort();
    unused.dedup();
    unused
}

/// `"/a/b"` covers `"/a/b"` and `"/a/b/c"` but not `"/a/bc"`.
fn is_prefix_pointer(prefix: &str, leaf: &str) -> bool {
    if leaf == prefix {
        return true;
    }
    leaf.strip_prefix(prefix)
        .map(|rest| rest.starts_with('/'))
        .unwrap_or(false)
}

fn collect_leaf_pointers(v: &Value, prefix: &str, out: &mut Vec<String>) {
    match v {
        Value::Object(map) if !map.is_empty() => {
            for (k, vv) in map {
                let next = format!("{}/{}", prefix, escape_pointer_token(k));
                collect_leaf_pointers(vv, &next, out);
            }
        }
        Value::Array(arr) if !arr.is_empty() => {
            for (i, vv) in arr.iter().enumerate() {
                let next = format!("{}/{}", prefix, i);
                collect_leaf_pointers(vv, &next, out);
            }
        }
        // Empty containers count as leaves so `extra: {}` is still reported.
        _ => {
            if !prefix.is_empty() {
                out.push(prefix.to_string());
            }
        }
    }
}

fn escape_pointer_token(s: &str) -> String {
    s.replace('~', "~0").replace('/', "~1")
}
