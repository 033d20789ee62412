// ── Page merge policy ──
//
// Governs how a freshly parsed page combines with previously held
// data. `Vec` gets true append/prepend; `serde_json::Value` keeps the
// dynamic rule: element-level merge only when both sides are arrays,
// otherwise the new value replaces the old wholesale.

use serde::{Deserialize, Serialize};

/// Merge policy applied to each successful paginated response.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MergeMode {
    /// New items land after existing ones.
    Append,
    /// New items land before existing ones.
    Prepend,
    /// New page replaces held data.
    #[default]
    Replace,
}

/// How a collection type combines a new page with held data.
pub trait Merge: Sized {
    fn merge(self, incoming: Self, mode: MergeMode) -> Self;
}

impl<T> Merge for Vec<T> {
    fn merge(mut self, mut incoming: Self, mode: MergeMode) -> Self {
        match mode {
            MergeMode::Append => {
                self.append(&mut incoming);
                self
            }
            MergeMode::Prepend => {
                incoming.append(&mut self);
                incoming
            }
            MergeMode::Replace => incoming,
        }
    }
}

impl Merge for serde_json::Value {
    fn merge(self, incoming: Self, mode: MergeMode) -> Self {
        use serde_json::Value;
        match (self, incoming) {
            (Value::Array(held), Value::Array(parsed)) => {
                Value::Array(held.merge(parsed, mode))
            }
            // Not both arrays: fall back to replace regardless of mode.
            (_, incoming) => incoming,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn vec_append_puts_new_items_after() {
        let held = vec!["a", "b"];
        assert_eq!(
            held.merge(vec!["c", "d"], MergeMode::Append),
            vec!["a", "b", "c", "d"]
        );
    }

    #[test]
    fn vec_prepend_puts_new_items_before() {
        let held = vec!["a", "b"];
        assert_eq!(
            held.merge(vec!["c", "d"], MergeMode::Prepend),
            vec!["c", "d", "a", "b"]
        );
    }

    #[test]
    fn vec_replace_drops_held_items() {
        let held = vec!["a", "b"];
        assert_eq!(held.merge(vec!["c"], MergeMode::Replace), vec!["c"]);
    }

    #[test]
    fn value_arrays_merge_elementwise() {
        let held = json!([1, 2]);
        assert_eq!(held.merge(json!([3, 4]), MergeMode::Append), json!([1, 2, 3, 4]));
    }

    #[test]
    fn value_non_array_falls_back_to_replace() {
        let held = json!({"total": 2});
        assert_eq!(
            held.merge(json!({"total": 4}), MergeMode::Append),
            json!({"total": 4})
        );

        let held: Value = json!([1, 2]);
        assert_eq!(
            held.merge(json!("scalar"), MergeMode::Prepend),
            json!("scalar")
        );
    }

    #[test]
    fn mode_parses_from_config_strings() {
        assert_eq!(MergeMode::from_str("append").unwrap(), MergeMode::Append);
        assert_eq!(MergeMode::from_str("prepend").unwrap(), MergeMode::Prepend);
        assert_eq!(MergeMode::from_str("replace").unwrap(), MergeMode::Replace);
        assert!(MergeMode::from_str("upsert").is_err());
        assert_eq!(MergeMode::Append.to_string(), "append");
    }
}
