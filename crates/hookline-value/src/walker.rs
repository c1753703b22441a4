use crate::path::TreePath;
use crate::value::{Map, Value};
use std::convert::Infallible;

/// Rebuilds `value`, replacing every leaf with `f(leaf, path)`.
///
/// Objects and arrays are rebuilt with the same keys and lengths; their
/// children are walked with the path extended by the key or index. Every
/// other variant, including `null`, dates and identifiers, is a leaf.
pub fn tree_map<F>(value: Value, mut f: F) -> Value
where
    F: FnMut(Value, &TreePath) -> Value,
{
    match try_tree_map(value, |leaf, path| Ok::<_, Infallible>(f(leaf, path))) {
        Ok(mapped) => mapped,
        Err(never) => match never {},
    }
}

/// Fallible [`tree_map`]: stops at the first leaf error.
pub fn try_tree_map<F, E>(value: Value, mut f: F) -> Result<Value, E>
where
    F: FnMut(Value, &TreePath) -> Result<Value, E>,
{
    map_node(value, TreePath::root(), &mut f)
}

fn map_node<F, E>(value: Value, path: TreePath, f: &mut F) -> Result<Value, E>
where
    F: FnMut(Value, &TreePath) -> Result<Value, E>,
{
    match value {
        Value::Object(map) => {
            let mut out = Map::new();
            for (key, child) in map {
                let mapped = map_node(child, path.push_field(&key), f)?;
                out.insert(key, mapped);
            }
            Ok(Value::Object(out))
        }
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| map_node(item, path.push_index(idx), f))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        leaf => f(leaf, &path),
    }
}
