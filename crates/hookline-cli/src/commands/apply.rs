//! Apply command implementation.

use super::read_input;
use crate::output::format_context;
use hookline_core::{
    coerce_default, coerce_query_default, split_list, timestamp, unique_array, userstamp, Context,
    Hook, ValidationError,
};
use thiserror::Error;

/// Errors parsing a `--hook` argument.
#[derive(Debug, Error)]
pub enum HookArgError {
    /// Hook name is not recognised.
    #[error("unknown hook '{0}'")]
    Unknown(String),
    /// Hook needs a path argument.
    #[error("hook '{0}' requires a path (e.g. {0}:params.query.ids)")]
    MissingPath(String),
    /// Path argument is malformed.
    #[error("invalid path: {0}")]
    Path(#[from] ValidationError),
}

/// Parses `name[:path[:separator]]` into a hook.
pub fn parse_hook(hook_arg: &str) -> Result<Box<dyn Hook>, HookArgError> {
    let mut parts = hook_arg.splitn(3, ':');
    let name = parts.next().unwrap_or_default();
    let path = parts.next();
    let separator = parts.next();

    let hook: Box<dyn Hook> = match name {
        "coerce" => Box::new(coerce_default()),
        "coerce-query" => Box::new(coerce_query_default()),
        "timestamp" => Box::new(timestamp()),
        "userstamp" => Box::new(userstamp()),
        "split-list" => {
            let path = path.ok_or_else(|| HookArgError::MissingPath(name.to_string()))?;
            let hook = split_list(path)?;
            match separator {
                Some(sep) => Box::new(hook.separator(sep)),
                None => Box::new(hook),
            }
        }
        "unique-array" => {
            let path = path.ok_or_else(|| HookArgError::MissingPath(name.to_string()))?;
            Box::new(unique_array(path)?)
        }
        other => return Err(HookArgError::Unknown(other.to_string())),
    };
    Ok(hook)
}

pub fn run(input: Option<String>, hook_args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let hooks = hook_args
        .iter()
        .map(|hook_arg| parse_hook(hook_arg))
        .collect::<Result<Vec<_>, _>>()?;

    let json_str = read_input(input)?;
    let context: Context = serde_json::from_str(&json_str)
        .map_err(|e| format!("Invalid context document: {}", e))?;

    let context = hooks
        .iter()
        .zip(&hook_args)
        .try_fold(context, |context, (hook, hook_arg)| {
            tracing::debug!(hook = %hook_arg, "running hook");
            hook.call(context)
        })
        .map_err(|e| format!("Hook failed: {}", e))?;

    println!("{}", format_context(&context));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_hook_arguments() {
        for hook_arg in [
            "coerce",
            "coerce-query",
            "timestamp",
            "userstamp",
            "split-list:params.query.ids",
            "split-list:params.query.ids:|",
            "unique-array:data.tags",
        ] {
            assert!(parse_hook(hook_arg).is_ok(), "{hook_arg}");
        }
    }

    #[test]
    fn rejects_unknown_and_incomplete_arguments() {
        assert!(matches!(parse_hook("shout"), Err(HookArgError::Unknown(_))));
        assert!(matches!(
            parse_hook("split-list"),
            Err(HookArgError::MissingPath(_))
        ));
        assert!(matches!(
            parse_hook("unique-array:data..tags"),
            Err(HookArgError::Path(_))
        ));
    }
}
