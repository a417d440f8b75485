use std::ffi::OsString;

use tracing::debug;

use crate::{
    env::Environment,
    error::{RenvError, RenvResult},
    map::{Separators, TaskMap},
    source::{RankScope, RankSource, resolve_rank},
};

/// What to set and how to derive it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Variable to set.
    pub var: String,
    pub source: RankSource,
    pub scope: RankScope,
    /// Allow replacing a value inherited from the parent.
    pub force: bool,
    /// Raw `--map` string; `None` passes the rank through unchanged.
    pub map: Option<String>,
    pub separators: Separators,
}

impl Request {
    pub fn new(var: impl Into<String>) -> Self {
        Self {
            var: var.into(),
            source: RankSource::default(),
            scope: RankScope::default(),
            force: false,
            map: None,
            separators: Separators::default(),
        }
    }
}

/// Outcome of [`apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub name: String,
    /// `None` when the rank has no entry in the map; the variable is then
    /// left as inherited.
    pub value: Option<OsString>,
}

/// Resolve the rank, compute the value and write it into `env`.
///
/// Checks run in a fixed order: rank lookup, map parsing, then the
/// already-defined guard. `env` is returned untouched by any failure.
pub fn apply(req: &Request, mut env: Environment) -> RenvResult<(Environment, Assignment)> {
    let rank = resolve_rank(&env, req.source, req.scope)?;

    let map = req
        .map
        .as_deref()
        .map(|raw| TaskMap::parse(raw, &req.separators))
        .transpose()?;

    if env.contains(&req.var) && !req.force {
        return Err(RenvError::AlreadyDefined {
            name: req.var.clone(),
        });
    }

    let value = match &map {
        Some(map) => rank
            .as_str()
            .and_then(|idx| map.get(idx))
            .map(OsString::from),
        None => Some(rank.value.clone()),
    };

    match &value {
        Some(v) => {
            debug!(target: "renv.core", var = %req.var, value = ?v, rank = ?rank.value, "assign");
            env.set(req.var.as_str(), v.clone());
        }
        None => {
            debug!(target: "renv.core", var = %req.var, rank = ?rank.value, "rank not in map; leaving variable as is");
        }
    }

    Ok((
        env,
        Assignment {
            name: req.var.clone(),
            value,
        },
    ))
}
