//! Launcher conventions for exporting process ranks.
//!
//! | Source | Global key | Local key |
//! |--------|------------|-----------|
//! | `slurm` | `SLURM_PROCID` | `SLURM_LOCALID` |
//!
//! `mpi` and `pmi` are accepted names without a key table yet.

use std::{ffi::OsString, fmt, str::FromStr};

use tracing::debug;

use crate::{
    env::Environment,
    error::{RenvError, RenvResult},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RankSource {
    #[default]
    Slurm,
    Mpi,
    Pmi,
}

/// Whether the rank counts across the whole job or within one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RankScope {
    #[default]
    Local,
    Global,
}

impl RankScope {
    pub fn from_global_flag(global: bool) -> Self {
        if global {
            RankScope::Global
        } else {
            RankScope::Local
        }
    }
}

/// Environment variable names a [`RankSource`] publishes ranks under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankKeys {
    pub global: &'static str,
    pub local: &'static str,
}

impl RankKeys {
    pub fn for_scope(&self, scope: RankScope) -> &'static str {
        match scope {
            RankScope::Global => self.global,
            RankScope::Local => self.local,
        }
    }
}

const SLURM_KEYS: RankKeys = RankKeys {
    global: "SLURM_PROCID",
    local: "SLURM_LOCALID",
};

impl RankSource {
    pub fn as_str(self) -> &'static str {
        match self {
            RankSource::Slurm => "slurm",
            RankSource::Mpi => "mpi",
            RankSource::Pmi => "pmi",
        }
    }

    pub fn keys(self) -> RenvResult<RankKeys> {
        match self {
            RankSource::Slurm => Ok(SLURM_KEYS),
            RankSource::Mpi | RankSource::Pmi => {
                Err(RenvError::UnsupportedSource(self.as_str().to_string()))
            }
        }
    }
}

impl fmt::Display for RankSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RankSource {
    type Err = RenvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "slurm" => Ok(RankSource::Slurm),
            "mpi" => Ok(RankSource::Mpi),
            "pmi" => Ok(RankSource::Pmi),
            _ => Err(RenvError::InvalidSource(s.to_string())),
        }
    }
}

#[cfg(feature = "clap")]
impl clap::ValueEnum for RankSource {
    fn value_variants<'a>() -> &'a [Self] {
        const ALL: [RankSource; 3] = [RankSource::Slurm, RankSource::Mpi, RankSource::Pmi];
        &ALL
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.as_str()))
    }
}

/// A rank read from the environment, together with the key it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankIndex {
    pub key: &'static str,
    pub value: OsString,
}

impl RankIndex {
    /// The rank as text, used for map lookups. `None` if not valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        self.value.to_str()
    }
}

/// Read the rank `source` publishes for `scope` from `env`.
pub fn resolve_rank(env: &Environment, source: RankSource, scope: RankScope) -> RenvResult<RankIndex> {
    let key = source.keys()?.for_scope(scope);
    debug!(target: "renv.core", %source, ?scope, key, "resolving rank");

    let value = env
        .get(key)
        .ok_or_else(|| RenvError::MissingRankEnvironment {
            key: key.to_string(),
        })?;
    Ok(RankIndex {
        key,
        value: value.to_os_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slurm_env() -> Environment {
        Environment::from_iter([("SLURM_PROCID", "7"), ("SLURM_LOCALID", "3")])
    }

    #[test]
    fn local_scope_reads_localid() {
        let rank = resolve_rank(&slurm_env(), RankSource::Slurm, RankScope::Local).unwrap();
        assert_eq!(rank.key, "SLURM_LOCALID");
        assert_eq!(rank.as_str(), Some("3"));
    }

    #[test]
    fn global_scope_reads_procid() {
        let rank = resolve_rank(&slurm_env(), RankSource::Slurm, RankScope::Global).unwrap();
        assert_eq!(rank.key, "SLURM_PROCID");
        assert_eq!(rank.as_str(), Some("7"));
    }

    #[test]
    fn missing_key_names_the_variable() {
        let env = Environment::from_iter([("SLURM_PROCID", "7")]);
        let err = resolve_rank(&env, RankSource::Slurm, RankScope::Local).unwrap_err();
        assert_eq!(
            err,
            RenvError::MissingRankEnvironment {
                key: "SLURM_LOCALID".into()
            }
        );
        assert_eq!(err.to_string(), "No MPI environment, SLURM_LOCALID not found");
        assert!(err.is_guard());
    }

    #[test]
    fn placeholder_sources_are_unsupported() {
        for source in [RankSource::Mpi, RankSource::Pmi] {
            let err = resolve_rank(&slurm_env(), source, RankScope::Local).unwrap_err();
            assert_eq!(err, RenvError::UnsupportedSource(source.to_string()));
            assert!(!err.is_guard());
        }
    }

    #[test]
    fn parses_source_names() {
        for source in [RankSource::Slurm, RankSource::Mpi, RankSource::Pmi] {
            assert_eq!(source.as_str().parse::<RankSource>(), Ok(source));
        }
        assert_eq!(
            "lsf".parse::<RankSource>(),
            Err(RenvError::InvalidSource("lsf".into()))
        );
    }

    #[test]
    fn scope_follows_global_flag() {
        assert_eq!(RankScope::from_global_flag(true), RankScope::Global);
        assert_eq!(RankScope::from_global_flag(false), RankScope::Local);
        assert_eq!(RankScope::default(), RankScope::Local);
    }
}
