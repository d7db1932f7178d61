//! Engine configuration.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The search strategy used by the fixpoint loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Algorithm {
    /// Scan all pending equations for the simplest one.
    Basic,
    /// Pick by variable level using watch lists.
    #[default]
    Tuned,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Basic => write!(f, "basic"),
            Algorithm::Tuned => write!(f, "tuned"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(Algorithm::Basic),
            "tuned" => Ok(Algorithm::Tuned),
            _ => Err(ConfigError::InvalidValue {
                key: "algorithm".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Errors raised while building a [`Config`] from string options.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The option name is not recognised.
    #[error("unknown option `{0}`")]
    UnknownOption(String),

    /// The option value does not parse.
    #[error("invalid value `{value}` for option `{key}`")]
    InvalidValue {
        /// Option name.
        key: String,
        /// Rejected value.
        value: String,
    },
}

/// Bounds and strategy of a saturation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Stop once `to_simplify + processed` reaches this many equations.
    pub eqs_threshold: usize,
    /// Polynomials whose tree size exceeds this are too complex to keep.
    pub expr_size_limit: usize,
    /// Search strategy.
    pub algorithm: Algorithm,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            eqs_threshold: usize::MAX,
            expr_size_limit: usize::MAX,
            algorithm: Algorithm::Tuned,
        }
    }
}

impl Config {
    /// Builds a configuration from `key=value` style options, starting
    /// from the defaults.
    ///
    /// Recognised keys are `eqs-threshold`, `expr-size-limit` and
    /// `algorithm` (`basic` or `tuned`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownOption`] for an unrecognised key and
    /// [`ConfigError::InvalidValue`] for a value that does not parse.
    pub fn from_options<'s, I>(options: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'s str, &'s str)>,
    {
        let mut config = Self::default();
        for (key, value) in options {
            match key {
                "eqs-threshold" => config.eqs_threshold = parse_bound(key, value)?,
                "expr-size-limit" => config.expr_size_limit = parse_bound(key, value)?,
                "algorithm" => config.algorithm = value.parse()?,
                _ => return Err(ConfigError::UnknownOption(key.to_string())),
            }
        }
        Ok(config)
    }
}

fn parse_bound(key: &str, value: &str) -> Result<usize, ConfigError> {
    if value == "unlimited" {
        return Ok(usize::MAX);
    }
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}
