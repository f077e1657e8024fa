//! Build- and run-time selection of the algorithm behind 128-bit arithmetic.
//!
//! The `portable` cargo feature pins the portable algorithm. Otherwise the
//! `FIXED_UINT_BACKEND` environment variable (`portable`, `intrinsic` or
//! `native`) is read once, the first time a 128-bit operation runs.

use std::fmt::Display;
use std::str::FromStr;

use lazy_static::*;

use crate::error::Error;

pub const BACKEND_ENV_VAR: &str = "FIXED_UINT_BACKEND";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Dual 64-bit words with explicit carries; the only algorithm usable in `const` evaluation.
    Portable,
    /// Carry-flag and bit-scan instructions where the target exposes them.
    Intrinsic,
    /// The compiler's own `u128`.
    Native,
}

impl Backend {
    pub const fn name(self) -> &'static str {
        match self {
            Backend::Portable => "portable",
            Backend::Intrinsic => "intrinsic",
            Backend::Native => "native",
        }
    }

    /// The backend used when nothing is configured.
    pub const fn build_default() -> Backend {
        if cfg!(feature = "portable") {
            Backend::Portable
        } else {
            Backend::Native
        }
    }
}

impl Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "portable" => Ok(Backend::Portable),
            "intrinsic" => Ok(Backend::Intrinsic),
            "native" => Ok(Backend::Native),
            _ => Err(Error::UnknownBackend(s.to_string())),
        }
    }
}

/// Resolves the backend from the build configuration and an optional override value.
pub fn resolve(requested: Option<&str>) -> Backend {
    if cfg!(feature = "portable") {
        if let Some(val) = requested {
            tracing::warn!(requested = val, "the `portable` feature pins the portable backend; ignoring override");
        }
        return Backend::Portable;
    }
    match requested {
        None => Backend::build_default(),
        Some(val) => match val.parse() {
            Ok(backend) => backend,
            Err(err) => {
                tracing::warn!(%err, fallback = %Backend::build_default(), "ignoring {}", BACKEND_ENV_VAR);
                Backend::build_default()
            }
        },
    }
}

lazy_static! {
    static ref ACTIVE_BACKEND: Backend = {
        let requested = std::env::var(BACKEND_ENV_VAR).ok();
        let backend = resolve(requested.as_deref());
        tracing::debug!(%backend, "selected 128-bit arithmetic backend");
        backend
    };
}

/// The backend every runtime 128-bit operation dispatches to.
#[inline]
pub fn active_backend() -> Backend {
    *ACTIVE_BACKEND
}

#[test]
fn test_parse_backend() {
    assert_eq!("portable".parse::<Backend>(), Ok(Backend::Portable));
    assert_eq!(" Intrinsic ".parse::<Backend>(), Ok(Backend::Intrinsic));
    assert_eq!("NATIVE".parse::<Backend>(), Ok(Backend::Native));
    assert!(matches!("simd".parse::<Backend>(), Err(Error::UnknownBackend(_))));
}

#[test]
fn test_resolve() {
    assert_eq!(resolve(None), Backend::build_default());
    assert_eq!(resolve(Some("nonsense")), Backend::build_default());
    if cfg!(feature = "portable") {
        assert_eq!(resolve(Some("native")), Backend::Portable);
    } else {
        assert_eq!(resolve(Some("intrinsic")), Backend::Intrinsic);
    }
}
