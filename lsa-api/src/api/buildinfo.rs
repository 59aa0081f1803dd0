//! `/api/buildinfo`: identity of the running server binary

use std::fmt;

use axum::response::Json;
use serde::Serialize;

/// Compile-time identity stamped by build.rs
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfo {
    pub module: &'static str,
    pub version: &'static str,
    pub git_hash: &'static str,
    pub build_timestamp: &'static str,
    pub build_profile: &'static str,
}

impl BuildInfo {
    pub const CURRENT: BuildInfo = BuildInfo {
        module: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        git_hash: env!("LSA_GIT_HASH"),
        build_timestamp: env!("LSA_BUILD_TIMESTAMP"),
        build_profile: env!("LSA_BUILD_PROFILE"),
    };
}

/// Startup banner form, e.g. `lsa-api v0.1.0 [1a2b3c4d] built 2025-06-09T10:00:00Z (release)`
impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} v{} [{}] built {} ({})",
            self.module, self.version, self.git_hash, self.build_timestamp, self.build_profile
        )
    }
}

pub async fn get_build_info() -> Json<BuildInfo> {
    Json(BuildInfo::CURRENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_names_the_server() {
        let banner = BuildInfo::CURRENT.to_string();
        assert!(banner.starts_with("lsa-api v"));
        assert!(banner.contains(BuildInfo::CURRENT.git_hash));
        assert!(banner.ends_with(&format!("({})", BuildInfo::CURRENT.build_profile)));
    }
}
