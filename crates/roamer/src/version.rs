use semver::{Version, VersionReq};

use crate::error::EnvironmentError;

/// Version of this roamer build.
pub fn version_string() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Fail if `required` is newer than the running version.
///
/// Partial versions such as `0.2` are accepted and mean `0.2.0`.
pub fn check_minimum_version(required: &str) -> Result<(), EnvironmentError> {
    check_version_against(required, version_string())
}

fn check_version_against(required: &str, current: &str) -> Result<(), EnvironmentError> {
    let req = VersionReq::parse(&format!(">={}", required.trim()))
        .map_err(|_| EnvironmentError::InvalidMinimumVersion(required.to_string()))?;
    let current_version = Version::parse(current)
        .map_err(|_| EnvironmentError::InvalidMinimumVersion(current.to_string()))?;

    if req.matches(&current_version) {
        Ok(())
    } else {
        Err(EnvironmentError::VersionTooOld {
            required: required.to_string(),
            current: current.to_string(),
        })
    }
}
