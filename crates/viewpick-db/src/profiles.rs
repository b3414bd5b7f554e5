//! `profiles.yml` scraping.
//!
//! The expected structure mirrors dbt's:
//!
//! ```yaml
//! viewpick:
//!   target: default
//!   outputs:
//!     default:
//!       type: postgres
//!       host: localhost
//!       port: 5432
//!       user: analytics
//!       password: secret
//!       dbname: warehouse
//!       schema: viewpick
//! ```
//!
//! Target resolution order: an explicit override (CLI/env), the profile's
//! own `target:` key, then the sole output if only one exists. Every
//! missing piece gets its own error message so the fix is obvious.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{DbError, Result};

/// Profile read when the caller does not name one.
pub const DEFAULT_PROFILE: &str = "viewpick";

#[derive(Debug, Clone, Deserialize)]
struct Profile {
    #[serde(default)]
    target: Option<String>,
    #[serde(default)]
    outputs: Option<BTreeMap<String, Output>>,
}

/// One output block, everything optional so absence can be reported
/// credential by credential.
#[derive(Debug, Clone, Deserialize)]
struct Output {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    host: Option<String>,
    #[serde(default)]
    port: Option<u16>,
    #[serde(default)]
    user: Option<String>,
    #[serde(default)]
    password: Option<String>,
    #[serde(default)]
    dbname: Option<String>,
    #[serde(default)]
    schema: Option<String>,
}

/// Connection credentials extracted from one output block.
#[derive(Debug, Clone)]
pub struct DbCredentials {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub dbname: String,
    pub schema: String,
}

/// Read and validate `profiles.yml` from disk.
pub fn load_credentials(
    path: &Path,
    profile: Option<&str>,
    target: Option<&str>,
) -> Result<DbCredentials> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        DbError::Environment(format!("cannot read {}: {e}", path.display()))
    })?;
    parse_credentials(&contents, profile, target)
}

/// Validate profile contents and extract the chosen output's credentials.
pub fn parse_credentials(
    yaml: &str,
    profile: Option<&str>,
    target: Option<&str>,
) -> Result<DbCredentials> {
    let profiles: BTreeMap<String, Profile> = serde_yaml::from_str(yaml)
        .map_err(|e| DbError::Environment(format!("profiles.yml is not valid YAML: {e}")))?;

    let profile_name = profile.unwrap_or(DEFAULT_PROFILE);
    let profile = profiles.get(profile_name).ok_or_else(|| {
        DbError::Environment(format!(
            "there is no profile called `{profile_name}` in profiles.yml"
        ))
    })?;

    let outputs = profile.outputs.as_ref().ok_or_else(|| {
        DbError::Environment(format!(
            "`outputs` is not specified for profile `{profile_name}` in profiles.yml"
        ))
    })?;

    let target_name = match target.or(profile.target.as_deref()) {
        Some(name) => name.to_string(),
        // With no target named anywhere there must be exactly one output.
        None => match outputs.keys().next() {
            Some(sole) if outputs.len() == 1 => sole.clone(),
            _ => {
                return Err(DbError::Environment(format!(
                    "profile `{profile_name}` has multiple outputs and no \
                     `target`; pass --target to pick one"
                )))
            }
        },
    };

    let output = outputs.get(&target_name).ok_or_else(|| {
        DbError::Environment(format!(
            "target `{target_name}` is not among the outputs of profile `{profile_name}`"
        ))
    })?;

    match output.kind.as_deref() {
        Some("postgres") => {}
        Some(other) => {
            return Err(DbError::Environment(format!(
                "output `{target_name}` has type `{other}`, but only `postgres` is supported"
            )))
        }
        None => return Err(missing_credential(&target_name, "type")),
    }

    Ok(DbCredentials {
        host: required(&output.host, &target_name, "host")?,
        port: output
            .port
            .ok_or_else(|| missing_credential(&target_name, "port"))?,
        user: required(&output.user, &target_name, "user")?,
        password: required(&output.password, &target_name, "password")?,
        dbname: required(&output.dbname, &target_name, "dbname")?,
        schema: required(&output.schema, &target_name, "schema")?,
    })
}

fn required(value: &Option<String>, target: &str, name: &'static str) -> Result<String> {
    value
        .clone()
        .ok_or_else(|| missing_credential(target, name))
}

fn missing_credential(target: &str, name: &str) -> DbError {
    DbError::Environment(format!(
        "`{name}` is not specified in output `{target}` of profiles.yml"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: &str = r#"
viewpick:
  target: default
  outputs:
    default:
      type: postgres
      host: localhost
      port: 5432
      user: analytics
      password: secret
      dbname: warehouse
      schema: viewpick
"#;

    #[test]
    fn valid_profile_parses() {
        let creds = parse_credentials(GOOD, None, None).unwrap();
        assert_eq!(creds.host, "localhost");
        assert_eq!(creds.port, 5432);
        assert_eq!(creds.schema, "viewpick");
    }

    #[test]
    fn missing_profile_is_named() {
        let err = parse_credentials(GOOD, Some("other"), None).unwrap_err();
        assert!(err.to_string().contains("other"));
    }

    #[test]
    fn missing_credential_is_named() {
        let yaml = r#"
viewpick:
  outputs:
    default:
      type: postgres
      host: localhost
      port: 5432
      user: analytics
      password: secret
      dbname: warehouse
"#;
        let err = parse_credentials(yaml, None, None).unwrap_err();
        assert!(err.to_string().contains("`schema`"));
    }

    #[test]
    fn non_postgres_type_is_rejected() {
        let yaml = GOOD.replace("type: postgres", "type: snowflake");
        let err = parse_credentials(&yaml, None, None).unwrap_err();
        assert!(err.to_string().contains("snowflake"));
    }

    #[test]
    fn sole_output_is_used_without_target() {
        let yaml = GOOD.replace("  target: default\n", "");
        let creds = parse_credentials(&yaml, None, None).unwrap();
        assert_eq!(creds.dbname, "warehouse");
    }

    #[test]
    fn explicit_target_overrides_profile_target() {
        let yaml = r#"
viewpick:
  target: default
  outputs:
    default:
      type: postgres
      host: localhost
      port: 5432
      user: analytics
      password: secret
      dbname: warehouse
      schema: viewpick
    staging:
      type: postgres
      host: staging-host
      port: 5432
      user: analytics
      password: secret
      dbname: warehouse_staging
      schema: viewpick
"#;
        let creds = parse_credentials(yaml, None, Some("staging")).unwrap();
        assert_eq!(creds.host, "staging-host");
    }
}
