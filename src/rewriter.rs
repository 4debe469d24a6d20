//! Rewriting of the `default` sections for a resolved profile.

use crate::error::SwitchError;
use crate::ini::ConfigFile;
use crate::resolver::{
    ACCESS_KEY_ID, DEFAULT_SECTION, ProfileKind, ROLE_ARN, SECRET_ACCESS_KEY, SOURCE_PROFILE,
    role_section,
};

/// Which files `apply` changed and must be persisted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Touched {
    pub credentials: bool,
    pub config: bool,
}

/// Which files had no `default` section before `ensure_defaults`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultsCreated {
    pub credentials: bool,
    pub config: bool,
}

/// Make sure both files carry a `default` section
pub fn ensure_defaults(credentials: &mut ConfigFile, config: &mut ConfigFile) -> DefaultsCreated {
    DefaultsCreated {
        credentials: credentials.ensure_section(DEFAULT_SECTION),
        config: config.ensure_section(DEFAULT_SECTION),
    }
}

/// Point the default sections at `name`
///
/// Nothing is mutated when an error is returned.
pub fn apply(
    kind: ProfileKind,
    name: &str,
    credentials: &mut ConfigFile,
    config: &mut ConfigFile,
) -> Result<Touched, SwitchError> {
    match kind {
        ProfileKind::CredentialProfile => {
            let source = credentials
                .section(name)
                .ok_or_else(|| SwitchError::ProfileNotFound(name.to_string()))?;
            let required = |key: &'static str| {
                source
                    .get(key)
                    .map(str::to_string)
                    .ok_or_else(|| SwitchError::IncompleteProfile {
                        profile: name.to_string(),
                        key,
                    })
            };
            let key_id = required(ACCESS_KEY_ID)?;
            let secret = required(SECRET_ACCESS_KEY)?;

            let default = credentials.entry(DEFAULT_SECTION);
            default.set(ACCESS_KEY_ID, key_id);
            default.set(SECRET_ACCESS_KEY, secret);

            // a stale role default would shadow the keys
            let config_default = config.entry(DEFAULT_SECTION);
            config_default.remove(ROLE_ARN);
            config_default.remove(SOURCE_PROFILE);

            Ok(Touched {
                credentials: true,
                config: true,
            })
        }
        ProfileKind::AssumedRoleProfile => {
            let source = role_section(config, name)
                .ok_or_else(|| SwitchError::ProfileNotFound(name.to_string()))?;
            let (Some(role_arn), Some(source_profile)) =
                (source.get(ROLE_ARN), source.get(SOURCE_PROFILE))
            else {
                return Err(SwitchError::ProfileNotFound(name.to_string()));
            };
            let role_arn = role_arn.to_string();
            let source_profile = source_profile.to_string();

            credentials.ensure_section(DEFAULT_SECTION);
            let default = config.entry(DEFAULT_SECTION);
            default.set(ROLE_ARN, role_arn);
            default.set(SOURCE_PROFILE, source_profile);

            Ok(Touched {
                credentials: false,
                config: true,
            })
        }
        ProfileKind::NotFound => Err(SwitchError::ProfileNotFound(name.to_string())),
    }
}
