//! Profile classification and lookups over the two AWS files.
//!
//! A name resolves against `credentials` first. Only when it is absent there
//! is `config` consulted for a role-assumption profile. Config sections may
//! use the AWS CLI's `[profile <name>]` spelling; they resolve and list under
//! the bare `<name>`.

use crate::ini::{ConfigFile, Section};

pub const DEFAULT_SECTION: &str = "default";

pub const ACCESS_KEY_ID: &str = "aws_access_key_id";
pub const SECRET_ACCESS_KEY: &str = "aws_secret_access_key";
pub const ROLE_ARN: &str = "role_arn";
pub const SOURCE_PROFILE: &str = "source_profile";

const CONFIG_PROFILE_PREFIX: &str = "profile ";

/// What a requested profile name refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileKind {
    /// Section in the credentials file holding access keys
    CredentialProfile,
    /// Config section naming a role to assume through a source profile
    AssumedRoleProfile,
    NotFound,
}

/// Classify `name`; credential-file membership wins over a role in config
pub fn classify(name: &str, credentials: &ConfigFile, config: &ConfigFile) -> ProfileKind {
    let kind = if credentials.contains_section(name) {
        ProfileKind::CredentialProfile
    } else if role_section(config, name).is_some() {
        ProfileKind::AssumedRoleProfile
    } else {
        ProfileKind::NotFound
    };
    log::debug!("profile [{}] classified as {:?}", name, kind);
    kind
}

/// First section among `name` and `profile <name>` that can assume a role
pub fn role_section<'a>(config: &'a ConfigFile, name: &str) -> Option<&'a Section> {
    let prefixed = format!("{CONFIG_PROFILE_PREFIX}{name}");
    [name, prefixed.as_str()]
        .into_iter()
        .filter_map(|candidate| config.section(candidate))
        .find(|section| can_assume_role(section))
}

/// Both role keys are present
pub fn is_role_profile(section: &Section) -> bool {
    section.contains_key(ROLE_ARN) && section.contains_key(SOURCE_PROFILE)
}

/// Both role keys are present and non-empty
pub fn can_assume_role(section: &Section) -> bool {
    let filled = |key| section.get(key).is_some_and(|v| !v.is_empty());
    filled(ROLE_ARN) && filled(SOURCE_PROFILE)
}

/// Name a config section is addressed by on the command line
pub fn display_name(section_name: &str) -> &str {
    section_name
        .strip_prefix(CONFIG_PROFILE_PREFIX)
        .unwrap_or(section_name)
}

/// Every selectable profile: credential profiles, then role profiles
///
/// Names present in both files appear twice. The iterator is lazy and can be
/// cloned to restart it.
pub fn list_profiles<'a>(
    credentials: &'a ConfigFile,
    config: &'a ConfigFile,
) -> impl Iterator<Item = &'a str> + Clone + 'a {
    let credential_profiles = credentials
        .section_names()
        .filter(|name| *name != DEFAULT_SECTION);

    let role_profiles = config
        .sections()
        .filter(|(name, section)| *name != DEFAULT_SECTION && is_role_profile(section))
        .map(|(name, _)| display_name(name));

    credential_profiles.chain(role_profiles)
}

/// Reverse lookup of the profile the default sections currently point at
///
/// A role default in config is matched first; failing that, the default
/// access key id in credentials. Matching is exact string equality.
pub fn current_profile_name<'a>(
    credentials: &'a ConfigFile,
    config: &'a ConfigFile,
) -> Option<&'a str> {
    current_role_profile(config).or_else(|| current_credential_profile(credentials))
}

fn current_role_profile(config: &ConfigFile) -> Option<&str> {
    let default = config.section(DEFAULT_SECTION)?;
    let role_arn = default.get(ROLE_ARN)?;
    let source_profile = default.get(SOURCE_PROFILE)?;

    config
        .sections()
        .filter(|(name, _)| *name != DEFAULT_SECTION)
        .find(|(_, section)| {
            section.get(ROLE_ARN) == Some(role_arn)
                && section.get(SOURCE_PROFILE) == Some(source_profile)
        })
        .map(|(name, _)| display_name(name))
}

fn current_credential_profile(credentials: &ConfigFile) -> Option<&str> {
    let key_id = credentials.section(DEFAULT_SECTION)?.get(ACCESS_KEY_ID)?;

    credentials
        .sections()
        .filter(|(name, _)| *name != DEFAULT_SECTION)
        .find(|(_, section)| section.get(ACCESS_KEY_ID) == Some(key_id))
        .map(|(name, _)| name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn parse(text: &str) -> ConfigFile {
        ConfigFile::parse(text, Path::new("test")).unwrap()
    }

    fn sample_credentials() -> ConfigFile {
        parse(
            "[default]\n\
             aws_access_key_id = AKIA_A\n\
             aws_secret_access_key = secret_a\n\
             [A]\n\
             aws_access_key_id = AKIA_A\n\
             aws_secret_access_key = secret_a\n\
             [B]\n\
             aws_access_key_id = AKIA_B\n\
             aws_secret_access_key = secret_b\n",
        )
    }

    fn sample_config() -> ConfigFile {
        parse(
            "[default]\n\
             region = us-east-1\n\
             [C]\n\
             role_arn = arn:aws:iam::111111111111:role/admin\n\
             source_profile = A\n\
             [D]\n\
             role_arn = arn:aws:iam::222222222222:role/readonly\n",
        )
    }

    #[test]
    fn test_classify_credential_profile() {
        let kind = classify("B", &sample_credentials(), &sample_config());
        assert_eq!(kind, ProfileKind::CredentialProfile);
    }

    #[test]
    fn test_classify_role_profile() {
        let kind = classify("C", &sample_credentials(), &sample_config());
        assert_eq!(kind, ProfileKind::AssumedRoleProfile);
    }

    #[test]
    fn test_classify_needs_both_role_keys() {
        let kind = classify("D", &sample_credentials(), &sample_config());
        assert_eq!(kind, ProfileKind::NotFound);
    }

    #[test]
    fn test_classify_unknown() {
        let kind = classify("nope", &sample_credentials(), &sample_config());
        assert_eq!(kind, ProfileKind::NotFound);
    }

    #[test]
    fn test_classify_credentials_win_over_config() {
        let credentials = parse("[shared]\naws_access_key_id = K\naws_secret_access_key = S\n");
        let config = parse("[shared]\nrole_arn = arn:aws:iam::1:role/r\nsource_profile = x\n");
        assert_eq!(
            classify("shared", &credentials, &config),
            ProfileKind::CredentialProfile
        );
    }

    #[test]
    fn test_classify_empty_role_value() {
        let config = parse("[r]\nrole_arn =\nsource_profile = base\n");
        assert_eq!(
            classify("r", &ConfigFile::new(), &config),
            ProfileKind::NotFound
        );
    }

    #[test]
    fn test_classify_default_argument() {
        let kind = classify("default", &sample_credentials(), &sample_config());
        assert_eq!(kind, ProfileKind::CredentialProfile);
    }

    #[test]
    fn test_classify_prefixed_config_section() {
        let config = parse("[profile admin]\nrole_arn = arn:aws:iam::1:role/a\nsource_profile = A\n");
        assert_eq!(
            classify("admin", &ConfigFile::new(), &config),
            ProfileKind::AssumedRoleProfile
        );
    }

    #[test]
    fn test_classify_skips_non_role_exact_section() {
        let config = parse(
            "[admin]\n\
             region = eu-west-1\n\
             [profile admin]\n\
             role_arn = arn:aws:iam::1:role/admin\n\
             source_profile = A\n",
        );
        let credentials = ConfigFile::new();

        let listed: Vec<_> = list_profiles(&credentials, &config).collect();
        assert_eq!(listed, vec!["admin"]);
        assert_eq!(
            classify("admin", &credentials, &config),
            ProfileKind::AssumedRoleProfile
        );
        let section = role_section(&config, "admin").unwrap();
        assert_eq!(section.get(ROLE_ARN), Some("arn:aws:iam::1:role/admin"));
    }

    #[test]
    fn test_list_profiles_order() {
        let credentials = sample_credentials();
        let config = sample_config();
        let names: Vec<_> = list_profiles(&credentials, &config).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_list_profiles_restartable_and_not_deduplicated() {
        let credentials = parse("[x]\naws_access_key_id = K\n");
        let config = parse("[profile x]\nrole_arn = arn\nsource_profile = y\n");
        let listing = list_profiles(&credentials, &config);

        let first: Vec<_> = listing.clone().collect();
        let second: Vec<_> = listing.collect();
        assert_eq!(first, vec!["x", "x"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_current_profile_from_credentials() {
        let credentials = sample_credentials();
        let config = sample_config();
        assert_eq!(current_profile_name(&credentials, &config), Some("A"));
    }

    #[test]
    fn test_current_profile_role_takes_precedence() {
        let credentials = sample_credentials();
        let config = parse(
            "[default]\n\
             role_arn = arn:aws:iam::111111111111:role/admin\n\
             source_profile = A\n\
             [profile C]\n\
             role_arn = arn:aws:iam::111111111111:role/admin\n\
             source_profile = A\n",
        );
        assert_eq!(current_profile_name(&credentials, &config), Some("C"));
    }

    #[test]
    fn test_current_profile_role_miss_falls_back_to_credentials() {
        let credentials = sample_credentials();
        let config = parse("[default]\nrole_arn = arn:unknown\nsource_profile = A\n");
        assert_eq!(current_profile_name(&credentials, &config), Some("A"));
    }

    #[test]
    fn test_current_profile_absent() {
        let credentials = parse("[default]\n[A]\naws_access_key_id = AKIA_A\n");
        let config = parse("[default]\nregion = us-east-1\n");
        assert_eq!(current_profile_name(&credentials, &config), None);
    }

    #[test]
    fn test_current_profile_is_case_sensitive() {
        let credentials = parse(
            "[default]\naws_access_key_id = akia_a\n[A]\naws_access_key_id = AKIA_A\n",
        );
        assert_eq!(current_profile_name(&credentials, &ConfigFile::new()), None);
    }
}
