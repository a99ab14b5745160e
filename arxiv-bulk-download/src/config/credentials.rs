/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;
use std::path::Path;

use ini::{Ini, Properties};

use crate::error::{self, Error};

/// Section holding the credential entries
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Entry holding the access key id
pub const ACCESS_KEY_ENTRY: &str = "ACCESS_KEY";

/// Entry holding the secret access key
pub const SECRET_KEY_ENTRY: &str = "SECRET_KEY";

/// Access key pair used to sign requests.
///
/// The secret never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_key: String,
    secret_key: String,
}

impl Credentials {
    /// Create credentials from an access key id and secret. Both must be non-empty.
    pub fn new(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Result<Self, Error> {
        let access_key = access_key.into();
        let secret_key = secret_key.into();
        if access_key.is_empty() {
            return Err(error::config_error(format!("`{ACCESS_KEY_ENTRY}` is empty")));
        }
        if secret_key.is_empty() {
            return Err(error::config_error(format!("`{SECRET_KEY_ENTRY}` is empty")));
        }
        Ok(Self {
            access_key,
            secret_key,
        })
    }

    /// Load credentials from the `[DEFAULT]` section of an INI file.
    ///
    /// ```ini
    /// [DEFAULT]
    /// ACCESS_KEY = AKIA...
    /// SECRET_KEY = ...
    /// ```
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let ini = Ini::load_from_file(path).map_err(|err| {
            error::config_error(format!(
                "unable to read configuration file {}: {err}",
                path.display()
            ))
        })?;
        Self::from_ini(&ini)
    }

    /// Load credentials from INI formatted text
    pub fn from_ini_str(text: &str) -> Result<Self, Error> {
        let ini = Ini::load_from_str(text).map_err(error::config_error)?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self, Error> {
        // entries above the first section header count as the default section
        let section = ini
            .section(Some(DEFAULT_SECTION))
            .or_else(|| ini.section(None::<String>))
            .ok_or_else(|| {
                error::config_error(format!("missing [{DEFAULT_SECTION}] section"))
            })?;

        let access_key = required_entry(section, ACCESS_KEY_ENTRY)?;
        let secret_key = required_entry(section, SECRET_KEY_ENTRY)?;
        Self::new(access_key, secret_key)
    }

    /// The access key id
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    pub(crate) fn secret_key(&self) -> &str {
        &self.secret_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut formatter = f.debug_struct("Credentials");
        formatter.field("access_key", &self.access_key);
        formatter.field("secret_key", &"** redacted **");
        formatter.finish()
    }
}

/// Entry names are matched case-insensitively.
fn required_entry<'a>(section: &'a Properties, name: &str) -> Result<&'a str, Error> {
    section
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value)
        .ok_or_else(|| {
            error::config_error(format!(
                "missing `{name}` in the [{DEFAULT_SECTION}] section"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io::Write;

    #[test]
    fn test_load_default_section() {
        let creds = Credentials::from_ini_str(
            "[DEFAULT]\nACCESS_KEY = AKIDEXAMPLE\nSECRET_KEY = wJalrXUtnFEMI\n",
        )
        .unwrap();
        assert_eq!("AKIDEXAMPLE", creds.access_key());
        assert_eq!("wJalrXUtnFEMI", creds.secret_key());
    }

    #[test]
    fn test_entry_names_are_case_insensitive() {
        let creds =
            Credentials::from_ini_str("[DEFAULT]\naccess_key = ak\nsecret_key = sk\n").unwrap();
        assert_eq!("ak", creds.access_key());
        assert_eq!("sk", creds.secret_key());
    }

    #[test]
    fn test_entries_without_section() {
        let creds = Credentials::from_ini_str("ACCESS_KEY=ak\nSECRET_KEY=sk\n").unwrap();
        assert_eq!("ak", creds.access_key());
    }

    #[test]
    fn test_missing_access_key() {
        let err = Credentials::from_ini_str("[DEFAULT]\nSECRET_KEY = sk\n").unwrap_err();
        assert_eq!(&ErrorKind::Config, err.kind());
        assert!(std::error::Error::source(&err)
            .unwrap()
            .to_string()
            .contains("ACCESS_KEY"));
    }

    #[test]
    fn test_missing_secret_key() {
        let err = Credentials::from_ini_str("[DEFAULT]\nACCESS_KEY = ak\n").unwrap_err();
        assert_eq!(&ErrorKind::Config, err.kind());
    }

    #[test]
    fn test_empty_value_rejected() {
        let err =
            Credentials::from_ini_str("[DEFAULT]\nACCESS_KEY =\nSECRET_KEY = sk\n").unwrap_err();
        assert_eq!(&ErrorKind::Config, err.kind());
    }

    #[test]
    fn test_other_section_ignored() {
        let err = Credentials::from_ini_str("[other]\nACCESS_KEY = ak\nSECRET_KEY = sk\n")
            .unwrap_err();
        assert_eq!(&ErrorKind::Config, err.kind());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[DEFAULT]\nACCESS_KEY = ak\nSECRET_KEY = sk").unwrap();
        let creds = Credentials::from_file(file.path()).unwrap();
        assert_eq!("ak", creds.access_key());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Credentials::from_file(dir.path().join("config.ini")).unwrap_err();
        assert_eq!(&ErrorKind::Config, err.kind());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let creds = Credentials::new("ak", "super-secret").unwrap();
        let debug = format!("{creds:?}");
        assert!(debug.contains("ak"));
        assert!(!debug.contains("super-secret"));
    }
}
