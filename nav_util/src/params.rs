//! Generic parameter loading functions.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::de::DeserializeOwned;
use std::fs::read_to_string;
use thiserror::Error;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// An error that occurs during loading of a parameter file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot load the parameter file: {0}")]
    FileLoadError(std::io::Error),

    #[error("cannot parse the parameter file: {0}")]
    DeserialiseError(toml::de::Error),
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Load a TOML parameter file into `P`.
pub fn load<P>(param_file_path: &str) -> Result<P, LoadError>
where
    P: DeserializeOwned,
{
    let params_str = read_to_string(param_file_path).map_err(LoadError::FileLoadError)?;

    toml::from_str(params_str.as_str()).map_err(LoadError::DeserialiseError)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::io::Write;

    #[derive(Deserialize)]
    struct Demo {
        a: i32,
        b: String,
    }

    #[test]
    fn load_parses_valid_toml() {
        let path = write_temp("valid", "a = 1\nb = \"hi\"\n");

        let parsed: Demo = load(&path).unwrap();
        assert_eq!(parsed.a, 1);
        assert_eq!(parsed.b, "hi");
    }

    #[test]
    fn load_reports_missing_file() {
        let res: Result<Demo, _> = load("/no/such/path/here.toml");
        assert!(matches!(res, Err(LoadError::FileLoadError(_))));
    }

    #[test]
    fn load_reports_bad_toml() {
        let path = write_temp("invalid", "not valid toml {{{");

        let res: Result<Demo, _> = load(&path);
        assert!(matches!(res, Err(LoadError::DeserialiseError(_))));
    }

    /// Writes `contents` to a uniquely named file under the OS temp dir and
    /// returns its path, avoiding a `tempfile` dev-dependency the teacher
    /// doesn't carry for this crate.
    fn write_temp(tag: &str, contents: &str) -> String {
        let mut path = std::env::temp_dir();
        path.push(format!(
            "nav_util_params_test_{}_{}.toml",
            std::process::id(),
            tag
        ));
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path.to_str().unwrap().to_string()
    }
}
