use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::config::Config;
use crate::error::{ConfigError, Result};

pub fn run() -> Result<()> {
    let config_path = Config::config_path()?;
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();

    if config_path.exists() {
        let answer = prompt(
            &mut input,
            &mut stdout,
            &format!(
                "Config file already exists at {}. Overwrite? [y/N] ",
                config_path.display()
            ),
        )?;

        if !answer.eq_ignore_ascii_case("y") {
            writeln!(stdout, "Aborted.")?;
            return Ok(());
        }
    }

    let api_key = prompt(
        &mut input,
        &mut stdout,
        "Enter your Linear API key (create one at https://linear.app/settings/api): ",
    )?;

    save_api_key(&config_path, &api_key)?;

    writeln!(stdout, "\nConfig saved to {}", config_path.display())?;

    Ok(())
}

fn prompt(input: &mut impl BufRead, output: &mut impl Write, message: &str) -> Result<String> {
    write!(output, "{message}")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line).map_err(ConfigError::Prompt)?;
    Ok(line.trim().to_string())
}

/// Write `api_key` as the single line of the config file, creating its directory.
pub fn save_api_key(path: &Path, api_key: &str) -> std::result::Result<(), ConfigError> {
    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Err(ConfigError::MissingApiKey {
            env_var: crate::config::API_KEY_ENV,
            path: path.to_path_buf(),
        });
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    std::fs::write(path, format!("{api_key}\n")).map_err(|e| ConfigError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::resolve_api_key;

    #[test]
    fn test_save_then_resolve() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("linear-project-updates").join("config");

        save_api_key(&path, "  lin_api_abc \n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "lin_api_abc\n");
        assert_eq!(resolve_api_key(None, || Ok(path.clone())).unwrap(), "lin_api_abc");
    }

    #[test]
    fn test_save_rejects_empty_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config");
        assert!(save_api_key(&path, "   ").is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_prompt_trims_answer() {
        let mut input = io::Cursor::new("  y \n");
        let mut output = Vec::new();
        let answer = prompt(&mut input, &mut output, "Continue? ").unwrap();
        assert_eq!(answer, "y");
        assert_eq!(String::from_utf8(output).unwrap(), "Continue? ");
    }
}
