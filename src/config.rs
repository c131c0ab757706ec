use crate::error::{MenuError, Result};
use crate::types::Entry;
use std::fs;
use std::path::{Path, PathBuf};

/// Location of the menu config file, `~/.rcmenu` unless overridden.
pub struct ConfigFile {
    path: PathBuf,
}

impl ConfigFile {
    pub fn locate(override_path: Option<PathBuf>) -> Result<Self> {
        let path = match override_path {
            Some(path) => path,
            None => dirs::home_dir()
                .ok_or(MenuError::HomeDirUnset)?
                .join(".rcmenu"),
        };
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the config file into an ordered entry list.
    pub fn parse(&self) -> Result<Vec<Entry>> {
        if !self.path.is_file() {
            return Err(MenuError::ConfigNotFound(self.path.clone()));
        }
        parse_entries(&fs::read_to_string(&self.path)?)
    }
}

/// Parse config text, one `NAME | [^]COMMAND` entry per non-blank line.
pub fn parse_entries(text: &str) -> Result<Vec<Entry>> {
    let mut entries = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        entries.push(parse_line(line)?);
    }
    Ok(entries)
}

fn parse_line(line: &str) -> Result<Entry> {
    // Lines without a '|' fall through with an empty command part and are
    // rejected below.
    let (name, command) = line.split_once('|').unwrap_or((line, ""));
    let name = name.trim();
    let mut command = command.trim();
    let close = command.starts_with('^');
    if close {
        command = command.trim_start_matches(['^', ' ']);
    }
    if name.is_empty() || command.is_empty() {
        return Err(MenuError::InvalidEntry(line.to_string()));
    }
    let command =
        shell_words::split(command).map_err(|_| MenuError::InvalidEntry(line.to_string()))?;
    if command.is_empty() {
        return Err(MenuError::InvalidEntry(line.to_string()));
    }
    Ok(Entry {
        name: name.to_string(),
        command,
        close,
    })
}
