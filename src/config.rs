// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::env::current_dir;
use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;

pub const CONFIG_FILE: &str = "wordcards.toml";

pub const DATABASE_FILE: &str = "wordcards.db";

pub const DEFAULT_ENDPOINT: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

/// Settings read from `wordcards.toml`. Every field is optional in the file.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Dictionary base URL. The word is appended as a path segment.
    pub endpoint: String,
    /// Port for the drill server.
    pub port: u16,
    /// Start looking up the next card before the user gets to it.
    pub prefetch: bool,
    /// Per-request timeout for dictionary lookups, in seconds.
    pub timeout_secs: u64,
    /// Open a browser when the drill server starts.
    pub open_browser: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            port: 8000,
            prefetch: true,
            timeout_secs: 10,
            open_browser: true,
        }
    }
}

impl Config {
    pub fn parse(text: &str) -> Fallible<Self> {
        let config: Config = toml::from_str(text)?;
        if config.timeout_secs == 0 {
            return fail("timeout_secs must be greater than zero.");
        }
        Ok(config)
    }

    /// Load the config file from `directory`, or the defaults if there is
    /// none.
    pub fn load(directory: &Path) -> Fallible<Self> {
        let path = directory.join(CONFIG_FILE);
        if path.exists() {
            log::debug!("Loading configuration from {}.", path.display());
            Config::parse(&read_to_string(path)?)
        } else {
            log::debug!("No configuration file, using defaults.");
            Ok(Config::default())
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Resolve the working directory: the given one, or the current directory.
pub fn resolve_directory(directory: Option<String>) -> Fallible<PathBuf> {
    let directory: PathBuf = match directory {
        Some(dir) => PathBuf::from(dir),
        None => current_dir()?,
    };
    if directory.exists() {
        Ok(directory.canonicalize()?)
    } else {
        fail("directory does not exist.")
    }
}

pub fn database_path(directory: &Path) -> Fallible<String> {
    let path = directory.join(DATABASE_FILE);
    let path = path
        .to_str()
        .ok_or_else(|| ErrorReport::new("invalid path"))?;
    Ok(path.to_string())
}
