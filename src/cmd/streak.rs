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

use std::path::Path;

use crate::config::database_path;
use crate::config::resolve_directory;
use crate::error::Fallible;
use crate::store::SqliteStore;
use crate::streak::StreakState;
use crate::streak::StreakTracker;

pub fn print_streak(directory: Option<String>) -> Fallible<()> {
    let directory = resolve_directory(directory)?;
    let state = read_streak(&directory)?;
    let json = serde_json::to_string_pretty(&state)?;
    println!("{json}");
    Ok(())
}

fn read_streak(directory: &Path) -> Fallible<StreakState> {
    let store = SqliteStore::new(&database_path(directory)?)?;
    Ok(StreakTracker::load(Box::new(store)).state())
}
