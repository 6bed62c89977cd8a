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

use crate::config::Config;
use crate::config::database_path;
use crate::config::resolve_directory;
use crate::drill::server::start_server;
use crate::error::Fallible;
use crate::lookup::cache::DefinitionCache;
use crate::lookup::http::HttpFetcher;
use crate::session::SessionController;
use crate::store::SqliteStore;
use crate::streak::StreakTracker;
use crate::types::definition::FetchOutcome;

pub struct DrillOptions {
    pub words: Option<String>,
    pub directory: Option<String>,
    pub port: Option<u16>,
    pub no_open: bool,
}

pub async fn start_drill(options: DrillOptions) -> Fallible<()> {
    let directory = resolve_directory(options.directory)?;
    let config = Config::load(&directory)?;
    let port = options.port.unwrap_or(config.port);
    let open_browser = config.open_browser && !options.no_open;

    let fetcher = HttpFetcher::new(&config.endpoint, config.timeout())?;
    let cache = DefinitionCache::new(fetcher);
    let streak = open_streak(&directory);
    let mut session = SessionController::new(cache, streak, config.prefetch);
    if let Some(words) = options.words {
        session.add_words(&words);
        log::debug!("Starting with {} cards.", session.sequence().len());
        // Have the first card ready when the page opens.
        if let Some(FetchOutcome::Failed(e)) = session.settle_current().await {
            log::warn!("Lookup for the first card failed: {e}");
        }
    }

    println!("Drilling on http://127.0.0.1:{port}/");
    let streak = start_server(session, port, open_browser).await?;
    println!("Session ended. {} day streak.", streak.count);
    Ok(())
}

/// Open the streak database in `directory`. If it can't be opened the
/// streak is kept in memory for this session.
pub fn open_streak(directory: &Path) -> StreakTracker {
    let store = database_path(directory).and_then(|path| SqliteStore::new(&path));
    match store {
        Ok(store) => StreakTracker::load(Box::new(store)),
        Err(e) => {
            log::warn!("Could not open the streak database, the streak will not be saved: {e}");
            StreakTracker::in_memory()
        }
    }
}
