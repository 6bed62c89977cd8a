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

use crate::config::Config;
use crate::config::resolve_directory;
use crate::error::Fallible;
use crate::error::fail;
use crate::lookup::cache::DefinitionCache;
use crate::lookup::fetcher::DefinitionFetcher;
use crate::lookup::http::HttpFetcher;
use crate::types::definition::FetchError;
use crate::types::definition::FetchOutcome;
use crate::types::word::Word;

/// Look a single word up and print the record as JSON.
pub async fn lookup_word(word: &str) -> Fallible<()> {
    let Some(word) = Word::new(word) else {
        return fail("word is empty.");
    };
    let directory = resolve_directory(None)?;
    let config = Config::load(&directory)?;
    let fetcher = HttpFetcher::new(&config.endpoint, config.timeout())?;
    let cache = DefinitionCache::new(fetcher);
    let json = lookup_json(&cache, &word).await?;
    println!("{json}");
    Ok(())
}

/// Network errors get one more attempt.
async fn lookup_json<F: DefinitionFetcher>(
    cache: &DefinitionCache<F>,
    word: &Word,
) -> Fallible<String> {
    let outcome = match cache.ensure(word).await {
        FetchOutcome::Failed(FetchError::Network(e)) => {
            log::debug!("Lookup failed ({e}), trying again.");
            cache.retry(word).await
        }
        outcome => outcome,
    };
    if let FetchOutcome::Failed(e) = &outcome {
        return Err(e.clone().into());
    }
    match outcome.record() {
        Some(record) => Ok(serde_json::to_string_pretty(record)?),
        None => fail("lookup did not finish."),
    }
}
