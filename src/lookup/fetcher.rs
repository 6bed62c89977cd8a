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

use std::future::Future;

use crate::types::definition::DefinitionRecord;
use crate::types::definition::FetchError;
use crate::types::word::Word;

/// A source of word definitions.
///
/// Each call is one lookup: implementations do not cache, deduplicate, or
/// retry. That is the job of the definition cache.
pub trait DefinitionFetcher: Send + Sync + 'static {
    fn fetch(
        &self,
        word: &Word,
    ) -> impl Future<Output = Result<DefinitionRecord, FetchError>> + Send;
}
