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

use axum::Form;
use axum::extract::State;
use axum::response::Redirect;
use serde::Deserialize;

use crate::drill::state::ServerState;
use crate::error::Fallible;
use crate::lookup::fetcher::DefinitionFetcher;
use crate::types::timestamp::Timestamp;

#[derive(Debug, Deserialize, PartialEq)]
enum Action {
    Flip,
    Next,
    Previous,
    Retry,
    Add,
    End,
}

#[derive(Deserialize)]
pub struct FormData {
    action: Action,
    /// Only sent by the add form.
    #[serde(default)]
    words: String,
}

pub async fn post_handler<F: DefinitionFetcher>(
    State(state): State<ServerState<F>>,
    Form(form): Form<FormData>,
) -> Redirect {
    match action_handler(&state, form) {
        Ok(_) => {}
        Err(e) => {
            log::error!("{e}");
        }
    }
    Redirect::to("/")
}

fn action_handler<F: DefinitionFetcher>(state: &ServerState<F>, form: FormData) -> Fallible<()> {
    log::debug!("Action: {:?}", form.action);
    match form.action {
        Action::Flip => {
            let today = Timestamp::now().local_date();
            state.session().flip(today)?;
        }
        Action::Next => {
            state.session().go_next()?;
        }
        Action::Previous => {
            state.session().go_previous()?;
        }
        Action::Retry => {
            state.session().retry_current()?;
        }
        Action::Add => {
            let added = state.session().add_words(&form.words);
            if added == 0 {
                log::debug!("No words in input.");
            }
        }
        Action::End => {
            log::debug!("Session ended.");
            state.shutdown();
        }
    }
    Ok(())
}
