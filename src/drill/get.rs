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

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use maud::Markup;
use maud::html;

use crate::drill::state::ServerState;
use crate::drill::template::page_template;
use crate::lookup::fetcher::DefinitionFetcher;
use crate::session::CardView;
use crate::session::SessionView;
use crate::types::definition::FetchOutcome;

pub async fn get_handler<F: DefinitionFetcher>(
    State(state): State<ServerState<F>>,
) -> (StatusCode, Html<String>) {
    let view = state.session().view();
    let refresh = view
        .card
        .as_ref()
        .is_some_and(|card| card.outcome.is_pending());
    let html = page_template(render_session(&view), refresh);
    (StatusCode::OK, Html(html.into_string()))
}

pub async fn view_handler<F: DefinitionFetcher>(
    State(state): State<ServerState<F>>,
) -> Json<SessionView> {
    Json(state.session().view())
}

fn render_session(view: &SessionView) -> Markup {
    let streak = format!("{} day streak", view.streak);
    html! {
        div.root {
            div.header {
                h1 { "wordcards" }
                div.streak { (streak) }
            }
            div.card-container {
                @match &view.card {
                    Some(card) => {
                        (render_card(card))
                    }
                    None => {
                        p.empty { "Please enter some words to start." }
                    }
                }
            }
            div.controls {
                @if let Some(card) = &view.card {
                    form action="/" method="post" {
                        input id="previous" type="submit" name="action" value="Previous" title="Previous card. Shortcut: left arrow.";
                        @if card.outcome.is_failed() {
                            input id="retry" type="submit" name="action" value="Retry" title="Look the word up again.";
                        }
                        input id="flip" type="submit" name="action" value="Flip" title="Turn the card over. Shortcut: space.";
                        input id="next" type="submit" name="action" value="Next" title="Next card. Shortcut: right arrow.";
                    }
                }
                form.add action="/" method="post" {
                    label for="words" { "Enter words (comma-separated):" }
                    input id="words" type="text" name="words" placeholder="Enter words separated by commas";
                    input id="add" type="submit" name="action" value="Add";
                    div.spacer {}
                    input id="end" type="submit" name="action" value="End" title="End the session.";
                }
            }
        }
    }
}

fn render_card(card: &CardView) -> Markup {
    let (index, total) = card.position;
    let progress = format!("Card {index} of {total}");
    let content = match &card.outcome {
        FetchOutcome::Pending => html! {
            div.loading { "Loading..." }
        },
        FetchOutcome::Failed(e) => html! {
            div.error {
                p { "Failed to fetch word information" }
                p.reason { (e) }
            }
        },
        FetchOutcome::Resolved(record) => {
            if card.is_flipped {
                html! {
                    div.back {
                        @if let Some(pos) = &record.part_of_speech {
                            h3.part-of-speech { (pos) }
                        }
                        p.definition { (record.definition) }
                    }
                }
            } else {
                html! {
                    div.front {
                        h2.word { (card.word) }
                        @if let Some(phonetic) = &record.phonetic {
                            p.phonetic { (phonetic) }
                        }
                        @if let Some(url) = &record.audio_url {
                            audio controls src=(url) {}
                        }
                    }
                }
            }
        }
    };
    html! {
        div.card {
            div.card-header {
                h1 { (card.word) }
                div.progress {
                    @if card.revealed {
                        span.seen { "seen" }
                    }
                    (progress)
                }
            }
            div.card-content {
                (content)
            }
        }
    }
}
