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

use std::time::Duration;

use percent_encoding::AsciiSet;
use percent_encoding::CONTROLS;
use percent_encoding::utf8_percent_encode;
use reqwest::Client;
use reqwest::StatusCode;

use crate::error::Fallible;
use crate::lookup::fetcher::DefinitionFetcher;
use crate::lookup::schema::parse_entries;
use crate::types::definition::DefinitionRecord;
use crate::types::definition::FetchError;
use crate::types::word::Word;

/// Characters that must be escaped inside a single URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Looks words up over HTTP, one GET per word.
pub struct HttpFetcher {
    client: Client,
    /// Base URL; the word is appended as the last path segment.
    endpoint: String,
}

impl HttpFetcher {
    pub fn new(endpoint: &str, timeout: Duration) -> Fallible<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, word: &Word) -> String {
        let segment = utf8_percent_encode(word.as_str(), PATH_SEGMENT);
        format!("{}/{segment}", self.endpoint)
    }
}

impl DefinitionFetcher for HttpFetcher {
    async fn fetch(&self, word: &Word) -> Result<DefinitionRecord, FetchError> {
        let url = self.url(word);
        log::debug!("GET {url}");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        let status = response.status();
        // The public dictionary API answers unknown words with a 404.
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound);
        }
        if !status.is_success() {
            return Err(FetchError::Network(format!("unexpected status {status}")));
        }
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        parse_entries(word.as_str(), &body)
    }
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::extract::Path;
    use axum::http::StatusCode as AxumStatus;
    use axum::routing::get;
    use tokio::net::TcpListener;

    use super::*;

    async fn dictionary(Path(word): Path<String>) -> (AxumStatus, String) {
        match word.as_str() {
            "cat" => (
                AxumStatus::OK,
                r#"[{"word":"cat","phonetics":[{"text":"/kæt/","audio":"https://example.com/cat.mp3"}],"meanings":[{"partOfSpeech":"noun","definitions":[{"definition":"A feline."}]}]}]"#
                    .to_string(),
            ),
            "ice cream" => (
                AxumStatus::OK,
                r#"[{"word":"ice cream","meanings":[{"definitions":[{"definition":"A frozen dessert."}]}]}]"#
                    .to_string(),
            ),
            "empty" => (AxumStatus::OK, "[]".to_string()),
            "broken" => (AxumStatus::OK, r#"[{"word":"broken"}]"#.to_string()),
            "teapot" => (AxumStatus::IM_A_TEAPOT, "".to_string()),
            _ => (
                AxumStatus::NOT_FOUND,
                r#"{"title":"No Definitions Found"}"#.to_string(),
            ),
        }
    }

    async fn start_dictionary() -> Fallible<String> {
        let port = portpicker::pick_unused_port().expect("no free port");
        let bind = format!("127.0.0.1:{port}");
        let listener = TcpListener::bind(&bind).await?;
        let app = Router::new().route("/entries/{word}", get(dictionary));
        tokio::spawn(async move { axum::serve(listener, app).await });
        Ok(format!("http://{bind}/entries/"))
    }

    fn word(s: &str) -> Word {
        Word::new(s).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_outcomes() -> Fallible<()> {
        let endpoint = start_dictionary().await?;
        let fetcher = HttpFetcher::new(&endpoint, Duration::from_secs(5))?;

        let record = fetcher.fetch(&word("cat")).await.unwrap();
        assert_eq!(record.definition, "A feline.");
        assert_eq!(record.audio_url.as_deref(), Some("https://example.com/cat.mp3"));

        let record = fetcher.fetch(&word("ice cream")).await.unwrap();
        assert_eq!(record.word, "ice cream");

        assert_eq!(fetcher.fetch(&word("empty")).await, Err(FetchError::NotFound));
        assert_eq!(
            fetcher.fetch(&word("xyzzynotaword")).await,
            Err(FetchError::NotFound)
        );
        assert!(matches!(
            fetcher.fetch(&word("broken")).await,
            Err(FetchError::Malformed(_))
        ));
        assert!(matches!(
            fetcher.fetch(&word("teapot")).await,
            Err(FetchError::Network(_))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() -> Fallible<()> {
        let port = portpicker::pick_unused_port().expect("no free port");
        let fetcher = HttpFetcher::new(&format!("http://127.0.0.1:{port}"), Duration::from_secs(5))?;
        assert!(matches!(
            fetcher.fetch(&word("cat")).await,
            Err(FetchError::Network(_))
        ));
        Ok(())
    }

    #[test]
    fn test_url_escapes_word() -> Fallible<()> {
        let fetcher = HttpFetcher::new("https://example.com/en/", Duration::from_secs(1))?;
        assert_eq!(fetcher.url(&word("cat")), "https://example.com/en/cat");
        assert_eq!(
            fetcher.url(&word("a/b c?")),
            "https://example.com/en/a%2Fb%20c%3F"
        );
        Ok(())
    }
}
