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

use clap::Parser;

use crate::cmd::drill::DrillOptions;
use crate::cmd::drill::start_drill;
use crate::cmd::lookup::lookup_word;
use crate::cmd::streak::print_streak;
use crate::error::Fallible;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Drill vocabulary in the browser.
    Drill {
        /// Comma-separated words to start with.
        words: Option<String>,
        /// Directory holding the configuration and the streak database.
        /// Defaults to the current directory.
        #[arg(long)]
        directory: Option<String>,
        /// The port to use for the web server.
        #[arg(long)]
        port: Option<u16>,
        /// Don't open the browser automatically.
        #[arg(long)]
        no_open: bool,
    },
    /// Look up a single word and print its definition as JSON.
    Lookup {
        /// The word to look up.
        word: String,
    },
    /// Print the review streak as JSON.
    Streak {
        /// Directory holding the streak database.
        #[arg(long)]
        directory: Option<String>,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Drill {
            words,
            directory,
            port,
            no_open,
        } => {
            start_drill(DrillOptions {
                words,
                directory,
                port,
                no_open,
            })
            .await
        }
        Command::Lookup { word } => lookup_word(&word).await,
        Command::Streak { directory } => print_streak(directory),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli() {
        Command::command().debug_assert();
    }

    #[test]
    fn test_parse_drill() {
        let cli = Command::try_parse_from(["wordcards", "drill", "cat, dog", "--port", "9000"]);
        match cli {
            Ok(Command::Drill {
                words,
                port,
                no_open,
                ..
            }) => {
                assert_eq!(words.as_deref(), Some("cat, dog"));
                assert_eq!(port, Some(9000));
                assert!(!no_open);
            }
            _ => panic!("expected the drill command"),
        }
    }
}
