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

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::Transaction;

use crate::error::Fallible;

/// A durable string-to-string store.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Fallible<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Fallible<()>;

    /// Write several keys at once. Either all of them are written or none.
    fn set_many(&self, pairs: &[(&str, &str)]) -> Fallible<()>;
}

/// A key/value store in an SQLite database.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(database_path: &str) -> Fallible<Self> {
        let mut conn = Connection::open(database_path)?;
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                log::debug!("Creating schema in {database_path}.");
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Fallible<Option<String>> {
        let sql = "select value from kv where key = ?;";
        let value: Option<String> = self
            .conn
            .query_row(sql, [key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Fallible<()> {
        self.conn.execute(UPSERT, (key, value))?;
        Ok(())
    }

    fn set_many(&self, pairs: &[(&str, &str)]) -> Fallible<()> {
        let tx = self.conn.unchecked_transaction()?;
        for &(key, value) in pairs {
            tx.execute(UPSERT, (key, value))?;
        }
        tx.commit()?;
        Ok(())
    }
}

const UPSERT: &str = "insert into kv (key, value) values (?, ?) on conflict (key) do update set value = excluded.value;";

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx.query_row(sql, ["kv"], |row| row.get(0))?;
    Ok(count > 0)
}

/// A store that lives only as long as the process. Clones share contents.
#[derive(Clone, Default)]
pub struct MemoryStore {
    map: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Fallible<Option<String>> {
        let map = self.map.lock().unwrap_or_else(|p| p.into_inner());
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Fallible<()> {
        let mut map = self.map.lock().unwrap_or_else(|p| p.into_inner());
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn set_many(&self, pairs: &[(&str, &str)]) -> Fallible<()> {
        let mut map = self.map.lock().unwrap_or_else(|p| p.into_inner());
        for &(key, value) in pairs {
            map.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }
}
