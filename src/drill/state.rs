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

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use tokio::sync::oneshot;

use crate::session::SessionController;

pub struct ServerState<F> {
    pub mutable: Arc<Mutex<SessionController<F>>>,
    pub shutdown_tx: Arc<Mutex<Option<oneshot::Sender<()>>>>,
}

impl<F> Clone for ServerState<F> {
    fn clone(&self) -> Self {
        Self {
            mutable: self.mutable.clone(),
            shutdown_tx: self.shutdown_tx.clone(),
        }
    }
}

impl<F> ServerState<F> {
    pub fn session(&self) -> MutexGuard<'_, SessionController<F>> {
        self.mutable.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Ask the server to stop. Only the first call does anything.
    pub fn shutdown(&self) {
        let tx = self
            .shutdown_tx
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .take();
        if let Some(tx) = tx {
            let _ = tx.send(());
        }
    }
}
