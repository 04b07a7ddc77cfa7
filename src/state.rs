// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::db::TimeSource;

#[derive(Clone)]
pub struct AppState {
    pub time: Arc<dyn TimeSource>,
}

impl AppState {
    pub fn new(time: impl TimeSource + 'static) -> Self {
        Self {
            time: Arc::new(time),
        }
    }
}
