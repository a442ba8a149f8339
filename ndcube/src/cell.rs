/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::content::Content;
use crate::position::Position;

/// The atomic datum of a matrix: a content addressed by a position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub position: Position,
    pub content: Content,
}

impl Cell {
    pub fn new(position: impl Into<Position>, content: Content) -> Self {
        Self {
            position: position.into(),
            content,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.position, self.content)
    }
}
