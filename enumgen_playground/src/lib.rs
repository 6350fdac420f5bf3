//! Compiles the enums generated from `enums.json` and uses them in ordinary
//! serde models.

pub mod enums {
    include!(concat!(env!("OUT_DIR"), "/enums.rs"));
}

use enums::{Field, LoveStatus, MediaKind};
use serde::{Deserialize, Serialize};

/// A library track as exported by a media player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    pub kind: MediaKind,
    pub love: LoveStatus,
}

/// One clause of a smart playlist, keyed by the field it tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    pub field: Field,
    pub value: String,
}

impl Track {
    pub fn is_loved(&self) -> bool {
        self.love == enums::LoveStatus_LOVED
    }
}
