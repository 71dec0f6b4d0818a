//! Virtual game keys delivered by the input layer.
//!
//! Device mapping (touch, remote, keyboard) belongs to the presentation
//! layer; the simulation only ever sees these five keys.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKey {
    Left,
    Right,
    Up,
    Down,
    Fire,
}
