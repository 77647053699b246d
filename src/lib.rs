//! Word Scramble (workspace facade crate).
//!
//! Re-exports the member crates under one name so the runner, integration
//! tests and benches can use `word_scramble::{core,engine,client,input,types}`.

pub use word_scramble_client as client;
pub use word_scramble_core as core;
pub use word_scramble_engine as engine;
pub use word_scramble_input as input;
pub use word_scramble_types as types;
