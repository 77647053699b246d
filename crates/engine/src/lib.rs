//! Session runtime - drives rounds in real time
//!
//! [`core`](word_scramble_core) knows the rules but never reads a clock or
//! talks to the network. This crate supplies both:
//!
//! - [`Session`]: owns the active round behind an async mutex and serialises
//!   starts, guesses, hints and ticks
//! - [`Ticker`]: the 1-second timer task, stopped and joined on every
//!   terminal transition before a new round may start
//! - [`Clock`]: `TokioClock` for play, `ManualClock` for deterministic tests
//! - [`MemoryBackend`]: scripted in-process collaborator
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use word_scramble_engine::{EngineConfig, ManualClock, MemoryBackend, Session};
//!
//! # tokio_test_block_on(async {
//! let backend = Arc::new(MemoryBackend::new("cats"));
//! let clock = Arc::new(ManualClock::new());
//! let (mut session, _events) = Session::new(backend, clock.clone(), EngineConfig::default());
//!
//! let scrambled = session.start(4, "alice").await.unwrap();
//! assert_eq!(scrambled.len(), 4);
//!
//! clock.advance(Duration::from_secs(3));
//! let report = session.submit_guess("cats").await.unwrap();
//! assert_eq!(report.score.map(|s| s.total), Some(27));
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Runtime::new().unwrap().block_on(f)
//! # }
//! ```

pub mod clock;
pub mod config;
pub mod events;
pub mod memory;
pub mod session;
pub mod summary;
pub mod ticker;

pub use word_scramble_core as core;
pub use word_scramble_types as types;

pub use clock::{Clock, ManualClock, TokioClock};
pub use config::EngineConfig;
pub use events::{drain, RoundEvent};
pub use memory::MemoryBackend;
pub use session::Session;
pub use summary::RoundSummary;
pub use ticker::Ticker;
