//! muxseq: drive tmux from declarative automation scripts.
//!
//! A script maps sequence names to windows, pane layouts and command steps.
//! The [`engine`] runs sequences against a [`driver::TerminalDriver`],
//! walking each step's keywords in a fixed order, threading variables
//! through shell text and following redirections between sequences.
//!
//! # Quick start
//!
//! ```no_run
//! use muxseq::driver::TmuxDriver;
//! use muxseq::engine::{Engine, EngineOptions};
//! use muxseq::script::load_script;
//! use muxseq::ui::{Renderer, StdinInput};
//!
//! # async fn example() {
//! let script = load_script("muxseq.yaml".as_ref()).unwrap();
//! let renderer = Renderer::new(true, false);
//! let mut input = StdinInput::new(true);
//! let mut engine = Engine::new(
//!     &script,
//!     TmuxDriver::new("tmux", false),
//!     &renderer,
//!     &mut input,
//!     EngineOptions::default(),
//! );
//! let code = muxseq::runner::run(&mut engine, &["build".to_string()]).await.unwrap();
//! std::process::exit(code);
//! # }
//! ```

pub mod build_info;
pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod runner;
pub mod script;
#[cfg(test)]
pub mod testsupport;
pub mod ui;
