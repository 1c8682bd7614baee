// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared application services for avsc tools (config, render port, session).
//! Keeps loaders and rendering adapters thin and framework-agnostic.

pub mod config;
pub mod render_options;
pub mod render_port;
pub mod session;
