//! # jenerator-renderer
//!
//! Tera-based engine that renders one pipeline file per config record, with
//! Jinja-style block whitespace control (`trim_blocks` + `lstrip_blocks`).
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use jenerator_core::{record, Settings};
//! use jenerator_renderer::Renderer;
//!
//! fn render_one(settings: &Settings, config: &Path) {
//!     let renderer = Renderer::new(settings);
//!     if let Ok(rec) = record::load(config) {
//!         match renderer.render(config, &rec) {
//!             Ok(text) => println!("{} bytes", text.len()),
//!             Err(e) => eprintln!("{e}"),
//!         }
//!     }
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod whitespace;

pub use engine::{resolve_template, Renderer, TemplateEngine, TemplateSource};
pub use error::RenderError;
