//! # slsgen-renderer
//!
//! Typed model of the Serverless Framework descriptor and its YAML
//! emission. The runtime-conditional parts of the document are expressed
//! as an explicit [`FunctionLayout`] variant rather than template
//! branching, so output can be asserted structurally.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use slsgen_core::RawParams;
//! use slsgen_renderer::engine;
//!
//! fn render_demo(params: RawParams) {
//!     if let Ok(config) = params.validate() {
//!         if let Ok(yaml) = engine::render(&config) {
//!             println!("{} bytes", yaml.len());
//!         }
//!     }
//! }
//! ```

pub mod descriptor;
pub mod engine;
pub mod error;
pub mod layout;

pub use descriptor::{CfnRef, ServerlessDescriptor};
pub use engine::render;
pub use error::RenderError;
pub use layout::{FunctionDef, FunctionEvent, FunctionLayout};
