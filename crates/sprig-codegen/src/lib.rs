//! Code generation from a design-tool selection to UI source code.
//!
//! This crate runs the sprig pipeline end to end: native scene nodes are
//! built into the IR forest and handed to one of the framework emitters.
//!
//! # Targets
//!
//! - `HTML` - inline-styled or class-based markup, optionally JSX
//! - `Tailwind` - utility-class markup snapped to the Tailwind scale
//! - `Flutter` - a Dart widget tree, as a snippet or a runnable app
//! - `SwiftUI` - a SwiftUI view body, as a snippet or a runnable app
//!
//! Every run also reports the distinct text styles and colors of the
//! selection.
//!
//! # Example
//!
//! ```ignore
//! use sprig_codegen::run;
//! use sprig_core::{Framework, Settings};
//!
//! let output = run(&selection, None, &Settings::for_framework(Framework::Tailwind))?;
//! for artifact in &output.artifacts {
//!     println!("{}\n{}", artifact.title, artifact.body);
//! }
//! ```

pub mod colors;
pub mod error;
pub mod format;
pub mod generators;
pub mod pipeline;
pub mod templates;
pub mod text_styles;

pub use error::{CodegenError, Result};
pub use generators::{
    generator_for, CodeGenerator, FlutterGenerator, HtmlGenerator, HtmlPreview, SwiftUIGenerator,
    TailwindGenerator,
};
pub use templates::TemplateEngine;
pub use text_styles::{aggregate_text_styles, TextStyleGroup};

pub use colors::{
    collect_colors, css_linear_gradient, gradient_conversions, palette_artifact,
    solid_conversions, LinearGradientConversion, SolidColorConversion, UsedColors, UsedGradient,
};
pub use pipeline::{build_ir, codegen_for_language, emit, run, safe_run, HostMessage, RunOutput};
