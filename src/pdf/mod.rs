//! PDF side of the pipeline: template loading, page drawing and assembly.

pub mod document;
pub mod fonts;
pub mod layout;
pub mod page_tree;
pub mod resources;
pub mod surface;
pub mod template;

pub use document::{AttestationRenderer, RenderedDocument};
pub use template::{Template, TemplateSource};
