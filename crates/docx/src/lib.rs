//! Filling WordprocessingML report templates.
//!
//! A [`DocxComposer`] opens a template package, substitutes the well-known
//! tokens, expands the recommended-actions placeholder into bullet paragraphs
//! and appends the evidence images. [`ensure_template`] keeps the on-disk
//! template current.

pub mod bootstrap;
pub mod builders;
mod composer;
mod error;
pub mod evidence;
pub mod expand;
pub mod substitute;
pub mod template;

pub use bootstrap::{
    classify_template, ensure_template, template_bytes, template_status, write_template, EnsureOutcome,
    TemplateStatus,
};
pub use composer::DocxComposer;
pub use error::DocxError;
pub use template::{template_package, TEMPLATE_SCHEMA_VERSION};
