//! Employee lookup form.
//!
//! DESIGN
//! ======
//! A form controller ([`form::LookupForm`]) validates the entered name,
//! issues one call to the lookup endpoint through [`api::LookupService`],
//! and opens a dialog ([`render::DialogView`]) describing the result.
//! Three form revisions are supported; see [`validate::Revision`].

pub mod api;
pub mod config;
pub mod form;
pub mod record;
pub mod render;
pub mod validate;
