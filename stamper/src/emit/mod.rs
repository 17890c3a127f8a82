//! Write version information into build outputs.

pub mod flags;
pub use flags::flag_list;

pub mod summary;
pub use summary::summary;

pub mod template;
pub use template::{FieldValue, TemplateEmitter};
