mod field;
mod label;
mod price;
pub(crate) mod repository;
mod root;

pub use field::{nullable, validate_not_blank};
pub use label::{Label, LabelCommand, LabelInput, LabelKind};
pub use price::validate_price;
pub use root::*;
