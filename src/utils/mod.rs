pub mod validate;

pub use validate::validate_register_form;
