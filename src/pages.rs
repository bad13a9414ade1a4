pub mod form;
pub mod list;

pub use form::{FormMode, FormPage};
pub use list::{ListPage, DEFAULT_PAGE_SIZE};
