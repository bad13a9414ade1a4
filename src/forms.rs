pub mod plan_builder;
pub mod translations;

pub use plan_builder::{Ceiling, ModuleGroup, PlanBuilder};
pub use translations::{TranslationForm, TranslationRow};
