pub mod filter;
mod models;
mod store;
mod validate;

pub use self::filter::CourseSelection;
pub use self::models::{Course, MenuItem, Price, UnknownCourse};
pub use self::store::{CourseAverages, MenuStore};
pub use self::validate::{Field, ValidationError, Validator};
