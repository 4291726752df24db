/* src/loader/source/mod.rs */

mod file;
pub use file::{FileSource, TEMP_SUFFIX};
