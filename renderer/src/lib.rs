pub mod assemble;
pub mod data;
pub mod error;
pub mod merge;
pub mod page;
pub mod paths;
pub mod value;

pub use assemble::{AssemblyMode, assemble};
pub use data::DataMap;
pub use error::RenderError;
pub use merge::merge;
pub use page::{Page, PageOptions};
pub use paths::rewrite_paths;
pub use value::DataValue;
