pub mod nested_filter;
pub use nested_filter::*;

pub mod select_query;
pub use select_query::*;

pub mod snippet;
pub use snippet::*;

pub mod highlighter;
pub use highlighter::*;
