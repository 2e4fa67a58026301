pub mod locale;
pub use locale::*;

pub mod schema_formatter;
pub use schema_formatter::*;

pub mod table_render;
pub use table_render::*;

pub mod stats;
pub use stats::*;
