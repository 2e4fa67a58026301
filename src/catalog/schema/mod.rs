pub mod column_type;
pub use column_type::*;

pub mod column_info;
pub use column_info::*;

pub mod timestamp;
pub use timestamp::*;

pub mod table;
pub use table::*;
