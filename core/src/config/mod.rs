mod load;
mod types;

pub use load::{expand_path, get_dayplan_data_dir, load_default, load_from_path};
pub use types::*;
