pub mod xdg_root;

pub use xdg_root::{config_home, data_home, default_directory_path, global_config_path};
