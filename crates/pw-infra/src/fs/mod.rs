pub mod app_dirs;

pub use app_dirs::{app_data_dir, images_dir, settings_path};
