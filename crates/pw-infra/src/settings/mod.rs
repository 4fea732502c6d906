pub mod file_repo;
pub mod shared;

pub use file_repo::FileSettingsRepository;
pub use shared::SharedSettings;
