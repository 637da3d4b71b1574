pub mod files;
pub mod settings;
pub mod store;

pub use files::{
    atomic_write, ensure_data_dir, get_data_dir, init_local_data_dir, log_file, read_bytes,
    read_file, store_file,
};
pub use settings::{
    load_activities, load_templates, prefers_dark_terminal, save_activities, save_templates,
    Settings,
};
pub use store::KvStore;
