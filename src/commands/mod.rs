pub mod change_package_name;
pub mod create;
pub mod feature;
pub mod flutter_layout;
pub mod init;
pub mod version;
