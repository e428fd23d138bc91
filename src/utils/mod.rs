pub mod dir_scan;
pub mod hash;
pub mod layout;
