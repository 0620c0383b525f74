// External I/O operations module
pub mod dbus; // Bus connection and service manager ownership watch
pub mod signals; // Unix signal handling
