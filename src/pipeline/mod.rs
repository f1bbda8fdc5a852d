pub mod debounce;
pub mod epoch;
pub mod event;
pub mod session;
