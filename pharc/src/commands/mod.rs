pub mod compile;

pub use compile::run as compile;
