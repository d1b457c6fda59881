pub mod look;

pub use look::LookRequest;
