pub mod authorize;
pub mod callback;

pub use authorize::authorize;
pub use callback::callback;
