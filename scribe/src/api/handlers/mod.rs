pub(crate) mod health;
pub(crate) mod recognize;

pub use health::health_check;
pub use recognize::recognize;
