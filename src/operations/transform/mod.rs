mod duplicate;
mod scale;

pub use duplicate::Duplicate;
pub use scale::Scale;
