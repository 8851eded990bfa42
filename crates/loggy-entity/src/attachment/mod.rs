//! Image attachment entities.

pub mod model;
pub mod version;

pub use model::ImageAttachment;
pub use version::{ImageVersion, NewImage, StoredImage};
