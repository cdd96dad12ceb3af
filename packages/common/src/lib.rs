pub mod element;
pub mod error;
pub mod range;
pub mod result;

pub use element::*;
pub use error::*;
pub use range::*;
pub use result::*;
