pub mod advisory;
pub mod category;
pub mod error;
pub mod measurement;
pub mod normalize;
pub mod presentation;
pub mod scorer;
pub mod uncertainty;
pub mod weights;

pub use advisory::*;
pub use category::*;
pub use error::*;
pub use measurement::*;
pub use normalize::*;
pub use presentation::*;
pub use scorer::*;
pub use uncertainty::*;
pub use weights::*;
