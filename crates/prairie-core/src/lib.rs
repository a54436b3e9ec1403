pub mod carousel;
pub mod constants;
pub mod field;
pub mod gust;
pub mod lifecycle;
pub mod motion;
pub mod noise;
pub mod params;
pub mod pointer;
pub mod ridge;
pub mod rocks;
pub mod scene;
pub mod sprites;

pub use carousel::*;
pub use field::*;
pub use gust::*;
pub use lifecycle::*;
pub use motion::*;
pub use noise::*;
pub use params::*;
pub use ridge::*;
pub use rocks::*;
pub use scene::*;
pub use sprites::*;
