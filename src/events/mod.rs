pub mod carousel;
pub mod keyboard;
pub mod pointer;
