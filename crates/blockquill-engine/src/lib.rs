pub mod editing;
pub mod image;
pub mod input;
pub mod io;
pub mod policy;
pub mod render;
pub mod session;

// Re-export key types for easier usage
pub use editing::*;
pub use image::{DataUrl, ImageError, ImageTicket};
pub use input::{KeyPress, Modifiers};
pub use io::*;
pub use policy::*;
pub use render::*;
pub use session::*;
