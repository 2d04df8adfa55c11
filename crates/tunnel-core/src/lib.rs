pub mod animation;
pub mod camera;
pub mod clock;
pub mod config;
pub mod constants;
pub mod context;
pub mod debounce;
pub mod fade;
pub mod geometry;
pub mod scene;
pub mod session;

pub use animation::*;
pub use camera::*;
pub use clock::*;
pub use config::*;
pub use constants::*;
pub use context::*;
pub use debounce::*;
pub use fade::*;
pub use scene::*;
pub use session::*;
