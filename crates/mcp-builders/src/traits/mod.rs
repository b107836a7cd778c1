pub mod prompt_traits;
pub mod resource_traits;
pub mod router_traits;
pub mod skill_traits;
pub mod tool_traits;

pub use prompt_traits::*;
pub use resource_traits::*;
pub use router_traits::*;
pub use skill_traits::*;
pub use tool_traits::*;
