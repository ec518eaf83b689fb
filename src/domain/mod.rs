pub mod sprint;
pub mod template;
pub mod announcement;
pub mod validation;

pub use sprint::*;
pub use template::*;
pub use announcement::*;
pub use validation::*;
