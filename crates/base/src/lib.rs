mod epoch;
pub use epoch::*;

mod grid;
pub use grid::*;

pub mod logging;
pub use logging::{init_file_logger, init_stdout_logger};

mod rect;
pub use rect::*;

mod vec2;
pub use vec2::*;

// downstream crates log through base::log::*
pub use log;
