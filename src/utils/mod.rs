pub mod clock;
pub mod dir;
pub mod input;
pub mod logging;
pub mod percentage;
pub mod time;
