
/// Run loop and hang detection.
pub mod simulator;
