pub mod takeover;
pub mod undo;
