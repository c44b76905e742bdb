pub mod coordinate;
pub mod floor;
pub mod room;
