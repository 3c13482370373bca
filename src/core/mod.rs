pub mod markup;
pub mod preview;
pub mod registry;
pub mod status;
