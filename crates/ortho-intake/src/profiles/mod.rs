pub mod basic;
pub mod clinical;
pub mod comprehensive;
