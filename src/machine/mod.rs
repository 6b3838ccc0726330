pub mod generic;
pub mod modes;
