pub mod counter;
pub mod sync_generator;
pub mod vga;
