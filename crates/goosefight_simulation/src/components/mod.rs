//! Общие value-типы арены
//!
//! Организация:
//! - facing: ориентация и сторона игрока (Facing, Side)
//! - draw_box: экранные прямоугольники спрайтов (DrawBox)

pub mod draw_box;
pub mod facing;

pub use draw_box::*;
pub use facing::*;
