pub mod building;
pub mod export;
pub mod grid;
pub mod rail;
pub mod rings;
pub mod stars;
pub mod track;
pub mod ui;
