pub mod export;
pub mod roster_csv;
