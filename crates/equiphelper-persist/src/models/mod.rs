pub mod turn;

pub use turn::Turn;
