//! Game scenes

pub mod gameplay;

pub use gameplay::GameplayScene;
