//! Corsair - ship boarding and piracy resolution for a space combat simulation

pub mod board;
pub mod core;
pub mod ship;
pub mod world;
