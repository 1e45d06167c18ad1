pub mod artifact;
pub mod build;
pub mod change;
pub mod embed;
