pub mod cleanup;
pub mod node;
pub mod parser;
