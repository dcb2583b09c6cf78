/// Hold / transition / hold frame sequences.
pub mod builder;
