/// Dataset loop and on-disk layout.
pub mod dataset;
/// The additive-mixing task generator.
pub mod generator;
/// Generated pairs and the generator capability trait.
pub mod pair;
