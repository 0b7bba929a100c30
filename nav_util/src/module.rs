//! Cyclic module processing interface.
//!
//! Every cyclically-stepped piece of the navigation core (the path executor,
//! the movement helper) implements this so a host scheduler can drive them
//! uniformly, one call per physics tick.

/// A module's cyclic processing contract.
pub trait State {
    /// Data required during initialisation.
    type InitData;
    /// An error which can occur during initialisation.
    type InitError;

    /// Data required for cyclic processing.
    type InputData;
    /// Data produced by cyclic processing.
    type OutputData;
    /// An error which can occur during cyclic processing.
    type ProcError;

    /// Initialise the module.
    fn init(&mut self, init_data: Self::InitData) -> Result<(), Self::InitError>;

    /// Perform one tick of cyclic processing.
    fn proc(&mut self, input_data: &Self::InputData) -> Result<Self::OutputData, Self::ProcError>;
}
