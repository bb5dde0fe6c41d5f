// Application layer: workflows composed from the engine and adapters.

pub mod batch;
