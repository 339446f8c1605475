// Engine test double
mod mock;
