pub mod parameters;
pub mod price_path;
pub mod simulation_result;
