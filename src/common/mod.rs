// Common constants shared by the agent, configuration and CLI
pub mod constants;
