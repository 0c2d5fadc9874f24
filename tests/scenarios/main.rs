//! Scenario-based conversion tests

mod helpers;

mod environment;
mod invalid_steps;
mod job_groups;
mod shell_commands;
mod step_context;
mod whitelisted;
