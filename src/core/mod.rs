// Core module - interactive input and confirmation flows

pub mod auth; // Login credential collection and confirmation prompts
