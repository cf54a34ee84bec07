pub mod config;
pub mod coordinator;
pub mod domain;
pub mod mail;
pub mod page;
pub mod routes;
pub mod run;
pub mod startup;
pub mod store;
pub mod telemetry;
pub mod utils;
