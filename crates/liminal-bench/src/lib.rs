pub mod cli;
pub mod report;
pub mod routes;
pub mod runner;
